//! Predict tab - property form and the prediction card

use crate::components::{render_empty_panel, render_error_panel, Spinner};
use crate::theme::StatusColor;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rentboard_core::format::format_brl;
use rentboard_core::selection::is_desktop;
use rentboard_core::view::PredictionView;
use rentboard_core::{FormField, PropertyAttributes, PropertyForm};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const LABEL_WIDTH: usize = 22;

/// Predict tab state
#[derive(Debug, Default)]
pub struct PredictTab {
    form: PropertyForm,
    focused: FormField,
    /// Keystrokes go into the focused text field
    editing: bool,
}

impl PredictTab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn focused(&self) -> FormField {
        self.focused
    }

    pub fn form(&self) -> &PropertyForm {
        &self.form
    }

    /// Handle a key; returns the attributes to submit when the form validated
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PropertyAttributes> {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.submit();
        }

        if self.editing {
            match key.code {
                KeyCode::Char(c) => self.form.push_char(self.focused, c),
                KeyCode::Backspace => self.form.pop_char(self.focused),
                KeyCode::Enter | KeyCode::Esc => self.editing = false,
                KeyCode::Tab | KeyCode::Down => self.move_focus(self.focused.next()),
                KeyCode::BackTab | KeyCode::Up => self.move_focus(self.focused.prev()),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.focused = self.focused.next(),
            KeyCode::Up | KeyCode::Char('k') => self.focused = self.focused.prev(),
            KeyCode::Enter => {
                if self.focused.is_toggle() {
                    self.form.toggle(self.focused);
                } else {
                    self.editing = true;
                }
            }
            KeyCode::Char(' ') => self.form.toggle(self.focused),
            KeyCode::Char('s') => return self.submit(),
            _ => {}
        }
        None
    }

    /// Keep editing across text fields; stop on switches
    fn move_focus(&mut self, field: FormField) {
        self.focused = field;
        self.editing = !field.is_toggle();
    }

    fn submit(&mut self) -> Option<PropertyAttributes> {
        self.editing = false;
        let mut submitted = None;
        if !self.form.submit(|attrs| submitted = Some(attrs)) {
            // Jump to the first offending field, in display order
            if let Some(field) = self.form.errors().keys().next() {
                self.focused = *field;
            }
        }
        submitted
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, view: &PredictionView, spinner: &Spinner) {
        let chunks = if is_desktop(area.width) {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area)
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(14), Constraint::Length(8)])
                .split(area)
        };

        self.render_form(frame, chunks[0]);
        self.render_result(frame, chunks[1], view, spinner);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                " Property Details ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));

        let mut lines = Vec::new();
        for &field in FormField::all() {
            lines.push(self.field_line(field));
            if let Some(error) = self.form.error(field) {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("✗ {}", error),
                        Style::default().fg(StatusColor::Error.to_color()),
                    ),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[ Predict Rental Price ]  Ctrl+S",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));

        let hint = if self.editing {
            "Type to edit │ Enter/Esc done │ Tab/↑↓ next field"
        } else {
            "↑↓ move │ Enter edit │ Space toggle │ s submit"
        };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn field_line(&self, field: FormField) -> Line<'static> {
        let focused = field == self.focused;
        let has_error = self.form.error(field).is_some();

        let marker = if focused { "▸ " } else { "  " };
        let label_style = match (focused, has_error) {
            (_, true) => Style::default()
                .fg(StatusColor::Error.to_color())
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default()
                .fg(StatusColor::Warning.to_color())
                .add_modifier(Modifier::BOLD),
            (false, false) => Style::default().add_modifier(Modifier::BOLD),
        };

        let value = match self.form.flag(field) {
            Some(on) => {
                let text = if on { "[x] Yes" } else { "[ ] No" };
                Span::styled(text, Style::default().fg(if on { Color::Green } else { Color::Gray }))
            }
            None => {
                let text = self.form.text(field).unwrap_or("").to_string();
                if focused && self.editing {
                    Span::styled(format!("{}▏", text), Style::default().fg(Color::White).bg(Color::DarkGray))
                } else if text.is_empty() {
                    Span::styled("·····", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(text, Style::default().fg(Color::White))
                }
            }
        };

        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
            value,
        ])
    }

    fn render_result(&self, frame: &mut Frame, area: Rect, view: &PredictionView, spinner: &Spinner) {
        let state = view.state();

        if state.is_loading() {
            render_empty_panel(frame, area, "Prediction", spinner.with_label("Predicting..."));
            return;
        }

        if let Some(error) = state.error() {
            render_error_panel(frame, area, "Prediction", error, "Fix the inputs or press Ctrl+S to retry");
            return;
        }

        let Some(text) = view.prediction_text() else {
            render_empty_panel(
                frame,
                area,
                "Prediction",
                vec![Span::styled(
                    "Fill in the form and press Ctrl+S to predict",
                    Style::default().fg(Color::DarkGray),
                )],
            );
            return;
        };

        let accent = StatusColor::Important.to_color();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                " Predicted Rental Price ",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                text,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "estimated total monthly cost",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        if let Some(request) = view.last_request() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "{} · {} m² · {} rooms · HOA {}",
                    request.city,
                    request.area,
                    request.rooms,
                    format_brl(request.hoa)
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        if let Some(updated) = state.updated_at() {
            lines.push(Line::from(Span::styled(
                format!("updated {}", updated.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Center),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};
    use rentboard_core::view::TrackedView;
    use rentboard_core::Prediction;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(tab: &mut PredictTab, text: &str) {
        for c in text.chars() {
            tab.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_keyboard_fill_and_submit() {
        let mut tab = PredictTab::new();
        tab.handle_key(press(KeyCode::Enter));
        assert!(tab.is_editing());
        type_text(&mut tab, "São Paulo");

        for value in ["50", "2", "1", "1", "3"] {
            tab.handle_key(press(KeyCode::Tab));
            type_text(&mut tab, value);
        }
        // Tab onto the first switch stops editing
        tab.handle_key(press(KeyCode::Tab));
        assert_eq!(tab.focused(), FormField::Animal);
        assert!(!tab.is_editing());
        tab.handle_key(press(KeyCode::Char(' ')));

        tab.handle_key(press(KeyCode::Down));
        tab.handle_key(press(KeyCode::Down));
        for value in ["300", "100", "50"] {
            tab.handle_key(press(KeyCode::Enter));
            type_text(&mut tab, value);
            tab.handle_key(press(KeyCode::Enter));
            tab.handle_key(press(KeyCode::Down));
        }

        let attrs = tab
            .handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .expect("valid form submits");
        assert_eq!(attrs.city, "São Paulo");
        assert_eq!(attrs.floor, 3.0);
        assert!(attrs.animal);
        assert!(!attrs.furniture);
        assert_eq!(attrs.fire_insurance, 50.0);
    }

    #[test]
    fn test_invalid_submit_focuses_first_error() {
        let mut tab = PredictTab::new();
        tab.handle_key(press(KeyCode::Down));
        tab.handle_key(press(KeyCode::Down));
        assert!(tab.handle_key(press(KeyCode::Char('s'))).is_none());
        assert_eq!(tab.focused(), FormField::City);
        assert_eq!(tab.form().errors().len(), 9);
    }

    #[test]
    fn test_render_errors_and_card() {
        let mut tab = PredictTab::new();
        tab.handle_key(press(KeyCode::Char('s')));

        let mut view = PredictionView::new();
        let id = view.begin();
        view.resolve(id, Ok(Prediction { total_monthly_cost: 2345.67 }));

        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal
            .draw(|f| tab.render(f, f.area(), &view, &Spinner::new()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("City is required"));
        assert!(text.contains("Valid fire insurance amount is required"));
        assert!(text.contains("Predicted Rental Price"));
        assert!(text.contains("R$ 2345.67"));
    }
}
