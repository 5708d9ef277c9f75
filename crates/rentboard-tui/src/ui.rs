//! UI rendering and per-tab input routing

use crate::app::{App, Tab};
use crate::tabs::{FeaturesTab, PredictTab, TrendsTab};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::sync::Arc;
use tracing::debug;

/// Tab widgets, owned by the render loop
#[derive(Debug, Default)]
pub struct Ui {
    predict: PredictTab,
    features: FeaturesTab,
    trends: TrendsTab,
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while keystrokes belong to a form field
    pub fn text_input_active(&self, app: &App) -> bool {
        app.active_tab == Tab::Predict && self.predict.is_editing()
    }

    /// Route a key the global handler did not consume to the active tab
    pub fn handle_tab_key(&mut self, key: KeyEvent, app: &mut App) {
        match app.active_tab {
            Tab::Predict => {
                if let Some(attrs) = self.predict.handle_key(key) {
                    debug!(city = %attrs.city, "Submitting prediction");
                    let dashboard = Arc::clone(&app.dashboard);
                    tokio::spawn(async move {
                        dashboard.predict(attrs).await;
                    });
                }
            }
            Tab::Features => self.features.handle_key(key.code, &app.dashboard),
            Tab::Trends => self.trends.handle_key(key.code, &app.dashboard),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, app: &mut App) {
        if app.help_modal.is_visible() {
            return;
        }
        match app.active_tab {
            Tab::Features => self.features.handle_mouse(mouse, &app.dashboard),
            Tab::Trends => self.trends.handle_mouse(mouse, &app.dashboard),
            Tab::Predict => {}
        }
    }

    /// Render the full UI
    pub fn render(&mut self, frame: &mut Frame, app: &mut App) {
        let size = frame.area();

        if app.dashboard.is_loading() {
            app.spinner.tick();
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header + tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(size);

        self.render_header(frame, chunks[0], app.active_tab);
        self.render_tab_content(frame, chunks[1], app);
        self.render_status_bar(frame, chunks[2], app);

        app.help_modal.render(frame, size, app.active_tab);
        app.toast_manager.render(frame, size);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, active: Tab) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14), // Logo
                Constraint::Min(0),     // Tabs
            ])
            .split(inner);

        let logo = Paragraph::new(Line::from(vec![
            Span::styled("◈ ", Style::default().fg(Color::Cyan)),
            Span::styled("rentboard", Style::default().fg(Color::White).bold()),
        ]));
        frame.render_widget(logo, chunks[0]);

        let titles: Vec<Line> = Tab::all()
            .iter()
            .map(|t| {
                let style = if *t == active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(Span::styled(
                    format!(" {} {} {} ", t.icon(), t.shortcut(), t.name()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(active.index())
            .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));
        frame.render_widget(tabs, chunks[1]);
    }

    fn render_tab_content(&mut self, frame: &mut Frame, area: Rect, app: &App) {
        let spinner = &app.spinner;
        match app.active_tab {
            Tab::Predict => {
                let view = app.dashboard.prediction();
                self.predict.render(frame, area, &view, spinner);
            }
            Tab::Features => {
                let view = app.dashboard.features();
                self.features.render(frame, area, &view, spinner);
            }
            Tab::Trends => {
                let view = app.dashboard.trends();
                self.trends.render(frame, area, &view, spinner);
            }
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, app: &App) {
        let status = if let Some(ref msg) = app.status_message {
            Line::from(vec![
                Span::styled(" ⚠ ", Style::default().fg(Color::Yellow).bold()),
                Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)),
            ])
        } else {
            let hint = match app.active_tab {
                Tab::Predict if self.predict.is_editing() => "type to edit │ Enter/Esc done │ Ctrl+S predict",
                Tab::Predict => "↑↓ field │ Enter edit │ Space toggle │ Ctrl+S predict",
                Tab::Features => "←→ bar │ Enter detail │ F1-F3/t top-N │ r refresh",
                Tab::Trends => "←→ city │ Enter detail │ r refresh",
            };

            Line::from(vec![
                Span::styled(
                    format!(" ● {} ", app.dashboard.client().config().base_url()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled("│", Style::default().fg(Color::DarkGray)),
                Span::styled(" q", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" quit ", Style::default().fg(Color::DarkGray)),
                Span::styled("│", Style::default().fg(Color::DarkGray)),
                Span::styled(" ?", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" help ", Style::default().fg(Color::DarkGray)),
                Span::styled("│", Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {}", hint), Style::default().fg(Color::DarkGray)),
            ])
        };

        let bar = Paragraph::new(status).style(Style::default().bg(Color::Black));
        frame.render_widget(bar, area);
    }
}
