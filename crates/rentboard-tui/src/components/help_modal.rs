//! Help modal listing keybindings for the active tab

use crate::app::Tab;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const GLOBAL_BINDINGS: &[(&str, &str)] = &[
    ("q / Ctrl+C", "Quit"),
    ("?", "Toggle this help"),
    ("Tab", "Next tab"),
    ("Shift+Tab", "Previous tab"),
    ("1-3", "Jump to tab (1=Predict, 2=Features, 3=Trends)"),
];

fn tab_bindings(tab: Tab) -> &'static [(&'static str, &'static str)] {
    match tab {
        Tab::Predict => &[
            ("↑/↓ j/k", "Move between fields"),
            ("Enter", "Edit field / flip switch"),
            ("Space", "Flip switch"),
            ("Esc", "Stop editing"),
            ("Ctrl+S / s", "Predict rental price"),
        ],
        Tab::Features => &[
            ("←/→ h/l", "Move between bars"),
            ("Enter / click", "Open feature details"),
            ("Esc", "Close details"),
            ("F1 F2 F3", "Show top 5 / 10 / 15"),
            ("t", "Cycle top-N"),
            ("r", "Refresh"),
        ],
        Tab::Trends => &[
            ("←/→ h/l", "Move between cities"),
            ("Enter / click", "Open city details"),
            ("Esc", "Close details"),
            ("r", "Refresh"),
        ],
    }
}

#[derive(Debug, Default)]
pub struct HelpModal {
    visible: bool,
}

impl HelpModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, active_tab: Tab) {
        if !self.visible {
            return;
        }

        let lines = build_help_content(active_tab);
        let width = 64.min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let modal_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                " Help - Keybindings ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            modal_area,
        );
    }
}

fn section(title: &str, bindings: &[(&str, &str)], lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled(
        format!("{}:", title),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for (keys, action) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<15}", keys), Style::default().fg(Color::Cyan)),
            Span::raw(action.to_string()),
        ]));
    }
    lines.push(Line::from(""));
}

fn build_help_content(active_tab: Tab) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    section("Global", GLOBAL_BINDINGS, &mut lines);
    section(active_tab.name(), tab_bindings(active_tab), &mut lines);
    lines.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(" to close", Style::default().fg(Color::DarkGray)),
    ]));
    lines
}
