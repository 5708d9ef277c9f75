//! Inline error shown in place of a chart or result whose request failed

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the stored error string with a retry hint
pub fn render_error_panel(frame: &mut Frame, area: Rect, title: &str, message: &str, retry_hint: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

    let body = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ✗ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(message.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            retry_hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Placeholder while the first response for a view is pending
pub fn render_empty_panel(frame: &mut Frame, area: Rect, title: &str, body: Vec<Span<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title));

    frame.render_widget(
        Paragraph::new(vec![Line::from(""), Line::from(body)])
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}
