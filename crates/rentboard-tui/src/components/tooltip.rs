//! Hover tooltip pinned to the top-right corner of a chart

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_tooltip(frame: &mut Frame, chart: Rect, border: Color, lines: Vec<Line<'static>>) {
    let Some(rect) = tooltip_rect(chart, &lines) else {
        return;
    };

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        ),
        rect,
    );
}

/// `None` when the chart is too small to host the box
fn tooltip_rect(chart: Rect, lines: &[Line]) -> Option<Rect> {
    let content_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = (content_width + 2).min(chart.width.saturating_sub(2));
    let height = lines.len() as u16 + 2;
    if chart.width < 12 || height + 2 > chart.height {
        return None;
    }

    Some(Rect {
        x: chart.x + chart.width - width - 1,
        y: chart.y + 1,
        width,
        height,
    })
}
