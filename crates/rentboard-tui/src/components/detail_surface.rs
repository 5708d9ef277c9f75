//! Drill-down detail for a selected chart element
//!
//! The popover is a centered modal over the chart; the sheet is anchored to
//! the bottom of the content area and spans its full width. Exactly one is
//! drawn per frame, picked from the live viewport width.

use rentboard_core::DetailSurface;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const POPOVER_WIDTH: u16 = 56;

/// Render `lines` on the given surface inside `area`
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    surface: DetailSurface,
    title: &str,
    accent: Color,
    lines: Vec<Line<'static>>,
) {
    let rect = surface_rect(area, surface, lines.len() as u16);
    let hint = Line::from(Span::styled(
        " Esc close ",
        Style::default().fg(Color::DarkGray),
    ));

    let block = match surface {
        DetailSurface::Popover => Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title_alignment(Alignment::Center),
        DetailSurface::Sheet => Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(accent)),
    }
    .title(Span::styled(
        format!(" {} ", title),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ))
    .title_bottom(hint);

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        rect,
    );
}

/// Where each surface lands for `content_lines` lines of body text
pub fn surface_rect(area: Rect, surface: DetailSurface, content_lines: u16) -> Rect {
    match surface {
        DetailSurface::Popover => {
            let width = POPOVER_WIDTH.min(area.width);
            let height = (content_lines + 4).min(area.height);
            Rect {
                x: area.x + (area.width - width) / 2,
                y: area.y + (area.height - height) / 2,
                width,
                height,
            }
        }
        DetailSurface::Sheet => {
            let height = (content_lines + 3).min(area.height);
            Rect {
                x: area.x,
                y: area.y + area.height - height,
                width: area.width,
                height,
            }
        }
    }
}
