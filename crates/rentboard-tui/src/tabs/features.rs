//! Features tab - ranked feature-importance bar chart with drill-down

use crate::components::{
    render_detail, render_empty_panel, render_error_panel, render_tooltip, BarLayout, Spinner,
};
use crate::theme::{hex_color, StatusColor};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use rentboard_core::format::format_importance;
use rentboard_core::view::FeatureImportanceView;
use rentboard_core::{Dashboard, DisplayFeature, TopN};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;
use tracing::debug;

const MAX_BAR_WIDTH: u16 = 12;
const BAR_GAP: u16 = 1;
/// Importance is drawn in permille so small values still get a visible bar
const BAR_SCALE: f64 = 1000.0;

/// Features tab state
#[derive(Debug, Default)]
pub struct FeaturesTab {
    /// Keyboard cursor (bar index)
    cursor: usize,
    /// Bar under the mouse pointer
    hover: Option<usize>,
    /// Bar geometry from the last frame
    layout: Option<BarLayout>,
    /// View revision the geometry was drawn for
    drawn_revision: u64,
}

impl FeaturesTab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: KeyCode, dashboard: &Arc<Dashboard>) {
        match key {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
                self.hover = None;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let len = dashboard.features().features().len();
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
                self.hover = None;
            }
            KeyCode::Enter => {
                dashboard.features_mut().select_at(self.cursor);
            }
            KeyCode::Esc => dashboard.features_mut().selection.close(),
            KeyCode::F(1) => self.change_top_n(TopN::Five, dashboard),
            KeyCode::F(2) => self.change_top_n(TopN::Ten, dashboard),
            KeyCode::F(3) => self.change_top_n(TopN::Fifteen, dashboard),
            KeyCode::Char('t') => {
                let next = dashboard.features().top_n().next();
                self.change_top_n(next, dashboard);
            }
            KeyCode::Char('r') => spawn_refresh(dashboard),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, dashboard: &Arc<Dashboard>) {
        let Some(layout) = self.layout else {
            return;
        };
        // Geometry from a frame drawn before the bars changed
        if dashboard.features().revision() != self.drawn_revision {
            self.hover = None;
            return;
        }
        let hit = layout.bar_at(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => self.hover = hit,
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = hit {
                    self.cursor = index;
                    let mut view = dashboard.features_mut();
                    if let Some(feature) = view.select_at(index) {
                        debug!(index, label = %feature.label, "Feature bar clicked");
                    }
                }
            }
            _ => {}
        }
    }

    fn change_top_n(&mut self, top_n: TopN, dashboard: &Arc<Dashboard>) {
        if dashboard.set_top_n(top_n) {
            self.hover = None;
            spawn_refresh(dashboard);
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        view: &FeatureImportanceView,
        spinner: &Spinner,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(8)])
            .split(area);

        self.render_header(frame, chunks[0], view, spinner);

        let features = view.features();
        self.cursor = self.cursor.min(features.len().saturating_sub(1));
        if self.hover.is_some_and(|i| i >= features.len()) {
            self.hover = None;
        }
        self.layout = None;

        let state = view.state();
        if let Some(error) = state.error() {
            render_error_panel(frame, chunks[1], "Feature Importance", error, "Press r to retry");
            return;
        }
        if features.is_empty() {
            let body = if state.is_loading() {
                spinner.with_label("Loading feature importance...")
            } else {
                vec![Span::styled("No feature data", Style::default().fg(Color::DarkGray))]
            };
            render_empty_panel(frame, chunks[1], "Feature Importance", body);
            return;
        }

        self.render_chart(frame, chunks[1], features);
        self.drawn_revision = view.revision();

        // Detail surface replaces the tooltip while open
        match view.selection.surface(frame.area().width) {
            Some(surface) => {
                if let Some(item) = view.selection.visible() {
                    let rank = features.iter().position(|f| f == item).map(|i| i + 1);
                    render_detail(
                        frame,
                        chunks[1],
                        surface,
                        &item.label,
                        hex_color(&item.color),
                        detail_lines(item, rank),
                    );
                }
            }
            None => {
                let index = self.hover.unwrap_or(self.cursor);
                if let Some(feature) = features.get(index) {
                    render_tooltip(frame, chunks[1], hex_color(&feature.color), tooltip_lines(feature));
                }
            }
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, view: &FeatureImportanceView, spinner: &Spinner) {
        let mut spans = vec![
            Span::raw("Showing: "),
            Span::styled(
                view.top_n().display(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("[F1:5 F2:10 F3:15 t:cycle]", Style::default().fg(Color::DarkGray)),
        ];

        if view.state().is_loading() {
            spans.push(Span::raw("  "));
            spans.extend(spinner.with_label("refreshing"));
        } else if let Some(updated) = view.state().updated_at() {
            spans.push(Span::styled(
                format!("  updated {}", updated.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Left),
            area,
        );
    }

    fn render_chart(&mut self, frame: &mut Frame, area: Rect, features: &[DisplayFeature]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                " Feature Importance ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        let layout = BarLayout::fit(inner, features.len(), MAX_BAR_WIDTH, BAR_GAP);

        let bars: Vec<Bar> = features
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let color = hex_color(&feature.color);
                let label_style = if i == self.cursor {
                    Style::default()
                        .fg(StatusColor::Warning.to_color())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Bar::default()
                    .value(scaled(feature.importance))
                    .text_value(format_importance(feature.importance))
                    .label(Line::styled(
                        fit_label(&feature.label, layout.bar_width),
                        label_style,
                    ))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(layout.bar_width)
            .bar_gap(layout.gap);

        frame.render_widget(chart, area);
        self.layout = Some(layout);
    }
}

fn spawn_refresh(dashboard: &Arc<Dashboard>) {
    let dashboard = Arc::clone(dashboard);
    tokio::spawn(async move {
        dashboard.refresh_feature_importance().await;
    });
}

fn scaled(importance: f64) -> u64 {
    (importance.max(0.0) * BAR_SCALE).round() as u64
}

/// Trim a label to the bar width, marking the cut with an ellipsis
fn fit_label(label: &str, width: u16) -> String {
    let width = width as usize;
    if label.chars().count() <= width {
        return label.to_string();
    }
    if width <= 1 {
        return label.chars().take(width).collect();
    }
    let mut cut: String = label.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

fn tooltip_lines(feature: &DisplayFeature) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            feature.label.clone(),
            Style::default()
                .fg(hex_color(&feature.color))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Importance: {}", format_importance(feature.importance))),
        Line::from(Span::styled(
            feature.description.clone(),
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn detail_lines(feature: &DisplayFeature, rank: Option<usize>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("Importance  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_importance(feature.importance),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ])];
    if let Some(rank) = rank {
        lines.push(Line::from(vec![
            Span::styled("Rank        ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("#{}", rank)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(feature.description.clone()));
    lines
}
