//! Trends tab - average rent per city as a line chart

use crate::components::{
    render_detail, render_empty_panel, render_error_panel, render_tooltip, PointLayout, Spinner,
};
use crate::theme::StatusColor;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use rentboard_core::format::{format_brl, format_count};
use rentboard_core::view::RentalTrendsView;
use rentboard_core::{Dashboard, DisplayTrend};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use std::sync::Arc;
use tracing::debug;

const LINE_COLOR: Color = Color::Rgb(0x88, 0x84, 0xd8);

/// Trends tab state
#[derive(Debug, Default)]
pub struct TrendsTab {
    cursor: usize,
    hover: Option<usize>,
    layout: Option<PointLayout>,
    /// View revision the geometry was drawn for
    drawn_revision: u64,
}

impl TrendsTab {
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
                let len = dashboard.trends().trends().len();
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
                self.hover = None;
            }
            KeyCode::Enter => {
                dashboard.trends_mut().select_at(self.cursor);
            }
            KeyCode::Esc => dashboard.trends_mut().selection.close(),
            KeyCode::Char('r') => {
                let dashboard = Arc::clone(dashboard);
                tokio::spawn(async move {
                    dashboard.refresh_rental_trends().await;
                });
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, dashboard: &Arc<Dashboard>) {
        let Some(layout) = self.layout else {
            return;
        };
        if dashboard.trends().revision() != self.drawn_revision {
            self.hover = None;
            return;
        }
        let hit = layout.nearest(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => self.hover = hit,
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = hit {
                    self.cursor = index;
                    if let Some(trend) = dashboard.trends_mut().select_at(index) {
                        debug!(index, city = %trend.city, "Trend point clicked");
                    }
                }
            }
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, view: &RentalTrendsView, spinner: &Spinner) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(8)])
            .split(area);

        let trends = view.trends();
        self.cursor = self.cursor.min(trends.len().saturating_sub(1));
        if self.hover.is_some_and(|i| i >= trends.len()) {
            self.hover = None;
        }
        self.layout = None;

        render_header(frame, chunks[0], view, spinner);

        let state = view.state();
        if let Some(error) = state.error() {
            render_error_panel(frame, chunks[1], "Rental Trends", error, "Press r to retry");
            return;
        }
        if trends.is_empty() {
            let body = if state.is_loading() {
                spinner.with_label("Loading rental trends...")
            } else {
                vec![Span::styled("No trend data", Style::default().fg(Color::DarkGray))]
            };
            render_empty_panel(frame, chunks[1], "Rental Trends", body);
            return;
        }

        self.render_chart(frame, chunks[1], trends);
        self.drawn_revision = view.revision();

        match view.selection.surface(frame.area().width) {
            Some(surface) => {
                if let Some(item) = view.selection.visible() {
                    render_detail(
                        frame,
                        chunks[1],
                        surface,
                        &item.city,
                        LINE_COLOR,
                        detail_lines(item),
                    );
                }
            }
            None => {
                let index = self.hover.unwrap_or(self.cursor);
                if let Some(trend) = trends.get(index) {
                    render_tooltip(frame, chunks[1], LINE_COLOR, tooltip_lines(trend));
                }
            }
        }
    }

    fn render_chart(&mut self, frame: &mut Frame, area: Rect, trends: &[DisplayTrend]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                " Rental Trends in Brazilian Cities ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);

        let points: Vec<(f64, f64)> = trends
            .iter()
            .enumerate()
            .map(|(i, t)| (i as f64, t.average_rent))
            .collect();
        let focus = self.hover.unwrap_or(self.cursor);
        let highlight: Vec<(f64, f64)> = points.get(focus).copied().into_iter().collect();

        let y_max = y_upper_bound(trends);
        let y_labels: Vec<String> = [0.0, y_max / 2.0, y_max].into_iter().map(format_brl).collect();
        let x_labels: Vec<String> = trends.iter().map(|t| t.city.clone()).collect();
        let x_max = (trends.len().saturating_sub(1)).max(1) as f64;

        let left = label_column_width(&y_labels, x_labels.first(), inner.width);

        let datasets = vec![
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(LINE_COLOR))
                .data(&points),
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(StatusColor::Warning.to_color()))
                .data(&highlight),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
        self.layout = Some(PointLayout::from_chart_area(inner, left, trends.len()));
    }
}

fn render_header(frame: &mut Frame, area: Rect, view: &RentalTrendsView, spinner: &Spinner) {
    let mut spans = vec![
        Span::raw("Cities: "),
        Span::styled(
            view.trends().len().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  average monthly rent", Style::default().fg(Color::DarkGray)),
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
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Top of the y axis: 10% headroom over the highest average
fn y_upper_bound(trends: &[DisplayTrend]) -> f64 {
    let max = trends
        .iter()
        .map(|t| t.average_rent)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Columns the chart reserves left of the y axis. The first x label hangs
/// left of the axis too, and the whole gutter is capped at a third of the width.
fn label_column_width(y_labels: &[String], first_x: Option<&String>, width: u16) -> u16 {
    let y = y_labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let x = first_x
        .map(|l| (l.chars().count() as u16).saturating_sub(1))
        .unwrap_or(0);
    y.max(x).min(width / 3)
}

fn tooltip_lines(trend: &DisplayTrend) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            trend.city.clone(),
            Style::default().fg(LINE_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Average  {}", format_brl(trend.average_rent))),
        Line::from(format!("Median   {}", format_brl(trend.median_rent))),
        Line::from(format!("Min      {}", format_brl(trend.min_rent))),
        Line::from(format!("Max      {}", format_brl(trend.max_rent))),
        Line::from(format!("Listings {}", format_count(trend.listing_count))),
    ]
}

fn detail_lines(trend: &DisplayTrend) -> Vec<Line<'static>> {
    let row = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<16}", name), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    vec![
        row("Average rent", format_brl(trend.average_rent)),
        row("Median rent", format_brl(trend.median_rent)),
        row("Range", format!("{} - {}", format_brl(trend.min_rent), format_brl(trend.max_rent))),
        row("Listings", format_count(trend.listing_count)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};
    use crossterm::event::KeyModifiers;
    use rentboard_core::view::TrackedView;
    use rentboard_core::{RawTrendRecord, ServiceClient, ServiceConfig, TopN};

    fn record(city: &str, average: f64, count: u64) -> RawTrendRecord {
        RawTrendRecord {
            city: city.to_string(),
            average_rent: average,
            median_rent: average * 0.9,
            min_rent: 450.0,
            max_rent: average * 4.0,
            listing_count: count,
        }
    }

    fn sample_records() -> Vec<RawTrendRecord> {
        vec![
            record("São Paulo", 4652.264, 5887),
            record("Rio de Janeiro", 3232.9, 1501),
            record("Campinas", 1999.995, 853),
        ]
    }

    fn loaded_view() -> RentalTrendsView {
        let mut view = RentalTrendsView::new();
        let id = view.begin();
        view.resolve(id, Ok(sample_records()));
        view
    }

    fn dashboard_with(records: Vec<RawTrendRecord>) -> Arc<Dashboard> {
        let client = ServiceClient::new(ServiceConfig::default()).unwrap();
        let dashboard = Arc::new(Dashboard::new(client, TopN::Ten));
        {
            let mut view = dashboard.trends_mut();
            let id = view.begin();
            view.resolve(id, Ok(records));
        }
        dashboard
    }

    fn draw_dashboard(tab: &mut TrendsTab, dashboard: &Dashboard, width: u16) -> String {
        let view = dashboard.trends();
        draw(tab, &view, width)
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(tab: &mut TrendsTab, view: &RentalTrendsView, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 30)).unwrap();
        terminal
            .draw(|f| tab.render(f, f.area(), view, &Spinner::new()))
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_label_column_width() {
        let y = vec!["R$ 0,00".to_string(), "R$ 5.117,49".to_string()];
        assert_eq!(label_column_width(&y, Some(&"Rio de Janeiro".to_string()), 120), 13);
        assert_eq!(label_column_width(&y, Some(&"SP".to_string()), 120), 11);
        assert_eq!(label_column_width(&y, None, 21), 7);
    }

    #[test]
    fn test_y_upper_bound() {
        assert_eq!(y_upper_bound(&[]), 1.0);
        let trends = loaded_view().trends().to_vec();
        assert!((y_upper_bound(&trends) - 4652.26 * 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_render_chart_with_tooltip() {
        let mut tab = TrendsTab::new();
        let view = loaded_view();
        let text = draw(&mut tab, &view, 120);

        assert!(text.contains("Rental Trends in Brazilian Cities"));
        assert!(text.contains("Cities: 3"));
        assert!(text.contains("Average  R$ 4.652,26"));
        assert!(text.contains("Listings 5.887"));
        assert!(tab.layout.is_some_and(|l| l.count == 3));
    }

    #[test]
    fn test_render_sheet_on_narrow_viewport() {
        let mut tab = TrendsTab::new();
        let mut view = loaded_view();
        view.select_at(2);
        let text = draw(&mut tab, &view, 80);

        assert!(text.contains("Average rent    R$ 2.000,00"));
        assert!(text.contains("Esc close"));
        // The tooltip gives way to the detail surface
        assert!(!text.contains("Average  R$ 4.652,26"));
    }

    #[test]
    fn test_hover_tracks_nearest_point() {
        let dashboard = dashboard_with(sample_records());
        let mut tab = TrendsTab::new();
        // Points at columns 20, 40, 60
        tab.layout = Some(PointLayout {
            plot: Rect::new(20, 5, 41, 15),
            count: 3,
        });
        tab.drawn_revision = dashboard.trends().revision();

        let at = |column| MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        tab.handle_mouse(at(33), &dashboard);
        assert_eq!(tab.hover, Some(1));
        tab.handle_mouse(at(58), &dashboard);
        assert_eq!(tab.hover, Some(2));
        tab.handle_mouse(at(5), &dashboard);
        assert_eq!(tab.hover, None);
    }

    #[test]
    fn test_click_opens_point_under_pointer() {
        let dashboard = dashboard_with(sample_records());
        let mut tab = TrendsTab::new();
        draw_dashboard(&mut tab, &dashboard, 120);
        let layout = tab.layout.unwrap();

        tab.handle_mouse(left_click(layout.column_of(1), layout.plot.y + 1), &dashboard);
        assert_eq!(tab.cursor(), 1);
        {
            let view = dashboard.trends();
            assert!(view.selection.is_open());
            assert_eq!(view.selection.visible(), Some(&view.trends()[1]));
            assert_eq!(view.trends()[1].city, "Rio de Janeiro");
        }

        let text = draw_dashboard(&mut tab, &dashboard, 120);
        assert!(text.contains("Average rent    R$ 3.232,90"));
    }

    #[test]
    fn test_click_on_geometry_from_before_refresh_is_ignored() {
        let dashboard = dashboard_with(sample_records());
        let mut tab = TrendsTab::new();
        draw_dashboard(&mut tab, &dashboard, 120);
        let layout = tab.layout.unwrap();
        let click = left_click(layout.column_of(2), layout.plot.y + 1);

        // Two cities instead of three, not drawn yet
        {
            let mut view = dashboard.trends_mut();
            let id = view.begin();
            view.resolve(
                id,
                Ok(vec![
                    record("Porto Alegre", 2337.77, 1193),
                    record("Belo Horizonte", 3664.13, 1258),
                ]),
            );
        }
        tab.handle_mouse(click, &dashboard);
        assert!(!dashboard.trends().selection.is_open());
        assert_eq!(tab.cursor(), 0);

        draw_dashboard(&mut tab, &dashboard, 120);
        let layout = tab.layout.unwrap();
        tab.handle_mouse(left_click(layout.column_of(1), layout.plot.y + 1), &dashboard);
        let view = dashboard.trends();
        assert_eq!(view.selection.visible().map(|t| t.city.as_str()), Some("Belo Horizonte"));
    }
}
