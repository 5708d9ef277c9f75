//! Toast notifications for request outcomes

use rentboard_core::format::format_prediction;
use rentboard_core::DashboardEvent;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Error,
    Info,
}

impl ToastType {
    pub fn color(&self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Error => Color::Red,
            Self::Info => Color::Cyan,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Success)
    }

    /// Errors linger longer than successes
    pub fn error(message: impl Into<String>) -> Self {
        let mut toast = Self::new(message, ToastType::Error);
        toast.duration = Duration::from_secs(5);
        toast
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Info)
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    /// Toast for a dashboard event
    pub fn from_event(event: &DashboardEvent) -> Self {
        match event {
            DashboardEvent::FeaturesLoaded(n) => {
                Self::success(format!("Feature importance loaded ({} features)", n))
            }
            DashboardEvent::TrendsLoaded(n) => {
                Self::success(format!("Rental trends loaded ({} cities)", n))
            }
            DashboardEvent::PredictionReady(total) => {
                Self::success(format!("Predicted rent: {}", format_prediction(*total)))
            }
            DashboardEvent::RequestFailed { view, message } => {
                Self::error(format!("{}: {}", view.name(), message))
            }
        }
    }
}

/// Stack of live toasts, newest at the bottom
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    const MAX_VISIBLE: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn clear_expired(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.clear_expired();
        if self.toasts.is_empty() {
            return;
        }

        let skip = self.toasts.len().saturating_sub(Self::MAX_VISIBLE);
        let visible = &self.toasts[skip..];

        let toast_height: u16 = 3;
        // Keep clear of the status bar
        let mut y = area
            .height
            .saturating_sub(visible.len() as u16 * toast_height + 2);

        for toast in visible {
            let width = (toast.message.chars().count() + 6).min(area.width as usize) as u16;
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(width) / 2,
                y: area.y + y,
                width,
                height: toast_height.min(area.height),
            };
            render_single_toast(frame, toast_area, toast);
            y += toast_height;
        }
    }
}

fn render_single_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let color = toast.toast_type.color();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let content = Line::from(vec![
        Span::styled(
            format!("{} ", toast.toast_type.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(toast.message.as_str(), Style::default().fg(Color::White)),
    ]);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}
