//! Braille spinner shown while a view has a request in flight

use ratatui::{
    style::{Color, Style},
    text::Span,
};
use std::time::{Duration, Instant};

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const COLOR: Color = Color::Cyan;

#[derive(Debug)]
pub struct Spinner {
    current_frame: usize,
    last_update: Instant,
    frame_duration: Duration,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            current_frame: 0,
            last_update: Instant::now(),
            frame_duration: Duration::from_millis(80),
        }
    }

    /// Advance the animation if a frame's worth of time has passed (call once per draw)
    pub fn tick(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_update) >= self.frame_duration {
            self.current_frame = (self.current_frame + 1) % FRAMES.len();
            self.last_update = now;
        }
    }

    pub fn render(&self) -> Span<'static> {
        Span::styled(FRAMES[self.current_frame], Style::default().fg(COLOR))
    }

    /// `⠋ Loading feature importance...` style line fragment
    pub fn with_label(&self, label: &str) -> Vec<Span<'static>> {
        vec![
            self.render(),
            Span::raw(" "),
            Span::styled(label.to_string(), Style::default().fg(Color::Gray)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frame_stays_in_range() {
        let mut spinner = Spinner::new();
        for _ in 0..50 {
            spinner.tick();
            assert!(spinner.current_frame < FRAMES.len());
        }
    }

    #[test]
    fn test_with_label() {
        let spinner = Spinner::new();
        let spans = spinner.with_label("Predicting...");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));
        assert_eq!(spans[2].content, "Predicting...");
    }
}
