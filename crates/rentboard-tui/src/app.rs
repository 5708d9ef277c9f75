//! TUI application state

use crate::components::{HelpModal, Spinner, Toast, ToastManager};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rentboard_core::{Dashboard, DashboardEvent, Resolution};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

/// Active tab in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Predict,
    Features,
    Trends,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Predict, Tab::Features, Tab::Trends]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Predict => 0,
            Tab::Features => 1,
            Tab::Trends => 2,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            1 => Tab::Features,
            2 => Tab::Trends,
            _ => Tab::Predict,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Predict => "Predict",
            Tab::Features => "Features",
            Tab::Trends => "Trends",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Predict => '1',
            Tab::Features => '2',
            Tab::Trends => '3',
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Predict => "◆",
            Tab::Features => "▥",
            Tab::Trends => "∿",
        }
    }
}

/// TUI application state
pub struct App {
    pub dashboard: Arc<Dashboard>,

    /// Dashboard events (request outcomes)
    pub event_rx: broadcast::Receiver<DashboardEvent>,

    pub active_tab: Tab,

    pub should_quit: bool,

    /// Persistent warning shown in the status bar
    pub status_message: Option<String>,

    /// True until the startup fetches have settled
    pub initial_load_pending: bool,

    pub toast_manager: ToastManager,
    pub help_modal: HelpModal,
    pub spinner: Spinner,
}

impl App {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        let event_rx = dashboard.event_bus().subscribe();

        Self {
            dashboard,
            event_rx,
            active_tab: Tab::Predict,
            should_quit: false,
            status_message: None,
            initial_load_pending: true,
            toast_manager: ToastManager::new(),
            help_modal: HelpModal::new(),
            spinner: Spinner::new(),
        }
    }

    /// Handle global keys. Returns true if the key was consumed.
    ///
    /// While a text field is being edited only Ctrl+C is global; every other
    /// key belongs to the field.
    pub fn handle_key(&mut self, key: KeyEvent, text_input_active: bool) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        if self.help_modal.is_visible() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.help_modal.hide();
            }
            return true;
        }

        if text_input_active {
            return false;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('?') => {
                self.help_modal.toggle();
                true
            }
            KeyCode::Tab => {
                self.next_tab();
                true
            }
            KeyCode::BackTab => {
                self.prev_tab();
                true
            }
            KeyCode::Char(c) if ('1'..='3').contains(&c) => {
                let idx = (c as usize) - ('1' as usize);
                self.active_tab = Tab::from_index(idx);
                true
            }
            _ => false,
        }
    }

    fn next_tab(&mut self) {
        let idx = self.active_tab.index();
        self.active_tab = Tab::from_index((idx + 1) % Tab::all().len());
    }

    fn prev_tab(&mut self) {
        let idx = self.active_tab.index();
        self.active_tab = Tab::from_index((idx + Tab::all().len() - 1) % Tab::all().len());
    }

    /// Drain dashboard events into toasts (non-blocking)
    pub fn poll_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    if matches!(event, DashboardEvent::FeaturesLoaded(_) | DashboardEvent::TrendsLoaded(_))
                        && self.initial_load_pending
                    {
                        // Startup fetches are summarized once in complete_initial_load
                        continue;
                    }
                    self.toast_manager.push(Toast::from_event(&event));
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "Event receiver lagged");
                }
                Err(_) => break,
            }
        }
    }

    /// Startup fetches settled
    pub fn complete_initial_load(&mut self, features: &Resolution, trends: &Resolution) {
        self.initial_load_pending = false;

        let failed = |r: &Resolution| matches!(r, Resolution::Failed(_));
        if failed(features) && failed(trends) {
            self.status_message = Some(format!(
                "Service unavailable at {}",
                self.dashboard.client().config().base_url()
            ));
        } else {
            self.status_message = None;
            if !failed(features) && !failed(trends) {
                self.toast_manager.push(Toast::info(format!(
                    "Connected to {}",
                    self.dashboard.client().config().base_url()
                )));
            }
        }
    }
}
