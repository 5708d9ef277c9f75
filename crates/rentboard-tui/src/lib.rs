//! rentboard-tui - TUI frontend for rentboard using Ratatui

pub mod app;
pub mod components;
pub mod tabs;
pub mod theme;
pub mod ui;

pub use app::App;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use rentboard_core::{Dashboard, Resolution};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::info;

/// Run the TUI application
pub async fn run(dashboard: Arc<Dashboard>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(dashboard.clone());
    let mut ui = ui::Ui::new();

    // Both analytic views fetch concurrently on mount
    let (load_tx, mut load_rx) = oneshot::channel();
    let loader = dashboard.clone();
    tokio::spawn(async move {
        let outcome = tokio::join!(
            loader.refresh_feature_importance(),
            loader.refresh_rental_trends()
        );
        let _ = load_tx.send(outcome);
    });

    let result = run_loop(&mut terminal, &mut app, &mut ui, &mut load_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    ui: &mut ui::Ui,
    load_rx: &mut oneshot::Receiver<(Resolution, Resolution)>,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        if app.initial_load_pending {
            if let Ok((features, trends)) = load_rx.try_recv() {
                info!(?features, ?trends, "Initial load settled");
                app.complete_initial_load(&features, &trends);
            }
        }

        app.poll_events();

        terminal.draw(|f| ui.render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let editing = ui.text_input_active(app);
                    let handled = app.handle_key(key, editing);
                    if !handled {
                        ui.handle_tab_key(key, app);
                    }
                }
                Event::Mouse(mouse) => ui.handle_mouse(mouse, app),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
