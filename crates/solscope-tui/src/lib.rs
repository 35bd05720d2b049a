//! solscope-tui - TUI frontend for solscope using Ratatui

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
use solscope_core::WalletStore;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Run the TUI application
pub async fn run(store: Arc<WalletStore>, data_dir: PathBuf) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // App state starts in loading mode
    let mut app = App::new(store.clone(), data_dir);
    let mut ui = ui::Ui::new();

    // Signal when the initial leaderboard pass completes
    let (load_tx, mut load_rx) = oneshot::channel();

    let store_clone = store.clone();
    tokio::spawn(async move {
        // Warm the leaderboard over previously seen wallets
        if let Err(e) = store_clone.refresh_leaderboard().await {
            tracing::warn!(error = %e, "Initial leaderboard refresh failed");
        }
        let _ = load_tx.send(());
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
    load_rx: &mut oneshot::Receiver<()>,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        if load_rx.try_recv().is_ok() {
            app.complete_loading();
        }

        // Check for data events
        app.poll_events();

        terminal.draw(|f| ui.render(f, app))?;

        // Handle input with timeout for event polling
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Global keys first; unhandled keys go to the active tab
                    let handled = app.handle_key(key.code);
                    if !handled && !app.is_loading {
                        ui.handle_tab_key(key.code, app);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
