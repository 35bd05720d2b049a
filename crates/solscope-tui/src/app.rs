//! TUI application state and key handling

use crate::components::Spinner;
use solscope_core::preferences::{ColorScheme, Preferences};
use solscope_core::{DataEvent, WalletStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Active tab in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Explorer,
    Resume,
    Leaderboard,
    Graph,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Explorer, Tab::Resume, Tab::Leaderboard, Tab::Graph]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Explorer => 0,
            Tab::Resume => 1,
            Tab::Leaderboard => 2,
            Tab::Graph => 3,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Explorer,
            1 => Tab::Resume,
            2 => Tab::Leaderboard,
            3 => Tab::Graph,
            _ => Tab::Explorer,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Explorer => "Explorer",
            Tab::Resume => "Resume",
            Tab::Leaderboard => "Leaderboard",
            Tab::Graph => "Graph",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Explorer => '1',
            Tab::Resume => '2',
            Tab::Leaderboard => '3',
            Tab::Graph => '4',
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Explorer => "◎",
            Tab::Resume => "▤",
            Tab::Leaderboard => "♛",
            Tab::Graph => "◉",
        }
    }
}

/// TUI application state
pub struct App {
    /// Wallet store reference
    pub store: Arc<WalletStore>,

    /// Event receiver for data updates
    pub event_rx: broadcast::Receiver<DataEvent>,

    /// Currently active tab
    pub active_tab: Tab,

    /// Wallet the Resume and Graph tabs show
    pub selected_wallet: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Initial load still running
    pub is_loading: bool,
    pub loading_message: Option<String>,

    /// A wallet fetch is in flight
    pub fetching: bool,

    /// Whether a tab currently captures plain characters (address entry)
    pub input_active: bool,

    /// Error/info message shown in the status bar
    pub status_message: Option<String>,

    /// Whether data needs refresh
    pub needs_refresh: bool,

    pub color_scheme: ColorScheme,
    pub spinner: Spinner,

    /// Where preferences are persisted
    data_dir: PathBuf,
}

impl App {
    pub fn new(store: Arc<WalletStore>, data_dir: PathBuf) -> Self {
        let event_rx = store.event_bus().subscribe();
        let preferences = Preferences::load(&data_dir);
        store.set_sort_key(preferences.default_sort);

        Self {
            store,
            event_rx,
            active_tab: Tab::Explorer,
            selected_wallet: None,
            should_quit: false,
            is_loading: true,
            loading_message: Some("Analyzing known wallets...".to_string()),
            fetching: false,
            input_active: false,
            status_message: None,
            needs_refresh: true,
            color_scheme: preferences.color_scheme,
            spinner: Spinner::new(),
            data_dir,
        }
    }

    pub fn complete_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    /// Handle keyboard input.
    /// Returns true if the key was handled as a global key.
    pub fn handle_key(&mut self, key: crossterm::event::KeyCode) -> bool {
        use crossterm::event::KeyCode;

        // While an address is being typed, only Esc reaches the global layer
        if self.input_active {
            return false;
        }

        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('c') => {
                self.toggle_color_scheme();
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
            KeyCode::Char(c) if ('1'..='4').contains(&c) => {
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

    fn toggle_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.toggle();
        let preferences = Preferences {
            color_scheme: self.color_scheme,
            default_sort: self.store.sort_key(),
        };
        if let Err(e) = preferences.save(&self.data_dir) {
            tracing::warn!(error = %e, "Failed to save preferences");
        }
    }

    /// Start analyzing a wallet in the background.
    pub fn submit_wallet(&mut self, address: String) {
        self.selected_wallet = Some(address.clone());
        self.fetching = true;
        self.status_message = None;

        let store = self.store.clone();
        tokio::spawn(async move {
            let _ = store.analyze_wallet(&address).await;
        });
    }

    /// Check for data events (non-blocking)
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                DataEvent::StatsFetched(_)
                | DataEvent::RegistryUpdated
                | DataEvent::LeaderboardUpdated
                | DataEvent::GraphBuilt(_) => {
                    self.fetching = false;
                    self.needs_refresh = true;
                }
                DataEvent::FetchFailed { address, message } => {
                    self.fetching = false;
                    self.status_message =
                        Some(format!("Fetch failed for {}: {}", address, message));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solscope_core::{RpcClient, RpcConfig, WalletRegistry};
    use tempfile::tempdir;

    fn app(dir: &std::path::Path) -> App {
        let client = RpcClient::new(RpcConfig::default()).unwrap();
        let registry = WalletRegistry::load(dir).unwrap();
        App::new(Arc::new(WalletStore::new(client, registry)), dir.to_path_buf())
    }

    #[tokio::test]
    async fn test_tab_cycling_wraps() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());

        for _ in 0..Tab::all().len() {
            app.next_tab();
        }
        assert_eq!(app.active_tab, Tab::Explorer);

        app.prev_tab();
        assert_eq!(app.active_tab, Tab::Graph);
    }

    #[tokio::test]
    async fn test_digit_shortcut_switches_tab() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());

        assert!(app.handle_key(crossterm::event::KeyCode::Char('3')));
        assert_eq!(app.active_tab, Tab::Leaderboard);
    }

    #[tokio::test]
    async fn test_global_keys_disabled_during_input() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        app.input_active = true;

        assert!(!app.handle_key(crossterm::event::KeyCode::Char('q')));
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_fetch_failed_sets_status() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());

        app.store.event_bus().publish(DataEvent::FetchFailed {
            address: "w".to_string(),
            message: "boom".to_string(),
        });
        app.poll_events();

        assert!(app.status_message.as_deref().unwrap().contains("boom"));
        assert!(!app.fetching);
    }
}
