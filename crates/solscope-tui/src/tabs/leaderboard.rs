//! Leaderboard tab - ranked table over every registered wallet

use crate::app::App;
use crate::theme::{BaseColors, ScoreTierColor, StatusColor};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use solscope_core::{ColorScheme, CoreError, LeaderboardEntry, SortKey};

/// Leaderboard tab state
pub struct LeaderboardTab {
    table_state: TableState,
}

impl LeaderboardTab {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, app: &mut App) {
        match key {
            KeyCode::Char('r') => {
                app.fetching = true;
                let store = app.store.clone();
                tokio::spawn(async move {
                    // Explicit refresh bypasses the TTL cache
                    store.clear_caches();
                    match store.refresh_leaderboard().await {
                        Ok(_) | Err(CoreError::RefreshInProgress) => {}
                        Err(e) => tracing::warn!(error = %e, "Leaderboard refresh failed"),
                    }
                });
            }
            KeyCode::Char('s') => {
                app.store.set_sort_key(app.store.sort_key().next());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.store.leaderboard().len();
                if len > 0 {
                    let next = match self.table_state.selected() {
                        Some(i) if i + 1 < len => i + 1,
                        Some(i) => i,
                        None => 0,
                    };
                    self.table_state.select(Some(next));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = self.table_state.selected() {
                    self.table_state.select(Some(i.saturating_sub(1)));
                }
            }
            KeyCode::Enter => {
                // Jump to the selected wallet in the Explorer
                if let Some(i) = self.table_state.selected() {
                    if let Some(entry) = app.store.leaderboard().get(i) {
                        app.submit_wallet(entry.wallet.clone());
                        app.active_tab = crate::app::Tab::Explorer;
                    }
                }
            }
            _ => {}
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        entries: &[LeaderboardEntry],
        sort_key: SortKey,
        scheme: ColorScheme,
    ) {
        let title = format!(
            " Leaderboard · {} · {} wallets ",
            sort_key.label(),
            entries.len()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                title,
                Style::default().fg(BaseColors::fg(scheme)),
            ));

        if entries.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let hint = Paragraph::new(Line::from(Span::styled(
                "No wallets analyzed yet. Press 'r' to refresh.",
                Style::default().fg(BaseColors::muted(scheme)),
            )));
            frame.render_widget(hint, inner);
            return;
        }

        let header = Row::new(
            ["#", "Wallet", "Txs", "Tokens", "NFTs", "Age (days)", "Score"]
                .into_iter()
                .map(|h| {
                    Cell::from(Span::styled(
                        h,
                        Style::default()
                            .fg(StatusColor::Focus.to_color(scheme))
                            .add_modifier(Modifier::BOLD),
                    ))
                }),
        );

        let rows: Vec<Row> = entries
            .iter()
            .map(|e| {
                let score_color = ScoreTierColor::from_score(e.score).to_color(scheme);
                Row::new(vec![
                    Cell::from(e.rank.to_string()),
                    Cell::from(solscope_core::models::shorten_address(&e.wallet)),
                    Cell::from(e.txs.to_string()),
                    Cell::from(e.tokens.to_string()),
                    Cell::from(e.nfts.to_string()),
                    Cell::from(e.age_days.to_string()),
                    Cell::from(Span::styled(
                        format!("{:.1}", e.score),
                        Style::default().fg(score_color),
                    )),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(StatusColor::Focus.to_color(scheme))
                .fg(ratatui::style::Color::Black),
        );

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

impl Default for LeaderboardTab {
    fn default() -> Self {
        Self::new()
    }
}
