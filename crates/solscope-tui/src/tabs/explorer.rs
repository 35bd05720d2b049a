//! Explorer tab - enter a wallet and see its stats at a glance

use crate::app::App;
use crate::components::AddressInput;
use crate::theme::{AgeColor, BaseColors, ScoreTierColor, StatusColor};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use solscope_core::models::WalletAge;
use solscope_core::{ColorScheme, WalletStats};

/// Explorer tab state
pub struct ExplorerTab {
    pub input: AddressInput,
}

impl ExplorerTab {
    pub fn new() -> Self {
        Self {
            input: AddressInput::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, app: &mut App) {
        if self.input.active {
            if let Some(address) = self.input.handle_key(key) {
                app.submit_wallet(address);
            }
            return;
        }

        match key {
            KeyCode::Char('e') | KeyCode::Char('/') => {
                self.input.clear();
                self.input.activate();
            }
            KeyCode::Char('r') => {
                if let Some(address) = app.selected_wallet.clone() {
                    app.fetching = true;
                    let store = app.store.clone();
                    tokio::spawn(async move {
                        let _ = store.refresh_wallet(&address).await;
                    });
                }
            }
            _ => {}
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        stats: Option<&WalletStats>,
        fetching: bool,
        scheme: ColorScheme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Address input
                Constraint::Length(7), // Stats cards
                Constraint::Min(0),    // Token detail
            ])
            .split(area);

        self.input.render(frame, chunks[0], scheme);

        match stats {
            Some(stats) => {
                self.render_stats_row(frame, chunks[1], stats, scheme);
                self.render_tokens(frame, chunks[2], stats, scheme);
            }
            None => {
                let message = if fetching {
                    "Fetching wallet data..."
                } else {
                    "Press 'e' to enter a wallet address"
                };
                let hint = Paragraph::new(Line::from(Span::styled(
                    message,
                    Style::default().fg(BaseColors::muted(scheme)),
                )))
                .alignment(Alignment::Center);
                frame.render_widget(hint, chunks[1]);
            }
        }
    }

    fn render_stats_row(
        &self,
        frame: &mut Frame,
        area: Rect,
        stats: &WalletStats,
        scheme: ColorScheme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let age_color = match stats.age {
            WalletAge::Unknown => StatusColor::Neutral.to_color(scheme),
            WalletAge::Days(d) => AgeColor::from_days(d).to_color(scheme),
        };
        let score = stats.score();

        self.render_stat_card(
            frame,
            chunks[0],
            "◆ Transactions",
            &stats.transaction_count.to_string(),
            StatusColor::Focus.to_color(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[1],
            "◷ Age",
            &stats.age.to_string(),
            age_color,
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[2],
            "● Tokens",
            &stats.token_count().to_string(),
            StatusColor::Success.to_color(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[3],
            "▣ NFTs",
            &stats.nft_count.to_string(),
            StatusColor::Warning.to_color(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[4],
            "♛ Score",
            &format!("{:.1}", score),
            ScoreTierColor::from_score(score).to_color(scheme),
            scheme,
        );
    }

    fn render_stat_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        value: &str,
        color: Color,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default().fg(color),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value_widget = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);

        let centered = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(1),
                Constraint::Percentage(40),
            ])
            .split(inner);

        frame.render_widget(value_widget, centered[1]);
    }

    fn render_tokens(
        &self,
        frame: &mut Frame,
        area: Rect,
        stats: &WalletStats,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                " Holdings ",
                Style::default().fg(BaseColors::fg(scheme)),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if stats.tokens.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No token holdings",
                Style::default().fg(BaseColors::muted(scheme)),
            )));
            frame.render_widget(empty, inner);
            return;
        }

        let lines: Vec<Line> = stats
            .tokens
            .iter()
            .take(inner.height as usize)
            .map(|t| {
                let symbol = t.symbol.as_deref().unwrap_or("(unknown)");
                Line::from(vec![
                    Span::styled(
                        format!("{:<12}", symbol),
                        Style::default().fg(StatusColor::Success.to_color(scheme)),
                    ),
                    Span::styled(
                        format!("{:>16.4}  ", t.amount),
                        Style::default().fg(BaseColors::fg(scheme)),
                    ),
                    Span::styled(
                        t.mint.clone(),
                        Style::default().fg(BaseColors::muted(scheme)),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for ExplorerTab {
    fn default() -> Self {
        Self::new()
    }
}
