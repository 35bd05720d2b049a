//! Resume tab - shareable summary card for the selected wallet

use crate::app::App;
use crate::theme::{BaseColors, ScoreTierColor, StatusColor};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use solscope_core::models::shorten_address;
use solscope_core::{render_resume_svg, render_resume_text, write_resume, ColorScheme, WalletStats};

/// Resume tab state
pub struct ResumeTab;

impl ResumeTab {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&mut self, key: KeyCode, app: &mut App) {
        let Some(address) = app.selected_wallet.clone() else {
            return;
        };
        let Some(stats) = app.store.stats(&address) else {
            return;
        };

        match key {
            KeyCode::Char('s') => {
                let path = std::path::PathBuf::from(format!(
                    "resume-{}.svg",
                    shorten_address(&address).replace("...", "-")
                ));
                app.status_message = match write_resume(&path, &render_resume_svg(&stats)) {
                    Ok(()) => Some(format!("Saved {}", path.display())),
                    Err(e) => Some(format!("Save failed: {}", e)),
                };
            }
            KeyCode::Char('t') => {
                let path = std::path::PathBuf::from(format!(
                    "resume-{}.txt",
                    shorten_address(&address).replace("...", "-")
                ));
                app.status_message = match write_resume(&path, &render_resume_text(&stats)) {
                    Ok(()) => Some(format!("Saved {}", path.display())),
                    Err(e) => Some(format!("Save failed: {}", e)),
                };
            }
            _ => {}
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        stats: Option<&WalletStats>,
        scheme: ColorScheme,
    ) {
        let Some(stats) = stats else {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Analyze a wallet in the Explorer tab first",
                Style::default().fg(BaseColors::muted(scheme)),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(hint, area);
            return;
        };

        // Center a fixed-size card
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(12),
                Constraint::Min(1),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(4),
                Constraint::Length(52),
                Constraint::Min(4),
            ])
            .split(vertical[1]);

        self.render_card(frame, horizontal[1], stats, scheme);
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, stats: &WalletStats, scheme: ColorScheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(StatusColor::Important.to_color(scheme)))
            .title(Span::styled(
                " Wallet Resume ",
                Style::default()
                    .fg(StatusColor::Important.to_color(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let score = stats.score();
        let label = |s: &str| {
            Span::styled(
                format!("  {:<14}", s),
                Style::default().fg(BaseColors::muted(scheme)),
            )
        };
        let value =
            |s: String| Span::styled(s, Style::default().fg(BaseColors::fg(scheme)));

        let lines = vec![
            Line::from(Span::styled(
                format!("  {}", shorten_address(&stats.address)),
                Style::default()
                    .fg(StatusColor::Success.to_color(scheme))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                label("Transactions"),
                value(stats.transaction_count.to_string()),
            ]),
            Line::from(vec![label("Wallet age"), value(stats.age.to_string())]),
            Line::from(vec![label("Tokens"), value(stats.tokens_display())]),
            Line::from(vec![label("NFTs"), value(stats.nft_count.to_string())]),
            Line::from(vec![
                label("Score"),
                Span::styled(
                    format!("{:.1}", score),
                    Style::default()
                        .fg(ScoreTierColor::from_score(score).to_color(scheme))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  s: save SVG   t: save text",
                Style::default().fg(BaseColors::muted(scheme)),
            )),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for ResumeTab {
    fn default() -> Self {
        Self::new()
    }
}
