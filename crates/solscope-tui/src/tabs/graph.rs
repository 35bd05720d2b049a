//! Graph tab - counterparties of the selected wallet

use crate::app::App;
use crate::theme::{BaseColors, StatusColor};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use solscope_core::models::shorten_address;
use solscope_core::{ColorScheme, CounterpartyGraph};

/// Graph tab state
pub struct GraphTab;

impl GraphTab {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&mut self, key: KeyCode, app: &mut App) {
        if key == KeyCode::Char('g') || key == KeyCode::Char('r') {
            if let Some(address) = app.selected_wallet.clone() {
                app.fetching = true;
                let store = app.store.clone();
                tokio::spawn(async move {
                    if let Err(e) = store.build_graph(&address).await {
                        tracing::warn!(address, error = %e, "Graph build failed");
                        store
                            .event_bus()
                            .publish(solscope_core::DataEvent::FetchFailed {
                                address,
                                message: e.to_string(),
                            });
                    }
                });
            }
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        graph: Option<&CounterpartyGraph>,
        scheme: ColorScheme,
    ) {
        let Some(graph) = graph else {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Select a wallet in the Explorer, then press 'g' to build the graph",
                Style::default().fg(BaseColors::muted(scheme)),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(hint, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let summary = Line::from(vec![
            Span::styled(
                shorten_address(graph.center()),
                Style::default()
                    .fg(StatusColor::Focus.to_color(scheme))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  ·  {} counterparties  ·  {} interactions",
                    graph.counterparty_count(),
                    graph.total_interactions()
                ),
                Style::default().fg(BaseColors::fg(scheme)),
            ),
        ]);
        frame.render_widget(Paragraph::new(summary), chunks[0]);

        self.render_counterparties(frame, chunks[1], graph, scheme);
    }

    fn render_counterparties(
        &self,
        frame: &mut Frame,
        area: Rect,
        graph: &CounterpartyGraph,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                " Top counterparties ",
                Style::default().fg(BaseColors::fg(scheme)),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let top = graph.top(inner.height as usize);
        if top.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No counterparties in recent history",
                Style::default().fg(BaseColors::muted(scheme)),
            )));
            frame.render_widget(empty, inner);
            return;
        }

        let max_freq = top.first().map(|n| n.frequency).unwrap_or(1).max(1);
        let bar_width = (inner.width as usize).saturating_sub(28).max(4);

        let lines: Vec<Line> = top
            .iter()
            .map(|node| {
                let filled = (node.frequency as usize * bar_width / max_freq as usize).max(1);
                Line::from(vec![
                    Span::styled(
                        format!("{:<14}", shorten_address(&node.address)),
                        Style::default().fg(BaseColors::fg(scheme)),
                    ),
                    Span::styled(
                        "█".repeat(filled),
                        Style::default().fg(StatusColor::Important.to_color(scheme)),
                    ),
                    Span::styled(
                        format!(" {}", node.frequency),
                        Style::default().fg(BaseColors::muted(scheme)),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for GraphTab {
    fn default() -> Self {
        Self::new()
    }
}
