//! TUI rendering logic

use crate::app::{App, Tab};
use crate::tabs::{ExplorerTab, GraphTab, LeaderboardTab, ResumeTab};
use crate::theme::BaseColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use solscope_core::DegradedState;

/// Main UI renderer
pub struct Ui {
    explorer: ExplorerTab,
    resume: ResumeTab,
    leaderboard: LeaderboardTab,
    graph: GraphTab,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            explorer: ExplorerTab::new(),
            resume: ResumeTab::new(),
            leaderboard: LeaderboardTab::new(),
            graph: GraphTab::new(),
        }
    }

    /// Handle key input for the active tab
    pub fn handle_tab_key(&mut self, key: crossterm::event::KeyCode, app: &mut App) {
        match app.active_tab {
            Tab::Explorer => self.explorer.handle_key(key, app),
            Tab::Resume => self.resume.handle_key(key, app),
            Tab::Leaderboard => self.leaderboard.handle_key(key, app),
            Tab::Graph => self.graph.handle_key(key, app),
        }
        // The global key handler must know when address entry captures input
        app.input_active = self.explorer.input.active && app.active_tab == Tab::Explorer;
    }

    /// Render the full UI
    pub fn render(&mut self, frame: &mut Frame, app: &mut App) {
        let size = frame.area();

        if app.is_loading {
            self.render_loading_screen(frame, size, app);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header + tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(size);

        self.render_header(frame, chunks[0], app.active_tab);

        let content_area =
            self.render_degraded_banner(frame, chunks[1], &app.store.degraded_state());
        self.render_tab_content(frame, content_area, app);

        self.render_status_bar(frame, chunks[2], app);
    }

    fn render_loading_screen(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        app.spinner.tick();

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(7),
                Constraint::Percentage(40),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(vertical[1]);

        let loading_area = horizontal[1];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                " solscope ",
                Style::default().fg(Color::Cyan).bold(),
            ));

        let inner = block.inner(loading_area);
        frame.render_widget(block, loading_area);

        let inner_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let message = app.loading_message.as_deref().unwrap_or("Loading...");
        let spinner_line = Line::from(vec![
            Span::raw("  "),
            app.spinner.render(),
            Span::raw("  "),
            Span::styled(message, Style::default().fg(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(spinner_line), inner_chunks[2]);

        let hint = Paragraph::new(Line::from(vec![Span::styled(
            "Press 'q' to quit",
            Style::default().fg(Color::DarkGray),
        )]))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(hint, inner_chunks[4]);
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, active: Tab) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Logo left, tabs right
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(13), Constraint::Min(0)])
            .split(inner);

        let logo = Paragraph::new(Line::from(vec![
            Span::styled("◎ ", Style::default().fg(Color::Cyan)),
            Span::styled("solscope", Style::default().fg(Color::White).bold()),
        ]));
        frame.render_widget(logo, chunks[0]);

        let titles: Vec<Line> = Tab::all()
            .iter()
            .map(|t| {
                let style = if *t == active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(Span::styled(
                    format!(" {} {} {} ", t.icon(), t.shortcut(), t.name()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(active.index())
            .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));
        frame.render_widget(tabs, chunks[1]);
    }

    fn render_degraded_banner(&self, frame: &mut Frame, area: Rect, state: &DegradedState) -> Rect {
        match state {
            DegradedState::Healthy => area,
            DegradedState::PartialData { reason, .. } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);

                let banner = Paragraph::new(Line::from(vec![
                    Span::styled(" ⚠ ", Style::default().fg(Color::Yellow).bold()),
                    Span::styled(reason, Style::default().fg(Color::Yellow)),
                ]))
                .style(Style::default().bg(Color::DarkGray));

                frame.render_widget(banner, chunks[0]);
                chunks[1]
            }
            DegradedState::Offline { reason } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);

                let banner = Paragraph::new(Line::from(vec![
                    Span::styled(" ⊘ OFFLINE ", Style::default().fg(Color::Red).bold()),
                    Span::styled(reason, Style::default().fg(Color::Red)),
                ]))
                .style(Style::default().bg(Color::DarkGray));

                frame.render_widget(banner, chunks[0]);
                chunks[1]
            }
        }
    }

    fn render_tab_content(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let scheme = app.color_scheme;
        let selected_stats = app
            .selected_wallet
            .as_deref()
            .and_then(|addr| app.store.stats(addr));

        match app.active_tab {
            Tab::Explorer => {
                self.explorer
                    .render(frame, area, selected_stats.as_deref(), app.fetching, scheme);
            }
            Tab::Resume => {
                self.resume
                    .render(frame, area, selected_stats.as_deref(), scheme);
            }
            Tab::Leaderboard => {
                let entries = app.store.leaderboard();
                let sort_key = app.store.sort_key();
                self.leaderboard
                    .render(frame, area, &entries, sort_key, scheme);
            }
            Tab::Graph => {
                let graph = app
                    .selected_wallet
                    .as_deref()
                    .and_then(|addr| app.store.graph(addr));
                self.graph.render(frame, area, graph.as_deref(), scheme);
            }
        }
    }

    fn render_status_bar(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        if let Some(message) = &app.status_message {
            let bar = Paragraph::new(Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(bar, area);
            return;
        }

        let hints = match app.active_tab {
            Tab::Explorer => "e: enter address  r: refresh",
            Tab::Resume => "s: save SVG  t: save text",
            Tab::Leaderboard => "r: refresh  s: sort  j/k: move  Enter: open",
            Tab::Graph => "g: build graph",
        };

        let mut spans = vec![Span::styled(
            format!(" {}  │  Tab: switch  c: theme  q: quit", hints),
            Style::default().fg(BaseColors::muted(app.color_scheme)),
        )];

        if app.fetching {
            app.spinner.tick();
            spans.push(Span::raw("  "));
            spans.push(app.spinner.render());
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
