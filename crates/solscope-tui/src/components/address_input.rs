//! Wallet address input field

use crate::theme::{BaseColors, StatusColor};
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use solscope_core::ColorScheme;

/// Single-line input for a base58 wallet address
pub struct AddressInput {
    /// Current input value
    pub value: String,
    /// Whether the input is focused and capturing keys
    pub active: bool,
    placeholder: String,
}

impl Default for AddressInput {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressInput {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            active: false,
            placeholder: "Enter a wallet address...".to_string(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Handle a key while active. Returns the submitted address on Enter.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<String> {
        match key {
            KeyCode::Enter => {
                let submitted = self.value.trim().to_string();
                if submitted.is_empty() {
                    return None;
                }
                self.active = false;
                Some(submitted)
            }
            KeyCode::Esc => {
                self.active = false;
                None
            }
            KeyCode::Backspace => {
                self.value.pop();
                None
            }
            // Base58 stays within ASCII alphanumerics
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                self.value.push(c);
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, scheme: ColorScheme) {
        let (text, style) = if self.value.is_empty() {
            (
                self.placeholder.as_str(),
                Style::default().fg(BaseColors::muted(scheme)),
            )
        } else {
            (
                self.value.as_str(),
                Style::default().fg(BaseColors::fg(scheme)),
            )
        };

        let border_color = if self.active {
            StatusColor::Focus.to_color(scheme)
        } else {
            StatusColor::Neutral.to_color(scheme)
        };

        let line = Line::from(vec![
            Span::styled("◎ ", Style::default().fg(StatusColor::Focus.to_color(scheme))),
            Span::styled(text, style),
            if self.active {
                Span::styled(
                    "_",
                    Style::default()
                        .fg(StatusColor::Focus.to_color(scheme))
                        .add_modifier(Modifier::SLOW_BLINK),
                )
            } else {
                Span::raw("")
            },
        ]);

        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(Span::styled(
                    " Wallet ",
                    Style::default()
                        .fg(BaseColors::fg(scheme))
                        .add_modifier(Modifier::BOLD),
                )),
        );

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_submit() {
        let mut input = AddressInput::new();
        input.activate();

        for c in "abc123".chars() {
            input.handle_key(KeyCode::Char(c));
        }
        input.handle_key(KeyCode::Backspace);

        let submitted = input.handle_key(KeyCode::Enter);
        assert_eq!(submitted.as_deref(), Some("abc12"));
        assert!(!input.active);
    }

    #[test]
    fn test_empty_submit_ignored() {
        let mut input = AddressInput::new();
        input.activate();
        assert!(input.handle_key(KeyCode::Enter).is_none());
        assert!(input.active);
    }

    #[test]
    fn test_rejects_non_alphanumeric() {
        let mut input = AddressInput::new();
        input.activate();
        input.handle_key(KeyCode::Char('!'));
        input.handle_key(KeyCode::Char(' '));
        assert!(input.value.is_empty());
    }

    #[test]
    fn test_esc_deactivates() {
        let mut input = AddressInput::new();
        input.activate();
        input.handle_key(KeyCode::Esc);
        assert!(!input.active);
    }
}
