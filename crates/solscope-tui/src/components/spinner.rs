//! Animated spinner component for loading states

use ratatui::{
    style::{Color, Style},
    text::Span,
};
use std::time::{Duration, Instant};

/// Animated spinner for loading indicators
#[derive(Debug)]
pub struct Spinner {
    /// Animation frames (Braille patterns)
    frames: &'static [&'static str],
    current_frame: usize,
    last_update: Instant,
    frame_duration: Duration,
    color: Color,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            current_frame: 0,
            last_update: Instant::now(),
            frame_duration: Duration::from_millis(80),
            color: Color::Cyan,
        }
    }

    /// Update spinner state (call this on each render)
    pub fn tick(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_update) >= self.frame_duration {
            self.current_frame = (self.current_frame + 1) % self.frames.len();
            self.last_update = now;
        }
    }

    /// Get current frame as a styled span
    pub fn render(&self) -> Span<'static> {
        Span::styled(
            self.frames[self.current_frame],
            Style::default().fg(self.color),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        let mut spinner = Spinner::new();
        assert_eq!(spinner.current_frame, 0);

        spinner.tick();
        assert!(spinner.current_frame < spinner.frames.len());
    }
}
