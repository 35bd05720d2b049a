//! Theme and color system for the solscope TUI
//!
//! Consistent color language across tabs:
//! - Green: success, healthy data
//! - Red: errors, failed fetches
//! - Yellow: warnings, partial data
//! - Cyan: selected, focus, interactive
//! - Magenta: high scores, important values

use ratatui::style::Color;
use solscope_core::ColorScheme;

/// Status color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Error,
    Warning,
    Neutral,
    Focus,
    Important,
}

impl StatusColor {
    /// Convert to Ratatui Color based on color scheme
    pub fn to_color(self, scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => match self {
                StatusColor::Success => Color::Green,
                StatusColor::Error => Color::Red,
                StatusColor::Warning => Color::Yellow,
                StatusColor::Neutral => Color::DarkGray,
                StatusColor::Focus => Color::Cyan,
                StatusColor::Important => Color::Magenta,
            },
            ColorScheme::Light => match self {
                StatusColor::Success => Color::Rgb(0, 128, 0),
                StatusColor::Error => Color::Rgb(200, 0, 0),
                StatusColor::Warning => Color::Rgb(180, 120, 0),
                StatusColor::Neutral => Color::Gray,
                StatusColor::Focus => Color::Rgb(0, 128, 128),
                StatusColor::Important => Color::Rgb(128, 0, 128),
            },
        }
    }
}

/// Score tier semantic color for leaderboard rows
pub enum ScoreTierColor {
    /// < 500
    Low,
    /// 500 - 5000
    Medium,
    /// > 5000
    High,
}

impl ScoreTierColor {
    pub fn from_score(score: f64) -> Self {
        if score > 5000.0 {
            ScoreTierColor::High
        } else if score > 500.0 {
            ScoreTierColor::Medium
        } else {
            ScoreTierColor::Low
        }
    }

    pub fn to_color(self, scheme: ColorScheme) -> Color {
        match self {
            ScoreTierColor::Low => StatusColor::Neutral.to_color(scheme),
            ScoreTierColor::Medium => StatusColor::Success.to_color(scheme),
            ScoreTierColor::High => StatusColor::Important.to_color(scheme),
        }
    }
}

/// Wallet age semantic color
pub enum AgeColor {
    /// < 30 days
    Fresh,
    /// 30 - 365 days
    Established,
    /// > 365 days
    Veteran,
}

impl AgeColor {
    pub fn from_days(days: u64) -> Self {
        if days > 365 {
            AgeColor::Veteran
        } else if days >= 30 {
            AgeColor::Established
        } else {
            AgeColor::Fresh
        }
    }

    pub fn to_color(self, scheme: ColorScheme) -> Color {
        match self {
            AgeColor::Fresh => StatusColor::Warning.to_color(scheme),
            AgeColor::Established => StatusColor::Success.to_color(scheme),
            AgeColor::Veteran => StatusColor::Important.to_color(scheme),
        }
    }
}

/// Base color helpers for backgrounds and foregrounds
pub struct BaseColors;

impl BaseColors {
    pub fn fg(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => Color::White,
            ColorScheme::Light => Color::Black,
        }
    }

    pub fn muted(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => Color::DarkGray,
            ColorScheme::Light => Color::Gray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tier_thresholds() {
        assert!(matches!(
            ScoreTierColor::from_score(100.0),
            ScoreTierColor::Low
        ));
        assert!(matches!(
            ScoreTierColor::from_score(1200.0),
            ScoreTierColor::Medium
        ));
        assert!(matches!(
            ScoreTierColor::from_score(9000.0),
            ScoreTierColor::High
        ));
    }

    #[test]
    fn test_age_thresholds() {
        assert!(matches!(AgeColor::from_days(5), AgeColor::Fresh));
        assert!(matches!(AgeColor::from_days(30), AgeColor::Established));
        assert!(matches!(AgeColor::from_days(400), AgeColor::Veteran));
    }
}
