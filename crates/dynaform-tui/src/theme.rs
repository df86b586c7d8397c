//! Theme definitions for the dynaform TUI.
//!
//! Provides semantic color tokens and paint helpers so views never hard-code
//! colors. All styling funnels through [`Theme`], which can be disabled
//! entirely for `NO_COLOR` environments and plain-text test assertions.

use crossterm::style::{Color, Stylize};

/// Semantic color tokens for the application.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Whether ANSI styling is emitted at all.
    pub color_enabled: bool,

    /// Brand color, titles, focused elements.
    pub primary: Color,
    /// Submitted, complete, positive states.
    pub success: Color,
    /// Failed validation, destructive actions.
    pub error: Color,
    /// Hints, placeholders, unfocused chrome.
    pub muted: Color,
}

impl Theme {
    /// Default palette.
    #[must_use]
    pub const fn new(color_enabled: bool) -> Self {
        Self {
            color_enabled,
            primary: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            muted: Color::DarkGrey,
        }
    }

    /// Plain output, for tests and `NO_COLOR`.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new(false)
    }

    fn paint(self, text: &str, color: Color, bold: bool) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        let styled = text.with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }

    /// Page and section titles.
    #[must_use]
    pub fn title(self, text: &str) -> String {
        self.paint(text, self.primary, true)
    }

    /// Focused labels and interactive affordances.
    #[must_use]
    pub fn focus(self, text: &str) -> String {
        self.paint(text, self.primary, false)
    }

    /// Positive feedback.
    #[must_use]
    pub fn success(self, text: &str) -> String {
        self.paint(text, self.success, false)
    }

    /// Validation failures.
    #[must_use]
    pub fn error(self, text: &str) -> String {
        self.paint(text, self.error, false)
    }

    /// Hints and secondary text.
    #[must_use]
    pub fn muted(self, text: &str) -> String {
        self.paint(text, self.muted, false)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}
