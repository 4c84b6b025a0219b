//! Theme and styling definitions for the confab TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(30, 30, 40);
    pub const FG: Color = Color::Rgb(220, 220, 230);
    pub const DIM: Color = Color::Rgb(140, 140, 160);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(130, 170, 255);

    // Role colors
    pub const USER: Color = Color::Rgb(130, 170, 255);
    pub const ASSISTANT: Color = Color::Rgb(148, 226, 213);

    // Status colors
    pub const SUCCESS: Color = Color::Rgb(130, 220, 130);
    pub const WARNING: Color = Color::Rgb(240, 200, 100);
    pub const ERROR: Color = Color::Rgb(240, 100, 100);

    // Border colors
    pub const BORDER: Color = Color::Rgb(80, 80, 100);
}

/// Indicator symbols (plain characters for wide terminal compatibility).
pub struct Symbols;

impl Symbols {
    pub const USER: &'static str = "\u{203a} "; // ›
    pub const ASSISTANT: &'static str = "\u{25cf} "; // ●
    pub const SOURCE: &'static str = "\u{21b3} "; // ↳
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
    pub const TYPING: [&'static str; 3] = ["\u{00b7}", "\u{00b7}\u{00b7}", "\u{00b7}\u{00b7}\u{00b7}"];
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT)
    }

    /// User message accent.
    pub fn user() -> Style {
        Style::default().fg(Palette::USER)
    }

    /// Assistant message accent.
    pub fn assistant() -> Style {
        Style::default().fg(Palette::ASSISTANT)
    }

    /// Success status.
    pub fn success() -> Style {
        Style::default().fg(Palette::SUCCESS)
    }

    /// Warning status.
    pub fn warning() -> Style {
        Style::default().fg(Palette::WARNING)
    }

    /// Error status.
    pub fn error() -> Style {
        Style::default().fg(Palette::ERROR)
    }

    /// Bold emphasis within a message.
    pub fn bold() -> Style {
        Style::default().fg(Palette::FG).add_modifier(Modifier::BOLD)
    }

    /// Italic emphasis within a message.
    pub fn italic() -> Style {
        Style::default()
            .fg(Palette::FG)
            .add_modifier(Modifier::ITALIC)
    }

    /// Citation link text.
    pub fn link() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::UNDERLINED)
    }
}
