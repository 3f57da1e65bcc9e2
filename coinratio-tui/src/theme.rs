//! Parrot/neon colour tokens.
//!
//! Dark background, neon accents, one colour per plotted series:
//! - **Accent** (electric cyan): first coin
//! - **Positive** (neon green): second coin
//! - **Neutral** (cool purple): ratio
//! - **Warning** (neon orange): empty or unplottable data
//! - **Muted** (steel blue): axes, labels, hints

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// Which of the three charts a colour is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSlot {
    First,
    Second,
    Ratio,
}

pub fn series_color(slot: ChartSlot) -> Color {
    match slot {
        ChartSlot::First => ACCENT,
        ChartSlot::Second => POSITIVE,
        ChartSlot::Ratio => NEUTRAL,
    }
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn panel_border(slot: ChartSlot) -> Style {
    Style::default().fg(series_color(slot))
}

pub fn panel_title(slot: ChartSlot) -> Style {
    Style::default()
        .fg(series_color(slot))
        .add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD)
}
