use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::stock::ChangeDirection;

/// Accent color used for the search prompt and the selected timeframe.
pub const ACCENT: Color = Color::Indexed(208);

pub const UP: Color = Color::Green;
pub const DOWN: Color = Color::Red;

/// Dimmed line for hints and placeholders.
pub fn secondary_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.dim())
}

pub fn secondary_span<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    let owned = text.into().into_owned();
    Span::from(owned).dim()
}

pub fn selection_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn direction_color(direction: ChangeDirection) -> Color {
    match direction {
        ChangeDirection::Up => UP,
        ChangeDirection::Down => DOWN,
        ChangeDirection::Flat | ChangeDirection::Unknown => Color::Gray,
    }
}

pub fn error_style() -> Style {
    Style::default().fg(DOWN).add_modifier(Modifier::BOLD)
}
