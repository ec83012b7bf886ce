use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::stock::StockProfile;
use crate::ui::styles::{direction_color, secondary_line, secondary_span};

/// Card lines for a loaded profile. Optional rows are skipped when the
/// upstream left them out.
pub fn profile_lines(profile: &StockProfile) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::from(profile.display_name().to_string()).bold(),
            Span::raw("  "),
            secondary_span(profile.symbol.clone()),
        ]),
        Line::from(vec![
            Span::from(profile.price_text()).bold(),
            Span::raw("  "),
            Span::from(profile.change_text()).fg(direction_color(profile.change_direction())),
        ]),
    ];

    let classification = [profile.sector.as_deref(), profile.industry.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    if !classification.is_empty() {
        lines.push(Line::from(classification.join(" · ")));
    }
    if let Some(cap) = profile.market_cap_text() {
        lines.push(Line::from(vec![secondary_span("Market cap "), Span::raw(cap)]));
    }
    if let Some(site) = profile.website_label() {
        lines.push(Line::from(Span::from(site.to_string()).underlined()));
    }
    lines
}

pub fn render_profile_card(f: &mut Frame<'_>, area: Rect, profile: Option<&StockProfile>) {
    let lines = match profile {
        Some(profile) => profile_lines(profile),
        None => vec![secondary_line("No stock loaded.")],
    };
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Profile")),
        area,
    );
}
