use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::controller::Orchestrator;
use crate::app::state::{Phase, ViewState};
use crate::error::Result;
use crate::fetch::StockSource;
use crate::geometry::{compute_geometry, Canvas, Chart};
use crate::timeframe::Timeframe;
use crate::ui::components::chart::render_price_chart;
use crate::ui::components::profile::render_profile_card;
use crate::ui::components::utils::{split_horizontal, split_vertical};
use crate::ui::components::TerminalGuard;
use crate::ui::styles::{secondary_line, ACCENT};
use crate::utils::current_human_timestamp;

const MAX_SYMBOL_CHARS: usize = 16;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerCommand {
    Quit,
    Submit { symbol: String, timeframe: Timeframe },
    Redraw,
    Ignore,
}

/// Translate a key press into a command. `input` is the search box text.
///
/// Enter submits the typed symbol. Changing the timeframe (`←`/`→` or
/// `Alt+1`..`Alt+4`) resubmits the symbol that is currently shown, so an
/// edited but unsubmitted search box does not leak into the refetch.
pub fn handle_key(input: &mut String, key: KeyEvent, view: &ViewState) -> ExplorerCommand {
    let shown_symbol = || {
        view.request
            .as_ref()
            .map(|request| request.symbol.to_string())
            .unwrap_or_default()
    };
    let resubmit = |timeframe: Timeframe| ExplorerCommand::Submit {
        symbol: shown_symbol(),
        timeframe,
    };

    match key.code {
        KeyCode::Esc => ExplorerCommand::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => ExplorerCommand::Quit,
        KeyCode::Enter => ExplorerCommand::Submit {
            symbol: input.clone(),
            timeframe: view.selected_timeframe,
        },
        KeyCode::Left => resubmit(view.selected_timeframe.previous()),
        KeyCode::Right => resubmit(view.selected_timeframe.next()),
        KeyCode::Char(digit @ '1'..='4') if key.modifiers.contains(KeyModifiers::ALT) => {
            let index = digit as usize - '1' as usize;
            resubmit(Timeframe::all()[index])
        }
        KeyCode::Backspace => {
            input.pop();
            ExplorerCommand::Redraw
        }
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                && is_symbol_char(ch)
                && input.chars().count() < MAX_SYMBOL_CHARS =>
        {
            input.extend(ch.to_uppercase());
            ExplorerCommand::Redraw
        }
        _ => ExplorerCommand::Ignore,
    }
}

fn is_symbol_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '^' | '=')
}

/// Interactive explorer. Returns when the user quits.
pub async fn run_explorer<S: StockSource>(
    orchestrator: Orchestrator<S>,
    canvas: Canvas,
    initial_symbol: Option<String>,
) -> Result<()> {
    let mut input = initial_symbol
        .map(|symbol| symbol.trim().to_uppercase())
        .unwrap_or_default();
    if !input.is_empty() {
        let _ = orchestrator.submit(&input, orchestrator.snapshot().selected_timeframe);
    }

    let mut updates = orchestrator.subscribe();
    let mut view = updates.borrow_and_update().clone();
    let mut chart = compute_geometry(&view.series, canvas);

    let mut guard = TerminalGuard::new()?;
    loop {
        if updates.has_changed().unwrap_or(false) {
            view = updates.borrow_and_update().clone();
            chart = compute_geometry(&view.series, canvas);
        }

        guard.draw(|f| draw_explorer(f, &input, &view, &chart))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(&mut input, key, &view) {
            ExplorerCommand::Quit => break,
            ExplorerCommand::Submit { symbol, timeframe } => {
                // The task detaches; its result arrives through `updates`.
                let _ = orchestrator.submit(&symbol, timeframe);
            }
            ExplorerCommand::Redraw | ExplorerCommand::Ignore => {}
        }
    }

    guard.restore()?;
    Ok(())
}

fn draw_explorer(f: &mut Frame<'_>, input: &str, view: &ViewState, chart: &Chart) {
    let rows = split_vertical(
        f.size(),
        &[
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Min(8),
            Constraint::Length(1),
        ],
    );

    let search = Paragraph::new(Line::from(vec![
        Span::raw(input.to_string()).bold(),
        Span::raw("▏").fg(ACCENT),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title("Symbol"),
    );
    f.render_widget(search, rows[0]);

    f.render_widget(Paragraph::new(status_line(view)), rows[1]);
    render_profile_card(f, rows[2], view.profile.as_ref());
    render_price_chart(f, rows[3], view, chart);

    let footer = split_horizontal(rows[4], &[Constraint::Min(1), Constraint::Length(18)]);
    f.render_widget(
        Paragraph::new(secondary_line(
            "Enter search • ←/→ or Alt+1..4 timeframe • Esc quit",
        )),
        footer[0],
    );
    f.render_widget(
        Paragraph::new(secondary_line(current_human_timestamp())).alignment(Alignment::Right),
        footer[1],
    );
}

/// Failures are reported in the chart panel only.
fn status_line(view: &ViewState) -> Line<'static> {
    match view.phase {
        Phase::Loading => Line::from("Loading…"),
        Phase::Idle | Phase::Success | Phase::Failure => Line::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::RequestState;
    use crate::stock::Symbol;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn showing(symbol: &str) -> ViewState {
        let mut view = ViewState::default();
        view.phase = Phase::Success;
        view.request = Some(RequestState {
            symbol: Symbol::parse(symbol).unwrap(),
            timeframe: view.selected_timeframe,
            generation: 1,
        });
        view.generation = 1;
        view
    }

    #[test]
    fn typing_uppercases_and_enter_submits() {
        let view = ViewState::default();
        let mut input = String::new();
        for ch in "msft".chars() {
            assert_eq!(
                handle_key(&mut input, press(KeyCode::Char(ch)), &view),
                ExplorerCommand::Redraw
            );
        }
        assert_eq!(input, "MSFT");

        assert_eq!(
            handle_key(&mut input, press(KeyCode::Enter), &view),
            ExplorerCommand::Submit {
                symbol: "MSFT".to_string(),
                timeframe: view.selected_timeframe,
            }
        );
    }

    #[test]
    fn rejects_characters_outside_tickers() {
        let view = ViewState::default();
        let mut input = String::from("BRK");
        assert_eq!(
            handle_key(&mut input, press(KeyCode::Char(' ')), &view),
            ExplorerCommand::Ignore
        );
        handle_key(&mut input, press(KeyCode::Char('-')), &view);
        handle_key(&mut input, press(KeyCode::Char('b')), &view);
        assert_eq!(input, "BRK-B");

        handle_key(&mut input, press(KeyCode::Backspace), &view);
        assert_eq!(input, "BRK-");
    }

    #[test]
    fn arrows_cycle_timeframes_for_the_shown_symbol() {
        let view = showing("AAPL");
        let mut input = String::from("GOO");

        match handle_key(&mut input, press(KeyCode::Right), &view) {
            ExplorerCommand::Submit { symbol, timeframe } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(timeframe.label, "6M");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        match handle_key(&mut input, press(KeyCode::Left), &view) {
            ExplorerCommand::Submit { timeframe, .. } => assert_eq!(timeframe.label, "1D"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(input, "GOO");
    }

    #[test]
    fn alt_digits_pick_a_timeframe_and_plain_digits_type() {
        let view = showing("AAPL");
        let mut input = String::new();

        let alt_four = KeyEvent::new(KeyCode::Char('4'), KeyModifiers::ALT);
        match handle_key(&mut input, alt_four, &view) {
            ExplorerCommand::Submit { timeframe, .. } => assert_eq!(timeframe.label, "1Y"),
            other => panic!("unexpected command: {other:?}"),
        }

        handle_key(&mut input, press(KeyCode::Char('4')), &view);
        assert_eq!(input, "4");
    }

    #[test]
    fn timeframe_change_without_a_symbol_submits_blank() {
        let view = ViewState::default();
        let mut input = String::new();
        assert_eq!(
            handle_key(&mut input, press(KeyCode::Right), &view),
            ExplorerCommand::Submit {
                symbol: String::new(),
                timeframe: view.selected_timeframe.next(),
            }
        );
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let view = ViewState::default();
        let mut input = String::new();
        assert_eq!(
            handle_key(&mut input, press(KeyCode::Esc), &view),
            ExplorerCommand::Quit
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut input, ctrl_c, &view), ExplorerCommand::Quit);
        assert!(input.is_empty());
    }

    #[test]
    fn status_line_shows_loading_but_leaves_errors_to_the_chart() {
        let mut view = ViewState::default();
        view.phase = Phase::Loading;
        assert_eq!(status_line(&view), Line::from("Loading…"));

        view.phase = Phase::Failure;
        view.error = Some("Could not fetch stock data.".to_string());
        assert_eq!(status_line(&view), Line::default());
    }
}
