//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event (including terminal resize). All pending
//! events are drained before the next draw.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;
mod views;

use log::info;
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use rand::Rng;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, View};
use crate::tui::component::EventHandler;
use crate::tui::components::{OperandEvent, OperandForm};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::views::DocsState;

const IDLE_POLL: Duration = Duration::from_millis(500);
/// Operand width for Ctrl+R.
const RANDOM_WIDTH: usize = 4;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub operands: OperandForm,
    pub docs: DocsState,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            operands: OperandForm::new(&app.ripple.a, &app.ripple.b, app.ripple.max_width),
            docs: DocsState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app);
    info!(
        "Starting TUI on {} (policy: {})",
        app.view.label(),
        app.ripple.policy.label()
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let result = (|| -> std::io::Result<()> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
                needs_redraw = false;
            }

            let Some(first) = poll_event_timeout(IDLE_POLL)? else {
                continue;
            };
            needs_redraw = true;

            let mut pending = Some(first);
            while let Some(event) = pending {
                if handle_event(&mut app, &mut tui, &event) == Effect::Quit {
                    return Ok(());
                }
                pending = poll_event_immediate()?;
            }
        }
    })();

    ratatui::restore();
    result
}

/// Route one event: global keys first, then the current page.
pub fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        TuiEvent::ForceQuit | TuiEvent::Escape => return update(app, Action::Quit),
        TuiEvent::NextView => return update(app, Action::NextView),
        TuiEvent::PrevView => return update(app, Action::PrevView),
        TuiEvent::Resize => return Effect::None,
        _ => {}
    }

    match app.view {
        View::RippleCarry => ripple_event(app, tui, event),
        View::Docs => {
            if tui.docs.handle_event(event).is_some() {
                return Effect::None;
            }
            match jump_action(event) {
                Some(action) => update(app, action),
                None => Effect::None,
            }
        }
        _ => match bit_view_action(event) {
            Some(action) => update(app, action),
            None => Effect::None,
        },
    }
}

fn ripple_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    if *event == TuiEvent::Randomize {
        let width = RANDOM_WIDTH.min(app.ripple.max_width);
        let mut rng = rand::thread_rng();
        tui.operands.a.set(&random_operand(&mut rng, width));
        tui.operands.b.set(&random_operand(&mut rng, width));
        let (a, b) = tui.operands.values();
        return update(app, Action::SetOperands { a, b });
    }

    match tui.operands.handle_event(event) {
        Some(OperandEvent::Changed | OperandEvent::Submit) => {
            let (a, b) = tui.operands.values();
            update(app, Action::SetOperands { a, b })
        }
        Some(OperandEvent::Moved) | None => Effect::None,
    }
}

fn random_operand<R: Rng>(rng: &mut R, width: usize) -> String {
    (0..width)
        .map(|_| if rng.gen_range(0..2) == 1 { '1' } else { '0' })
        .collect()
}

/// Digit keys jump straight to a page; `q` quits.
fn jump_action(event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar(c) => {
            let n = c.to_digit(10)? as usize;
            let view = View::ALL.get(n.checked_sub(1)?)?;
            Some(Action::Navigate(*view))
        }
        _ => None,
    }
}

/// Keys on pages made of toggle switches.
fn bit_view_action(event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::CursorLeft | TuiEvent::CursorUp => Some(Action::FocusPrev),
        TuiEvent::CursorRight | TuiEvent::CursorDown => Some(Action::FocusNext),
        TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(Action::ToggleFocused),
        TuiEvent::InputChar('[' | '-') => Some(Action::Shrink),
        TuiEvent::InputChar(']' | '+' | '=') => Some(Action::Grow),
        _ => jump_action(event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logic::Bit;
    use crate::test_support::test_app;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn send(app: &mut App, tui: &mut TuiState, events: &[TuiEvent]) -> Effect {
        let mut effect = Effect::None;
        for event in events {
            effect = handle_event(app, tui, event);
        }
        effect
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        assert_eq!(send(&mut app, &mut tui, &[TuiEvent::Escape]), Effect::Quit);
        assert_eq!(send(&mut app, &mut tui, &[TuiEvent::ForceQuit]), Effect::Quit);
    }

    #[test]
    fn test_space_toggles_focused_input() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        send(
            &mut app,
            &mut tui,
            &[TuiEvent::CursorRight, TuiEvent::InputChar(' ')],
        );
        assert_eq!(app.half.a, Bit::Zero);
        assert_eq!(app.half.b, Bit::One);
        assert_eq!(app.half.output().sum, Bit::One);
    }

    #[test]
    fn test_digit_jumps_to_page() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        send(&mut app, &mut tui, &[TuiEvent::InputChar('4')]);
        assert_eq!(app.view, View::Mux);
        send(&mut app, &mut tui, &[TuiEvent::InputChar(']')]);
        assert_eq!(app.mux.select_bits, 3);
        send(&mut app, &mut tui, &[TuiEvent::InputChar('9')]);
        assert_eq!(app.view, View::Mux);
    }

    #[test]
    fn test_tab_cycles_pages() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        send(&mut app, &mut tui, &[TuiEvent::PrevView]);
        assert_eq!(app.view, View::Docs);
        send(&mut app, &mut tui, &[TuiEvent::NextView, TuiEvent::NextView]);
        assert_eq!(app.view, View::FullAdder);
    }

    #[test]
    fn test_typing_on_ripple_page_recomputes() {
        let mut app = test_app();
        app.view = View::RippleCarry;
        let mut tui = TuiState::new(&app);
        // Digits go into the field, not page navigation.
        send(&mut app, &mut tui, &[TuiEvent::Backspace, TuiEvent::InputChar('0')]);
        assert_eq!(app.view, View::RippleCarry);
        assert_eq!(app.ripple.a, "1010");
        assert_eq!(app.ripple.result.as_ref().unwrap().result_bits, "10000");
        assert_eq!(app.status_message, "1010 + 0110 = 10000 (carry out)");
    }

    #[test]
    fn test_ripple_strict_error_surfaces() {
        let mut app = test_app();
        app.view = View::RippleCarry;
        app.ripple.policy = crate::core::logic::InputPolicy::Strict;
        let mut tui = TuiState::new(&app);
        send(&mut app, &mut tui, &[TuiEvent::InputChar('x')]);
        assert!(app.error.is_some());
        assert!(app.ripple.result.is_none());
        send(&mut app, &mut tui, &[TuiEvent::Backspace]);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_randomize_fills_both_operands() {
        let mut app = test_app();
        app.view = View::RippleCarry;
        let mut tui = TuiState::new(&app);
        send(&mut app, &mut tui, &[TuiEvent::Randomize]);
        assert_eq!(app.ripple.a.len(), 4);
        assert_eq!(app.ripple.b.len(), 4);
        assert_eq!(tui.operands.values(), (app.ripple.a.clone(), app.ripple.b.clone()));
        assert!(app.ripple.result.is_some());
    }

    #[test]
    fn test_random_operand_is_binary() {
        let mut rng = StdRng::seed_from_u64(7);
        let operand = random_operand(&mut rng, 12);
        assert_eq!(operand.len(), 12);
        assert!(operand.chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn test_docs_scroll_keys_do_not_navigate() {
        let mut app = test_app();
        app.view = View::Docs;
        let mut tui = TuiState::new(&app);
        send(&mut app, &mut tui, &[TuiEvent::CursorDown]);
        assert_eq!(app.view, View::Docs);
        send(&mut app, &mut tui, &[TuiEvent::InputChar('2')]);
        assert_eq!(app.view, View::FullAdder);
    }

    #[test]
    fn test_q_quits_outside_text_fields() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        assert_eq!(send(&mut app, &mut tui, &[TuiEvent::InputChar('q')]), Effect::Quit);
    }
}
