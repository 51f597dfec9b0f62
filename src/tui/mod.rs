//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only redraws after an event arrives and
//! otherwise sleeps in `poll` for up to 500ms.
//!
//! ## Command Execution
//!
//! When `update()` asks for commands (`Effect::Run`), the loop paints the
//! "Running..." status once and then blocks on the runner until the whole
//! batch finishes. One command at a time, nothing concurrent - quitting the
//! program is the only cancellation.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::ops::runner;
use crate::tui::component::EventHandler;
use crate::tui::components::TranscriptState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub transcript: TranscriptState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            transcript: TranscriptState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(500));
        if first_event.is_none() {
            continue;
        }
        needs_redraw = true;

        // Process first event + drain ALL pending events before next draw
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Scroll events always go to the transcript pane
            if tui.transcript.handle_event(&tui_event).is_some() {
                continue;
            }

            let Some(action) = translate(&app, &tui_event) else {
                continue;
            };
            debug!("Action: {:?}", action);

            match update(&mut app, action) {
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
                Effect::Run(specs) => {
                    // Paint the "Running..." status before blocking on the batch
                    terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
                    let reports = runner::run_all(specs);
                    let _ = update(&mut app, Action::CommandsFinished(reports));
                    tui.transcript.follow();
                }
                Effect::None => {}
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Map a terminal event onto a core action, depending on whether a text
/// prompt currently has focus.
fn translate(app: &App, tui_event: &TuiEvent) -> Option<Action> {
    if app.in_input_mode() {
        match tui_event {
            TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::InputChar(c) => Some(Action::InputChar(*c)),
            TuiEvent::Paste(text) => Some(Action::InputPaste(text.clone())),
            TuiEvent::Backspace => Some(Action::InputBackspace),
            TuiEvent::ClearLine => Some(Action::InputClearLine),
            TuiEvent::DeleteWord => Some(Action::InputDeleteWord),
            TuiEvent::Submit => Some(Action::InputSubmit),
            TuiEvent::Escape => Some(Action::InputCancel),
            _ => None,
        }
    } else {
        match tui_event {
            TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => Some(Action::MoveUp),
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => Some(Action::MoveDown),
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar(' ') | TuiEvent::Submit => Some(Action::Activate),
            TuiEvent::Escape => Some(Action::Back),
            _ => None,
        }
    }
}
