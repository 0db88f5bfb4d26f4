#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! [`TerminalSession`] enters raw mode on creation and restores the terminal
//! on drop, including during panic unwinding. Every optional mode it enables
//! is tracked so cleanup only undoes what was actually turned on, in reverse
//! order.
//!
//! | Feature | Enable | Disable |
//! |---------|--------|---------|
//! | Alternate screen | `CSI ? 1049 h` | `CSI ? 1049 l` |
//! | Mouse (SGR) | `CSI ? 1000;1002;1006 h` | `CSI ? 1000;1002;1006 l` |
//! | Bracketed paste | `CSI ? 2004 h` | `CSI ? 2004 l` |
//!
//! ```no_run
//! use datefield_core::terminal_session::{SessionOptions, TerminalSession};
//!
//! let session = TerminalSession::new(SessionOptions {
//!     alternate_screen: true,
//!     mouse_capture: true,
//!     ..Default::default()
//! })?;
//! // Terminal is restored when `session` is dropped.
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crate::event::Event;

/// Which optional terminal modes a [`TerminalSession`] turns on.
///
/// Everything defaults to off; raw mode is always entered.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    /// SGR mouse reporting, needed for clicking the toggle and picker.
    pub mouse_capture: bool,
    /// Deliver pastes as a single [`Event::Paste`].
    pub bracketed_paste: bool,
}

/// A terminal mode that has to be switched off again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    AlternateScreen,
    MouseCapture,
    BracketedPaste,
}

impl Mode {
    fn enable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::AlternateScreen => {
                crossterm::execute!(out, crossterm::terminal::EnterAlternateScreen)
            }
            Self::MouseCapture => crossterm::execute!(out, crossterm::event::EnableMouseCapture),
            Self::BracketedPaste => {
                crossterm::execute!(out, crossterm::event::EnableBracketedPaste)
            }
        }
    }

    fn disable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::AlternateScreen => {
                crossterm::execute!(
                    out,
                    crossterm::cursor::Show,
                    crossterm::terminal::LeaveAlternateScreen
                )
            }
            Self::MouseCapture => crossterm::execute!(out, crossterm::event::DisableMouseCapture),
            Self::BracketedPaste => {
                crossterm::execute!(out, crossterm::event::DisableBracketedPaste)
            }
        }
    }
}

/// Raw-mode guard for the demo's lifetime.
///
/// Only one session should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    /// Modes switched on so far, in the order they were enabled.
    enabled: Vec<Mode>,
}

impl TerminalSession {
    /// Enter raw mode, then each requested mode.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or any requested mode cannot be enabled.
    /// Modes enabled before the failure are undone by `Drop`.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        crate::info!("terminal raw mode enabled");

        let mut session = Self {
            enabled: Vec::with_capacity(3),
        };
        let requested = [
            (options.alternate_screen, Mode::AlternateScreen),
            (options.mouse_capture, Mode::MouseCapture),
            (options.bracketed_paste, Mode::BracketedPaste),
        ];
        let mut stdout = io::stdout();
        for mode in requested.into_iter().filter_map(|(on, mode)| on.then_some(mode)) {
            mode.enable(&mut stdout)?;
            session.enabled.push(mode);
            crate::debug!(mode = ?mode, "terminal mode enabled");
        }

        Ok(session)
    }

    /// Current terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for input. `Ok(false)` means nothing arrived.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Block for the next event.
    ///
    /// Returns `Ok(None)` for events [`Event::from_crossterm`] drops.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        let event = crossterm::event::read()?;
        Ok(Event::from_crossterm(event))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        while let Some(mode) = self.enabled.pop() {
            let _ = mode.disable(&mut stdout);
        }
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
        // Raw mode goes last so the restore sequences above are not echoed.
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = stdout.flush();
        crate::info!("terminal restored");
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut stdout = io::stdout();
            for mode in [Mode::BracketedPaste, Mode::MouseCapture, Mode::AlternateScreen] {
                let _ = mode.disable(&mut stdout);
            }
            let _ = crossterm::terminal::disable_raw_mode();
            let _ = stdout.flush();
            previous(info);
        }));
    });
}
