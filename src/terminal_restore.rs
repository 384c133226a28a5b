//! Terminal modes the simulator switches on, and their undo on drop and on panic.
//!
//! The simulated deck needs raw keys, a private screen, mouse reports for the
//! touch strip, and no cursor over the key grid. Each mode is recorded as it is
//! entered so a partial `enter` is still undone.

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        OnceLock,
    },
};

/// Modes in the order they are entered. Restore walks them backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeckMode {
    RawKeys,
    AltScreen,
    StripMouse,
    HiddenCursor,
}

const DECK_MODES: [DeckMode; 4] = [
    DeckMode::RawKeys,
    DeckMode::AltScreen,
    DeckMode::StripMouse,
    DeckMode::HiddenCursor,
];

static MODE_ACTIVE: [AtomicBool; 4] = [
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
];
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

impl DeckMode {
    fn flag(self) -> &'static AtomicBool {
        &MODE_ACTIVE[self as usize]
    }

    fn enter(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            DeckMode::RawKeys => enable_raw_mode(),
            DeckMode::AltScreen => execute!(out, EnterAlternateScreen),
            DeckMode::StripMouse => execute!(out, EnableMouseCapture),
            DeckMode::HiddenCursor => execute!(out, Hide),
        }
    }

    fn leave(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            DeckMode::RawKeys => disable_raw_mode(),
            DeckMode::AltScreen => execute!(out, LeaveAlternateScreen),
            DeckMode::StripMouse => execute!(out, DisableMouseCapture),
            DeckMode::HiddenCursor => execute!(out, Show),
        }
    }
}

/// Holds the simulator's terminal modes until dropped or restored.
pub struct TerminalRestoreGuard;

impl TerminalRestoreGuard {
    pub fn new() -> Self {
        install_terminal_panic_hook();
        TerminalRestoreGuard
    }

    pub fn enter(&self, stdout: &mut impl Write) -> io::Result<()> {
        for mode in DECK_MODES {
            mode.enter(stdout)?;
            mode.flag().store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    pub fn restore(&self) {
        restore_terminal();
    }
}

impl Default for TerminalRestoreGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Undo every mode still marked active. Safe to call any number of times.
pub fn restore_terminal() {
    let mut stdout = io::stdout();
    for mode in DECK_MODES.into_iter().rev() {
        if mode.flag().swap(false, Ordering::SeqCst) {
            if let Err(err) = mode.leave(&mut stdout) {
                tracing::warn!(?mode, error = %err, "terminal mode not restored");
            }
        }
    }
    let _ = stdout.flush();
}

pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            tracing::error!(%location, "simulator panicked: {info}");
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_flags_line_up_with_entry_order() {
        for (slot, mode) in DECK_MODES.into_iter().enumerate() {
            assert!(std::ptr::eq(mode.flag(), &MODE_ACTIVE[slot]));
        }
    }

    #[test]
    fn restore_without_enter_touches_nothing() {
        restore_terminal();
        restore_terminal();
        assert!(MODE_ACTIVE.iter().all(|flag| !flag.load(Ordering::SeqCst)));
    }
}
