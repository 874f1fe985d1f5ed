// Half-block terminal output: each character cell shows two frame rows,
// the upper one as foreground of '▀' and the lower one as background.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Write;

use crate::frame::Frame;

const UPPER_HALF_BLOCK: char = '\u{2580}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    TogglePause,
    Ignore,
}

/// Maps a key event from the raw-mode terminal to an animation command.
///
/// Raw mode delivers Ctrl-C as a key press rather than a signal, so it is
/// handled here along with `q`, `x` and Esc.
pub fn key_action(event: &KeyEvent) -> KeyAction {
    if event.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('x') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char(' ') => KeyAction::TogglePause,
        _ => KeyAction::Ignore,
    }
}

/// Writes frames as 24-bit ANSI color, skipping repeated color escapes.
pub struct Presenter<W: Write> {
    out: W,
    // (columns, lines) of the terminal; output beyond it is clipped
    viewport: Option<(usize, usize)>,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            viewport: None,
        }
    }

    /// Clips output to a terminal of `columns` x `lines` character cells.
    pub fn with_viewport(mut self, columns: usize, lines: usize) -> Self {
        self.viewport = Some((columns, lines));
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        let out = &mut self.out;

        write!(out, "\x1b[?2026h")?; // Begin synchronized update
        write!(out, "\x1b[H")?;

        let mut prev: Option<([u8; 3], [u8; 3])> = None;
        let mut rows = (frame.height + 1) / 2;
        let mut columns = frame.width;
        if let Some((max_columns, max_lines)) = self.viewport {
            rows = rows.min(max_lines);
            columns = columns.min(max_columns);
        }

        for terminal_row in 0..rows {
            // Explicit positioning so a narrow terminal never wraps lines
            write!(out, "\x1b[{};1H", terminal_row + 1)?;

            let y = terminal_row * 2;
            for x in 0..columns {
                let top = frame.screen_pixel(x, y).unwrap_or([0, 0, 0]);
                let bottom = frame.screen_pixel(x, y + 1).unwrap_or([0, 0, 0]);

                if prev != Some((top, bottom)) {
                    write!(out, "\x1b[38;2;{};{};{}m", top[0], top[1], top[2])?;
                    write!(out, "\x1b[48;2;{};{};{}m", bottom[0], bottom[1], bottom[2])?;
                    prev = Some((top, bottom));
                }

                write!(out, "{UPPER_HALF_BLOCK}")?;
            }
        }

        write!(out, "\x1b[0m")?;
        write!(out, "\x1b[?2026l")?; // End synchronized update
        out.flush()?;
        Ok(())
    }
}
