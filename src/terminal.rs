use std::io::Write;
use std::time::Duration;

use crossterm::{cursor, event, style::Print, terminal, QueueableCommand};
use log::warn;

use crate::result::EditorError;

/// Inverse-video return glyph printed when the previous command left the
/// cursor off column 1.
const LACK_EOL: &str = "\x1b[7m\u{23ce}\x1b[m\r\n";

/// Raw-mode terminal session for one `read_line` call.
///
/// Entering puts the terminal into raw/no-echo mode, turns autowrap off,
/// drains pending input, and queries the cursor position; the cursor
/// query is answered by a CPR reply, and any keystrokes that race it are
/// buffered for the key reader rather than lost. Leaving restores
/// everything. All failures are reported, never panicked on.
pub(crate) struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode and normalize the cursor to column 1. Returns the
    /// terminal size.
    pub(crate) fn start<W: Write>(out: &mut W) -> Result<(TerminalSession, (u16, u16)), EditorError> {
        terminal::enable_raw_mode().map_err(EditorError::Terminal)?;
        let mut session = TerminalSession { active: true };

        if let Err(err) = session.configure(out) {
            // Leave the terminal as we found it before reporting.
            session.finish(out).ok();
            return Err(err);
        }

        let size = terminal::size().map_err(EditorError::Terminal)?;
        Ok((session, size))
    }

    fn configure<W: Write>(&mut self, out: &mut W) -> Result<(), EditorError> {
        out.queue(Print("\x1b[?7l"))
            .and_then(|out| out.flush())
            .map_err(EditorError::Terminal)?;

        // Drop input typed before the editor took over.
        while event::poll(Duration::from_millis(0)).map_err(EditorError::Terminal)? {
            event::read().map_err(EditorError::Terminal)?;
        }

        // Cursor position query; the reply is parsed out of the input
        // stream with any interleaved keys re-buffered.
        let (column, _row) = cursor::position().map_err(EditorError::Terminal)?;
        if column != 0 {
            out.queue(Print(LACK_EOL))
                .and_then(|out| out.flush())
                .map_err(EditorError::Terminal)?;
        }
        Ok(())
    }

    /// Restore autowrap and cooked mode.
    pub(crate) fn finish<W: Write>(&mut self, out: &mut W) -> Result<(), EditorError> {
        self.active = false;
        out.queue(Print("\x1b[?7h"))
            .and_then(|out| out.flush())
            .map_err(EditorError::Terminal)?;
        terminal::disable_raw_mode().map_err(EditorError::Terminal)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Safety net for panics and early returns; calling this twice is
        // harmless on every platform crossterm supports.
        if self.active {
            if let Err(err) = terminal::disable_raw_mode() {
                warn!("could not restore the terminal: {err}");
            }
        }
    }
}
