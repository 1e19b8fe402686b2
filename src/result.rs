use std::io;

use thiserror::Error;

/// Failures the editor can run into while a line is being read.
///
/// Action-level problems (an empty completion, a history walk that found
/// nothing) are not errors: they surface as tips and a bell and the loop
/// keeps going.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Raw mode, cursor query or terminal restore failed
    #[error("terminal: {0}")]
    Terminal(#[source] io::Error),

    /// Decoding a key from the input stream failed
    #[error("read: {0}")]
    Read(#[source] io::Error),

    /// Writing the refreshed screen failed
    #[error("write: {0}")]
    Write(#[source] io::Error),

    /// A structurally broken keybinding table was detected at startup
    #[error("bad keybinding table: {0}")]
    Programmer(String),
}

/// The result of [`Editor::read_line`](crate::Editor::read_line).
///
/// Effectively a tagged union: exactly one of a submitted line, an EOF
/// request on an empty line, or an error that ended the loop.
#[derive(Debug)]
pub enum LineRead {
    /// The user submitted this line
    Line(String),
    /// The user asked for end-of-file on an empty line
    Eof,
    /// Reading was aborted by a terminal or I/O failure
    Err(EditorError),
}

impl LineRead {
    /// Whether this result carries a submitted line.
    pub fn is_line(&self) -> bool {
        matches!(self, LineRead::Line(_))
    }
}
