//! A modal line editor core for interactive shells.
//!
//! `tideline` reads a single command line from a terminal, with modal
//! editing (insert, command, completion, navigation and history modes),
//! syntax highlighting over a pluggable parser, and a layered renderer
//! that diffs each frame against the last to keep repaints minimal.
//!
//! The editor owns the terminal between the start and end of one
//! [`Editor::read_line`] call: it enters raw mode, paints prompt, input,
//! mode line, tips and the active mode's listing, dispatches each key
//! through the current mode's keymap, and restores the terminal before
//! returning a [`LineRead`].
//!
//! The script language is a collaborator, not a dependency: plug a
//! [`Parser`] in for token streams and a [`NameResolver`] for "is this a
//! real command?" queries, or keep the built-in [`SimpleParser`] and
//! [`SystemResolver`].
//!
//! ## Example
//! ```no_run
//! use tideline::{DefaultPrompt, Editor, LineRead};
//!
//! let mut editor = Editor::create()?;
//! let prompt = DefaultPrompt::default();
//! loop {
//!     match editor.read_line(&prompt) {
//!         LineRead::Line(line) => println!("you typed: {line}"),
//!         LineRead::Eof => break,
//!         LineRead::Err(err) => {
//!             eprintln!("error: {err}");
//!             break;
//!         }
//!     }
//! }
//! # Ok::<(), tideline::EditorError>(())
//! ```

mod actions;
mod completion;
mod core_editor;
mod editor;
mod highlighter;
mod history;
mod keybindings;
mod navigation;
mod painting;
mod prompt;
mod result;
mod styles;
mod terminal;

pub use actions::Action;
pub use completion::{Completer, DefaultCompleter, Span, Suggestion};
pub use core_editor::LineBuffer;
pub use editor::{Editor, TerminalWriter};
pub use highlighter::{
    NameResolver, Parser, PrimaryKind, SimpleParser, Styling, SystemResolver, Token, TokenKind,
};
pub use history::History;
pub use keybindings::{
    default_command_keybindings, default_completion_keybindings, default_history_keybindings,
    default_insert_keybindings, default_navigation_keybindings, KeyCombo, Keymap,
};
pub use prompt::{DefaultPrompt, Prompt};
pub use result::{EditorError, LineRead};
pub use styles::{Styled, StyleSheet};
