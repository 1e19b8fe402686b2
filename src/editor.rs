use std::io::{self, BufWriter, Stderr, Write};

use crossterm::event::{self, Event, KeyEventKind};
use log::warn;

use crate::actions::{self, ActionResult};
use crate::completion::{Completer, CompletionState, DefaultCompleter};
use crate::core_editor::LineBuffer;
use crate::highlighter::{highlight, NameResolver, Parser, SimpleParser, SystemResolver, Token};
use crate::history::{History, HistoryWalk};
use crate::keybindings::{KeyCombo, Keymaps};
use crate::navigation::NavigationState;
use crate::painting::{render_editor, Writer};
use crate::prompt::Prompt;
use crate::result::{EditorError, LineRead};
use crate::styles::{Styled, StyleSheet};
use crate::terminal::TerminalSession;

/// The sink `Editor::create` paints to.
pub type TerminalWriter = BufWriter<Stderr>;

/// The active input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Insert,
    Command,
    Completion,
    Navigation,
    History,
}

impl Mode {
    /// Whether the cursor rests in the mode line's filter field instead
    /// of the command line.
    pub(crate) fn cursor_on_mode_line(self) -> bool {
        matches!(self, Mode::Completion | Mode::Navigation)
    }
}

/// Everything that exists only while one line is being read.
pub(crate) struct EditorState {
    pub(crate) buffer: LineBuffer,
    pub(crate) tokens: Vec<Token>,
    pub(crate) prompt: Vec<Styled>,
    pub(crate) rprompt: Vec<Styled>,
    pub(crate) tips: Vec<String>,
    pub(crate) notifications: Vec<String>,
    pub(crate) mode: Mode,
    pub(crate) completion: Option<CompletionState>,
    pub(crate) navigation: Option<NavigationState>,
    pub(crate) history_walk: Option<HistoryWalk>,
}

impl Default for EditorState {
    fn default() -> Self {
        EditorState {
            buffer: LineBuffer::new(),
            tokens: Vec::new(),
            prompt: Vec::new(),
            rprompt: Vec::new(),
            tips: Vec::new(),
            notifications: Vec::new(),
            mode: Mode::Insert,
            completion: None,
            navigation: None,
            history_walk: None,
        }
    }
}

/// The line editor.
///
/// ## Example usage
/// ```no_run
/// use tideline::{DefaultPrompt, Editor, LineRead};
///
/// let mut editor = Editor::create()?;
/// let prompt = DefaultPrompt::default();
/// match editor.read_line(&prompt) {
///     LineRead::Line(line) => println!("got: {line}"),
///     LineRead::Eof => {}
///     LineRead::Err(err) => eprintln!("{err}"),
/// }
/// # Ok::<(), tideline::EditorError>(())
/// ```
pub struct Editor<W: Write = TerminalWriter> {
    pub(crate) writer: Writer<W>,
    pub(crate) history: History,
    pub(crate) completer: Box<dyn Completer>,
    pub(crate) parser: Box<dyn Parser>,
    pub(crate) resolver: Box<dyn NameResolver>,
    pub(crate) sheet: StyleSheet,
    pub(crate) keymaps: Keymaps,
    pub(crate) state: EditorState,
}

impl Editor<TerminalWriter> {
    /// An editor painting to stderr with the default collaborators.
    pub fn create() -> Result<Editor<TerminalWriter>, EditorError> {
        Editor::with_output(BufWriter::new(io::stderr()), (0, 0))
    }
}

impl<W: Write> Editor<W> {
    /// An editor painting to `out`, assuming the given `(width, height)`
    /// until the terminal reports otherwise.
    pub fn with_output(out: W, size: (u16, u16)) -> Result<Editor<W>, EditorError> {
        let keymaps = Keymaps::default();
        keymaps.validate()?;
        Ok(Editor {
            writer: Writer::new(out, size),
            history: History::new(),
            completer: Box::new(DefaultCompleter::default()),
            parser: Box::new(SimpleParser),
            resolver: Box::new(SystemResolver::default()),
            sheet: StyleSheet::default(),
            keymaps,
            state: EditorState::default(),
        })
    }

    #[must_use]
    pub fn with_completer(mut self, completer: Box<dyn Completer>) -> Self {
        self.completer = completer;
        self
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Box<dyn NameResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, sheet: StyleSheet) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The history is shared with the outer shell; it may pre-load
    /// entries here.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Read one line interactively.
    ///
    /// Returns when the user submits the line, requests EOF on an empty
    /// line, or the terminal fails. The prompt callbacks run before every
    /// refresh.
    pub fn read_line(&mut self, prompt: &dyn Prompt) -> LineRead {
        let (mut session, size) = match TerminalSession::start(self.writer.out_mut()) {
            Ok(started) => started,
            Err(err) => return LineRead::Err(err),
        };
        self.writer.resize(size.0, size.1);
        self.state = EditorState::default();

        let mut lr = self.run_loop(prompt);

        self.conclude(&lr);
        if let Err(err) = self.refresh() {
            warn!("final refresh failed: {err}");
        }
        let newline = self
            .writer
            .out_mut()
            .write_all(b"\r\n")
            .and_then(|()| self.writer.out_mut().flush());
        if let Err(err) = newline {
            warn!("could not finish the line: {err}");
        }

        if let Err(err) = session.finish(self.writer.out_mut()) {
            // Never overwrite the error that ended the loop.
            if matches!(lr, LineRead::Err(_)) {
                warn!("could not restore the terminal: {err}");
            } else {
                lr = LineRead::Err(err);
            }
        }
        lr
    }

    fn run_loop(&mut self, prompt: &dyn Prompt) -> LineRead {
        loop {
            self.state.prompt = prompt.render_prompt_left();
            self.state.rprompt = prompt.render_prompt_right();
            if let Err(err) = self.refresh() {
                return LineRead::Err(err);
            }
            self.state.tips.clear();

            let ev = match event::read() {
                Ok(ev) => ev,
                Err(err) => {
                    self.push_tip(format!("read: {err}"));
                    continue;
                }
            };
            match ev {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(lr) = self.dispatch_key(KeyCombo::from(key)) {
                        return lr;
                    }
                }
                Event::Resize(width, height) => self.writer.resize(width, height),
                _ => {}
            }
        }
    }

    /// Look the key up in the current mode's keymap and run the bound
    /// action, re-dispatching the same key when the action switches mode
    /// with reprocessing.
    pub(crate) fn dispatch_key(&mut self, key: KeyCombo) -> Option<LineRead> {
        loop {
            let action = self.keymaps.for_mode(self.state.mode).find(key);
            match actions::run(action, self, key) {
                None | Some(ActionResult::NoAction) => return None,
                Some(ActionResult::ChangeMode(mode)) => {
                    self.state.mode = mode;
                    return None;
                }
                Some(ActionResult::ChangeModeAndReprocess(mode)) => {
                    self.state.mode = mode;
                }
                Some(ActionResult::ExitReadLine(lr)) => return Some(lr),
            }
        }
    }

    /// Re-lex (outside completion mode), re-render and repaint.
    pub(crate) fn refresh(&mut self) -> Result<(), EditorError> {
        if self.state.mode != Mode::Completion {
            self.state.tokens = self.parser.parse(self.state.buffer.as_str());
        }
        let styling = highlight(&self.state.tokens, self.resolver.as_ref(), &self.sheet);
        let (width, height) = self.writer.size();
        let (buf, noti) = render_editor(
            &mut self.state,
            &styling,
            &self.sheet,
            width as usize,
            height as usize,
        );
        self.writer.commit(buf, noti).map_err(EditorError::Write)
    }

    /// Post-loop bookkeeping: record the line in history and put the
    /// state into the shape the final repaint should show.
    pub(crate) fn conclude(&mut self, lr: &LineRead) {
        if let LineRead::Line(line) = lr {
            self.history.append(line.clone());
        }
        self.state.tips.clear();
        self.state.mode = Mode::Insert;
        self.state.completion = None;
        self.state.navigation = None;
        self.state.history_walk = None;
        self.state.rprompt.clear();
        let end = self.state.buffer.as_str().len();
        self.state.buffer.set_dot(end);
    }

    pub(crate) fn push_tip(&mut self, tip: impl Into<String>) {
        self.state.tips.push(tip.into());
    }

    pub(crate) fn beep(&mut self) {
        self.writer.beep();
    }

    /// Apply the selected completion candidate to the line and drop the
    /// completion state.
    pub(crate) fn accept_completion(&mut self) {
        if let Some(completion) = self.state.completion.take() {
            if let Some(candidate) = completion.selected() {
                self.state
                    .buffer
                    .replace_range(completion.begin..completion.end, &candidate.text);
            }
        }
    }

    /// Replace the line with the selected history entry and drop the walk.
    pub(crate) fn accept_history(&mut self) {
        if let Some(walk) = self.state.history_walk.take() {
            self.state.buffer.set_line(walk.line);
        }
    }
}
