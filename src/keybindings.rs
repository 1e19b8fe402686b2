use std::fmt::{Display, Formatter};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::actions::{self, Action};
use crate::editor::Mode;
use crate::result::EditorError;

/// A key chord: one key code plus its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCombo {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyCombo {
    pub fn new(modifiers: KeyModifiers, code: KeyCode) -> KeyCombo {
        KeyCombo { modifiers, code }
    }

    pub fn plain(code: KeyCode) -> KeyCombo {
        Self::new(KeyModifiers::NONE, code)
    }

    pub fn char(c: char) -> KeyCombo {
        Self::plain(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> KeyCombo {
        Self::new(KeyModifiers::CONTROL, KeyCode::Char(c))
    }

    pub fn alt(code: KeyCode) -> KeyCombo {
        Self::new(KeyModifiers::ALT, code)
    }

    /// Shift is already expressed in the case of a `Char` key; fold it
    /// away so `D` and `Shift-D` look up the same binding.
    fn normalized(self) -> KeyCombo {
        match self.code {
            KeyCode::Char(_) => KeyCombo {
                modifiers: self.modifiers - KeyModifiers::SHIFT,
                code: self.code,
            },
            _ => self,
        }
    }
}

impl From<KeyEvent> for KeyCombo {
    fn from(event: KeyEvent) -> KeyCombo {
        KeyCombo::new(event.modifiers, event.code)
    }
}

impl Display for KeyCombo {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift-")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            code => write!(f, "{code:?}"),
        }
    }
}

/// Bindings of one mode: exact chords plus the default binding that
/// matches any key not otherwise bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keymap {
    bindings: Vec<(KeyCombo, Action)>,
    default: Action,
}

impl Keymap {
    pub fn new(default: Action) -> Keymap {
        Keymap {
            bindings: Vec::new(),
            default,
        }
    }

    pub fn add_binding(&mut self, modifiers: KeyModifiers, code: KeyCode, action: Action) {
        self.bindings
            .push((KeyCombo::new(modifiers, code), action));
    }

    /// The action for `key`: an exact match, else the default binding.
    pub(crate) fn find(&self, key: KeyCombo) -> Action {
        let key = key.normalized();
        self.bindings
            .iter()
            .find(|(combo, _)| *combo == key)
            .map(|(_, action)| *action)
            .unwrap_or(self.default)
    }

    pub(crate) fn bound_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.bindings
            .iter()
            .map(|(_, action)| *action)
            .chain(std::iter::once(self.default))
    }

    fn validate(&self, mode: &str) -> Result<(), EditorError> {
        for (i, (combo, _)) in self.bindings.iter().enumerate() {
            if self.bindings[i + 1..].iter().any(|(other, _)| other == combo) {
                return Err(EditorError::Programmer(format!(
                    "duplicate binding for {combo} in {mode} mode"
                )));
            }
        }
        for action in self.bound_actions() {
            if actions::lookup(&action.to_string()).is_none() {
                return Err(EditorError::Programmer(format!(
                    "no action named {action} in the registry"
                )));
            }
        }
        Ok(())
    }
}

/// The per-mode keymaps.
#[derive(Debug, Clone)]
pub(crate) struct Keymaps {
    pub(crate) insert: Keymap,
    pub(crate) command: Keymap,
    pub(crate) completion: Keymap,
    pub(crate) navigation: Keymap,
    pub(crate) history: Keymap,
}

impl Keymaps {
    pub(crate) fn for_mode(&self, mode: Mode) -> &Keymap {
        match mode {
            Mode::Insert => &self.insert,
            Mode::Command => &self.command,
            Mode::Completion => &self.completion,
            Mode::Navigation => &self.navigation,
            Mode::History => &self.history,
        }
    }

    /// Startup check: every referenced action resolves and no chord is
    /// bound twice. A failure here is a programming error, not a user
    /// error.
    pub(crate) fn validate(&self) -> Result<(), EditorError> {
        self.insert.validate("insert")?;
        self.command.validate("command")?;
        self.completion.validate("completion")?;
        self.navigation.validate("navigation")?;
        self.history.validate("history")?;
        Ok(())
    }
}

impl Default for Keymaps {
    fn default() -> Keymaps {
        Keymaps {
            insert: default_insert_keybindings(),
            command: default_command_keybindings(),
            completion: default_completion_keybindings(),
            navigation: default_navigation_keybindings(),
            history: default_history_keybindings(),
        }
    }
}

/// The insert-mode bindings.
pub fn default_insert_keybindings() -> Keymap {
    use KeyCode::*;

    let mut keymap = Keymap::new(Action::DefaultInsert);
    keymap.add_binding(KeyModifiers::NONE, Esc, Action::StartCommand);
    keymap.add_binding(KeyModifiers::CONTROL, Char('u'), Action::KillLineLeft);
    keymap.add_binding(KeyModifiers::CONTROL, Char('k'), Action::KillLineRight);
    keymap.add_binding(KeyModifiers::NONE, Backspace, Action::KillRuneLeft);
    keymap.add_binding(KeyModifiers::NONE, Delete, Action::KillRuneRight);
    keymap.add_binding(KeyModifiers::NONE, Left, Action::MoveDotLeft);
    keymap.add_binding(KeyModifiers::NONE, Right, Action::MoveDotRight);
    keymap.add_binding(KeyModifiers::NONE, Up, Action::MoveDotUp);
    keymap.add_binding(KeyModifiers::NONE, Down, Action::MoveDotDown);
    keymap.add_binding(KeyModifiers::ALT, Enter, Action::InsertKey);
    keymap.add_binding(KeyModifiers::NONE, Enter, Action::ReturnLine);
    keymap.add_binding(KeyModifiers::CONTROL, Char('d'), Action::ReturnEof);
    keymap.add_binding(KeyModifiers::NONE, Tab, Action::StartCompletion);
    keymap.add_binding(KeyModifiers::NONE, PageUp, Action::StartHistory);
    keymap.add_binding(KeyModifiers::CONTROL, Char('n'), Action::StartNavigation);
    keymap
}

/// The command-mode bindings: a vi-like subset.
pub fn default_command_keybindings() -> Keymap {
    let mut keymap = Keymap::new(Action::DefaultCommand);
    keymap.add_binding(KeyModifiers::NONE, KeyCode::Char('i'), Action::StartInsert);
    keymap.add_binding(KeyModifiers::NONE, KeyCode::Char('h'), Action::MoveDotLeft);
    keymap.add_binding(KeyModifiers::NONE, KeyCode::Char('l'), Action::MoveDotRight);
    keymap.add_binding(KeyModifiers::NONE, KeyCode::Char('D'), Action::KillLineRight);
    keymap
}

/// The completion-mode bindings.
pub fn default_completion_keybindings() -> Keymap {
    use KeyCode::*;

    let mut keymap = Keymap::new(Action::DefaultCompletion);
    keymap.add_binding(KeyModifiers::NONE, Esc, Action::CancelCompletion);
    keymap.add_binding(KeyModifiers::NONE, Up, Action::SelectCandUp);
    keymap.add_binding(KeyModifiers::NONE, Down, Action::SelectCandDown);
    keymap.add_binding(KeyModifiers::NONE, Left, Action::SelectCandLeft);
    keymap.add_binding(KeyModifiers::NONE, Right, Action::SelectCandRight);
    keymap.add_binding(KeyModifiers::NONE, Tab, Action::CycleCandRight);
    keymap
}

/// The navigation-mode bindings.
pub fn default_navigation_keybindings() -> Keymap {
    use KeyCode::*;

    let mut keymap = Keymap::new(Action::DefaultNavigation);
    keymap.add_binding(KeyModifiers::NONE, Up, Action::SelectNavUp);
    keymap.add_binding(KeyModifiers::NONE, Down, Action::SelectNavDown);
    keymap.add_binding(KeyModifiers::NONE, Left, Action::AscendNav);
    keymap.add_binding(KeyModifiers::NONE, Right, Action::DescendNav);
    keymap
}

/// The history-mode bindings.
pub fn default_history_keybindings() -> Keymap {
    use KeyCode::*;

    let mut keymap = Keymap::new(Action::DefaultHistory);
    keymap.add_binding(KeyModifiers::NONE, Esc, Action::CancelHistory);
    keymap.add_binding(KeyModifiers::NONE, PageUp, Action::SelectHistoryPrev);
    keymap.add_binding(KeyModifiers::NONE, PageDown, Action::SelectHistoryNext);
    keymap
}
