use std::io::Write;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::completion::CompletionState;
use crate::editor::{Editor, Mode};
use crate::history::HistoryWalk;
use crate::keybindings::KeyCombo;
use crate::navigation::{Descend, NavigationState};
use crate::result::LineRead;

/// Every named editing action a key can be bound to.
///
/// The kebab-case string names (`kill-line-left`, `start-completion`, …)
/// are the registry: keymaps are validated against them at startup.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    KillLineLeft,
    KillLineRight,
    KillRuneLeft,
    KillRuneRight,
    MoveDotLeft,
    MoveDotRight,
    MoveDotUp,
    MoveDotDown,
    InsertKey,
    ReturnLine,
    ReturnEof,
    StartCompletion,
    StartHistory,
    StartNavigation,
    StartCommand,
    StartInsert,
    DefaultInsert,
    DefaultCommand,
    CancelCompletion,
    SelectCandUp,
    SelectCandDown,
    SelectCandLeft,
    SelectCandRight,
    CycleCandRight,
    DefaultCompletion,
    SelectNavUp,
    SelectNavDown,
    AscendNav,
    DescendNav,
    DefaultNavigation,
    SelectHistoryPrev,
    SelectHistoryNext,
    CancelHistory,
    DefaultHistory,
}

/// Look an action up by its registry name.
pub(crate) fn lookup(name: &str) -> Option<Action> {
    Action::from_str(name).ok()
}

/// What an action tells the loop to do next.
#[derive(Debug)]
pub(crate) enum ActionResult {
    /// Keep going
    NoAction,
    /// Switch mode, then read the next key
    ChangeMode(Mode),
    /// Switch mode and dispatch the same key again in the new mode
    ChangeModeAndReprocess(Mode),
    /// Leave the read loop with this result
    ExitReadLine(LineRead),
}

/// Dispatch: the whole registry in one match.
pub(crate) fn run<W: Write>(
    action: Action,
    ed: &mut Editor<W>,
    key: KeyCombo,
) -> Option<ActionResult> {
    use Action::*;
    match action {
        KillLineLeft => {
            ed.state.buffer.kill_line_left();
            None
        }
        KillLineRight => {
            ed.state.buffer.kill_line_right();
            None
        }
        KillRuneLeft => {
            if ed.state.buffer.kill_rune_left().is_none() {
                ed.beep();
            }
            None
        }
        KillRuneRight => {
            if ed.state.buffer.kill_rune_right().is_none() {
                ed.beep();
            }
            None
        }
        MoveDotLeft => {
            ed.state.buffer.move_left();
            None
        }
        MoveDotRight => {
            ed.state.buffer.move_right();
            None
        }
        MoveDotUp => {
            if !ed.state.buffer.move_up() {
                ed.beep();
            }
            None
        }
        MoveDotDown => {
            if !ed.state.buffer.move_down() {
                ed.beep();
            }
            None
        }
        InsertKey => {
            match key.code {
                KeyCode::Char(c) => ed.state.buffer.insert_char(c),
                KeyCode::Enter => ed.state.buffer.insert_char('\n'),
                KeyCode::Tab => ed.state.buffer.insert_char('\t'),
                _ => ed.beep(),
            }
            None
        }
        ReturnLine => Some(ActionResult::ExitReadLine(LineRead::Line(
            ed.state.buffer.as_str().to_owned(),
        ))),
        ReturnEof => {
            if ed.state.buffer.is_empty() {
                Some(ActionResult::ExitReadLine(LineRead::Eof))
            } else {
                ed.beep();
                ed.push_tip("line not empty; eof ignored");
                None
            }
        }
        StartCompletion => start_completion(ed),
        StartHistory => start_history(ed),
        StartNavigation => start_navigation(ed),
        StartCommand => Some(ActionResult::ChangeMode(Mode::Command)),
        StartInsert => Some(ActionResult::ChangeMode(Mode::Insert)),
        DefaultInsert => default_insert(ed, key),
        DefaultCommand => {
            ed.beep();
            None
        }
        CancelCompletion => {
            ed.accept_completion();
            Some(ActionResult::ChangeMode(Mode::Insert))
        }
        SelectCandUp => with_completion(ed, CompletionState::select_up),
        SelectCandDown => with_completion(ed, CompletionState::select_down),
        SelectCandLeft => with_completion(ed, CompletionState::select_left),
        SelectCandRight => with_completion(ed, CompletionState::select_right),
        CycleCandRight => with_completion(ed, CompletionState::cycle_right),
        DefaultCompletion => {
            ed.accept_completion();
            Some(ActionResult::ChangeModeAndReprocess(Mode::Insert))
        }
        SelectNavUp => {
            if let Some(nav) = ed.state.navigation.as_mut() {
                if !nav.select_up(&ed.sheet) {
                    ed.beep();
                }
                None
            } else {
                Some(ActionResult::ChangeMode(Mode::Insert))
            }
        }
        SelectNavDown => {
            if let Some(nav) = ed.state.navigation.as_mut() {
                if !nav.select_down(&ed.sheet) {
                    ed.beep();
                }
                None
            } else {
                Some(ActionResult::ChangeMode(Mode::Insert))
            }
        }
        AscendNav => ascend_nav(ed),
        DescendNav => descend_nav(ed),
        DefaultNavigation => {
            ed.state.navigation = None;
            Some(ActionResult::ChangeModeAndReprocess(Mode::Insert))
        }
        SelectHistoryPrev => with_history_walk(ed, HistoryWalk::prev),
        SelectHistoryNext => with_history_walk(ed, HistoryWalk::next),
        CancelHistory => {
            if let Some(walk) = ed.state.history_walk.take() {
                ed.state.buffer.set_line(walk.saved);
            }
            Some(ActionResult::ChangeMode(Mode::Insert))
        }
        DefaultHistory => {
            ed.accept_history();
            Some(ActionResult::ChangeModeAndReprocess(Mode::Insert))
        }
    }
}

fn default_insert<W: Write>(ed: &mut Editor<W>, key: KeyCombo) -> Option<ActionResult> {
    if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        if let KeyCode::Char(c) = key.code {
            ed.state.buffer.insert_char(c);
            return None;
        }
    }
    ed.push_tip(format!("Unbound: {key}"));
    None
}

fn with_completion<W: Write>(
    ed: &mut Editor<W>,
    op: fn(&mut CompletionState),
) -> Option<ActionResult> {
    match ed.state.completion.as_mut() {
        Some(completion) => {
            op(completion);
            None
        }
        None => Some(ActionResult::ChangeMode(Mode::Insert)),
    }
}

fn with_history_walk<W: Write>(
    ed: &mut Editor<W>,
    op: fn(&mut HistoryWalk, &crate::history::History) -> bool,
) -> Option<ActionResult> {
    match ed.state.history_walk.as_mut() {
        Some(walk) => {
            if !op(walk, &ed.history) {
                ed.beep();
            }
            None
        }
        None => Some(ActionResult::ChangeMode(Mode::Insert)),
    }
}

fn start_completion<W: Write>(ed: &mut Editor<W>) -> Option<ActionResult> {
    let line = ed.state.buffer.as_str().to_owned();
    let dot = ed.state.buffer.dot();
    let suggestions = ed.completer.complete(&line, dot);
    match CompletionState::from_suggestions(&line, suggestions) {
        Some(completion) => {
            ed.state.completion = Some(completion);
            Some(ActionResult::ChangeMode(Mode::Completion))
        }
        None => {
            ed.push_tip("completion: no candidates");
            ed.beep();
            None
        }
    }
}

fn start_history<W: Write>(ed: &mut Editor<W>) -> Option<ActionResult> {
    let line = ed.state.buffer.as_str().to_owned();
    let prefix = line[..ed.state.buffer.dot()].to_owned();
    match HistoryWalk::start(&ed.history, line, prefix) {
        Some(walk) => {
            ed.state.history_walk = Some(walk);
            Some(ActionResult::ChangeMode(Mode::History))
        }
        None => {
            ed.push_tip("history: no matching entry");
            ed.beep();
            None
        }
    }
}

fn start_navigation<W: Write>(ed: &mut Editor<W>) -> Option<ActionResult> {
    match NavigationState::new(&ed.sheet) {
        Ok(nav) => {
            ed.state.navigation = Some(nav);
            Some(ActionResult::ChangeMode(Mode::Navigation))
        }
        Err(err) => {
            ed.push_tip(format!("navigation: {err}"));
            ed.beep();
            None
        }
    }
}

fn ascend_nav<W: Write>(ed: &mut Editor<W>) -> Option<ActionResult> {
    let Some(nav) = ed.state.navigation.as_mut() else {
        return Some(ActionResult::ChangeMode(Mode::Insert));
    };
    match nav.ascend(&ed.sheet) {
        Ok(true) => {}
        Ok(false) => ed.beep(),
        Err(err) => {
            ed.push_tip(format!("navigation: {err}"));
            ed.beep();
        }
    }
    None
}

fn descend_nav<W: Write>(ed: &mut Editor<W>) -> Option<ActionResult> {
    let Some(nav) = ed.state.navigation.as_mut() else {
        return Some(ActionResult::ChangeMode(Mode::Insert));
    };
    match nav.descend(&ed.sheet) {
        Ok(Descend::Entered) => None,
        Ok(Descend::Insert(path)) => {
            ed.state.navigation = None;
            ed.state.buffer.insert_str(&path);
            Some(ActionResult::ChangeMode(Mode::Insert))
        }
        Ok(Descend::Nothing) => {
            ed.beep();
            None
        }
        Err(err) => {
            ed.push_tip(format!("navigation: {err}"));
            ed.beep();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip_through_the_registry() {
        for action in Action::iter() {
            let name = action.to_string();
            assert_eq!(lookup(&name), Some(action), "{name} does not round-trip");
        }
    }

    #[test]
    fn names_are_kebab_case() {
        assert_eq!(Action::KillLineLeft.to_string(), "kill-line-left");
        assert_eq!(Action::CycleCandRight.to_string(), "cycle-cand-right");
        assert_eq!(lookup("start-completion"), Some(Action::StartCompletion));
        assert_eq!(lookup("no-such-action"), None);
    }
}
