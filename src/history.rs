use crate::painting::{
    render, scroll_window, Buffer, ListingRenderer, ListingWithScrollBarRenderer,
};
use crate::styles::{sgr_params, Styled, StyleSheet};

/// Previously entered lines, oldest first.
///
/// The history outlives individual `read_line` calls; persistence is the
/// caller's concern.
#[derive(Debug, Default, Clone)]
pub struct History {
    items: Vec<String>,
}

impl History {
    pub fn new() -> History {
        Self::default()
    }

    pub fn append(&mut self, line: String) {
        self.items.push(line);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

/// A prefix-filtered walk through the history, alive while history mode
/// is active.
#[derive(Debug, Clone)]
pub(crate) struct HistoryWalk {
    /// Index of the selected entry; `items.len()` means none selected
    pub(crate) current: usize,
    /// The line being edited when the walk started, restored on cancel
    pub(crate) saved: String,
    /// Entries must start with this to be visited
    pub(crate) prefix: String,
    /// The selected entry
    pub(crate) line: String,
    /// All matching entries, for the listing
    pub(crate) matches: Vec<(usize, String)>,
}

impl HistoryWalk {
    /// Start a walk at the newest entry matching `prefix`; `None` when
    /// nothing matches.
    pub(crate) fn start(history: &History, saved: String, prefix: String) -> Option<HistoryWalk> {
        let matches = history
            .items()
            .iter()
            .enumerate()
            .filter(|(_, line)| line.starts_with(&prefix))
            .map(|(i, line)| (i, line.clone()))
            .collect();
        let mut walk = HistoryWalk {
            current: history.len(),
            line: String::new(),
            saved,
            prefix,
            matches,
        };
        walk.prev(history).then_some(walk)
    }

    /// Select the closest older entry starting with the prefix. Returns
    /// false (and keeps the selection) when there is none.
    pub(crate) fn prev(&mut self, history: &History) -> bool {
        for i in (0..self.current).rev() {
            if history.items()[i].starts_with(&self.prefix) {
                self.current = i;
                self.line = history.items()[i].clone();
                return true;
            }
        }
        false
    }

    /// Select the closest newer entry starting with the prefix; the
    /// inverse of [`HistoryWalk::prev`].
    pub(crate) fn next(&mut self, history: &History) -> bool {
        for i in self.current + 1..history.len() {
            if history.items()[i].starts_with(&self.prefix) {
                self.current = i;
                self.line = history.items()[i].clone();
                return true;
            }
        }
        false
    }

    /// The matching entries as a listing, windowed to `height` with the
    /// selection visible.
    pub(crate) fn list_render(
        &self,
        width: usize,
        height: usize,
        sheet: &StyleSheet,
    ) -> Option<Buffer> {
        if self.matches.is_empty() {
            return None;
        }
        let selected = self
            .matches
            .iter()
            .position(|(i, _)| *i == self.current)
            .unwrap_or(0);
        let total = self.matches.len();
        let (low, high) = scroll_window(selected, total, height);
        let items: Vec<Styled> = self.matches[low..high]
            .iter()
            .map(|(i, line)| {
                let style = if *i == self.current {
                    sgr_params(&sheet.selected)
                } else {
                    String::new()
                };
                Styled { text: line.clone(), style }
            })
            .collect();
        let buf = if total > height {
            render(
                &ListingWithScrollBarRenderer {
                    listing: ListingRenderer { items: &items },
                    sheet,
                    n: total,
                    low,
                    high,
                    height: high - low,
                },
                width,
            )
        } else {
            render(&ListingRenderer { items: &items }, width)
        };
        Some(buf)
    }
}
