use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::painting::{render, scroll_window, str_width, Buffer, ListingRenderer, NavRenderer};
use crate::styles::{sgr_params, Styled, StyleSheet};

/// Lines of a file shown in the preview pane.
const PREVIEW_MAX_LINES: usize = 64;

#[derive(Debug, Clone)]
pub(crate) struct NavEntry {
    pub(crate) name: String,
    pub(crate) style: String,
    pub(crate) is_dir: bool,
}

/// A directory listing with a selection.
#[derive(Debug, Clone, Default)]
pub(crate) struct NavColumn {
    pub(crate) entries: Vec<NavEntry>,
    pub(crate) selected: Option<usize>,
}

impl NavColumn {
    fn selected_entry(&self) -> Option<&NavEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    fn select_name(&mut self, name: &str) {
        self.selected = self.entries.iter().position(|e| e.name == name);
        if self.selected.is_none() && !self.entries.is_empty() {
            self.selected = Some(0);
        }
    }
}

/// The rightmost pane: a listing for directories, text for files.
#[derive(Debug, Clone)]
pub(crate) enum Preview {
    Column(NavColumn),
    Text(Vec<String>),
    Empty,
}

/// What descending into the selection means for the editor.
pub(crate) enum Descend {
    /// Entered a directory; stay in navigation mode
    Entered,
    /// The selection is a file; insert this path into the line
    Insert(String),
    /// Nothing is selected
    Nothing,
}

fn entry_style(path: &Path, sheet: &StyleSheet) -> String {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return String::new();
    };
    if metadata.file_type().is_symlink() {
        return sgr_params(&sheet.nav_symlink);
    }
    if metadata.is_dir() {
        return sgr_params(&sheet.nav_dir);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 != 0 {
            return sgr_params(&sheet.nav_executable);
        }
    }
    String::new()
}

fn read_dir_column(dir: &Path, sheet: &StyleSheet) -> io::Result<NavColumn> {
    let mut entries: Vec<NavEntry> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let path = entry.path();
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
            NavEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                style: entry_style(&path, sheet),
                is_dir,
            }
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    let selected = if entries.is_empty() { None } else { Some(0) };
    Ok(NavColumn { entries, selected })
}

fn file_preview(path: &Path) -> Vec<String> {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .lines()
            .take(PREVIEW_MAX_LINES)
            .map(|l| l.replace('\t', "    "))
            .collect(),
        Err(err) => vec![format!("cannot read: {err}")],
    }
}

/// State of navigation mode: where we are, the three panes, and the
/// selection in the current pane.
#[derive(Debug, Clone)]
pub(crate) struct NavigationState {
    here: PathBuf,
    pub(crate) parent: NavColumn,
    pub(crate) current: NavColumn,
    pub(crate) preview: Preview,
}

impl NavigationState {
    /// Start navigating from the process working directory.
    pub(crate) fn new(sheet: &StyleSheet) -> io::Result<NavigationState> {
        Self::at(env::current_dir()?, sheet)
    }

    pub(crate) fn at(here: PathBuf, sheet: &StyleSheet) -> io::Result<NavigationState> {
        let current = read_dir_column(&here, sheet)?;
        let parent = match here.parent() {
            Some(parent_dir) => {
                let mut column = read_dir_column(parent_dir, sheet)?;
                if let Some(name) = here.file_name() {
                    column.select_name(&name.to_string_lossy());
                }
                column
            }
            None => NavColumn::default(),
        };
        let mut state = NavigationState {
            here,
            parent,
            current,
            preview: Preview::Empty,
        };
        state.refresh_preview(sheet);
        Ok(state)
    }

    pub(crate) fn here(&self) -> &Path {
        &self.here
    }

    fn refresh_preview(&mut self, sheet: &StyleSheet) {
        self.preview = match self.current.selected_entry() {
            None => Preview::Empty,
            Some(entry) => {
                let path = self.here.join(&entry.name);
                if entry.is_dir {
                    match read_dir_column(&path, sheet) {
                        Ok(mut column) => {
                            column.selected = None;
                            Preview::Column(column)
                        }
                        Err(err) => Preview::Text(vec![format!("cannot list: {err}")]),
                    }
                } else {
                    Preview::Text(file_preview(&path))
                }
            }
        }
    }

    /// Move the selection up in the current column. False at the top.
    pub(crate) fn select_up(&mut self, sheet: &StyleSheet) -> bool {
        match self.current.selected {
            Some(i) if i > 0 => {
                self.current.selected = Some(i - 1);
                self.refresh_preview(sheet);
                true
            }
            _ => false,
        }
    }

    /// Move the selection down in the current column. False at the bottom.
    pub(crate) fn select_down(&mut self, sheet: &StyleSheet) -> bool {
        match self.current.selected {
            Some(i) if i + 1 < self.current.entries.len() => {
                self.current.selected = Some(i + 1);
                self.refresh_preview(sheet);
                true
            }
            _ => false,
        }
    }

    /// Make the parent directory current. False at the filesystem root.
    pub(crate) fn ascend(&mut self, sheet: &StyleSheet) -> io::Result<bool> {
        let Some(parent_dir) = self.here.parent().map(Path::to_path_buf) else {
            return Ok(false);
        };
        let from = self.here.file_name().map(|n| n.to_string_lossy().into_owned());
        *self = Self::at(parent_dir, sheet)?;
        if let Some(name) = from {
            self.current.select_name(&name);
            self.refresh_preview(sheet);
        }
        Ok(true)
    }

    /// Enter the selected directory, or report the selected file's path
    /// for insertion into the command line.
    pub(crate) fn descend(&mut self, sheet: &StyleSheet) -> io::Result<Descend> {
        let Some(entry) = self.current.selected_entry() else {
            return Ok(Descend::Nothing);
        };
        let path = self.here.join(&entry.name);
        if entry.is_dir {
            *self = Self::at(path, sheet)?;
            Ok(Descend::Entered)
        } else {
            Ok(Descend::Insert(path.to_string_lossy().into_owned()))
        }
    }

    fn column_items(column: &NavColumn, height: usize, sheet: &StyleSheet) -> Vec<Styled> {
        let total = column.entries.len();
        let (low, high) = scroll_window(column.selected.unwrap_or(0), total, height);
        column.entries[low..high]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if column.selected == Some(low + i) {
                    sgr_params(&sheet.selected)
                } else {
                    entry.style.clone()
                };
                Styled {
                    text: entry.name.clone(),
                    style,
                }
            })
            .collect()
    }

    /// Paint the three panes into a buffer of `width`, at most `height`
    /// rows per pane.
    pub(crate) fn list_render(&self, width: usize, height: usize, sheet: &StyleSheet) -> Buffer {
        let parent_items = Self::column_items(&self.parent, height, sheet);
        let current_items = Self::column_items(&self.current, height, sheet);
        let preview_items = match &self.preview {
            Preview::Column(column) => Self::column_items(column, height, sheet),
            Preview::Text(lines) => lines
                .iter()
                .take(height)
                .map(|line| Styled::plain(line.clone()))
                .collect(),
            Preview::Empty => Vec::new(),
        };

        let full_width = |items: &[Styled]| {
            items
                .iter()
                .map(|item| str_width(&item.text))
                .max()
                .unwrap_or(0)
                + 1
        };
        let full_widths = [
            full_width(&parent_items),
            full_width(&current_items),
            full_width(&preview_items),
        ];

        render(
            &NavRenderer {
                parent: ListingRenderer {
                    items: &parent_items,
                },
                current: ListingRenderer {
                    items: &current_items,
                },
                preview: ListingRenderer {
                    items: &preview_items,
                },
                full_widths,
            },
            width,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> (tempfile::TempDir, StyleSheet) {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        fs::write(dir.path().join("sub/inner.txt"), "inner\n").expect("write");
        fs::write(dir.path().join("a.txt"), "alpha\nbeta\n").expect("write");
        fs::write(dir.path().join("b.txt"), "").expect("write");
        (dir, StyleSheet::default())
    }

    #[test]
    fn lists_the_current_directory_sorted() {
        let (dir, sheet) = fixture();
        let nav = NavigationState::at(dir.path().to_owned(), &sheet).expect("readable");
        let names: Vec<&str> = nav.current.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
        assert_eq!(nav.current.selected, Some(0));
    }

    #[test]
    fn selection_moves_update_the_preview() {
        let (dir, sheet) = fixture();
        let mut nav = NavigationState::at(dir.path().to_owned(), &sheet).expect("readable");
        // a.txt selected: text preview
        assert!(matches!(&nav.preview, Preview::Text(lines) if lines[0] == "alpha"));
        assert!(nav.select_down(&sheet));
        assert!(nav.select_down(&sheet));
        // sub selected: directory preview
        assert!(matches!(&nav.preview, Preview::Column(c) if c.entries.len() == 1));
        assert!(!nav.select_down(&sheet));
        assert!(nav.select_up(&sheet));
        assert!(nav.select_up(&sheet));
        assert!(!nav.select_up(&sheet));
    }

    #[test]
    fn descend_enters_directories_and_reports_files() {
        let (dir, sheet) = fixture();
        let mut nav = NavigationState::at(dir.path().to_owned(), &sheet).expect("readable");
        match nav.descend(&sheet).expect("readable") {
            Descend::Insert(path) => assert!(path.ends_with("a.txt")),
            _ => panic!("expected a file insertion"),
        }
        nav.select_down(&sheet);
        nav.select_down(&sheet);
        assert!(matches!(nav.descend(&sheet).expect("readable"), Descend::Entered));
        assert!(nav.here().ends_with("sub"));
        let names: Vec<&str> = nav.current.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["inner.txt"]);
    }

    #[test]
    fn ascend_returns_to_the_parent_with_it_selected() {
        let (dir, sheet) = fixture();
        let sub = dir.path().join("sub");
        let mut nav = NavigationState::at(sub, &sheet).expect("readable");
        assert!(nav.ascend(&sheet).expect("readable"));
        assert_eq!(nav.here(), dir.path());
        // After ascending from sub, sub is the selected entry.
        let selected = nav.current.selected.and_then(|i| nav.current.entries.get(i));
        assert_eq!(selected.map(|e| e.name.as_str()), Some("sub"));
    }

    #[test]
    fn directories_are_styled_as_directories() {
        let (dir, sheet) = fixture();
        let nav = NavigationState::at(dir.path().to_owned(), &sheet).expect("readable");
        let sub = nav
            .current
            .entries
            .iter()
            .find(|e| e.name == "sub")
            .expect("sub exists");
        assert!(sub.is_dir);
        assert_eq!(sub.style, sgr_params(&sheet.nav_dir));
    }

    #[test]
    fn three_panes_render_within_the_width() {
        let (dir, sheet) = fixture();
        let nav = NavigationState::at(dir.path().to_owned(), &sheet).expect("readable");
        let buf = nav.list_render(40, 6, &sheet);
        for row in &buf.cells {
            let used: usize = row.iter().map(|c| c.width as usize).sum();
            assert!(used <= 40, "pane overlay too wide: {used}");
        }
        assert!(buf.lines() <= 6);
    }
}
