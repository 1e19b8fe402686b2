use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::NameResolver;

/// A [`NameResolver`] backed by the process environment: externals are
/// looked up on `PATH`, paths are checked against the filesystem, and no
/// builtins or user functions exist.
///
/// `PATH` lookups are cached per name; the editor re-runs the highlighter
/// on every keystroke and must not stat the world each time.
pub struct SystemResolver {
    search_path: Vec<PathBuf>,
    externals: RefCell<HashMap<String, bool>>,
}

fn is_executable_file(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        let search_path = env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();
        SystemResolver {
            search_path,
            externals: RefCell::new(HashMap::new()),
        }
    }
}

impl SystemResolver {
    /// A resolver searching exactly the given directories.
    pub fn with_search_path(search_path: Vec<PathBuf>) -> SystemResolver {
        SystemResolver {
            search_path,
            externals: RefCell::new(HashMap::new()),
        }
    }
}

impl NameResolver for SystemResolver {
    fn is_builtin_special(&self, _name: &str) -> bool {
        false
    }

    fn is_builtin_fn(&self, _name: &str) -> bool {
        false
    }

    fn is_user_fn(&self, _ns: &str, _name: &str) -> bool {
        false
    }

    fn is_external(&self, name: &str) -> bool {
        if let Some(&known) = self.externals.borrow().get(name) {
            return known;
        }
        let found = self
            .search_path
            .iter()
            .any(|dir| is_executable_file(&dir.join(name)));
        self.externals.borrow_mut().insert(name.to_owned(), found);
        found
    }

    fn is_executable(&self, path: &str) -> bool {
        is_executable_file(Path::new(path))
    }

    fn is_dir(&self, path: &str) -> bool {
        fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }
}
