use std::sync::{Arc, Mutex};

/// Navigator
///
/// The navigation primitive consumed by the shell and the route guard: push a
/// new history entry, replace the current one, or walk back. The guard's
/// redirects always use `replace`, so a denied page never stays reachable via
/// back-navigation.
pub trait Navigator: Send + Sync {
    /// Navigates to `path`, pushing a new history entry.
    fn push(&self, path: &str);

    /// Navigates to `path`, replacing the current history entry.
    fn replace(&self, path: &str);

    /// Steps back one entry and returns the new current path, or `None` when
    /// already at the oldest entry.
    fn back(&self) -> Option<String>;

    /// The path of the current history entry.
    fn current(&self) -> String;
}

/// NavState
///
/// The concrete type used to share the navigator across the application state.
pub type NavState = Arc<dyn Navigator>;

/// HistoryNavigator
///
/// An in-process history stack standing in for the browser's session history.
/// Starts at the home path with a single entry.
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(vec!["/".to_string()]),
        }
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, path: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(path.to_string());
        }
    }

    fn replace(&self, path: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            if let Some(last) = entries.last_mut() {
                *last = path.to_string();
            } else {
                entries.push(path.to_string());
            }
        }
    }

    fn back(&self) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        if entries.len() > 1 {
            entries.pop();
        }
        entries.last().cloned()
    }

    fn current(&self) -> String {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.last().cloned())
            .unwrap_or_else(|| "/".to_string())
    }
}
