//! Mutable per-session context: working directory, history, prompt identity.
//!
//! Mutation happens only inside handler execution and frontend history recall;
//! nothing here is shared across threads.

use std::time::Instant;

pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_HOSTNAME: &str = "expresso";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Default,
    Red,
    Blue,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "red" => Theme::Red,
            "blue" => Theme::Blue,
            _ => Theme::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Red => "red",
            Theme::Blue => "blue",
        }
    }
}

#[derive(Debug)]
pub struct SessionState {
    pub user: String,
    pub hostname: String,
    pub cwd: String,
    pub theme: Theme,
    history: Vec<String>,
    history_cursor: usize,
    started: Instant,
}

impl SessionState {
    pub fn new(user: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            hostname: hostname.into(),
            cwd: "/".to_string(),
            theme: Theme::Default,
            history: Vec::new(),
            history_cursor: 0,
            started: Instant::now(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$ ", self.user, self.hostname, self.cwd)
    }

    /// Flat directory model: `..` always returns to root, relative names are
    /// joined without normalization.
    pub fn change_dir(&mut self, arg: Option<&str>) {
        let target = arg.unwrap_or("/");
        self.cwd = if target == "/" || target == ".." {
            "/".to_string()
        } else if let Some(abs) = target.strip_prefix('/') {
            format!("/{abs}")
        } else if self.cwd == "/" {
            format!("/{target}")
        } else {
            format!("{}/{}", self.cwd, target)
        };
    }

    pub fn push_history(&mut self, line: &str) {
        self.history.push(line.to_string());
        self.history_cursor = self.history.len();
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Up-arrow recall. Returns the recalled line, or None at the oldest entry.
    pub fn recall_prev(&mut self) -> Option<&str> {
        if self.history_cursor == 0 {
            return None;
        }
        self.history_cursor -= 1;
        self.history.get(self.history_cursor).map(String::as_str)
    }

    /// Down-arrow recall. `Some("")` means "past the newest entry, restore the
    /// in-progress empty line".
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.history_cursor >= self.history.len() {
            return None;
        }
        self.history_cursor += 1;
        if self.history_cursor == self.history.len() {
            Some("")
        } else {
            self.history.get(self.history_cursor).map(String::as_str)
        }
    }

    pub fn uptime_minutes(&self) -> u64 {
        self.started.elapsed().as_secs() / 60
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_USER, DEFAULT_HOSTNAME)
    }
}
