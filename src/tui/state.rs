use std::collections::VecDeque;

use crate::editor::EditorOverlay;
use crate::effects::MatrixRain;
use crate::render::RenderedLine;
use crate::session::Theme;

/// Everything the draw pass reads. Prompt and theme are cached here so the
/// render loop never has to take the session lock while a dispatch holds it.
pub struct UiState {
    pub lines: Vec<RenderedLine>,
    pub input: String,
    /// Lines scrolled up from the bottom of the log.
    pub scroll_back: u16,
    pub busy: bool,
    pub queued: VecDeque<String>,
    pub matrix_on: bool,
    pub rain: MatrixRain,
    pub editor: EditorOverlay,
    pub prompt: String,
    pub theme: Theme,
    pub should_exit: bool,
    max_lines: usize,
    /// Local copy of the submitted lines; recall must keep working while a
    /// dispatch holds the session lock.
    history: Vec<String>,
    history_cursor: usize,
}

impl UiState {
    pub fn new(max_lines: usize, width: u16, height: u16) -> Self {
        Self {
            lines: Vec::new(),
            input: String::new(),
            scroll_back: 0,
            busy: false,
            queued: VecDeque::new(),
            matrix_on: false,
            rain: MatrixRain::new(width, height),
            editor: EditorOverlay::new(),
            prompt: String::new(),
            theme: Theme::Default,
            should_exit: false,
            max_lines,
            history: Vec::new(),
            history_cursor: 0,
        }
    }

    pub fn push_history(&mut self, line: &str) {
        self.history.push(line.to_string());
        self.history_cursor = self.history.len();
    }

    /// Up-arrow recall into the input buffer; no-op at the oldest entry.
    pub fn recall_prev(&mut self) {
        if self.history_cursor == 0 {
            return;
        }
        self.history_cursor -= 1;
        if let Some(line) = self.history.get(self.history_cursor) {
            self.input = line.clone();
        }
    }

    /// Down-arrow recall; stepping past the newest entry restores the empty
    /// in-progress line.
    pub fn recall_next(&mut self) {
        if self.history_cursor >= self.history.len() {
            return;
        }
        self.history_cursor += 1;
        self.input = self
            .history
            .get(self.history_cursor)
            .cloned()
            .unwrap_or_default();
    }

    /// Appends a rendered line, splitting embedded newlines and trimming the
    /// log to its cap. New output snaps the view back to the bottom.
    pub fn push_line(&mut self, line: &RenderedLine) {
        self.lines.extend(line.split_lines());
        if self.lines.len() > self.max_lines {
            let excess = self.lines.len() - self.max_lines;
            self.lines.drain(..excess);
        }
        self.scroll_back = 0;
    }

    pub fn scroll_up(&mut self, by: u16) {
        let cap = self.lines.len() as u16;
        self.scroll_back = self.scroll_back.saturating_add(by).min(cap);
    }

    pub fn scroll_down(&mut self, by: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(by);
    }
}
