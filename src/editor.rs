//! Nano-style editor overlay: a two-state machine around a single buffer.
//!
//! At most one buffer is open at a time; normal command entry is suspended
//! while it is. Saving writes the buffer out but keeps the overlay open —
//! closing is always a separate, explicit action.

use crate::remote::{FileStore, StoreError};
use crate::render::RenderedLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct EditorOverlay {
    buffer: Option<EditorBuffer>,
}

impl EditorOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn buffer(&self) -> Option<&EditorBuffer> {
        self.buffer.as_ref()
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EditorBuffer> {
        self.buffer.as_mut()
    }

    /// closed → open. A second open replaces the buffer; the frontends never
    /// issue one because command entry is suspended while the overlay is up.
    pub fn open(&mut self, filename: impl Into<String>, seed: impl Into<String>) {
        self.buffer = Some(EditorBuffer {
            filename: filename.into(),
            content: seed.into(),
        });
    }

    /// open → closed, discarding the buffer. Never touches the network.
    pub fn cancel(&mut self) {
        self.buffer = None;
    }

    /// Writes the exact current buffer content to the associated filename.
    /// The overlay stays open either way.
    pub async fn save(&self, store: &dyn FileStore) -> RenderedLine {
        let Some(buf) = self.buffer.as_ref() else {
            return RenderedLine::error("no buffer open");
        };
        save_buffer(store, &buf.filename, &buf.content).await
    }
}

/// Write-out shared by both frontends; the TUI calls it from a spawned task
/// with a snapshot of the buffer.
pub async fn save_buffer(store: &dyn FileStore, filename: &str, content: &str) -> RenderedLine {
    match store.write(filename, content.as_bytes()).await {
        Ok(()) => RenderedLine::success(format!("Successfully wrote to {filename}")),
        Err(err) => RenderedLine::error(format_write_error(filename, &err)),
    }
}

fn format_write_error(filename: &str, err: &StoreError) -> String {
    format!("Error writing {filename}: {err}")
}
