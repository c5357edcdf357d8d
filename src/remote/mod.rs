//! Client for the expresso file-storage HTTP API.
//!
//! The compatibility surface is small: `/files`, `/files/{name}`,
//! `/mkdir/{name}`, `/echo/{message}`, `/user-agent`. All operations are
//! independent; there is no client-side queuing, caching, or retry. Every
//! failure is terminal for that one invocation.

pub mod client;
pub mod http;
pub mod mock;

use async_trait::async_trait;

pub use client::HttpFileStore;
pub use http::{HttpConfig, StoreError, StoreErrorKind};
pub use mock::MockFileStore;

/// Outcome of a read. Not-found is a first-class result, not an error: any
/// non-success status from the engine maps here, so handlers can fall back
/// (e.g. `nano` seeding an empty buffer) without inspecting status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Content(Vec<u8>),
    NotFound,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// GET /files — newline-delimited names.
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// GET /files/{name} — raw bytes, or NotFound on any non-success status.
    /// `Err` is reserved for transport failures.
    async fn read(&self, name: &str) -> Result<ReadOutcome, StoreError>;

    /// POST /files/{name} — create-or-overwrite with the given body.
    async fn write(&self, name: &str, content: &[u8]) -> Result<(), StoreError>;

    /// DELETE /files/{name}.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// POST /mkdir/{name} — directories live in their own endpoint namespace.
    async fn make_directory(&self, name: &str) -> Result<(), StoreError>;

    /// GET /echo/{message} — round-trips a message through the engine.
    async fn echo_probe(&self, message: &str) -> Result<String, StoreError>;

    /// GET /user-agent — client-identifying text from the engine.
    async fn identity_probe(&self) -> Result<String, StoreError>;
}
