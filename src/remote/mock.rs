//! In-memory store used by unit and integration tests. Records every call so
//! tests can assert which operations a handler did (and did not) issue.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::remote::http::{StoreError, StoreErrorKind};
use crate::remote::{FileStore, ReadOutcome};

#[derive(Debug, Default)]
struct MockInner {
    files: BTreeMap<String, Vec<u8>>,
    directories: Vec<String>,
    calls: Vec<String>,
    fail_list: bool,
    fail_reads: bool,
    fail_writes: bool,
    fail_deletes: bool,
    fail_mkdir: bool,
}

#[derive(Debug, Default)]
pub struct MockFileStore {
    inner: Mutex<MockInner>,
}

fn transport_error(what: &str) -> StoreError {
    StoreError {
        kind: StoreErrorKind::Connection,
        http_status: None,
        message: format!("{what}: connection refused (mock)"),
    }
}

impl MockFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, name: &str, content: &[u8]) -> Self {
        self.inner
            .lock()
            .expect("mock store lock")
            .files
            .insert(name.to_string(), content.to_vec());
        self
    }

    pub fn failing_list(self) -> Self {
        self.inner.lock().expect("mock store lock").fail_list = true;
        self
    }

    pub fn failing_reads(self) -> Self {
        self.inner.lock().expect("mock store lock").fail_reads = true;
        self
    }

    pub fn failing_writes(self) -> Self {
        self.inner.lock().expect("mock store lock").fail_writes = true;
        self
    }

    pub fn failing_deletes(self) -> Self {
        self.inner.lock().expect("mock store lock").fail_deletes = true;
        self
    }

    pub fn failing_mkdir(self) -> Self {
        self.inner.lock().expect("mock store lock").fail_mkdir = true;
        self
    }

    pub fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.inner
            .lock()
            .expect("mock store lock")
            .files
            .get(name)
            .cloned()
    }

    pub fn directories(&self) -> Vec<String> {
        self.inner.lock().expect("mock store lock").directories.clone()
    }

    /// Every operation issued so far, in order, e.g. `write notes.txt`.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().expect("mock store lock").calls.clone()
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut inner = self.inner.lock().expect("mock store lock");
        inner.calls.push("list".to_string());
        if inner.fail_list {
            return Err(transport_error("list files"));
        }
        Ok(inner.files.keys().cloned().collect())
    }

    async fn read(&self, name: &str) -> Result<ReadOutcome, StoreError> {
        let mut inner = self.inner.lock().expect("mock store lock");
        inner.calls.push(format!("read {name}"));
        if inner.fail_reads {
            return Err(transport_error("read file"));
        }
        Ok(match inner.files.get(name) {
            Some(content) => ReadOutcome::Content(content.clone()),
            None => ReadOutcome::NotFound,
        })
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("mock store lock");
        inner.calls.push(format!("write {name}"));
        if inner.fail_writes {
            return Err(StoreError::status(500, "write rejected (mock)"));
        }
        inner.files.insert(name.to_string(), content.to_vec());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("mock store lock");
        inner.calls.push(format!("delete {name}"));
        if inner.fail_deletes {
            return Err(StoreError::status(500, "delete rejected (mock)"));
        }
        if inner.files.remove(name).is_none() {
            return Err(StoreError::status(404, format!("no such file: {name}")));
        }
        Ok(())
    }

    async fn make_directory(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("mock store lock");
        inner.calls.push(format!("mkdir {name}"));
        if inner.fail_mkdir {
            return Err(StoreError::status(500, "mkdir rejected (mock)"));
        }
        inner.directories.push(name.to_string());
        Ok(())
    }

    async fn echo_probe(&self, message: &str) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().expect("mock store lock");
        inner.calls.push(format!("echo {message}"));
        Ok(message.to_string())
    }

    async fn identity_probe(&self) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().expect("mock store lock");
        inner.calls.push("user-agent".to_string());
        Ok("expresso-term (mock)".to_string())
    }
}
