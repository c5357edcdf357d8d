//! Remote file-operation handlers, plus the simulated file commands.
//!
//! Every remote failure is recovered here and rendered as an error line;
//! nothing propagates past the dispatcher boundary.

use crate::commands::{DispatchOutcome, Effect};
use crate::remote::{FileStore, ReadOutcome};
use crate::render::RenderedLine;

fn usage(text: &str) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(format!("usage: {text}")))
}

pub async fn ls(store: &dyn FileStore) -> DispatchOutcome {
    match store.list().await {
        Ok(names) if names.is_empty() => DispatchOutcome::line(RenderedLine::out("(empty)")),
        Ok(names) => DispatchOutcome::line(RenderedLine::out(names.join("  "))),
        Err(err) => DispatchOutcome::line(RenderedLine::error(format!(
            "ls: cannot read file listing: {err}"
        ))),
    }
}

pub async fn cat(store: &dyn FileStore, name: Option<&String>) -> DispatchOutcome {
    let Some(name) = name else {
        return usage("cat <file>");
    };
    match store.read(name).await {
        Ok(ReadOutcome::Content(bytes)) => {
            DispatchOutcome::line(RenderedLine::out(String::from_utf8_lossy(&bytes).into_owned()))
        }
        Ok(ReadOutcome::NotFound) => DispatchOutcome::line(RenderedLine::error(format!(
            "cat: {name}: No such file"
        ))),
        Err(err) => DispatchOutcome::line(RenderedLine::error(format!("cat: {name}: {err}"))),
    }
}

/// Best-effort read: any failure seeds an empty buffer, never an error line.
pub async fn nano(store: &dyn FileStore, name: Option<&String>) -> DispatchOutcome {
    let Some(name) = name else {
        return usage("nano <file>");
    };
    let seed = match store.read(name).await {
        Ok(ReadOutcome::Content(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
        Ok(ReadOutcome::NotFound) | Err(_) => String::new(),
    };
    DispatchOutcome::effect(Effect::OpenEditor {
        filename: name.clone(),
        seed,
    })
}

pub async fn touch(store: &dyn FileStore, name: Option<&String>) -> DispatchOutcome {
    let Some(name) = name else {
        return usage("touch <file>");
    };
    match store.write(name, b"").await {
        Ok(()) => DispatchOutcome::line(RenderedLine::success("Done")),
        Err(err) => DispatchOutcome::line(RenderedLine::error(format!(
            "touch: cannot create '{name}': {err}"
        ))),
    }
}

pub async fn rm(store: &dyn FileStore, name: Option<&String>) -> DispatchOutcome {
    let Some(name) = name else {
        return usage("rm <file>");
    };
    match store.delete(name).await {
        Ok(()) => DispatchOutcome::line(RenderedLine::success("Removed")),
        Err(err) if err.is_not_found() => DispatchOutcome::line(RenderedLine::error(format!(
            "rm: cannot remove '{name}': No such file"
        ))),
        Err(err) => DispatchOutcome::line(RenderedLine::error(format!(
            "rm: cannot remove '{name}': {err}"
        ))),
    }
}

pub async fn mkdir(store: &dyn FileStore, name: Option<&String>) -> DispatchOutcome {
    let Some(name) = name else {
        return usage("mkdir <dir>");
    };
    match store.make_directory(name).await {
        Ok(()) => DispatchOutcome::line(RenderedLine::success("Created")),
        Err(err) => DispatchOutcome::line(RenderedLine::error(format!(
            "mkdir: cannot create directory '{name}': {err}"
        ))),
    }
}

/// Shared body of `cp` and `mv`: read-then-write, and for `mv` a source delete
/// only once both sides succeeded. A failed cleanup delete is a warning, not a
/// failure — the destination already holds the content.
pub async fn copy(store: &dyn FileStore, args: &[String], move_source: bool) -> DispatchOutcome {
    let verb = if move_source { "mv" } else { "cp" };
    let (Some(src), Some(dst)) = (args.get(1), args.get(2)) else {
        return usage(&format!("{verb} <src> <dst>"));
    };
    let content = match store.read(src).await {
        Ok(ReadOutcome::Content(bytes)) => bytes,
        Ok(ReadOutcome::NotFound) => {
            return DispatchOutcome::line(RenderedLine::error(format!(
                "{verb}: cannot read '{src}': No such file"
            )));
        }
        Err(err) => {
            return DispatchOutcome::line(RenderedLine::error(format!(
                "{verb}: cannot read '{src}': {err}"
            )));
        }
    };
    if let Err(err) = store.write(dst, &content).await {
        return DispatchOutcome::line(RenderedLine::error(format!(
            "{verb}: cannot write '{dst}': {err}"
        )));
    }
    if move_source {
        if let Err(err) = store.delete(src).await {
            return DispatchOutcome::lines(vec![
                RenderedLine::success("Success"),
                RenderedLine::out(format!(
                    "mv: warning: copied to '{dst}' but could not remove '{src}': {err}"
                )),
            ]);
        }
    }
    DispatchOutcome::line(RenderedLine::success("Success"))
}

pub fn head() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("Mock: Top 10 lines..."))
}

pub fn tail() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("Mock: Last 10 lines..."))
}

pub fn wc(name: Option<&String>) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(format!(
        "10 50 400 {}",
        name.map(String::as_str).unwrap_or("")
    )))
}

pub fn du(path: Option<&String>) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(format!(
        "4.0K {}",
        path.map(String::as_str).unwrap_or(".")
    )))
}

pub fn chmod() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("Mode changed."))
}

pub fn grep() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("Searching..."))
}

pub fn stat() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("Inode: 123456 Size: 1024"))
}

pub fn find() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("."))
}

#[cfg(test)]
mod tests {
    use super::{cat, copy, ls, nano, rm, touch};
    use crate::commands::Effect;
    use crate::remote::MockFileStore;
    use crate::render::LineKind;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[tokio::test]
    async fn ls_renders_empty_marker() {
        let store = MockFileStore::new();
        let outcome = ls(&store).await;
        assert_eq!(outcome.lines[0].text, "(empty)");
        let store = MockFileStore::new()
            .with_file("a.txt", b"1")
            .with_file("b.txt", b"2");
        let outcome = ls(&store).await;
        assert_eq!(outcome.lines[0].text, "a.txt  b.txt");
    }

    #[tokio::test]
    async fn ls_failure_is_an_error_line() {
        let store = MockFileStore::new().failing_list();
        let outcome = ls(&store).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Error);
    }

    #[tokio::test]
    async fn cat_distinguishes_missing_argument_and_missing_file() {
        let store = MockFileStore::new();
        let outcome = cat(&store, None).await;
        assert_eq!(outcome.lines[0].text, "usage: cat <file>");
        assert!(store.calls().is_empty());
        let name = "ghost.txt".to_string();
        let outcome = cat(&store, Some(&name)).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Error);
        assert!(outcome.lines[0].text.contains("ghost.txt"));
    }

    #[tokio::test]
    async fn touch_writes_zero_length_body() {
        let store = MockFileStore::new().with_file("a.txt", b"old");
        let name = "a.txt".to_string();
        let outcome = touch(&store, Some(&name)).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Success);
        // create-or-truncate
        assert_eq!(store.file("a.txt").unwrap(), b"");
    }

    #[tokio::test]
    async fn rm_failure_mentions_the_name_and_never_claims_success() {
        let store = MockFileStore::new().failing_deletes();
        let name = "locked.txt".to_string();
        let outcome = rm(&store, Some(&name)).await;
        assert_eq!(outcome.lines.len(), 1);
        assert_eq!(outcome.lines[0].kind, LineKind::Error);
        assert!(outcome.lines[0].text.contains("locked.txt"));
    }

    #[tokio::test]
    async fn rm_missing_file_is_a_distinct_error() {
        let store = MockFileStore::new();
        let name = "ghost.txt".to_string();
        let outcome = rm(&store, Some(&name)).await;
        assert!(outcome.lines[0].text.contains("No such file"));
    }

    #[tokio::test]
    async fn cp_with_failing_read_issues_no_write() {
        let store = MockFileStore::new().failing_reads();
        let outcome = copy(&store, &args(&["cp", "a", "b"]), false).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Error);
        assert!(outcome.lines[0].text.contains("'a'"));
        assert_eq!(store.calls(), vec!["read a"]);
    }

    #[tokio::test]
    async fn cp_never_deletes_the_source() {
        let store = MockFileStore::new().with_file("a", b"payload");
        let outcome = copy(&store, &args(&["cp", "a", "b"]), false).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Success);
        assert_eq!(store.file("a").unwrap(), b"payload");
        assert_eq!(store.file("b").unwrap(), b"payload");
        assert_eq!(store.calls(), vec!["read a", "write b"]);
    }

    #[tokio::test]
    async fn mv_deletes_source_after_successful_write() {
        let store = MockFileStore::new().with_file("a", b"payload");
        let outcome = copy(&store, &args(&["mv", "a", "b"]), true).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Success);
        assert!(store.file("a").is_none());
        assert_eq!(store.file("b").unwrap(), b"payload");
    }

    #[tokio::test]
    async fn mv_failed_cleanup_is_a_warning_not_a_failure() {
        let store = MockFileStore::new()
            .with_file("a", b"payload")
            .failing_deletes();
        let outcome = copy(&store, &args(&["mv", "a", "b"]), true).await;
        assert!(outcome
            .lines
            .iter()
            .all(|line| line.kind != LineKind::Error));
        assert!(outcome
            .lines
            .iter()
            .any(|line| line.text.contains("warning")));
        // destination content equals source content
        assert_eq!(store.file("b").unwrap(), b"payload");
    }

    #[tokio::test]
    async fn nano_on_missing_file_seeds_empty_buffer() {
        let store = MockFileStore::new();
        let name = "new.txt".to_string();
        let outcome = nano(&store, Some(&name)).await;
        assert!(outcome.lines.is_empty());
        assert_eq!(
            outcome.effect,
            Some(Effect::OpenEditor {
                filename: "new.txt".to_string(),
                seed: String::new(),
            })
        );
    }

    #[tokio::test]
    async fn nano_on_transport_failure_also_seeds_empty() {
        let store = MockFileStore::new().failing_reads();
        let name = "new.txt".to_string();
        let outcome = nano(&store, Some(&name)).await;
        assert!(outcome.lines.is_empty());
        assert!(matches!(
            outcome.effect,
            Some(Effect::OpenEditor { ref seed, .. }) if seed.is_empty()
        ));
    }

    #[tokio::test]
    async fn nano_seeds_existing_content() {
        let store = MockFileStore::new().with_file("notes.txt", b"hello");
        let name = "notes.txt".to_string();
        let outcome = nano(&store, Some(&name)).await;
        assert_eq!(
            outcome.effect,
            Some(Effect::OpenEditor {
                filename: "notes.txt".to_string(),
                seed: "hello".to_string(),
            })
        );
    }
}
