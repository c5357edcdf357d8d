//! End-to-end dispatch contract: scripted sessions against the mock store,
//! exercising the public API the frontends use.

use std::sync::Arc;

use expresso_term::commands::{dispatch, Effect};
use expresso_term::editor::EditorOverlay;
use expresso_term::remote::{FileStore, MockFileStore};
use expresso_term::render::LineKind;
use expresso_term::session::SessionState;

async fn run(store: &MockFileStore, session: &mut SessionState, line: &str) -> Vec<String> {
    let outcome = dispatch(line, session, store).await;
    outcome
        .lines
        .iter()
        .flat_map(|l| l.split_lines())
        .map(|l| l.text)
        .collect()
}

#[tokio::test]
async fn file_lifecycle_through_the_dispatcher() {
    let store = MockFileStore::new();
    let mut session = SessionState::default();

    assert_eq!(run(&store, &mut session, "ls").await, vec!["(empty)"]);

    run(&store, &mut session, "touch notes.txt").await;
    assert_eq!(store.file("notes.txt").unwrap(), b"");
    assert_eq!(run(&store, &mut session, "ls").await, vec!["notes.txt"]);

    run(&store, &mut session, "cp notes.txt copy.txt").await;
    run(&store, &mut session, "mv copy.txt moved.txt").await;
    assert!(store.file("copy.txt").is_none());
    assert!(store.file("moved.txt").is_some());

    let lines = run(&store, &mut session, "rm moved.txt").await;
    assert_eq!(lines, vec!["Removed"]);
    let lines = run(&store, &mut session, "rm moved.txt").await;
    assert!(lines[0].contains("moved.txt"));
    assert!(lines[0].contains("No such file"));
}

#[tokio::test]
async fn mkdir_creates_the_directory() {
    let store = MockFileStore::new();
    let mut session = SessionState::default();
    let lines = run(&store, &mut session, "mkdir d").await;
    assert_eq!(lines, vec!["Created"]);
    assert_eq!(store.directories(), vec!["d"]);
    assert_eq!(store.calls(), vec!["mkdir d"]);
    // directories live in their own namespace, not the file listing
    assert_eq!(run(&store, &mut session, "ls").await, vec!["(empty)"]);
}

#[tokio::test]
async fn mv_preserves_content_when_cleanup_fails() {
    let store = MockFileStore::new()
        .with_file("a", b"the payload")
        .failing_deletes();
    let mut session = SessionState::default();
    let outcome = dispatch("mv a b", &mut session, &store).await;
    assert!(outcome.lines.iter().all(|l| l.kind != LineKind::Error));
    assert!(outcome.lines.iter().any(|l| l.text.contains("warning")));
    assert_eq!(store.file("b").unwrap(), b"the payload");
}

#[tokio::test]
async fn cd_navigation_updates_the_prompt() {
    let store = MockFileStore::new();
    let mut session = SessionState::default();
    run(&store, &mut session, "cd projects").await;
    run(&store, &mut session, "cd rust").await;
    assert_eq!(session.cwd, "/projects/rust");
    run(&store, &mut session, "cd ..").await;
    assert_eq!(session.cwd, "/");
    assert_eq!(session.prompt(), "root@expresso:/$ ");
}

#[tokio::test]
async fn history_records_entered_lines() {
    let store = MockFileStore::new();
    let mut session = SessionState::default();
    for line in ["pwd", "echo hi"] {
        session.push_history(line);
        run(&store, &mut session, line).await;
    }
    let lines = run(&store, &mut session, "history").await;
    assert_eq!(lines, vec!["pwd", "echo hi"]);
}

#[tokio::test]
async fn editor_round_trip_via_nano_effect() {
    let store = MockFileStore::new();
    let mut session = SessionState::default();
    let outcome = dispatch("nano draft.txt", &mut session, &store).await;
    let Some(Effect::OpenEditor { filename, seed }) = outcome.effect else {
        panic!("nano must open the editor");
    };
    assert_eq!(filename, "draft.txt");
    assert_eq!(seed, "");

    let mut overlay = EditorOverlay::new();
    overlay.open(filename, seed);
    overlay.buffer_mut().unwrap().content = "hello from the overlay".to_string();
    let line = overlay.save(&store).await;
    assert_eq!(line.kind, LineKind::Success);
    assert!(overlay.is_open());

    let lines = run(&store, &mut session, "cat draft.txt").await;
    assert_eq!(lines, vec!["hello from the overlay"]);
}

#[tokio::test]
async fn remote_failures_never_escape_the_dispatcher() {
    let store = MockFileStore::new()
        .failing_list()
        .failing_reads()
        .failing_writes()
        .failing_deletes()
        .failing_mkdir();
    let mut session = SessionState::default();
    for line in [
        "ls",
        "cat a",
        "touch a",
        "rm a",
        "mkdir d",
        "cp a b",
        "mv a b",
    ] {
        let outcome = dispatch(line, &mut session, &store).await;
        assert!(
            outcome.lines.iter().any(|l| l.kind == LineKind::Error),
            "{line} should render an error line"
        );
    }
    // nano is the exception: failures seed an empty buffer instead
    let outcome = dispatch("nano a", &mut session, &store).await;
    assert!(outcome.lines.is_empty());
    assert!(matches!(outcome.effect, Some(Effect::OpenEditor { .. })));
}

#[tokio::test]
async fn dispatch_works_through_a_shared_store_handle() {
    // the TUI hands Arc<dyn FileStore> clones to spawned dispatch tasks
    let store: Arc<dyn FileStore> = Arc::new(MockFileStore::new().with_file("a.txt", b"x"));
    let mut session = SessionState::default();
    let outcome = dispatch("cat a.txt", &mut session, store.as_ref()).await;
    assert_eq!(outcome.lines[0].text, "x");
}
