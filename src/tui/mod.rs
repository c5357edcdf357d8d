//! Full-screen frontend: scrolling output log, prompt line with history
//! recall, nano-style editor overlay, and the rain.
//!
//! Dispatches run as spawned tasks so the render tick never blocks on the
//! network; exactly one dispatch is in flight at a time and lines submitted
//! while busy queue FIFO behind it.

pub mod input;
pub mod render;
pub mod state;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Mutex;

use crate::commands::{dispatch, DispatchOutcome, Effect};
use crate::editor::save_buffer;
use crate::effects::EffectRegistry;
use crate::remote::FileStore;
use crate::render::RenderedLine;
use crate::session::SessionState;
use crate::tui::input::{map_key, UiAction};
use crate::tui::render::draw;
use crate::tui::state::UiState;

const REFRESH_MS: u64 = 50;
const MAX_LOG_LINES: usize = 2000;

fn spawn_dispatch(
    line: String,
    session: Arc<Mutex<SessionState>>,
    store: Arc<dyn FileStore>,
    tx: UnboundedSender<DispatchOutcome>,
) {
    tokio::spawn(async move {
        let mut session = session.lock().await;
        session.push_history(&line);
        let outcome = dispatch(&line, &mut session, store.as_ref()).await;
        drop(session);
        let _ = tx.send(outcome);
    });
}

pub async fn run_tui(
    session: SessionState,
    store: Arc<dyn FileStore>,
    motd: Vec<String>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, session, store, motd).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: SessionState,
    store: Arc<dyn FileStore>,
    motd: Vec<String>,
) -> anyhow::Result<()> {
    let size = terminal.size()?;
    let mut state = UiState::new(MAX_LOG_LINES, size.width, size.height);
    state.prompt = session.prompt();
    state.theme = session.theme;
    for line in &motd {
        state.push_line(&RenderedLine::out(line.clone()));
    }

    let session = Arc::new(Mutex::new(session));
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<RenderedLine>();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<DispatchOutcome>();
    let mut effects = EffectRegistry::new();

    loop {
        while let Ok(line) = line_rx.try_recv() {
            state.push_line(&line);
        }

        while let Ok(outcome) = outcome_rx.try_recv() {
            state.busy = false;
            for line in &outcome.lines {
                state.push_line(line);
            }
            match outcome.effect {
                Some(Effect::ClearScreen) => state.lines.clear(),
                Some(Effect::Exit) => state.should_exit = true,
                Some(Effect::OpenEditor { filename, seed }) => state.editor.open(filename, seed),
                Some(Effect::ToggleMatrix) => {
                    state.matrix_on = !state.matrix_on;
                    if state.matrix_on {
                        state.push_line(&RenderedLine::success("Matrix Protocol Initiated..."));
                    } else {
                        state.push_line(&RenderedLine::out("Matrix Protocol halted."));
                    }
                }
                Some(Effect::Staged { delay_ms, line }) => {
                    effects.spawn_staged(delay_ms, line, line_tx.clone());
                }
                None => {}
            }
            // the dispatch just released the session lock
            {
                let session = session.lock().await;
                state.prompt = session.prompt();
                state.theme = session.theme;
            }
            if let Some(next) = state.queued.pop_front() {
                state.busy = true;
                spawn_dispatch(next, session.clone(), store.clone(), outcome_tx.clone());
            }
        }

        if state.should_exit {
            break;
        }

        if state.matrix_on {
            state.rain.tick();
        }
        terminal.draw(|f| draw(f, &state))?;

        if !event::poll(Duration::from_millis(REFRESH_MS))? {
            continue;
        }
        match event::read()? {
            CEvent::Resize(width, height) => state.rain.resize(width, height),
            CEvent::Key(key) => {
                let Some(action) = map_key(key, state.editor.is_open()) else {
                    continue;
                };
                match action {
                    UiAction::Quit => break,
                    UiAction::InputChar(c) => state.input.push(c),
                    UiAction::Backspace => {
                        state.input.pop();
                    }
                    UiAction::ScrollUp => state.scroll_up(5),
                    UiAction::ScrollDown => state.scroll_down(5),
                    UiAction::HistoryPrev => state.recall_prev(),
                    UiAction::HistoryNext => state.recall_next(),
                    UiAction::Submit => {
                        let line = std::mem::take(&mut state.input);
                        let trimmed = line.trim().to_string();
                        if trimmed.is_empty() {
                            continue;
                        }
                        let echo = RenderedLine::echo(format!("{}{}", state.prompt, trimmed));
                        state.push_line(&echo);
                        state.push_history(&trimmed);
                        if state.busy {
                            state.queued.push_back(trimmed);
                        } else {
                            state.busy = true;
                            spawn_dispatch(
                                trimmed,
                                session.clone(),
                                store.clone(),
                                outcome_tx.clone(),
                            );
                        }
                    }
                    UiAction::EditorChar(c) => {
                        if let Some(buf) = state.editor.buffer_mut() {
                            buf.content.push(c);
                        }
                    }
                    UiAction::EditorNewline => {
                        if let Some(buf) = state.editor.buffer_mut() {
                            buf.content.push('\n');
                        }
                    }
                    UiAction::EditorBackspace => {
                        if let Some(buf) = state.editor.buffer_mut() {
                            buf.content.pop();
                        }
                    }
                    UiAction::EditorSave => {
                        if let Some(buf) = state.editor.buffer() {
                            let store = store.clone();
                            let tx = line_tx.clone();
                            let filename = buf.filename.clone();
                            let content = buf.content.clone();
                            tokio::spawn(async move {
                                let line = save_buffer(store.as_ref(), &filename, &content).await;
                                let _ = tx.send(line);
                            });
                        }
                    }
                    UiAction::EditorClose => state.editor.cancel(),
                }
            }
            _ => {}
        }
    }

    effects.stop_all();
    Ok(())
}
