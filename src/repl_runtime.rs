//! Plain line-oriented frontend: prompt, read, dispatch, render.
//!
//! Handler execution is serialized by construction — each dispatch is awaited
//! before the next prompt. The editor overlay suspends normal command entry
//! and captures lines into the buffer until `:save` / `:quit`.
//!
//! Stdin is read on a dedicated thread feeding a channel, so staged effect
//! lines render the moment they land instead of waiting for the next Enter.

use std::io::{self, Write};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::commands::{dispatch, Effect};
use crate::editor::EditorOverlay;
use crate::effects::EffectRegistry;
use crate::remote::FileStore;
use crate::render::{LineKind, RenderedLine};
use crate::session::SessionState;

fn print_line(line: &RenderedLine) {
    for part in line.split_lines() {
        match part.kind {
            LineKind::Error => eprintln!("{}", part.text),
            _ => println!("{}", part.text),
        }
    }
}

fn clear_screen() -> anyhow::Result<()> {
    use crossterm::cursor::MoveTo;
    use crossterm::terminal::{Clear, ClearType};
    crossterm::execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

/// Blocking stdin reads happen on their own thread; the channel closes on EOF.
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let entry = line.trim_end_matches(['\r', '\n']).to_string();
                    if tx.send(entry).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Shows the prompt and waits for the next input line, rendering staged
/// effect lines (and re-showing the prompt) whenever they arrive in between.
/// Returns None on EOF.
async fn next_line(
    stdin_rx: &mut UnboundedReceiver<String>,
    fx_rx: &mut UnboundedReceiver<RenderedLine>,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    loop {
        // staged lines already waiting render before input is taken
        tokio::select! {
            biased;
            staged = fx_rx.recv() => {
                let Some(line) = staged else {
                    // effects channel closed; only input remains
                    return Ok(stdin_rx.recv().await);
                };
                println!();
                print_line(&line);
                print!("{prompt}");
                io::stdout().flush()?;
            }
            line = stdin_rx.recv() => return Ok(line),
        }
    }
}

pub async fn run_repl(
    mut session: SessionState,
    store: Arc<dyn FileStore>,
    motd: Vec<String>,
) -> anyhow::Result<()> {
    let (fx_tx, mut fx_rx) = mpsc::unbounded_channel::<RenderedLine>();
    let mut stdin_rx = spawn_stdin_reader();
    let mut effects = EffectRegistry::new();
    let mut editor = EditorOverlay::new();
    let mut matrix_on = false;

    for line in &motd {
        println!("{line}");
    }

    loop {
        if let Some(buf) = editor.buffer() {
            let prompt = format!("[{}]> ", buf.filename);
            let Some(entry) = next_line(&mut stdin_rx, &mut fx_rx, &prompt).await? else {
                break;
            };
            match entry.as_str() {
                ":save" => print_line(&editor.save(store.as_ref()).await),
                ":quit" => {
                    editor.cancel();
                    println!("buffer closed");
                }
                _ => {
                    if let Some(buf) = editor.buffer_mut() {
                        if !buf.content.is_empty() && !buf.content.ends_with('\n') {
                            buf.content.push('\n');
                        }
                        buf.content.push_str(&entry);
                    }
                }
            }
            continue;
        }

        let prompt = session.prompt();
        let Some(line) = next_line(&mut stdin_rx, &mut fx_rx, &prompt).await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        session.push_history(input);

        let outcome = dispatch(input, &mut session, store.as_ref()).await;
        for line in &outcome.lines {
            print_line(line);
        }
        match outcome.effect {
            Some(Effect::ClearScreen) => clear_screen()?,
            Some(Effect::Exit) => {
                println!("logout");
                break;
            }
            Some(Effect::OpenEditor { filename, seed }) => {
                println!("GNU nano 5.4 — {filename}");
                if !seed.is_empty() {
                    println!("{seed}");
                }
                println!("(typed lines append to the buffer; :save writes out, :quit closes)");
                editor.open(filename, seed);
            }
            Some(Effect::ToggleMatrix) => {
                matrix_on = !matrix_on;
                if matrix_on {
                    print_line(&RenderedLine::success(
                        "Matrix Protocol Initiated... (run with --tui for the full rain)",
                    ));
                } else {
                    println!("Matrix Protocol halted.");
                }
            }
            Some(Effect::Staged { delay_ms, line }) => {
                effects.spawn_staged(delay_ms, line, fx_tx.clone());
            }
            None => {}
        }
    }

    effects.stop_all();
    Ok(())
}
