//! Decorative effects: the matrix rain animation and staged fake output.
//!
//! Effects run independently of command dispatch. Staged lines are delivered
//! over a channel by background tokio tasks; the registry holds their handles
//! so shutdown can abort anything still pending. The rain is pure state
//! advanced by the TUI's render tick.

use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::render::RenderedLine;

const RAIN_ALPHABET: &[char] = &[
    'ア', 'ァ', 'カ', 'サ', 'タ', 'ナ', 'ハ', 'マ', 'ヤ', 'ャ', 'ラ', 'ワ', 'ガ', 'ザ', 'ダ',
    'バ', 'パ', 'イ', 'ィ', 'キ', 'シ', 'チ', 'ニ', 'ヒ', 'ミ', 'リ', 'ヰ', 'ギ', 'ジ', 'ヂ',
    'ビ', 'ピ', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// One falling glyph per column; a drop past the bottom resets to the top
/// with a small probability, which is what staggers the columns.
#[derive(Debug)]
pub struct MatrixRain {
    width: u16,
    height: u16,
    drops: Vec<u16>,
}

impl MatrixRain {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            drops: vec![1; width as usize],
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if width != self.width {
            self.drops = vec![1; width as usize];
            self.width = width;
        }
        self.height = height;
    }

    pub fn tick(&mut self) {
        let mut rng = rand::rng();
        for drop in &mut self.drops {
            if *drop >= self.height && rng.random::<f64>() > 0.975 {
                *drop = 0;
            }
            *drop = drop.saturating_add(1);
        }
    }

    /// Visible glyphs this frame as (column, row, char).
    pub fn glyphs(&self) -> Vec<(u16, u16, char)> {
        let mut rng = rand::rng();
        self.drops
            .iter()
            .enumerate()
            .filter(|(_, drop)| **drop <= self.height)
            .map(|(col, drop)| {
                let glyph = RAIN_ALPHABET[rng.random_range(0..RAIN_ALPHABET.len())];
                (col as u16, drop.saturating_sub(1), glyph)
            })
            .collect()
    }
}

/// Owns background effect tasks. Dropping or stopping the registry aborts
/// anything still scheduled.
#[derive(Debug, Default)]
pub struct EffectRegistry {
    handles: Vec<JoinHandle<()>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `line` on `tx` after `delay_ms`, off the dispatch path.
    pub fn spawn_staged(
        &mut self,
        delay_ms: u64,
        line: RenderedLine,
        tx: UnboundedSender<RenderedLine>,
    ) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            let _ = tx.send(line);
        }));
    }

    /// Cancellation handle: aborts every outstanding effect task.
    pub fn stop_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for EffectRegistry {
    fn drop(&mut self) {
        self.stop_all();
    }
}
