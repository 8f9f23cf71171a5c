#![cfg(feature = "std")]
//! Background decoding of authority status frames.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::board::{Board, BoardUpdate};
use crate::protocol::{decode_status, DecodeError};
use crate::transport::{is_frame_error, FrameReader};

#[derive(Debug, Default)]
struct Published {
    board: Board,
    generation: u64,
}

/// Board shared between the decode task and the frame loop.
///
/// Every write replaces the board under one lock, so readers see either
/// the old or the new frame, never a mix. `generation` increases with
/// every change.
#[derive(Debug, Default)]
pub struct SharedBoard {
    state: Mutex<Published>,
}

impl SharedBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Published> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply an authoritative update; returns the new generation.
    pub fn apply(&self, update: &BoardUpdate) -> u64 {
        let mut state = self.lock();
        state.board.apply(update);
        state.generation += 1;
        state.generation
    }

    /// Run `f` on the board; the generation advances only if the board changed.
    pub fn edit<T>(&self, f: impl FnOnce(&mut Board) -> T) -> T {
        let mut state = self.lock();
        let before = state.board;
        let out = f(&mut state.board);
        if state.board != before {
            state.generation += 1;
        }
        out
    }

    /// Copy of the board with its generation.
    pub fn snapshot(&self) -> (Board, u64) {
        let state = self.lock();
        (state.board, state.generation)
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }
}

/// Resolves once `rx` reads true or its sender is gone.
pub async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

/// Counters reported when the decode task ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub applied: u64,
    pub skipped: u64,
}

/// Reads status frames and publishes them to a [`SharedBoard`].
#[derive(Clone)]
pub struct SyncDecoder {
    board: Arc<SharedBoard>,
    ready: Arc<AtomicBool>,
}

impl SyncDecoder {
    pub fn new(board: Arc<SharedBoard>, ready: Arc<AtomicBool>) -> Self {
        Self { board, ready }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Decode one status frame and apply it. A frame that fails to decode
    /// leaves the board untouched.
    pub fn apply_frame(&self, frame: &str) -> Result<u64, DecodeError> {
        let update = decode_status(frame)?;
        Ok(self.board.apply(&update))
    }

    /// Read frames until the stream fails or `shutdown` turns true.
    ///
    /// The first frame only marks the session ready. Malformed status
    /// frames, and frames the transport could not read, are logged and
    /// skipped.
    pub async fn run<R: FrameReader>(
        &self,
        mut reader: R,
        mut shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<DecodeStats> {
        let mut stats = DecodeStats::default();
        loop {
            let frame = tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown) => {
                    log::info!("decoder stopping: {} applied, {} skipped", stats.applied, stats.skipped);
                    return Ok(stats);
                }
                frame = reader.recv() => frame,
            };
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) if is_frame_error(&e) => {
                    stats.skipped += 1;
                    log::warn!("skipping unreadable frame: {}", e);
                    continue;
                }
                Err(e) => return Err(anyhow::anyhow!("lost connection to authority: {}", e)),
            };

            if !self.is_ready() {
                self.ready.store(true, Ordering::Release);
                log::info!("authority ready");
                continue;
            }

            match self.apply_frame(&frame) {
                Ok(generation) => {
                    stats.applied += 1;
                    log::debug!("applied status frame {:?} (generation {})", frame, generation);
                }
                Err(e) => {
                    stats.skipped += 1;
                    log::warn!("skipping malformed status frame: {}", e);
                }
            }
        }
    }

    /// Run the decoder on its own task.
    pub fn spawn<R: FrameReader + 'static>(
        self,
        reader: R,
        shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<anyhow::Result<DecodeStats>> {
        tokio::spawn(async move { self.run(reader, shutdown).await })
    }
}
