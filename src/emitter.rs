#![cfg(feature = "std")]

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{channel, Sender};
use tokio::task::JoinHandle;

use crate::config::{CELL_COUNT, MOVE_QUEUE_LEN};
use crate::protocol::encode_move;
use crate::transport::FrameWriter;
use crate::turn::MoveSink;

/// Sends move requests without blocking the caller.
///
/// Moves go to a writer task that owns the connection's write half, so
/// they leave in click order. At most [`MOVE_QUEUE_LEN`] moves wait for a
/// stalled connection; further clicks are dropped. A failed write is
/// logged and the move is dropped.
#[derive(Clone)]
pub struct MoveEmitter {
    tx: Sender<usize>,
}

impl MoveEmitter {
    /// Start the writer task for `writer`.
    pub fn spawn<W: FrameWriter + 'static>(mut writer: W) -> (Self, JoinHandle<u64>) {
        let (tx, mut rx) = channel::<usize>(MOVE_QUEUE_LEN);
        let task = tokio::spawn(async move {
            let mut sent = 0u64;
            while let Some(cell) = rx.recv().await {
                match writer.send(&encode_move(cell)).await {
                    Ok(()) => {
                        sent += 1;
                        log::debug!("sent move for cell {}", cell);
                    }
                    Err(e) => log::error!("failed to send move for cell {}: {}", cell, e),
                }
            }
            sent
        });
        (Self { tx }, task)
    }
}

impl MoveSink for MoveEmitter {
    fn emit_move(&mut self, cell: usize) -> bool {
        if cell >= CELL_COUNT {
            log::warn!("refusing to send move for cell {}", cell);
            return false;
        }
        match self.tx.try_send(cell) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::warn!("connection is not keeping up, dropping move for cell {}", cell);
                false
            }
            Err(TrySendError::Closed(_)) => {
                log::error!("move writer has stopped, dropping move for cell {}", cell);
                false
            }
        }
    }
}
