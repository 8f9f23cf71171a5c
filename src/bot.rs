// Random move selection for automated players.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::Side;

/// Picks a uniformly random empty cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMover;

impl RandomMover {
    pub fn new() -> Self {
        Self
    }

    /// A random empty cell, or `None` on a full board.
    pub fn choose<R: Rng>(&self, rng: &mut R, board: &Board) -> Option<usize> {
        let empty: Vec<usize> = board.empty_cells().collect();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.random_range(0..empty.len())])
    }

    /// Move for `side` if it is that side's turn on `board`.
    pub fn choose_for<R: Rng>(&self, rng: &mut R, board: &Board, side: Side) -> Option<usize> {
        if board.next_to_move() != side {
            return None;
        }
        self.choose(rng, board)
    }
}

/// Play a whole match as a client of the authority and return the final board.
///
/// Submits at most one move per distinct board state, so a rebroadcast of
/// an unchanged board never produces a duplicate request.
#[cfg(feature = "std")]
pub async fn play<R, W, G>(reader: &mut R, writer: &mut W, rng: &mut G) -> anyhow::Result<Board>
where
    R: crate::transport::FrameReader,
    W: crate::transport::FrameWriter,
    G: Rng,
{
    use crate::protocol::{decode_side, decode_status, encode_move};
    use crate::transport::is_frame_error;

    let side = decode_side(&reader.recv().await?);
    log::info!("bot playing side {:?}", side);
    // Ready frame.
    reader.recv().await?;

    let mover = RandomMover::new();
    let mut last_moved_on: Option<Board> = None;
    loop {
        let frame = match reader.recv().await {
            Ok(frame) => frame,
            Err(e) if is_frame_error(&e) => {
                log::warn!("bot skipping unreadable frame: {}", e);
                continue;
            }
            Err(e) => return Err(e),
        };
        let update = match decode_status(&frame) {
            Ok(update) => update,
            Err(e) => {
                log::warn!("bot skipping malformed frame: {}", e);
                continue;
            }
        };
        let board = Board::from(&update);
        if board.is_full() {
            return Ok(board);
        }
        if last_moved_on == Some(board) {
            continue;
        }
        if let Some(cell) = mover.choose_for(rng, &board, side) {
            writer.send(&encode_move(cell)).await?;
            last_moved_on = Some(board);
        }
    }
}
