#![cfg(feature = "std")]
//! Reference authority: referees one match between two connected clients.

use std::fmt;

use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::board::Board;
use crate::common::{BoardError, Side};
use crate::protocol::{decode_move, encode_side, encode_status, READY_FRAME};
use crate::sync::shutdown_requested;
use crate::transport::tcp::{TcpFrameReader, TcpFrameWriter, TcpTransport};
use crate::transport::{is_frame_error, FrameReader, FrameWriter};

/// Default cadence of unsolicited status broadcasts.
pub const DEFAULT_BROADCAST_INTERVAL: Duration = Duration::from_secs(1);

/// Why a move request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// The other side is on turn.
    NotYourTurn(Side),
    Board(BoardError),
    /// Every cell is already owned.
    GameOver,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::NotYourTurn(side) => write!(f, "it is not {:?}'s turn", side),
            MoveRejection::Board(e) => write!(f, "{}", e),
            MoveRejection::GameOver => write!(f, "the game is over"),
        }
    }
}

impl std::error::Error for MoveRejection {}

impl From<BoardError> for MoveRejection {
    fn from(err: BoardError) -> Self {
        MoveRejection::Board(err)
    }
}

/// Turn order and board of one match. A opens; turns alternate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Authority {
    board: Board,
    accepted: u32,
    rejected: u32,
}

impl Authority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.board.next_to_move()
    }

    pub fn is_finished(&self) -> bool {
        self.board.is_full()
    }

    pub fn accepted(&self) -> u32 {
        self.accepted
    }

    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    pub fn apply_move(&mut self, side: Side, cell: usize) -> Result<(), MoveRejection> {
        let result = self.try_move(side, cell);
        match result {
            Ok(()) => self.accepted += 1,
            Err(_) => self.rejected += 1,
        }
        result
    }

    fn try_move(&mut self, side: Side, cell: usize) -> Result<(), MoveRejection> {
        if self.is_finished() {
            return Err(MoveRejection::GameOver);
        }
        if side != self.to_move() {
            return Err(MoveRejection::NotYourTurn(side));
        }
        self.board.assign(cell, side)?;
        Ok(())
    }

    pub fn status_frame(&self) -> String {
        encode_status(&self.board.to_update())
    }
}

/// Accept exactly two clients: the first plays A, the second B.
pub async fn accept_pair(
    listener: &TcpListener,
) -> anyhow::Result<[(TcpFrameReader, TcpFrameWriter); 2]> {
    let (first, addr) = listener.accept().await?;
    log::info!("player A connected from {}", addr);
    let (second, addr) = listener.accept().await?;
    log::info!("player B connected from {}", addr);
    Ok([TcpTransport::split(first), TcpTransport::split(second)])
}

async fn broadcast<W: FrameWriter>(writers: &mut [W; 2], frame: &str) -> anyhow::Result<()> {
    for writer in writers.iter_mut() {
        writer.send(frame).await?;
    }
    Ok(())
}

/// Play one match to completion and return the final board.
///
/// Sends side tokens and the ready frame, then rebroadcasts the board
/// after every move request and every `broadcast_every`. Ends when the
/// board is full, when `shutdown` turns true, or when a client drops.
pub async fn serve_match<R, W>(
    players: [(R, W); 2],
    broadcast_every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<Board>
where
    R: FrameReader + 'static,
    W: FrameWriter,
{
    let [(reader_a, mut writer_a), (reader_b, mut writer_b)] = players;
    writer_a.send(&encode_side(Side::A)).await?;
    writer_b.send(&encode_side(Side::B)).await?;
    let mut writers = [writer_a, writer_b];
    broadcast(&mut writers, READY_FRAME).await?;

    let mut authority = Authority::new();
    broadcast(&mut writers, &authority.status_frame()).await?;

    // One task per reader so a half-read frame is never lost to select!.
    let (tx, mut rx) = mpsc::unbounded_channel::<(Side, anyhow::Result<String>)>();
    let mut readers = Vec::new();
    for (side, mut reader) in [(Side::A, reader_a), (Side::B, reader_b)] {
        let tx = tx.clone();
        readers.push(tokio::spawn(async move {
            loop {
                let frame = reader.recv().await;
                if let Err(e) = &frame {
                    if is_frame_error(e) {
                        log::warn!("unreadable frame from {:?}: {}", side, e);
                        continue;
                    }
                }
                let failed = frame.is_err();
                if tx.send((side, frame)).is_err() || failed {
                    break;
                }
            }
        }));
    }
    drop(tx);

    let mut ticker = interval(broadcast_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let result = loop {
        tokio::select! {
            _ = shutdown_requested(&mut shutdown) => {
                log::info!("authority shutting down");
                break Ok(*authority.board());
            }
            _ = ticker.tick() => {
                if let Err(e) = broadcast(&mut writers, &authority.status_frame()).await {
                    break Err(e);
                }
            }
            msg = rx.recv() => {
                let Some((side, frame)) = msg else {
                    break Err(anyhow::anyhow!("all players disconnected"));
                };
                let frame = match frame {
                    Ok(frame) => frame,
                    Err(e) => break Err(anyhow::anyhow!("player {:?} disconnected: {}", side, e)),
                };
                match decode_move(&frame) {
                    Ok(cell) => match authority.apply_move(side, cell) {
                        Ok(()) => log::info!("{:?} took cell {}", side, cell),
                        Err(e) => log::warn!("rejected move {} from {:?}: {}", cell, side, e),
                    },
                    Err(e) => log::warn!("rejected frame from {:?}: {}", side, e),
                }
                if let Err(e) = broadcast(&mut writers, &authority.status_frame()).await {
                    break Err(e);
                }
                if authority.is_finished() {
                    log::info!(
                        "match finished: {} moves accepted, {} rejected",
                        authority.accepted(),
                        authority.rejected()
                    );
                    break Ok(*authority.board());
                }
            }
        }
    };

    for task in readers {
        task.abort();
    }
    result
}
