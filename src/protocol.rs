//! Text wire protocol between clients and the authority.
//!
//! Every frame is one line. The authority sends, in order: a side token,
//! a ready frame, then status frames of twelve comma-separated fields
//! `score_a,score_b,cell_0..cell_8,winner`. Clients send bare cell indices.

use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use crate::board::BoardUpdate;
use crate::common::{CellState, Side};
use crate::config::CELL_COUNT;

pub const FIELD_DELIMITER: char = ',';
pub const FRAME_DELIMITER: char = '\n';
pub const STATUS_FIELD_COUNT: usize = 2 + CELL_COUNT + 1;
/// Position of `cell_0` within a status frame.
pub const FIRST_CELL_FIELD: usize = 2;
pub const WINNER_FIELD: usize = STATUS_FIELD_COUNT - 1;
/// Token written for an empty cell.
pub const EMPTY_CELL_TOKEN: i32 = 2;
/// Content of the frame that releases clients from the waiting state.
pub const READY_FRAME: &str = "ready";

/// Reasons a frame could not be decoded. Each carries the raw frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Status frame did not have exactly [`STATUS_FIELD_COUNT`] fields.
    FieldCount { found: usize, frame: String },
    /// A score was not an integer in `0..=255`.
    Score { field: usize, frame: String },
    /// A cell token was not an integer.
    Cell { field: usize, frame: String },
    /// The winner field was not an `i8`.
    Winner { frame: String },
    /// A move frame was not a cell index in range.
    Move { frame: String },
}

impl DecodeError {
    /// The offending frame as received.
    pub fn frame(&self) -> &str {
        match self {
            DecodeError::FieldCount { frame, .. }
            | DecodeError::Score { frame, .. }
            | DecodeError::Cell { frame, .. }
            | DecodeError::Winner { frame }
            | DecodeError::Move { frame } => frame,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::FieldCount { found, frame } => write!(
                f,
                "expected {} fields, found {} in frame {:?}",
                STATUS_FIELD_COUNT, found, frame
            ),
            DecodeError::Score { field, frame } => {
                write!(f, "invalid score in field {} of frame {:?}", field, frame)
            }
            DecodeError::Cell { field, frame } => {
                write!(f, "invalid cell token in field {} of frame {:?}", field, frame)
            }
            DecodeError::Winner { frame } => write!(f, "invalid winner in frame {:?}", frame),
            DecodeError::Move { frame } => write!(f, "invalid move frame {:?}", frame),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Strip the line delimiter and the padding a fixed read buffer leaves behind.
pub fn trim_frame(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == '\0' || c.is_whitespace())
}

/// Decode a status frame. Nothing is applied here; callers apply the
/// returned update in one step.
pub fn decode_status(raw: &str) -> Result<BoardUpdate, DecodeError> {
    let frame = trim_frame(raw);
    let fields: alloc::vec::Vec<&str> = frame.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() != STATUS_FIELD_COUNT {
        return Err(DecodeError::FieldCount {
            found: fields.len(),
            frame: frame.to_string(),
        });
    }

    let score = |field: usize| {
        fields[field].parse::<u8>().map_err(|_| DecodeError::Score {
            field,
            frame: frame.to_string(),
        })
    };
    let score_a = score(0)?;
    let score_b = score(1)?;

    let mut cells = [CellState::Empty; CELL_COUNT];
    for (i, cell) in cells.iter_mut().enumerate() {
        let field = FIRST_CELL_FIELD + i;
        let token = fields[field].parse::<i32>().map_err(|_| DecodeError::Cell {
            field,
            frame: frame.to_string(),
        })?;
        *cell = cell_from_token(token);
    }

    let winner = fields[WINNER_FIELD]
        .parse::<i8>()
        .map_err(|_| DecodeError::Winner {
            frame: frame.to_string(),
        })?;

    Ok(BoardUpdate {
        score_a,
        score_b,
        cells,
        winner,
    })
}

/// Map a numeric cell token to a state: `0` is A, `1` is B, anything else empty.
pub fn cell_from_token(token: i32) -> CellState {
    match token {
        0 => CellState::Owned(Side::A),
        1 => CellState::Owned(Side::B),
        _ => CellState::Empty,
    }
}

pub fn cell_token(cell: CellState) -> i32 {
    match cell {
        CellState::Owned(side) => i32::from(side.wire_digit()),
        CellState::Empty => EMPTY_CELL_TOKEN,
    }
}

/// Encode a status frame without the trailing line delimiter.
pub fn encode_status(update: &BoardUpdate) -> String {
    let mut out = String::with_capacity(32);
    // Writing into a String cannot fail.
    let _ = write!(out, "{},{}", update.score_a, update.score_b);
    for cell in update.cells.iter() {
        let _ = write!(out, ",{}", cell_token(*cell));
    }
    let _ = write!(out, ",{}", update.winner);
    out
}

/// Encode a move request for `cell`.
pub fn encode_move(cell: usize) -> String {
    cell.to_string()
}

pub fn decode_move(raw: &str) -> Result<usize, DecodeError> {
    let frame = trim_frame(raw);
    match frame.parse::<usize>() {
        Ok(cell) if cell < CELL_COUNT => Ok(cell),
        _ => Err(DecodeError::Move {
            frame: frame.to_string(),
        }),
    }
}

/// Side token sent to a newly accepted client.
pub fn encode_side(side: Side) -> String {
    side.wire_digit().to_string()
}

/// A side token starting with `1` means B; anything else means A.
pub fn decode_side(raw: &str) -> Side {
    if trim_frame(raw).starts_with('1') {
        Side::B
    } else {
        Side::A
    }
}
