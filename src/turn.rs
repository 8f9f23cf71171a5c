//! Turn handling for the two play modes.
//!
//! - [`RemoteAuthority`]: clicks become move requests; only authoritative
//!   frames change the board.
//! - [`LocalTwoPlayer`]: two players share one screen and the click handler
//!   owns the board.

use alloc::boxed::Box;

use crate::board::Board;
use crate::button::Button;
use crate::common::{CellState, Rgba, Side, SpriteRegion, Vec2};
use crate::config::{COLOR_A, COLOR_B, LOGICAL_SIZE, SPRITE_AVATAR, SPRITE_MARK_A, SPRITE_MARK_B};

/// A participant as drawn on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub side: Side,
    /// Logical pointer position.
    pub pos: Vec2,
    pub color: Rgba,
    pub mark_sprite: SpriteRegion,
    pub avatar_sprite: SpriteRegion,
}

impl Player {
    pub fn for_side(side: Side) -> Self {
        let (color, mark_sprite) = match side {
            Side::A => (COLOR_A, SPRITE_MARK_A),
            Side::B => (COLOR_B, SPRITE_MARK_B),
        };
        Self {
            side,
            pos: Vec2::new(LOGICAL_SIZE.x / 2.0, LOGICAL_SIZE.y / 2.0),
            color,
            mark_sprite,
            avatar_sprite: SPRITE_AVATAR,
        }
    }
}

/// Outbound half of the move path.
pub trait MoveSink: Send {
    /// Submit a move for `cell`. Returns whether it was handed off.
    fn emit_move(&mut self, cell: usize) -> bool;
}

/// What a committing click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Cell already owned or already latched.
    Ignored,
    /// Move request handed to the connection.
    Submitted(usize),
    /// Move could not be handed off; the cell stays latched.
    Dropped(usize),
    /// Mark placed locally.
    Assigned { cell: usize, side: Side },
}

/// Which interaction mode a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    Remote,
    Local,
}

/// Strategy applied to committing clicks.
pub trait TurnStrategy: Send {
    fn mode(&self) -> PlayMode;

    /// Handle a click on `cell` whose button is `button`.
    fn commit(&mut self, cell: usize, button: &mut dyn Button, board: &mut Board) -> ClickOutcome;

    /// Player currently accepting input.
    fn active(&self) -> &Player;
    fn active_mut(&mut self) -> &mut Player;

    /// Side whose indicator is drawn on the left.
    fn local_side(&self) -> Side {
        self.active().side
    }

    /// Return to the opening player after a board reset.
    fn new_game(&mut self) {}
}

fn already_taken(cell: usize, button: &dyn Button, board: &Board) -> bool {
    button.is_latched() || !matches!(board.cell(cell), Some(CellState::Empty))
}

/// Client of a remote authority.
pub struct RemoteAuthority {
    player: Player,
    sink: Box<dyn MoveSink>,
}

impl RemoteAuthority {
    pub fn new(side: Side, sink: Box<dyn MoveSink>) -> Self {
        Self {
            player: Player::for_side(side),
            sink,
        }
    }
}

impl TurnStrategy for RemoteAuthority {
    fn mode(&self) -> PlayMode {
        PlayMode::Remote
    }

    fn commit(&mut self, cell: usize, button: &mut dyn Button, board: &mut Board) -> ClickOutcome {
        if already_taken(cell, button, board) {
            return ClickOutcome::Ignored;
        }
        button.latch(self.player.mark_sprite, self.player.color);
        if self.sink.emit_move(cell) {
            ClickOutcome::Submitted(cell)
        } else {
            log::warn!("move for cell {} was not sent", cell);
            ClickOutcome::Dropped(cell)
        }
    }

    fn active(&self) -> &Player {
        &self.player
    }

    fn active_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}

/// Two players alternating on one screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTwoPlayer {
    players: [Player; 2],
    active: usize,
}

impl Default for LocalTwoPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalTwoPlayer {
    pub fn new() -> Self {
        Self {
            players: [Player::for_side(Side::A), Player::for_side(Side::B)],
            active: 0,
        }
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }
}

impl TurnStrategy for LocalTwoPlayer {
    fn mode(&self) -> PlayMode {
        PlayMode::Local
    }

    fn commit(&mut self, cell: usize, button: &mut dyn Button, board: &mut Board) -> ClickOutcome {
        if already_taken(cell, button, board) {
            return ClickOutcome::Ignored;
        }
        let player = self.players[self.active];
        if let Err(e) = board.assign(cell, player.side) {
            log::warn!("local move rejected: {}", e);
            return ClickOutcome::Ignored;
        }
        button.latch(player.mark_sprite, player.color);
        // Next player picks up where the pointer is.
        self.active = 1 - self.active;
        self.players[self.active].pos = player.pos;
        ClickOutcome::Assigned {
            cell,
            side: player.side,
        }
    }

    fn active(&self) -> &Player {
        &self.players[self.active]
    }

    fn active_mut(&mut self) -> &mut Player {
        &mut self.players[self.active]
    }

    fn local_side(&self) -> Side {
        Side::A
    }

    fn new_game(&mut self) {
        let pos = self.players[self.active].pos;
        self.active = 0;
        self.players[0].pos = pos;
    }
}
