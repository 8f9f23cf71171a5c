//! Clickable grid cells.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::common::{CellState, Rgba, Side, SpriteRegion, Vec2};
use crate::config::{
    CELL_PITCH, CELL_SIZE, COLOR_A, COLOR_B, COLOR_BORDER, COLOR_CELL, COLOR_EMPTY, GRID_COLS,
    GRID_ROWS, LOGICAL_SIZE, SPRITE_BLANK, SPRITE_CELL, SPRITE_MARK_A, SPRITE_MARK_B,
};
use crate::render::RenderAdapter;

/// Capability set of an on-screen cell.
pub trait Button: Send {
    /// Describe this button to the renderer as cell `index`.
    fn draw(&self, index: usize, renderer: &mut dyn RenderAdapter);

    /// Whether logical point `spot` lies inside the button.
    fn hit_test(&self, spot: Vec2) -> bool;

    fn hover(&mut self);
    fn unhover(&mut self);
    fn is_hovered(&self) -> bool;

    /// Set the one-way toggle latch and show `sprite`/`color` until the
    /// authority says otherwise. Returns `false` if already latched.
    fn latch(&mut self, sprite: SpriteRegion, color: Rgba) -> bool;
    fn is_latched(&self) -> bool;

    /// Show the authoritative state of the cell. Does not touch the latch.
    fn assign(&mut self, state: CellState);

    /// Clear latch, hover and visuals for a new game.
    fn reset(&mut self);
}

/// Flat square cell: border on hover, dark background, mark on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridButton {
    pos: Vec2,
    size: Vec2,
    toggle: bool,
    border: bool,
    color: Rgba,
    sprite: SpriteRegion,
}

impl GridButton {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            toggle: false,
            border: false,
            color: COLOR_EMPTY,
            sprite: SPRITE_BLANK,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn sprite(&self) -> SpriteRegion {
        self.sprite
    }
}

impl Button for GridButton {
    fn draw(&self, index: usize, renderer: &mut dyn RenderAdapter) {
        if self.border {
            renderer.draw_border(index, COLOR_BORDER);
        }
        renderer.draw_cell(index, SPRITE_CELL, COLOR_CELL);
        renderer.draw_cell(index, self.sprite, self.color);
    }

    // Half-open on both axes: the far edge belongs to the neighbour.
    fn hit_test(&self, spot: Vec2) -> bool {
        spot.x >= self.pos.x
            && spot.x < self.pos.x + self.size.x
            && spot.y >= self.pos.y
            && spot.y < self.pos.y + self.size.y
    }

    fn hover(&mut self) {
        self.border = true;
    }

    fn unhover(&mut self) {
        self.border = false;
    }

    fn is_hovered(&self) -> bool {
        self.border
    }

    fn latch(&mut self, sprite: SpriteRegion, color: Rgba) -> bool {
        if self.toggle {
            return false;
        }
        self.toggle = true;
        self.sprite = sprite;
        self.color = color;
        true
    }

    fn is_latched(&self) -> bool {
        self.toggle
    }

    fn assign(&mut self, state: CellState) {
        let (sprite, color) = cell_visual(state);
        self.sprite = sprite;
        self.color = color;
    }

    fn reset(&mut self) {
        self.toggle = false;
        self.border = false;
        self.assign(CellState::Empty);
    }
}

/// Sprite and colour that represent `state`.
pub fn cell_visual(state: CellState) -> (SpriteRegion, Rgba) {
    match state {
        CellState::Owned(Side::A) => (SPRITE_MARK_A, COLOR_A),
        CellState::Owned(Side::B) => (SPRITE_MARK_B, COLOR_B),
        CellState::Empty => (SPRITE_BLANK, COLOR_EMPTY),
    }
}

/// Top-left corner of cell `index` in a `cols`×`rows` grid of
/// `square`-sized cells centred on the logical screen. Row-major.
pub fn cell_origin(index: usize, cols: usize, rows: usize, square: f32) -> Vec2 {
    let pitch = square * CELL_PITCH;
    let span = Vec2::new(cols as f32 * pitch, rows as f32 * pitch);
    let middle = Vec2::new(LOGICAL_SIZE.x / 2.0 - span.x / 2.0, LOGICAL_SIZE.y / 2.0 - span.y / 2.0);
    let (row, col) = (index / cols, index % cols);
    middle + Vec2::new(col as f32 * pitch, row as f32 * pitch)
}

/// Build a `cols`×`rows` grid of [`GridButton`]s in row-major order.
pub fn grid_buttons(cols: usize, rows: usize, square: f32) -> Vec<Box<dyn Button>> {
    (0..cols * rows)
        .map(|i| {
            Box::new(GridButton::new(cell_origin(i, cols, rows, square), Vec2::splat(square)))
                as Box<dyn Button>
        })
        .collect()
}

/// The standard 3×3 board.
pub fn default_grid() -> Vec<Box<dyn Button>> {
    grid_buttons(GRID_COLS, GRID_ROWS, CELL_SIZE)
}

/// Centre of standard cell `index`, in logical units.
pub fn default_cell_centre(index: usize) -> Vec2 {
    cell_origin(index, GRID_COLS, GRID_ROWS, CELL_SIZE) + Vec2::splat(CELL_SIZE / 2.0)
}
