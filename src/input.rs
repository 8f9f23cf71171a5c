//! Pointer hit-testing against the grid.

use alloc::boxed::Box;

use crate::button::Button;
use crate::common::Vec2;
use crate::config::LOGICAL_SIZE;

/// Mouse buttons the dispatcher distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Input events in physical display pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Motion { x: f32, y: f32 },
    Press { x: f32, y: f32, button: PointerButton },
    Resize { width: f32, height: f32 },
    /// Start a new game (local play only).
    NewGame,
    Quit,
}

/// Mapping between the physical window and the logical design resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    logical: Vec2,
    physical: Vec2,
    scale: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LOGICAL_SIZE)
    }
}

impl Viewport {
    /// Viewport whose window matches the logical size exactly.
    pub fn new(logical: Vec2) -> Self {
        Self {
            logical,
            physical: logical,
            scale: Vec2::splat(1.0),
        }
    }

    /// Track a window resize. Non-positive sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.physical = Vec2::new(width, height);
        self.scale = self.physical / self.logical;
    }

    /// Physical pixels per logical unit on each axis.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn physical(&self) -> Vec2 {
        self.physical
    }

    pub fn to_logical(&self, physical: Vec2) -> Vec2 {
        physical / self.scale
    }

    pub fn to_physical(&self, logical: Vec2) -> Vec2 {
        logical * self.scale
    }
}

/// Index of the first button, in iteration order, under logical `spot`.
pub fn resolve(buttons: &[Box<dyn Button>], spot: Vec2) -> Option<usize> {
    buttons.iter().position(|b| b.hit_test(spot))
}

/// Recompute every hover flag from scratch for logical `spot`.
pub fn update_hover(buttons: &mut [Box<dyn Button>], spot: Vec2) {
    for button in buttons.iter_mut() {
        if button.hit_test(spot) {
            button.hover();
        } else {
            button.unhover();
        }
    }
}

/// Result of routing one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// Pointer moved to this logical position.
    Moved(Vec2),
    /// Primary press landed on this cell.
    Commit(usize),
    /// Nothing to act on.
    None,
}

/// Scales pointer events and routes them to the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitTestDispatcher {
    viewport: Viewport,
}

impl HitTestDispatcher {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Cell under a physical pointer position, if any.
    pub fn resolve(&self, buttons: &[Box<dyn Button>], pointer: Vec2) -> Option<usize> {
        resolve(buttons, self.viewport.to_logical(pointer))
    }

    pub fn dispatch(&mut self, buttons: &mut [Box<dyn Button>], event: InputEvent) -> Dispatch {
        match event {
            InputEvent::Resize { width, height } => {
                self.viewport.resize(width, height);
                Dispatch::None
            }
            InputEvent::Motion { x, y } => {
                let spot = self.viewport.to_logical(Vec2::new(x, y));
                update_hover(buttons, spot);
                Dispatch::Moved(spot)
            }
            InputEvent::Press {
                x,
                y,
                button: PointerButton::Primary,
            } => match self.resolve(buttons, Vec2::new(x, y)) {
                Some(cell) => Dispatch::Commit(cell),
                None => Dispatch::None,
            },
            _ => Dispatch::None,
        }
    }
}
