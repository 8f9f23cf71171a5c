use crate::common::{Rgba, SpriteRegion, Vec2};

/// Logical design resolution every pointer position is scaled into.
pub const LOGICAL_WIDTH: f32 = 320.0;
pub const LOGICAL_HEIGHT: f32 = 180.0;
pub const LOGICAL_SIZE: Vec2 = Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT);

pub const GRID_COLS: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const CELL_COUNT: usize = GRID_COLS * GRID_ROWS;

/// Edge length of one square cell in logical units.
pub const CELL_SIZE: f32 = 16.0;
/// Distance between neighbouring cell origins, as a multiple of `CELL_SIZE`.
pub const CELL_PITCH: f32 = 1.5;

/// Size of the side indicators drawn in the top corners.
pub const INDICATOR_SIZE: f32 = 16.0;
/// Size of one score digit.
pub const DIGIT_SIZE: f32 = 8.0;
/// Size of the pointer-following avatar.
pub const AVATAR_SIZE: f32 = 8.0;

// Sprite sheet regions, in texel coordinates.
pub const SPRITE_MARK_A: SpriteRegion = SpriteRegion::new(0.0, 0.0, 16.0, 16.0);
pub const SPRITE_MARK_B: SpriteRegion = SpriteRegion::new(16.0, 0.0, 16.0, 16.0);
pub const SPRITE_AVATAR: SpriteRegion = SpriteRegion::new(32.0, 0.0, 16.0, 16.0);
pub const SPRITE_CELL: SpriteRegion = SpriteRegion::new(0.0, 16.0, 16.0, 16.0);
pub const SPRITE_BLANK: SpriteRegion = SpriteRegion::new(0.0, 0.0, 0.0, 0.0);

pub const COLOR_A: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
pub const COLOR_B: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
pub const COLOR_EMPTY: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);
pub const COLOR_CELL: Rgba = Rgba::new(0.2, 0.2, 0.2, 1.0);
pub const COLOR_BORDER: Rgba = Rgba::new(0.5, 0.5, 0.0, 1.0);
pub const COLOR_TEXT: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
/// Splash marker colour; alpha is replaced by the pulse value.
pub const COLOR_SPLASH: Rgba = Rgba::new(1.0, 0.0, 0.0, 0.0);

/// Alpha change per frame of the waiting splash pulse.
pub const SPLASH_PULSE_STEP: f32 = 0.01;

/// Fixed simulation step in seconds.
pub const FIXED_STEP: f32 = 0.01;
/// Longest frame the clock will account for, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Largest accepted wire frame in bytes, delimiter excluded.
pub const MAX_FRAME_LEN: usize = 1024;
/// Moves waiting for the connection before further clicks are dropped.
pub const MOVE_QUEUE_LEN: usize = CELL_COUNT;

/// Interval between "waiting for authority" log lines, in milliseconds.
pub const HANDSHAKE_POLL_MS: u32 = 1000;
/// Interval between periodic status log lines, in milliseconds.
pub const STATUS_LOG_MS: u32 = 5000;
