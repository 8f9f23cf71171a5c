//! Render adapter seam and the per-frame scene description.
//!
//! The crate never talks to a graphics API. It describes a frame through
//! [`RenderAdapter`] calls and the adapter decides how to draw it.

use alloc::boxed::Box;

use crate::board::Board;
use crate::button::Button;
use crate::common::{Rgba, Side, SpriteRegion, Vec2};
use crate::config::{
    AVATAR_SIZE, COLOR_SPLASH, COLOR_TEXT, DIGIT_SIZE, INDICATOR_SIZE, LOGICAL_WIDTH,
    SPLASH_PULSE_STEP,
};
use crate::turn::Player;

/// Drawing operations consumed by the scene. Positions are logical.
pub trait RenderAdapter {
    /// Draw cell `index` filled with `sprite` tinted by `color`.
    fn draw_cell(&mut self, index: usize, sprite: SpriteRegion, color: Rgba);

    /// Draw a player's avatar with its top-left corner at `position`.
    fn draw_avatar(&mut self, position: Vec2, sprite: SpriteRegion, color: Rgba);

    /// Finish the frame.
    fn present_frame(&mut self);

    /// Highlight the border of a hovered cell.
    fn draw_border(&mut self, _index: usize, _color: Rgba) {}

    /// Draw the indicator for `side` in the left or right corner.
    fn draw_side_indicator(&mut self, _left: bool, _side: Side, _sprite: SpriteRegion, _color: Rgba) {}

    /// Draw one score digit.
    fn draw_digit(&mut self, _position: Vec2, _digit: u8, _color: Rgba) {}

    /// Draw the waiting splash marker at the given opacity.
    fn draw_splash(&mut self, _color: Rgba) {}
}

/// Opacity of the splash marker: ramps up to 1, down to 0, and repeats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashPulse {
    alpha: f32,
    falling: bool,
}

impl Default for SplashPulse {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashPulse {
    pub fn new() -> Self {
        Self {
            alpha: 0.0,
            falling: false,
        }
    }

    /// Advance one frame and return the new alpha.
    pub fn step(&mut self) -> f32 {
        if self.falling {
            self.alpha -= SPLASH_PULSE_STEP;
            if self.alpha <= 0.0 {
                self.falling = false;
            }
        } else {
            self.alpha += SPLASH_PULSE_STEP;
            if self.alpha >= 1.0 {
                self.falling = true;
            }
        }
        self.alpha
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// Draw the waiting splash and present.
pub fn draw_waiting(renderer: &mut dyn RenderAdapter, pulse: &mut SplashPulse) {
    let alpha = pulse.step().clamp(0.0, 1.0);
    renderer.draw_splash(COLOR_SPLASH.with_alpha(alpha));
    renderer.present_frame();
}

/// Draw a full in-game frame and present it.
pub fn draw_scene(
    renderer: &mut dyn RenderAdapter,
    buttons: &[Box<dyn Button>],
    avatar: &Player,
    local_side: Side,
    board: &Board,
) {
    for (i, button) in buttons.iter().enumerate() {
        button.draw(i, renderer);
    }

    let half = Vec2::splat(AVATAR_SIZE / 2.0);
    renderer.draw_avatar(avatar.pos - half, avatar.avatar_sprite, avatar.color);

    let local = Player::for_side(local_side);
    let remote = Player::for_side(local_side.other());
    renderer.draw_side_indicator(true, local.side, local.mark_sprite, local.color);
    renderer.draw_side_indicator(false, remote.side, remote.mark_sprite, remote.color);

    draw_scores(renderer, board.score_a(), board.score_b());
    renderer.present_frame();
}

/// Score A reads left to right after the left indicator, score B ends
/// just before the right indicator.
fn draw_scores(renderer: &mut dyn RenderAdapter, score_a: u8, score_b: u8) {
    let y = 4.0;
    let mut x = INDICATOR_SIZE + 1.0;
    for digit in digits(score_a).iter().flatten() {
        renderer.draw_digit(Vec2::new(x, y), *digit, COLOR_TEXT);
        x += DIGIT_SIZE;
    }

    let b = digits(score_b);
    let len = b.iter().flatten().count() as f32;
    let mut x = LOGICAL_WIDTH - INDICATOR_SIZE - len * DIGIT_SIZE;
    for digit in b.iter().flatten() {
        renderer.draw_digit(Vec2::new(x, y), *digit, COLOR_TEXT);
        x += DIGIT_SIZE;
    }
}

/// Decimal digits of `n`, most significant first, without leading zeros.
fn digits(n: u8) -> [Option<u8>; 3] {
    match n {
        0..=9 => [Some(n), None, None],
        10..=99 => [Some(n / 10), Some(n % 10), None],
        _ => [Some(n / 100), Some(n / 10 % 10), Some(n % 10)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_drop_leading_zeros() {
        assert_eq!(digits(0), [Some(0), None, None]);
        assert_eq!(digits(42), [Some(4), Some(2), None]);
        assert_eq!(digits(205), [Some(2), Some(0), Some(5)]);
    }

    #[test]
    fn splash_pulse_turns_around() {
        let mut pulse = SplashPulse::new();
        let mut peak = 0.0f32;
        for _ in 0..150 {
            peak = peak.max(pulse.step());
        }
        assert!(peak >= 1.0);
        assert!(pulse.alpha() < 1.0);
    }
}
