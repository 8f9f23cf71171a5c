#![cfg(feature = "std")]
//! Text front-end: prints the board and turns stdin lines into pointer events.

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;

use crate::common::{Rgba, Side, SpriteRegion, Vec2};
use crate::config::{
    CELL_COUNT, GRID_COLS, LOGICAL_WIDTH, SPRITE_BLANK, SPRITE_MARK_A, SPRITE_MARK_B,
};
use crate::input::{InputEvent, PointerButton};
use crate::render::RenderAdapter;

#[derive(Debug, Clone, PartialEq)]
struct Frame {
    cells: [char; CELL_COUNT],
    hovered: [bool; CELL_COUNT],
    left: Option<Side>,
    right: Option<Side>,
    score_left: String,
    score_right: String,
    waiting: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            cells: std::array::from_fn(|i| mark_char(SPRITE_BLANK, i)),
            hovered: [false; CELL_COUNT],
            left: None,
            right: None,
            score_left: String::new(),
            score_right: String::new(),
            waiting: false,
        }
    }
}

/// Prints each frame to stdout when its content changes.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    frame: Frame,
    last_printed: Option<String>,
    presented: u64,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Text of the most recently printed frame.
    pub fn last_printed(&self) -> Option<&str> {
        self.last_printed.as_deref()
    }

    fn compose(frame: &Frame) -> String {
        if frame.waiting {
            return "waiting for the other player...\n".to_string();
        }
        let mut out = String::new();
        let side_name = |s: Option<Side>| match s {
            Some(Side::A) => "A",
            Some(Side::B) => "B",
            None => "?",
        };
        let _ = writeln!(
            out,
            "you: {} {:>3}   |   them: {} {:>3}",
            side_name(frame.left),
            frame.score_left,
            side_name(frame.right),
            frame.score_right
        );
        for (r, cells) in frame.cells.chunks(GRID_COLS).enumerate() {
            for (c, ch) in cells.iter().enumerate() {
                let i = r * GRID_COLS + c;
                if frame.hovered[i] {
                    let _ = write!(out, "[{}]", ch);
                } else {
                    let _ = write!(out, " {} ", ch);
                }
            }
            out.push('\n');
        }
        out
    }
}

fn mark_char(sprite: SpriteRegion, index: usize) -> char {
    if sprite == SPRITE_MARK_A {
        'A'
    } else if sprite == SPRITE_MARK_B {
        'B'
    } else {
        char::from_digit(index as u32, 10).unwrap_or('.')
    }
}

impl RenderAdapter for TerminalRenderer {
    fn draw_cell(&mut self, index: usize, sprite: SpriteRegion, _color: Rgba) {
        if let Some(cell) = self.frame.cells.get_mut(index) {
            *cell = mark_char(sprite, index);
        }
    }

    fn draw_avatar(&mut self, _position: Vec2, _sprite: SpriteRegion, _color: Rgba) {}

    fn draw_border(&mut self, index: usize, _color: Rgba) {
        if let Some(h) = self.frame.hovered.get_mut(index) {
            *h = true;
        }
    }

    fn draw_side_indicator(&mut self, left: bool, side: Side, _sprite: SpriteRegion, _color: Rgba) {
        if left {
            self.frame.left = Some(side);
        } else {
            self.frame.right = Some(side);
        }
    }

    fn draw_digit(&mut self, position: Vec2, digit: u8, _color: Rgba) {
        let ch = char::from(b'0' + digit % 10);
        if position.x < LOGICAL_WIDTH / 2.0 {
            self.frame.score_left.push(ch);
        } else {
            self.frame.score_right.push(ch);
        }
    }

    fn draw_splash(&mut self, _color: Rgba) {
        self.frame.waiting = true;
    }

    fn present_frame(&mut self) {
        let frame = std::mem::take(&mut self.frame);
        let text = Self::compose(&frame);
        self.presented += 1;
        if self.last_printed.as_deref() != Some(text.as_str()) {
            print!("{}", text);
            self.last_printed = Some(text);
        }
    }
}

/// One parsed line of terminal input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalCommand {
    Event(InputEvent),
    /// Move to and click the centre of a cell.
    Cell(usize),
}

/// Parse `click X Y`, `move X Y`, `resize W H`, a cell digit, `new` or `quit`.
pub fn parse_command(line: &str) -> Option<TerminalCommand> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?.to_ascii_lowercase();
    let mut coords = || -> Option<(f32, f32)> {
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        Some((x, y))
    };
    let command = match head.as_str() {
        "click" => {
            let (x, y) = coords()?;
            TerminalCommand::Event(InputEvent::Press {
                x,
                y,
                button: PointerButton::Primary,
            })
        }
        "move" => {
            let (x, y) = coords()?;
            TerminalCommand::Event(InputEvent::Motion { x, y })
        }
        "resize" => {
            let (width, height) = coords()?;
            TerminalCommand::Event(InputEvent::Resize { width, height })
        }
        "new" => TerminalCommand::Event(InputEvent::NewGame),
        "quit" | "q" | "exit" => TerminalCommand::Event(InputEvent::Quit),
        digit => match digit.parse::<usize>() {
            Ok(cell) if cell < CELL_COUNT => TerminalCommand::Cell(cell),
            _ => return None,
        },
    };
    Some(command)
}

/// Forward parsed stdin lines to `tx` until stdin closes or the receiver is gone.
pub fn spawn_stdin_reader(tx: UnboundedSender<TerminalCommand>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    let _ = tx.send(TerminalCommand::Event(InputEvent::Quit));
                    break;
                }
                Err(e) => {
                    log::error!("stdin: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => log::warn!("unrecognised command {:?}", line.trim()),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_prints_marks_and_hover() {
        let mut r = TerminalRenderer::new();
        r.draw_cell(0, SPRITE_MARK_A, Rgba::default());
        r.draw_cell(4, SPRITE_MARK_B, Rgba::default());
        r.draw_cell(8, crate::config::SPRITE_CELL, Rgba::default());
        r.draw_border(8, Rgba::default());
        r.draw_side_indicator(true, Side::A, SPRITE_MARK_A, Rgba::default());
        r.draw_side_indicator(false, Side::B, SPRITE_MARK_B, Rgba::default());
        r.draw_digit(Vec2::new(17.0, 4.0), 3, Rgba::default());
        r.draw_digit(Vec2::new(296.0, 4.0), 1, Rgba::default());
        r.present_frame();
        let text = r.last_printed().unwrap();
        assert!(text.contains("you: A   3"));
        assert!(text.contains(" A  1  2 \n"));
        assert!(text.contains(" B "));
        assert!(text.contains("[8]"));
    }

    #[test]
    fn undrawn_cells_show_their_index() {
        let mut r = TerminalRenderer::new();
        r.draw_cell(4, SPRITE_MARK_B, Rgba::default());
        r.present_frame();
        let text = r.last_printed().unwrap();
        assert!(!text.contains('\0'));
        assert!(text.contains(" 0  1  2 \n"));
        assert!(text.contains(" 3  B  5 \n"));
    }
}
