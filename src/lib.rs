#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod board;
pub mod bot;
mod button;
mod common;
mod config;
pub mod input;
pub mod protocol;
pub mod render;
mod timer;
pub mod turn;
#[cfg(feature = "std")]
pub mod authority;
#[cfg(feature = "std")]
mod emitter;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod settings;
#[cfg(feature = "std")]
pub mod sync;
#[cfg(feature = "std")]
pub mod terminal;
#[cfg(feature = "std")]
pub mod transport;

pub use board::*;
pub use bot::RandomMover;
pub use button::*;
pub use common::*;
pub use config::*;
pub use input::{HitTestDispatcher, InputEvent, PointerButton, Viewport};
pub use protocol::{decode_move, decode_side, decode_status, encode_move, encode_side, encode_status, DecodeError};
pub use render::{RenderAdapter, SplashPulse};
pub use timer::*;
pub use turn::*;
#[cfg(feature = "std")]
pub use authority::{serve_match, Authority, MoveRejection};
#[cfg(feature = "std")]
pub use emitter::MoveEmitter;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use session::Session;
#[cfg(feature = "std")]
pub use settings::{ConfigError, ConnectionConfig};
#[cfg(feature = "std")]
pub use sync::{DecodeStats, SharedBoard, SyncDecoder};
#[cfg(feature = "std")]
pub use transport::{
    in_memory::InMemoryTransport, is_frame_error, tcp::TcpTransport, FrameError, FrameReader,
    FrameWriter,
};
