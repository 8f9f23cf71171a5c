//! Line-framed byte streams between clients and the authority.
//!
//! Connections are split into a read half and a write half so the decode
//! task can block on reads while the foreground sends moves.

/// A single frame was unusable but the stream is intact; the next `recv`
/// starts at the following frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Frame bytes were not UTF-8.
    NotUtf8(String),
    /// Frame exceeded the limit and was discarded up to its delimiter.
    TooLarge(usize),
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::NotUtf8(e) => write!(f, "Frame is not UTF-8: {}", e),
            FrameError::TooLarge(limit) => write!(f, "Frame too large: more than {} bytes", limit),
        }
    }
}

impl std::error::Error for FrameError {}

/// Whether `err` concerns one frame only, so reading may continue.
pub fn is_frame_error(err: &anyhow::Error) -> bool {
    err.is::<FrameError>()
}

/// Receiving half of a connection.
#[async_trait::async_trait]
pub trait FrameReader: Send {
    /// Next frame without its delimiter. A [`FrameError`] leaves the stream
    /// usable; any other error means it is not.
    async fn recv(&mut self) -> anyhow::Result<String>;
}

/// Sending half of a connection.
#[async_trait::async_trait]
pub trait FrameWriter: Send {
    /// Write one frame; the delimiter is appended by the transport.
    async fn send(&mut self, frame: &str) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl<R: FrameReader + ?Sized> FrameReader for Box<R> {
    async fn recv(&mut self) -> anyhow::Result<String> {
        (**self).recv().await
    }
}

#[async_trait::async_trait]
impl<W: FrameWriter + ?Sized> FrameWriter for Box<W> {
    async fn send(&mut self, frame: &str) -> anyhow::Result<()> {
        (**self).send(frame).await
    }
}

pub mod in_memory;
pub mod tcp;
