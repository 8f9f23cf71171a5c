use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::config::MAX_FRAME_LEN;
use crate::protocol::FRAME_DELIMITER;
use crate::transport::{FrameError, FrameReader, FrameWriter};

/// Opens TCP connections and splits them into frame halves.
pub struct TcpTransport;

impl TcpTransport {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<(TcpFrameReader, TcpFrameWriter)> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::split(stream))
    }

    pub fn split(stream: TcpStream) -> (TcpFrameReader, TcpFrameWriter) {
        let _ = stream.set_nodelay(true);
        let (read, write) = stream.into_split();
        (
            TcpFrameReader {
                reader: BufReader::new(read),
                max_frame_len: MAX_FRAME_LEN,
            },
            TcpFrameWriter { writer: write },
        )
    }
}

pub struct TcpFrameReader {
    reader: BufReader<OwnedReadHalf>,
    max_frame_len: usize,
}

impl TcpFrameReader {
    /// Override the frame size limit.
    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }
}

impl TcpFrameReader {
    /// Append at most `limit` bytes up to and including the next delimiter.
    async fn read_bounded(&mut self, limit: u64, buf: &mut Vec<u8>) -> anyhow::Result<usize> {
        (&mut self.reader)
            .take(limit)
            .read_until(FRAME_DELIMITER as u8, buf)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::ConnectionReset {
                    anyhow::anyhow!("Connection reset by peer")
                } else {
                    anyhow::anyhow!("Read error: {}", e)
                }
            })
    }

    /// Drop the rest of an oversized frame, through its delimiter.
    async fn skip_frame(&mut self, limit: u64) -> anyhow::Result<()> {
        let mut scratch = Vec::new();
        loop {
            scratch.clear();
            if self.read_bounded(limit, &mut scratch).await? == 0 {
                return Err(anyhow::anyhow!("Connection closed by peer"));
            }
            if scratch.last() == Some(&(FRAME_DELIMITER as u8)) {
                return Ok(());
            }
        }
    }
}

#[async_trait::async_trait]
impl FrameReader for TcpFrameReader {
    async fn recv(&mut self) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        // One extra byte for the delimiter.
        let limit = (self.max_frame_len + 1) as u64;
        let n = self.read_bounded(limit, &mut buf).await?;

        if n == 0 {
            return Err(anyhow::anyhow!("Connection closed by peer"));
        }
        if buf.last() != Some(&(FRAME_DELIMITER as u8)) {
            if buf.len() > self.max_frame_len {
                self.skip_frame(limit).await?;
                return Err(FrameError::TooLarge(self.max_frame_len).into());
            }
            // Stream ended mid-frame.
            return Err(anyhow::anyhow!("Connection closed by peer"));
        }
        buf.pop();

        String::from_utf8(buf).map_err(|e| FrameError::NotUtf8(e.to_string()).into())
    }
}

pub struct TcpFrameWriter {
    writer: OwnedWriteHalf,
}

#[async_trait::async_trait]
impl FrameWriter for TcpFrameWriter {
    async fn send(&mut self, frame: &str) -> anyhow::Result<()> {
        let mut data = Vec::with_capacity(frame.len() + 1);
        data.extend_from_slice(frame.as_bytes());
        data.push(FRAME_DELIMITER as u8);

        self.writer.write_all(&data).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::BrokenPipe
                || e.kind() == std::io::ErrorKind::ConnectionReset
            {
                anyhow::anyhow!("Connection closed by peer")
            } else {
                anyhow::anyhow!("Write error: {}", e)
            }
        })
    }
}
