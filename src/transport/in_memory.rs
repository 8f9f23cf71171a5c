use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::transport::{FrameReader, FrameWriter};

/// Channel-backed connection used by tests and the simulator.
pub struct InMemoryTransport;

/// One end of an in-memory connection.
pub type InMemoryEnd = (InMemoryReader, InMemoryWriter);

impl InMemoryTransport {
    /// Two connected ends; frames written on one are read on the other.
    pub fn pair() -> (InMemoryEnd, InMemoryEnd) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        (
            (InMemoryReader { rx: rx1 }, InMemoryWriter { tx: tx2 }),
            (InMemoryReader { rx: rx2 }, InMemoryWriter { tx: tx1 }),
        )
    }
}

pub struct InMemoryReader {
    rx: UnboundedReceiver<String>,
}

#[derive(Clone)]
pub struct InMemoryWriter {
    tx: UnboundedSender<String>,
}

#[async_trait::async_trait]
impl FrameReader for InMemoryReader {
    async fn recv(&mut self) -> anyhow::Result<String> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Channel closed"))
    }
}

#[async_trait::async_trait]
impl FrameWriter for InMemoryWriter {
    async fn send(&mut self, frame: &str) -> anyhow::Result<()> {
        self.tx
            .send(frame.to_string())
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }
}
