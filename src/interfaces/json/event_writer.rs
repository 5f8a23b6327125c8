use crate::domain::event::LocEvent;
use crate::domain::ports::EventSink;
use crate::error::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::sync::Mutex;

/// Writes each published event as one JSON line.
pub struct JsonLinesEventSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: Write + Send> EventSink for JsonLinesEventSink<W> {
    async fn publish(&self, event: LocEvent) -> Result<()> {
        let mut writer = self.writer.lock().await;
        serde_json::to_writer(&mut *writer, &event)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
