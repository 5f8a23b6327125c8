use crate::domain::event::LocEvent;
use crate::domain::ports::EventSink;
use crate::error::Result;
use async_trait::async_trait;
use tracing::debug;

/// Event sink that only records events in the log and keeps nothing in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn publish(&self, event: LocEvent) -> Result<()> {
        let payload = serde_json::to_string(&event)?;
        debug!(letter = %event.letter_id(), event = event.name(), %payload, "Published event");
        Ok(())
    }
}
