// Recording EventPublisher - in-process stand-in for the Kafka producer

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::services::EventPublisher;
use crate::TicketingError;

/// One captured publication.
#[derive(Debug, Clone)]
pub struct PublishedRecord {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

/// Publisher that keeps every record in memory. Serves as the no-broker
/// fallback in single-node setups and as the spy in tests.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    records: Mutex<Vec<PublishedRecord>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records published to one topic, in publication order
    pub fn published(&self, topic: &str) -> Vec<PublishedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|record| record.topic == topic)
            .cloned()
            .collect()
    }

    /// Every record published so far
    pub fn all(&self) -> Vec<PublishedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(), TicketingError> {
        debug!(topic, key, bytes = payload.len(), "recording publication");
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(PublishedRecord {
                topic: topic.to_string(),
                key: key.to_string(),
                payload: payload.to_vec(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_by_topic() {
        let publisher = RecordingEventPublisher::new();
        publisher
            .publish("ticket.reserved", "event-1", b"{}")
            .await
            .unwrap();
        publisher
            .publish("ticket.expired", "event-1", b"{}")
            .await
            .unwrap();

        assert_eq!(publisher.published("ticket.reserved").len(), 1);
        assert_eq!(publisher.published("ticket.expired").len(), 1);
        assert_eq!(publisher.all().len(), 2);
    }
}
