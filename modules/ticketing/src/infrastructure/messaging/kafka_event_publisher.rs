// Kafka EventPublisher implementation over rdkafka

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use tracing::debug;

use crate::domain::services::EventPublisher;
use crate::TicketingError;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka-backed publisher for the reservation event stream.
///
/// `acks=all` plus awaiting the delivery report gives at-least-once
/// semantics; consumers deduplicate on reservation id. Records for one
/// event land in one partition because the event id is the message key.
pub struct KafkaEventPublisher {
    producer: FutureProducer,
}

impl KafkaEventPublisher {
    /// Creates a publisher connected to `brokers` (comma-separated list)
    pub fn new(brokers: &str) -> Result<Self, TicketingError> {
        let producer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("acks", "all")
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|error| TicketingError::Publish(error.to_string()))?;
        Ok(Self { producer })
    }
}

#[async_trait]
impl EventPublisher for KafkaEventPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(), TicketingError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);
        let (partition, offset) = self
            .producer
            .send(record, Timeout::After(SEND_TIMEOUT))
            .await
            .map_err(|(error, _)| TicketingError::Publish(error.to_string()))?;

        debug!(topic, key, partition, offset, "record published");
        Ok(())
    }
}
