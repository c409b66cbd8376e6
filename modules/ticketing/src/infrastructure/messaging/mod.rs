mod admin;
mod kafka_event_publisher;

pub use admin::ensure_topics;
pub use kafka_event_publisher::KafkaEventPublisher;
