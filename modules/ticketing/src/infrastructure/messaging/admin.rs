// Topic administration for the reservation event stream

use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::types::RDKafkaErrorCode;
use tracing::info;

use crate::TicketingError;

/// Creates the given topics if they do not exist yet. Already-existing
/// topics are not an error.
pub async fn ensure_topics(
    brokers: &str,
    topics: &[&str],
    partitions: i32,
    replication: i32,
) -> Result<(), TicketingError> {
    let admin: AdminClient<DefaultClientContext> = ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .create()
        .map_err(|error| TicketingError::Publish(error.to_string()))?;

    let new_topics: Vec<NewTopic<'_>> = topics
        .iter()
        .map(|topic| NewTopic::new(topic, partitions, TopicReplication::Fixed(replication)))
        .collect();

    let results = admin
        .create_topics(new_topics.iter(), &AdminOptions::new())
        .await
        .map_err(|error| TicketingError::Publish(error.to_string()))?;

    for result in results {
        match result {
            Ok(topic) => info!(%topic, "topic created"),
            Err((_, RDKafkaErrorCode::TopicAlreadyExists)) => {}
            Err((topic, code)) => {
                return Err(TicketingError::Publish(format!(
                    "failed to create topic {topic}: {code}"
                )));
            }
        }
    }
    Ok(())
}
