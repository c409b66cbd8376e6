// Projection worker: consumes ticket.reserved and keeps the durable
// reservation store up to date.
//
// This is the durability path when the gateway runs with
// PERSIST_SYNC=false. Offsets are committed only after a successful
// upsert, so delivery is at-least-once and the upsert is the idempotency
// point.

use std::env;

use anyhow::Context;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ticketing::{topics, PgReservationRepository, Reservation, ReservationRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL is required")?;
    let brokers = env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string());
    let group_id = env::var("KAFKA_GROUP_ID").unwrap_or_else(|_| "ticketing-worker".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("postgres connect failed")?;
    let reservations = PgReservationRepository::new(pool);

    let consumer: StreamConsumer = ClientConfig::new()
        .set("group.id", &group_id)
        .set("bootstrap.servers", &brokers)
        .set("enable.auto.commit", "false")
        .set("auto.offset.reset", "earliest")
        .create()
        .context("kafka consumer create failed")?;
    consumer
        .subscribe(&[topics::TICKET_RESERVED])
        .context("kafka subscribe failed")?;

    info!(%brokers, %group_id, topic = topics::TICKET_RESERVED, "worker consuming");

    loop {
        let message = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("worker shutting down");
                return Ok(());
            }
            received = consumer.recv() => match received {
                Ok(message) => message,
                Err(error) => {
                    warn!(%error, "consume error");
                    continue;
                }
            },
        };

        let Some(payload) = message.payload() else {
            warn!("message without payload");
            commit(&consumer, &message);
            continue;
        };

        match serde_json::from_slice::<Reservation>(payload) {
            Ok(reservation) => {
                if let Err(error) = reservations.upsert(&reservation).await {
                    // Leave the offset uncommitted; the record is retried
                    // on the next delivery.
                    warn!(%error, "upsert reservation failed");
                    continue;
                }
                info!(reservation_id = %reservation.id().into_uuid(), "reservation persisted");
            }
            Err(error) => {
                warn!(%error, "invalid message, skipping");
            }
        }
        commit(&consumer, &message);
    }
}

fn commit(consumer: &StreamConsumer, message: &rdkafka::message::BorrowedMessage<'_>) {
    if let Err(error) = consumer.commit_message(message, CommitMode::Async) {
        warn!(%error, "offset commit failed");
    }
}
