// API gateway entry point: wires backends, spawns the expiry reaper, and
// serves the HTTP surface until shutdown.

mod auth;
mod config;
mod error;
mod extractors;
mod handlers;
mod middleware;
mod routes;
mod state;

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use common::health::infrastructure::health_check_simple;
use governor::{Quota, RateLimiter};
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ticketing::{
    ensure_topics, topics, AdmissionGate, BookingRepository,
    ConcertEventRepository, EventPublisher, ExpiryReaper, KafkaEventPublisher,
    MemoryBookingRepository, MemoryConcertEventRepository, MemoryReservationRepository,
    MemoryStockEngine, MemoryTicketCategoryRepository, PgBookingRepository,
    PgConcertEventRepository, PgReservationRepository, PgTicketCategoryRepository,
    RecordingEventPublisher, ReleaseExpiredUseCase, ReservationRepository, StockEngine,
    TicketCategoryRepository,
};

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::state::AppState;

type Stores = (
    Arc<dyn ConcertEventRepository>,
    Arc<dyn TicketCategoryRepository>,
    Arc<dyn ReservationRepository>,
    Arc<dyn BookingRepository>,
);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let metrics_handle = PrometheusBuilder::new().install_recorder()?;

    // The stock engine is the in-process inventory authority.
    let stock: Arc<dyn StockEngine> = Arc::new(MemoryStockEngine::new());

    let (events, categories, reservations, bookings) = build_stores(&config).await?;
    let publisher = build_publisher(&config).await?;

    let gate = Arc::new(AdmissionGate::new(
        config.queue_threshold,
        config.worker_pool_size,
    ));

    let rate_limit =
        NonZeroU32::new(config.rate_limit_per_min.max(1)).unwrap_or(NonZeroU32::MIN);
    let state = AppState::new(
        Arc::clone(&events),
        Arc::clone(&categories),
        Arc::clone(&reservations),
        Arc::clone(&bookings),
        Arc::clone(&stock),
        Arc::clone(&publisher),
        gate,
        config.reservation_ttl,
        config.persist_sync,
        Arc::new(TokenVerifier::new(&config.jwt_secret)),
        Arc::new(RateLimiter::keyed(Quota::per_minute(rate_limit))),
        metrics_handle,
    );

    // Reaper: the liveness side of the inventory invariant.
    let release_expired = Arc::new(ReleaseExpiredUseCase::new(
        Arc::clone(&stock),
        Arc::clone(&reservations),
        Arc::clone(&publisher),
    ));
    let reaper = ExpiryReaper::new(release_expired, config.reaper_interval, config.reaper_batch);
    let shutdown = CancellationToken::new();
    let reaper_handle = tokio::spawn(reaper.run(shutdown.clone()));

    let app = Router::new()
        .route("/health", get(health_check_simple))
        .route("/metrics", get(metrics_handler))
        .nest("/api", routes::api_router(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(middleware::track_metrics))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "api gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown.cancel();
    reaper_handle.await?;
    info!("api gateway stopped");
    Ok(())
}

/// PostgreSQL stores when DATABASE_URL is set, in-memory otherwise.
async fn build_stores(config: &Config) -> anyhow::Result<Stores> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
            sqlx::migrate!().run(&pool).await?;
            info!("durable stores on postgres");
            Ok((
                Arc::new(PgConcertEventRepository::new(pool.clone())),
                Arc::new(PgTicketCategoryRepository::new(pool.clone())),
                Arc::new(PgReservationRepository::new(pool.clone())),
                Arc::new(PgBookingRepository::new(pool)),
            ))
        }
        None => {
            info!("durable stores in memory");
            Ok((
                Arc::new(MemoryConcertEventRepository::new()),
                Arc::new(MemoryTicketCategoryRepository::new()),
                Arc::new(MemoryReservationRepository::new()),
                Arc::new(MemoryBookingRepository::new()),
            ))
        }
    }
}

/// Kafka producer when KAFKA_BROKERS is set, recording publisher otherwise.
async fn build_publisher(config: &Config) -> anyhow::Result<Arc<dyn EventPublisher>> {
    match &config.kafka_brokers {
        Some(brokers) => {
            ensure_topics(brokers, topics::ALL, 3, 1).await?;
            info!(%brokers, "event stream on kafka");
            Ok(Arc::new(KafkaEventPublisher::new(brokers)?))
        }
        None => {
            info!("event stream recorded in process");
            Ok(Arc::new(RecordingEventPublisher::new()))
        }
    }
}

async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics_handle().render()
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
