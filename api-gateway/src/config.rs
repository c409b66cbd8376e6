// Gateway configuration from environment variables

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration of the gateway.
///
/// Backends are selected by presence: with `DATABASE_URL` the durable
/// stores run on PostgreSQL, with `KAFKA_BROKERS` the event stream goes to
/// Kafka. Without them the process is self-contained (in-memory stores,
/// recording publisher), which is how the test environment runs.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_addr: String,
    pub jwt_secret: String,
    pub rate_limit_per_min: u32,
    pub reservation_ttl: Duration,
    pub queue_threshold: usize,
    pub worker_pool_size: usize,
    pub reaper_interval: Duration,
    pub reaper_batch: usize,
    pub persist_sync: bool,
    pub database_url: Option<String>,
    pub kafka_brokers: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            http_addr: env_or("HTTP_ADDR", "0.0.0.0:8080"),
            jwt_secret: env_or("JWT_SECRET", "dev-secret"),
            rate_limit_per_min: env_or_parse("RATE_LIMIT_PER_MIN", 120),
            reservation_ttl: Duration::from_secs(env_or_parse("RESERVATION_TTL_SECONDS", 300)),
            queue_threshold: env_or_parse("QUEUE_THRESHOLD", 1000),
            worker_pool_size: env_or_parse("WORKER_POOL_SIZE", 50),
            reaper_interval: Duration::from_millis(env_or_parse("REAPER_INTERVAL_MS", 2000)),
            reaper_batch: env_or_parse("REAPER_BATCH", 100),
            persist_sync: env_or_parse("PERSIST_SYNC", true),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            kafka_brokers: env::var("KAFKA_BROKERS").ok().filter(|v| !v.is_empty()),
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| fallback.to_string())
}

fn env_or_parse<T: FromStr + Copy>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}
