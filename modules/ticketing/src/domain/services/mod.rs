mod event_publisher;
mod stock_engine;

pub use event_publisher::{topics, EventPublisher, ExpiryNotice};
pub use stock_engine::{ReservationHold, StockEngine};
