// PostgreSQL BookingRepository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::Booking;
use crate::domain::repositories::BookingRepository;
use crate::domain::value_objects::{BookingId, ReservationId};
use crate::TicketingError;

/// PostgreSQL implementation of the booking store. The unique index on
/// reservation_id makes `create_if_not_exists` atomic at the constraint.
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Creates a new PgBookingRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create_if_not_exists(&self, booking: &Booking) -> Result<bool, TicketingError> {
        let result = sqlx::query(
            r#"
            INSERT INTO bookings (id, reservation_id, payment_status, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (reservation_id) DO NOTHING
            "#,
        )
        .bind(booking.id().into_uuid())
        .bind(booking.reservation_id().into_uuid())
        .bind(booking.payment_status())
        .bind(booking.created_at())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Option<Booking>, TicketingError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, reservation_id, payment_status, created_at
            FROM bookings
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Booking::from))
    }
}

/// Internal row type for mapping booking database results
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: uuid::Uuid,
    reservation_id: uuid::Uuid,
    payment_status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking::reconstitute(
            BookingId::from_uuid(row.id),
            ReservationId::from_uuid(row.reservation_id),
            row.payment_status,
            row.created_at,
        )
    }
}
