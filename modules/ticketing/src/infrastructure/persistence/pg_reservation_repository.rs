// PostgreSQL ReservationRepository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::Reservation;
use crate::domain::repositories::ReservationRepository;
use crate::domain::value_objects::{EventId, ReservationId, ReservationStatus};
use crate::TicketingError;

/// PostgreSQL implementation of the durable reservation mirror
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    /// Creates a new PgReservationRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn upsert(&self, reservation: &Reservation) -> Result<(), TicketingError> {
        sqlx::query(
            r#"
            INSERT INTO reservations (id, user_id, event_id, category, qty, status, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id)
            DO UPDATE SET status = EXCLUDED.status, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(reservation.id().into_uuid())
        .bind(reservation.user_id())
        .bind(reservation.event_id().into_uuid())
        .bind(reservation.category())
        .bind(reservation.qty() as i32)
        .bind(reservation.status().to_string())
        .bind(reservation.expires_at())
        .bind(reservation.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ReservationId,
    ) -> Result<Option<Reservation>, TicketingError> {
        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT id, user_id, event_id, category, qty, status, expires_at, created_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<(), TicketingError> {
        // Unknown ids fall through with zero affected rows; the mirror
        // never manufactures records it has not seen.
        sqlx::query(
            r#"
            UPDATE reservations
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .bind(status.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Internal row type for mapping reservation database results
#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: uuid::Uuid,
    user_id: String,
    event_id: uuid::Uuid,
    category: String,
    qty: i32,
    status: String,
    expires_at: chrono::DateTime<chrono::Utc>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = TicketingError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let status: ReservationStatus = row.status.parse()?;
        let qty = u32::try_from(row.qty)
            .map_err(|_| TicketingError::Internal("reservation qty out of range".to_string()))?;

        Ok(Reservation::reconstitute(
            ReservationId::from_uuid(row.id),
            row.user_id,
            EventId::from_uuid(row.event_id),
            row.category,
            qty,
            status,
            row.expires_at,
            row.created_at,
        ))
    }
}
