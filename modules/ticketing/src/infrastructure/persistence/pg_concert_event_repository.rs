// PostgreSQL ConcertEventRepository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::ConcertEvent;
use crate::domain::repositories::ConcertEventRepository;
use crate::domain::value_objects::EventId;
use crate::TicketingError;

/// PostgreSQL implementation of the concert event store
pub struct PgConcertEventRepository {
    pool: PgPool,
}

impl PgConcertEventRepository {
    /// Creates a new PgConcertEventRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConcertEventRepository for PgConcertEventRepository {
    async fn create(&self, event: &ConcertEvent) -> Result<(), TicketingError> {
        sqlx::query(
            r#"
            INSERT INTO concert_events (id, name, date, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.id().into_uuid())
        .bind(event.name())
        .bind(event.date())
        .bind(event.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<ConcertEvent>, TicketingError> {
        let row = sqlx::query_as::<_, ConcertEventRow>(
            r#"
            SELECT id, name, date, created_at
            FROM concert_events
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ConcertEvent::from))
    }
}

/// Internal row type for mapping event database results
#[derive(sqlx::FromRow)]
struct ConcertEventRow {
    id: uuid::Uuid,
    name: String,
    date: chrono::DateTime<chrono::Utc>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ConcertEventRow> for ConcertEvent {
    fn from(row: ConcertEventRow) -> Self {
        ConcertEvent::reconstitute(
            EventId::from_uuid(row.id),
            row.name,
            row.date,
            row.created_at,
        )
    }
}
