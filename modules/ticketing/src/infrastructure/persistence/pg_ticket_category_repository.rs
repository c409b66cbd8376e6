// PostgreSQL TicketCategoryRepository implementation

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::entities::TicketCategory;
use crate::domain::repositories::TicketCategoryRepository;
use crate::domain::value_objects::{CategoryId, EventId};
use crate::TicketingError;

/// PostgreSQL implementation of the ticket category store. The unique
/// index on (event_id, name) backs the duplicate check.
pub struct PgTicketCategoryRepository {
    pool: PgPool,
}

impl PgTicketCategoryRepository {
    /// Creates a new PgTicketCategoryRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketCategoryRepository for PgTicketCategoryRepository {
    async fn create(&self, category: &TicketCategory) -> Result<(), TicketingError> {
        let result = sqlx::query(
            r#"
            INSERT INTO ticket_categories (id, event_id, name, total_stock, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id().into_uuid())
        .bind(category.event_id().into_uuid())
        .bind(category.name())
        .bind(category.total_stock() as i32)
        .bind(category.price())
        .bind(category.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => Err(
                TicketingError::CategoryAlreadyExists(category.name().to_string()),
            ),
            Err(error) => Err(error.into()),
        }
    }

    async fn find_by_event_id(
        &self,
        event_id: EventId,
    ) -> Result<Vec<TicketCategory>, TicketingError> {
        let rows = sqlx::query_as::<_, TicketCategoryRow>(
            r#"
            SELECT id, event_id, name, total_stock, price, created_at
            FROM ticket_categories
            WHERE event_id = $1
            ORDER BY name
            "#,
        )
        .bind(event_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn find_by_event_and_name(
        &self,
        event_id: EventId,
        name: &str,
    ) -> Result<Option<TicketCategory>, TicketingError> {
        let row = sqlx::query_as::<_, TicketCategoryRow>(
            r#"
            SELECT id, event_id, name, total_stock, price, created_at
            FROM ticket_categories
            WHERE event_id = $1 AND name = $2
            "#,
        )
        .bind(event_id.into_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }
}

/// Internal row type for mapping category database results
#[derive(sqlx::FromRow)]
struct TicketCategoryRow {
    id: uuid::Uuid,
    event_id: uuid::Uuid,
    name: String,
    total_stock: i32,
    price: Decimal,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<TicketCategoryRow> for TicketCategory {
    type Error = TicketingError;

    fn try_from(row: TicketCategoryRow) -> Result<Self, Self::Error> {
        let total_stock = u32::try_from(row.total_stock)
            .map_err(|_| TicketingError::Internal("category stock out of range".to_string()))?;

        Ok(TicketCategory::reconstitute(
            CategoryId::from_uuid(row.id),
            EventId::from_uuid(row.event_id),
            row.name,
            total_stock,
            row.price,
            row.created_at,
        ))
    }
}
