use crate::models::DbService;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    tracing::debug!("Getting service by id: {}", id);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}
