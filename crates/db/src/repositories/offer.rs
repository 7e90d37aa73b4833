use crate::models::DbOffer;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_offer_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbOffer>> {
    let offer = sqlx::query_as::<_, DbOffer>(
        r#"
        SELECT id, service_id, name, duration_minutes, price_cents
        FROM offers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(offer)
}
