use crate::models::DbOpeningHours;
use eyre::Result;
use slotbook_core::models::opening_hours::OpeningHours;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_opening_hours_for_weekday(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    weekday: i16,
) -> Result<Option<DbOpeningHours>> {
    let hours = sqlx::query_as::<_, DbOpeningHours>(
        r#"
        SELECT service_id, weekday, opens_at, closes_at, closed
        FROM opening_hours
        WHERE service_id = $1 AND weekday = $2
        "#,
    )
    .bind(service_id)
    .bind(weekday)
    .fetch_optional(pool)
    .await?;

    Ok(hours)
}

pub async fn get_opening_hours_by_service_id(
    pool: &Pool<Postgres>,
    service_id: Uuid,
) -> Result<Vec<DbOpeningHours>> {
    let hours = sqlx::query_as::<_, DbOpeningHours>(
        r#"
        SELECT service_id, weekday, opens_at, closes_at, closed
        FROM opening_hours
        WHERE service_id = $1
        ORDER BY weekday ASC
        "#,
    )
    .bind(service_id)
    .fetch_all(pool)
    .await?;

    Ok(hours)
}

/// Replaces the whole week of a service in one transaction.
pub async fn replace_opening_hours(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    days: &[OpeningHours],
) -> Result<Vec<DbOpeningHours>> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM opening_hours
        WHERE service_id = $1
        "#,
    )
    .bind(service_id)
    .execute(&mut *tx)
    .await?;

    let mut stored = Vec::with_capacity(days.len());
    for day in days {
        let row = sqlx::query_as::<_, DbOpeningHours>(
            r#"
            INSERT INTO opening_hours (service_id, weekday, opens_at, closes_at, closed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING service_id, weekday, opens_at, closes_at, closed
            "#,
        )
        .bind(service_id)
        .bind(day.weekday.number_from_monday() as i16)
        .bind(day.opens_at)
        .bind(day.closes_at)
        .bind(day.closed)
        .fetch_one(&mut *tx)
        .await?;
        stored.push(row);
    }

    tx.commit().await?;

    tracing::debug!("Replaced opening hours: service_id={}, days={}", service_id, stored.len());
    Ok(stored)
}
