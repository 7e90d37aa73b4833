use crate::models::DbBooking;
use chrono::NaiveDateTime;
use eyre::Result;
use slotbook_core::models::booking::Booking;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_booking(pool: &Pool<Postgres>, booking: &Booking) -> Result<DbBooking> {
    let row = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, service_id, offer_id, employee_id, customer_id, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, service_id, offer_id, employee_id, customer_id, start_time, end_time, created_at
        "#,
    )
    .bind(booking.id())
    .bind(booking.service_id())
    .bind(booking.offer_id())
    .bind(booking.employee_id())
    .bind(booking.customer_id())
    .bind(booking.start_time())
    .bind(booking.end_time())
    .bind(booking.created_at())
    .fetch_one(pool)
    .await?;

    tracing::debug!("Booking created: id={}", row.id);
    Ok(row)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, service_id, offer_id, employee_id, customer_id, start_time, end_time, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn get_bookings_by_customer_id(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, service_id, offer_id, employee_id, customer_id, start_time, end_time, created_at
        FROM bookings
        WHERE customer_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Bookings of an employee overlapping `[window_start, window_end)`.
pub async fn get_employee_bookings_in_window(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, service_id, offer_id, employee_id, customer_id, start_time, end_time, created_at
        FROM bookings
        WHERE employee_id = $1 AND start_time < $3 AND $2 < end_time
        ORDER BY start_time ASC
        "#,
    )
    .bind(employee_id)
    .bind(window_start)
    .bind(window_end)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Bookings of a customer, at any service, overlapping `[window_start, window_end)`.
pub async fn get_customer_bookings_in_window(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, service_id, offer_id, employee_id, customer_id, start_time, end_time, created_at
        FROM bookings
        WHERE customer_id = $1 AND start_time < $3 AND $2 < end_time
        ORDER BY start_time ASC
        "#,
    )
    .bind(customer_id)
    .bind(window_start)
    .bind(window_end)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn delete_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
