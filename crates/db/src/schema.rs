use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create opening_hours table, one row per service and ISO weekday
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS opening_hours (
            service_id UUID NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            weekday SMALLINT NOT NULL,
            opens_at TIME NOT NULL,
            closes_at TIME NOT NULL,
            closed BOOLEAN NOT NULL DEFAULT FALSE,
            PRIMARY KEY (service_id, weekday),
            CONSTRAINT valid_weekday CHECK (weekday BETWEEN 1 AND 7),
            CONSTRAINT valid_hours CHECK (closed OR closes_at > opens_at)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create offers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS offers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            service_id UUID NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            duration_minutes INTEGER NOT NULL,
            price_cents BIGINT NOT NULL DEFAULT 0,
            CONSTRAINT positive_duration CHECK (duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            service_id UUID NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY,
            service_id UUID NOT NULL REFERENCES services(id),
            offer_id UUID NOT NULL REFERENCES offers(id),
            employee_id UUID NULL REFERENCES employees(id),
            customer_id UUID NOT NULL,
            start_time TIMESTAMP NOT NULL,
            end_time TIMESTAMP NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_booking_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_offers_service_id ON offers(service_id)",
        "CREATE INDEX IF NOT EXISTS idx_employees_service_id ON employees(service_id)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_employee_start ON bookings(employee_id, start_time)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_customer_start ON bookings(customer_id, start_time)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
