use crate::models::DbEmployee;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_employee_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, service_id, name
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}
