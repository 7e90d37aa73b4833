use color_eyre::eyre::Result;
use slotbook_api::config::ApiConfig;
use slotbook_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    let config = ApiConfig::from_env()?;

    // The schema is created idempotently on every start.
    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    slotbook_api::start_server(config, db_pool).await
}
