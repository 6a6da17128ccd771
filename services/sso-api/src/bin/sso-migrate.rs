//! Apply pending database migrations against `DATABASE_URL`.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = sso_db::create_pool(&database_url).await?;
    let applied = sso_db::run_migrations(&pool).await?;

    if applied == 0 {
        println!("Nothing to migrate");
    } else {
        println!("Applied {applied} migration(s)");
    }

    pool.close().await;
    Ok(())
}
