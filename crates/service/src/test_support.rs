#![cfg(test)]
use migration::MigratorTrait;
use models::db::{config_from_env, connect_with_config};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_try_init(|| async {
            let mut cfg = config_from_env();
            cfg.connect_timeout_secs = 5;
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    let mut cfg = config_from_env();
    cfg.connect_timeout_secs = 5;
    cfg.acquire_timeout_secs = 10;
    connect_with_config(&cfg).await
}
