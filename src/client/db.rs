use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::ServiceConfig;

pub type DatabaseClient = DatabaseConnection;

pub trait DatabaseClientExt: Sized {
  fn build_from_config(config: &ServiceConfig) -> impl std::future::Future<Output = Result<DatabaseConnection, String>>;
}

impl DatabaseClientExt for DatabaseClient {
  async fn build_from_config(config: &ServiceConfig) -> Result<DatabaseConnection, String> {
    let mut opt = ConnectOptions::new(config.db.get_url());
    opt
      .connect_timeout(Duration::from_secs(8))
      .acquire_timeout(Duration::from_secs(8))
      .sqlx_logging(false);

    // An in-memory SQLite database lives and dies with its single connection.
    if config.db.is_in_memory() {
      opt.max_connections(1).min_connections(1);
    } else {
      opt
        .max_connections(config.db.max_connections.max(1))
        .min_connections(5.min(config.db.max_connections.max(1)))
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(30 * 60));
    }

    let db = Database::connect(opt).await.map_err(|e| format!("Error in connecting to database: {}", e))?;
    info!("database connection pool ready");
    Ok(db)
  }
}
