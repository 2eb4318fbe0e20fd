use db_infra::config::db::{DbKind, DbOwner, RuntimeEnv};
use db_infra::infra::db::core::{connect, orchestrate_migration};
use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::AppError;

/// Connect as the application role with the schema brought up to date.
///
/// In-memory SQLite only exists inside this pool, so it is migrated
/// in-process. Every other engine is migrated through an owner connection
/// first, then reopened with app credentials.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    if matches!(kind, DbKind::SqliteMemory) {
        let conn = connect(env, kind, DbOwner::App).await?;
        migration::migrate(&conn, MigrationCommand::Up).await?;
        info!(env = ?env, db_kind = %kind, "in-memory database ready");
        return Ok(conn);
    }

    orchestrate_migration(env, kind, MigrationCommand::Up).await?;
    let conn = connect(env, kind, DbOwner::App).await?;
    info!(env = ?env, db_kind = %kind, "database ready");
    Ok(conn)
}
