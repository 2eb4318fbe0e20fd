use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::DbInfraError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DbInfraError::Connect {
        message: "no error recorded after max attempts".to_string(),
    }))
}

/// Pool options per engine.
///
/// An in-memory SQLite database lives only as long as its connection, so the
/// pool is pinned to a single long-lived connection.
fn connect_options(url: &str, db_kind: DbKind, owner: DbOwner) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_string());
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);

    match (db_kind, owner) {
        (DbKind::SqliteMemory, _) => {
            opt.min_connections(1)
                .max_connections(1)
                .idle_timeout(Duration::from_secs(24 * 60 * 60))
                .max_lifetime(Duration::from_secs(24 * 60 * 60));
        }
        (DbKind::SqliteFile, _) => {
            opt.min_connections(1).max_connections(1);
        }
        (DbKind::Postgres, DbOwner::Owner) => {
            opt.min_connections(1).max_connections(1);
        }
        (DbKind::Postgres, DbOwner::App) => {
            opt.min_connections(1).max_connections(10);
        }
    }
    opt
}

/// Open a connection pool for the given environment, engine and owner.
///
/// Postgres connections are retried a few times to ride out container start-up.
pub async fn connect(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, owner)?;
    let opt = connect_options(&url, db_kind, owner);

    info!(
        env = ?env,
        engine = get_db_engine(db_kind),
        url = %sanitize_db_url(&url),
        "connecting to database"
    );

    if let DbKind::SqliteFile = db_kind {
        if let Some(dir) = crate::config::db::sqlite_file_path(env)?.parent() {
            std::fs::create_dir_all(dir).map_err(|e| DbInfraError::Connect {
                message: format!("failed to create sqlite directory {}: {e}", dir.display()),
            })?;
        }
    }

    let attempts = if matches!(db_kind, DbKind::Postgres) {
        CONNECT_ATTEMPTS
    } else {
        1
    };

    retry_connection(
        || {
            let opt = opt.clone();
            async move {
                Database::connect(opt)
                    .await
                    .map_err(|e| DbInfraError::Connect {
                        message: format!("failed to connect to {}: {e}", get_db_engine(db_kind)),
                    })
            }
        },
        attempts,
        CONNECT_INTERVAL_MS,
    )
    .await
}

/// Connect with owner credentials and run a migration command.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    if matches!(db_kind, DbKind::SqliteMemory) {
        return Err(DbInfraError::config(
            "in-memory SQLite cannot be migrated from a separate process",
        ));
    }

    info!(
        "migrate=start env={:?} db_kind={} engine={}",
        env,
        db_kind,
        get_db_engine(db_kind)
    );

    let pool = connect(env, db_kind, DbOwner::Owner).await?;
    migrate(&pool, command)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("migration execution failed: {e}"),
        })?;

    info!("migrate=done");
    Ok(())
}

/// Sanitize database URL by masking the password.
/// Used for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    let user_start = auth_part.find("://").map(|i| i + 3).unwrap_or(0);
    match auth_part[user_start..].rfind(':') {
        Some(rel) => {
            let colon_pos = user_start + rel;
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        None => url.to_string(),
    }
}
