//! Service configuration loaded from environment variables.

use std::env;

use crate::config::db::{db_kind_from_env, DbKind, RuntimeEnv};
use crate::domain::DEFAULT_HIGH_SCORE_LIMIT;
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const FALLBACK_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub runtime_env: RuntimeEnv,
    pub db_kind: DbKind,
    pub high_score_limit: usize,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let high_score_limit = match env::var("HIGH_SCORE_LIMIT") {
            Ok(raw) => parse_high_score_limit(&raw)?,
            Err(_) => DEFAULT_HIGH_SCORE_LIMIT,
        };

        let cors_origins = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        Ok(Self {
            host,
            port,
            runtime_env: RuntimeEnv::Prod,
            db_kind: db_kind_from_env()?,
            high_score_limit,
            cors_origins,
        })
    }
}

fn parse_high_score_limit(raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::config(format!(
            "HIGH_SCORE_LIMIT must be a positive integer, got '{raw}'"
        ))),
    }
}

/// Comma-separated origins; blank, `null` and non-http entries are ignored.
/// Falls back to localhost when nothing usable remains.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.is_empty() {
        FALLBACK_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}
