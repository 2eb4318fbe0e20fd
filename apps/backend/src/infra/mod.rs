//! Database bootstrap, state construction and DB error translation.

pub mod db;
pub mod db_errors;
pub mod state;
