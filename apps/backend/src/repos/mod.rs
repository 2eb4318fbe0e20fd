//! Repository functions: adapters in, domain types out, `DomainError` on failure.

pub mod frames;
pub mod games;
pub mod high_scores;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Narrow a stored integer into its domain type, flagging out-of-range rows.
pub(crate) fn narrow<T, U>(value: T, column: &str) -> Result<U, DomainError>
where
    T: Copy + std::fmt::Display,
    U: TryFrom<T>,
{
    U::try_from(value).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("stored {column} value {value} is out of range"),
        )
    })
}
