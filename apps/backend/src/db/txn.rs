use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::require_db;
use super::txn_policy::{self, TxnPolicy};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Transaction injected into request extensions so several calls share it.
///
/// The owner of the `Arc` decides whether it commits.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn new(txn: DatabaseTransaction) -> Self {
        Self(Arc::new(txn))
    }

    /// Begin a transaction on `db` and wrap it for sharing.
    pub async fn open(db: &DatabaseConnection) -> Result<Self, AppError> {
        Ok(Self::new(db.begin().await?))
    }

    /// Make this transaction visible to `with_txn` calls made for `req`.
    pub fn inject(&self, req: &mut HttpRequest) {
        req.extensions_mut().insert(self.clone());
    }

    /// Roll back, provided every other handle has been dropped.
    pub async fn rollback(self) -> Result<(), AppError> {
        match Arc::try_unwrap(self.0) {
            Ok(txn) => Ok(txn.rollback().await?),
            Err(_) => Err(AppError::internal(
                ErrorCode::InternalError,
                "shared transaction still has live handles",
            )),
        }
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Clone the shared transaction out of the request, if one was injected.
    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }
}

/// Run `f` inside a transaction.
///
/// A `SharedTxn` in the request wins and is left open. Otherwise a fresh
/// transaction is started; `Err` always rolls back and `Ok` follows
/// [`txn_policy::current`].
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> LocalBoxFuture<'t, Result<R, AppError>>,
{
    // Clone out before awaiting so no RefCell borrow is held across the await.
    if let Some(shared) = req.and_then(SharedTxn::from_req) {
        return f(shared.transaction()).await;
    }

    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(value) => {
            match txn_policy::current() {
                TxnPolicy::CommitOnOk => txn.commit().await?,
                TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback after failed transaction also failed");
            }
            Err(err)
        }
    }
}
