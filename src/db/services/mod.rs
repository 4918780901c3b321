//! The `services` module is the data-access and aggregation API used by the
//! HTTP handlers. Each sub-module owns one area (venues, artists, shows,
//! search); all public items are re-exported here.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};

use crate::web::error::AppError;

pub mod artist_service;
pub mod search_service;
pub mod show_service;
pub mod venue_service;

pub use artist_service::*;
pub use search_service::*;
pub use show_service::*;
pub use venue_service::*;

/// Runs `op` inside a transaction. The transaction commits when `op`
/// succeeds and rolls back on any error, so a failed write never leaves
/// partial rows behind. The transaction is released on every exit path.
pub async fn guarded_write<T, F>(db: &DatabaseConnection, op: F) -> Result<T, AppError>
where
    F: for<'c> FnOnce(
            &'c DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'c>>
        + Send,
    T: Send,
{
    db.transaction::<F, T, AppError>(op)
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => AppError::Database(db_err),
            TransactionError::Transaction(app_err) => app_err,
        })
}
