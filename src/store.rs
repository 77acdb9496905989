use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::mpsc::Receiver;

use crate::models::{BudgetLimit, TransactionRecord};
use crate::watch::Snapshot;

/// Read side of the persistence layer as the engine sees it.
///
/// Every call names its user explicitly. Implementations hand back owned
/// records; the engine never writes through this trait.
pub trait RecordStore {
    /// All of a user's transactions, newest first.
    fn list_transactions(&self, user_id: i64) -> Result<Vec<TransactionRecord>>;

    /// Current snapshot now, then a fresh one after every write for `user_id`.
    fn subscribe_transactions(&mut self, user_id: i64) -> Result<Receiver<Snapshot>>;

    fn list_budgets(&self, user_id: i64) -> Result<Vec<BudgetLimit>>;

    /// Manual monthly limit, or zero when unset.
    fn monthly_preference(&self, user_id: i64) -> Result<Decimal>;

    fn set_monthly_preference(&mut self, user_id: i64, limit: Decimal) -> Result<()>;
}
