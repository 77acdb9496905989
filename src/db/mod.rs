mod schema;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc::Receiver;

use crate::models::*;
use crate::store::RecordStore;
use crate::watch::{Snapshot, SnapshotFeed};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TRANSACTION_COLUMNS: &str = "id, user_id, amount, category_id, category_name, category_icon,
     kind, description, occurred_at, created_at";

/// SQLite-backed record store. Writes push a fresh snapshot to the
/// subscribers of the affected user.
pub struct Database {
    conn: Connection,
    feeds: HashMap<i64, SnapshotFeed>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self {
            conn,
            feeds: HashMap::new(),
        };
        db.migrate().context("Database migration failed")?;
        db.seed_default_categories()?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self {
            conn,
            feeds: HashMap::new(),
        };
        db.migrate()?;
        db.seed_default_categories()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        // Version 1 is the only layout; older stamps just move forward.
        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(
                from = current,
                to = schema::CURRENT_VERSION,
                "migrated schema"
            );
        }

        Ok(())
    }

    pub fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    fn seed_default_categories(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for (name, icon, color, kind) in DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT OR IGNORE INTO categories (name, icon, color, kind) VALUES (?1, ?2, ?3, ?4)",
                params![name, icon, color, kind.as_str()],
            )?;
        }
        tx.commit()?;
        tracing::debug!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub fn insert_transaction(&mut self, txn: &TransactionRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (user_id, amount, category_id, category_name, category_icon,
                                       kind, description, occurred_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                txn.user_id,
                txn.amount.to_string(),
                txn.category_id,
                txn.category_name,
                txn.category_icon,
                txn.kind.as_str(),
                txn.description,
                format_datetime(txn.occurred_at),
                format_datetime(txn.created_at),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, user_id = txn.user_id, kind = %txn.kind, "inserted transaction");
        self.publish(txn.user_id)?;
        Ok(id)
    }

    pub fn update_transaction(&mut self, txn: &TransactionRecord) -> Result<()> {
        let Some(id) = txn.id else {
            bail!("Cannot update a transaction that has not been saved");
        };
        let changed = self.conn.execute(
            "UPDATE transactions
             SET amount = ?1, category_id = ?2, category_name = ?3, category_icon = ?4,
                 kind = ?5, description = ?6, occurred_at = ?7
             WHERE id = ?8 AND user_id = ?9",
            params![
                txn.amount.to_string(),
                txn.category_id,
                txn.category_name,
                txn.category_icon,
                txn.kind.as_str(),
                txn.description,
                format_datetime(txn.occurred_at),
                id,
                txn.user_id,
            ],
        )?;
        if changed == 0 {
            bail!("Transaction {id} not found");
        }
        tracing::debug!(id, user_id = txn.user_id, "updated transaction");
        self.publish(txn.user_id)
    }

    /// Returns false when no such transaction belongs to `user_id`.
    pub fn delete_transaction(&mut self, user_id: i64, id: i64) -> Result<bool> {
        let changed = self.conn.execute(
            "DELETE FROM transactions WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed == 0 {
            return Ok(false);
        }
        tracing::debug!(id, user_id, "deleted transaction");
        self.publish(user_id)?;
        Ok(true)
    }

    pub fn get_transaction(&self, user_id: i64, id: i64) -> Result<Option<TransactionRecord>> {
        let result = self.conn.query_row(
            &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
            transaction_from_row,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn load_transactions(&self, user_id: i64) -> Result<Vec<TransactionRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions
             WHERE user_id = ?1
             ORDER BY occurred_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![user_id], transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn publish(&mut self, user_id: i64) -> Result<()> {
        if !self.feeds.contains_key(&user_id) {
            return Ok(());
        }
        let snapshot: Snapshot = self.load_transactions(user_id)?.into();
        if let Some(feed) = self.feeds.get_mut(&user_id) {
            feed.publish(snapshot);
            if feed.is_empty() {
                self.feeds.remove(&user_id);
            }
        }
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub fn get_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, icon, color, kind FROM categories
             WHERE ?1 IS NULL OR kind = ?1
             ORDER BY kind, id",
        )?;
        let rows = stmt.query_map(params![kind.map(|k| k.as_str())], category_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn find_category(&self, name: &str) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, name, icon, color, kind FROM categories WHERE name = ?1 COLLATE NOCASE",
            params![name.trim()],
            category_from_row,
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Store a limit, replacing any earlier one for the same category.
    pub fn upsert_budget(&mut self, budget: &BudgetLimit) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO budgets (user_id, category_name, limit_amount, month, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, category_name) DO UPDATE SET
                 limit_amount = excluded.limit_amount,
                 month = excluded.month,
                 created_at = excluded.created_at",
            params![
                budget.user_id,
                budget.category_name,
                budget.limit.to_string(),
                budget.month.to_string(),
                format_datetime(budget.created_at),
            ],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM budgets WHERE user_id = ?1 AND category_name = ?2",
            params![budget.user_id, budget.category_name],
            |row| row.get(0),
        )?;
        tracing::debug!(
            id,
            user_id = budget.user_id,
            category = %budget.category_name,
            month = %budget.month,
            "upserted budget"
        );
        Ok(id)
    }

    pub fn delete_budget(&mut self, user_id: i64, category_name: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "DELETE FROM budgets WHERE user_id = ?1 AND category_name = ?2",
            params![user_id, category_name],
        )?;
        tracing::debug!(user_id, category = category_name, changed, "deleted budget");
        Ok(changed > 0)
    }
}

impl RecordStore for Database {
    fn list_transactions(&self, user_id: i64) -> Result<Vec<TransactionRecord>> {
        self.load_transactions(user_id)
    }

    fn subscribe_transactions(&mut self, user_id: i64) -> Result<Receiver<Snapshot>> {
        let current: Snapshot = self.load_transactions(user_id)?.into();
        let rx = self.feeds.entry(user_id).or_default().subscribe(current);
        tracing::debug!(user_id, "subscribed to transactions");
        Ok(rx)
    }

    fn list_budgets(&self, user_id: i64) -> Result<Vec<BudgetLimit>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, category_name, limit_amount, month, created_at
             FROM budgets WHERE user_id = ?1 ORDER BY category_name",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            let amt_str: String = row.get(3)?;
            let month: String = row.get(4)?;
            Ok(BudgetLimit {
                id: Some(row.get(0)?),
                user_id: row.get(1)?,
                category_name: row.get(2)?,
                limit: Decimal::from_str(&amt_str).unwrap_or_default(),
                month: MonthKey::parse(&month).map_err(|e| conversion_error(4, e))?,
                created_at: parse_datetime(5, &row.get::<_, String>(5)?)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn monthly_preference(&self, user_id: i64) -> Result<Decimal> {
        let result = self.conn.query_row(
            "SELECT monthly_limit FROM preferences WHERE user_id = ?1",
            params![user_id],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(s) => Ok(Decimal::from_str(&s).unwrap_or_default()),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Decimal::ZERO),
            Err(e) => Err(e.into()),
        }
    }

    fn set_monthly_preference(&mut self, user_id: i64, limit: Decimal) -> Result<()> {
        if limit.is_sign_negative() && !limit.is_zero() {
            bail!("Monthly limit must not be negative");
        }
        self.conn.execute(
            "INSERT INTO preferences (user_id, monthly_limit) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET monthly_limit = excluded.monthly_limit",
            params![user_id, limit.to_string()],
        )?;
        tracing::debug!(user_id, %limit, "set monthly limit");
        Ok(())
    }
}

fn format_datetime(at: NaiveDateTime) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

fn parse_datetime(col: usize, s: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map_err(|e| conversion_error(col, e))
}

fn conversion_error<E>(col: usize, e: E) -> rusqlite::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, e.into())
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<TransactionRecord> {
    let amount_str: String = row.get(2)?;
    let kind: String = row.get(6)?;
    Ok(TransactionRecord {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        amount: Decimal::from_str(&amount_str).unwrap_or_default(),
        category_id: row.get(3)?,
        category_name: row.get(4)?,
        category_icon: row.get(5)?,
        kind: TransactionKind::parse(&kind).map_err(|e| conversion_error(6, e))?,
        description: row.get(7)?,
        occurred_at: parse_datetime(8, &row.get::<_, String>(8)?)?,
        created_at: parse_datetime(9, &row.get::<_, String>(9)?)?,
    })
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    let kind: String = row.get(4)?;
    Ok(Category {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
        kind: TransactionKind::parse(&kind).map_err(|e| conversion_error(4, e))?,
    })
}
