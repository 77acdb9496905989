mod budget;
mod category;
mod transaction;

pub use budget::{BudgetLimit, MonthKey};
pub use category::{Category, DEFAULT_CATEGORIES};
pub use transaction::{parse_amount, TransactionKind, TransactionRecord};
