use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => bail!("Unknown transaction kind: '{other}' (expected expense or income)"),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single logged money movement. The engine only ever reads these.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: Option<i64>,
    pub user_id: i64,
    /// Always non-negative; direction comes from `kind`.
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub category_icon: String,
    pub kind: TransactionKind,
    pub description: String,
    pub occurred_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl TransactionRecord {
    pub fn new(
        user_id: i64,
        kind: TransactionKind,
        amount: Decimal,
        category_name: String,
        category_icon: String,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            user_id,
            amount,
            category_id: None,
            category_name,
            category_icon,
            kind,
            description: String::new(),
            occurred_at,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Parse a user-entered currency amount. Negative values are rejected, the
/// direction of a record is carried by its kind.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && *c != '₹')
        .collect();
    let amount = match Decimal::from_str(&cleaned) {
        Ok(a) => a,
        Err(_) => bail!("Invalid amount: '{s}'"),
    };
    if amount.is_sign_negative() && !amount.is_zero() {
        bail!("Amount must not be negative: '{s}'");
    }
    Ok(amount)
}
