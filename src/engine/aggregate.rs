use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::engine::icons::icon_or_default;
use crate::engine::status::percent_of;
use crate::models::{MonthKey, TransactionKind, TransactionRecord};

/// Label format for day buckets, e.g. `Mar 05`.
pub const DAY_LABEL_FORMAT: &str = "%b %d";

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category_name: String,
    pub icon: String,
    pub amount: Decimal,
}

impl CategorySpend {
    /// Percentage of `total` this category accounts for, 0 when `total` is 0.
    pub fn share_of(&self, total: Decimal) -> Decimal {
        percent_of(self.amount, total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySpend {
    pub day: NaiveDate,
    pub label: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    /// Income minus expense; may be negative.
    pub fn savings(&self) -> Decimal {
        self.income.saturating_sub(self.expense)
    }
}

/// Sum income and expense amounts over the snapshot.
pub fn totals(transactions: &[TransactionRecord]) -> Totals {
    transactions
        .iter()
        .fold(Totals::default(), |mut acc, txn| {
            match txn.kind {
                TransactionKind::Income => {
                    acc.income = acc.income.saturating_add(txn.amount)
                }
                TransactionKind::Expense => {
                    acc.expense = acc.expense.saturating_add(txn.amount)
                }
            }
            acc
        })
}

/// Group expenses by category name. Order of the result is unspecified.
pub fn aggregate_by_category(transactions: &[TransactionRecord]) -> Vec<CategorySpend> {
    let mut groups: HashMap<&str, CategorySpend> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        groups
            .entry(txn.category_name.as_str())
            .and_modify(|g| g.amount = g.amount.saturating_add(txn.amount))
            .or_insert_with(|| CategorySpend {
                category_name: txn.category_name.clone(),
                icon: icon_or_default(&txn.category_icon, &txn.category_name),
                amount: txn.amount,
            });
    }
    let result: Vec<CategorySpend> = groups.into_values().collect();
    tracing::debug!(categories = result.len(), "aggregated spend by category");
    result
}

/// Largest amount first; ties broken by name so listings are stable.
pub fn sort_by_amount(spend: &mut [CategorySpend]) {
    spend.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
}

/// Group expenses by calendar day of `occurred_at`, largest day first.
pub fn aggregate_by_day(transactions: &[TransactionRecord]) -> Vec<DaySpend> {
    let mut days: HashMap<NaiveDate, Decimal> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let day = days.entry(txn.occurred_at.date()).or_insert(Decimal::ZERO);
        *day = day.saturating_add(txn.amount);
    }

    let mut result: Vec<DaySpend> = days
        .into_iter()
        .map(|(day, amount)| DaySpend {
            day,
            label: day.format(DAY_LABEL_FORMAT).to_string(),
            amount,
        })
        .collect();
    result.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.day.cmp(&b.day)));
    tracing::debug!(days = result.len(), "aggregated spend by day");
    result
}

/// Records whose `occurred_at` falls inside `month`.
pub fn in_month(transactions: &[TransactionRecord], month: MonthKey) -> Vec<TransactionRecord> {
    transactions
        .iter()
        .filter(|t| month.contains(t.occurred_at))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Income,
    Category(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub selection: Selection,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &TransactionRecord) -> bool {
        let selected = match &self.selection {
            Selection::All => true,
            Selection::Income => txn.is_income(),
            Selection::Category(name) => txn.category_name.eq_ignore_ascii_case(name),
        };
        if !selected {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                txn.description.to_lowercase().contains(&query)
                    || txn.category_name.to_lowercase().contains(&query)
            }
        }
    }
}

/// Apply a list-screen filter, keeping snapshot order.
pub fn filter<'a>(
    transactions: &'a [TransactionRecord],
    filter: &TransactionFilter,
) -> Vec<&'a TransactionRecord> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}
