use rust_decimal::Decimal;

use crate::engine::aggregate::{
    aggregate_by_category, aggregate_by_day, sort_by_amount, totals, CategorySpend, DaySpend,
    Totals,
};
use crate::models::TransactionRecord;

/// Entries kept in each top-N listing.
pub const TOP_N: usize = 3;

/// Entries kept in the dashboard's recent list.
pub const RECENT_N: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportInsights {
    pub totals: Totals,
    pub daily_average: Decimal,
    pub largest_transaction: Option<TransactionRecord>,
    pub transaction_count: usize,
    pub top_categories: Vec<CategorySpend>,
    pub top_days: Vec<DaySpend>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub balance: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
    pub transaction_count: usize,
    pub top_category: Option<CategorySpend>,
    pub recent: Vec<TransactionRecord>,
}

/// Summary insights for a report. `day_of_month` is how far into the current
/// cycle we are and divides total expense into a daily average.
pub fn build_insights(transactions: &[TransactionRecord], day_of_month: u32) -> ReportInsights {
    let totals = totals(transactions);
    let daily_average = if day_of_month > 0 {
        totals.expense / Decimal::from(day_of_month)
    } else {
        Decimal::ZERO
    };

    // First maximum in snapshot order wins.
    let largest_transaction = transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold(None::<&TransactionRecord>, |best, txn| match best {
            Some(b) if b.amount >= txn.amount => Some(b),
            _ => Some(txn),
        })
        .cloned();

    let mut top_categories = aggregate_by_category(transactions);
    sort_by_amount(&mut top_categories);
    top_categories.truncate(TOP_N);

    let mut top_days = aggregate_by_day(transactions);
    top_days.truncate(TOP_N);

    ReportInsights {
        totals,
        daily_average,
        largest_transaction,
        transaction_count: transactions.len(),
        top_categories,
        top_days,
    }
}

/// Home-screen quick stats: balance, counts, the top category and the most
/// recent records.
pub fn build_dashboard(transactions: &[TransactionRecord]) -> DashboardStats {
    let totals = totals(transactions);

    let mut spend = aggregate_by_category(transactions);
    sort_by_amount(&mut spend);
    let top_category = spend.into_iter().next();

    let mut recent: Vec<TransactionRecord> = transactions.to_vec();
    recent.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    recent.truncate(RECENT_N);

    DashboardStats {
        balance: totals.savings(),
        income: totals.income,
        expense: totals.expense,
        transaction_count: transactions.len(),
        top_category,
        recent,
    }
}
