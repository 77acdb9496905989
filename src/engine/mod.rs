//! Budget and reporting aggregation.
//!
//! Every function here is a pure function of the snapshot it is handed: no
//! state survives between calls, and nothing reads ambient session data. The
//! caller supplies the user's transactions, budgets and monthly preference.

mod aggregate;
mod budget;
mod icons;
mod report;
mod status;

use rust_decimal::Decimal;

use crate::export::{self, ExportTable};
use crate::models::{BudgetLimit, MonthKey, TransactionRecord};

pub use aggregate::{
    aggregate_by_category, aggregate_by_day, filter, in_month, sort_by_amount, totals,
    CategorySpend, DaySpend, Selection, Totals, TransactionFilter, DAY_LABEL_FORMAT,
};
pub use budget::{
    category_limits, resolve_category_limit, resolve_monthly_limit, CategoryLimitPolicy,
    DEFAULT_INCOME_SHARE, FALLBACK_CATEGORY_SHARE,
};
pub use icons::{icon_for, DEFAULT_ICON};
pub use report::{
    build_dashboard, build_insights, DashboardStats, ReportInsights, RECENT_N, TOP_N,
};
pub use status::{build_monthly_summary, build_status, BudgetStatus, MonthlySummary};

/// Overall budget position for the snapshot.
pub fn compute_monthly_summary(
    transactions: &[TransactionRecord],
    monthly_preference: Decimal,
) -> MonthlySummary {
    let totals = totals(transactions);
    let limit = resolve_monthly_limit(monthly_preference, totals.income);
    tracing::debug!(
        transactions = transactions.len(),
        limit = %limit,
        "computing monthly summary"
    );
    build_monthly_summary(limit, totals.expense, totals.income)
}

/// Per-category budget status for `month`.
pub fn compute_budget_statuses(
    transactions: &[TransactionRecord],
    budgets: &[BudgetLimit],
    monthly_preference: Decimal,
    month: MonthKey,
    policy: CategoryLimitPolicy,
) -> Vec<BudgetStatus> {
    let totals = totals(transactions);
    let effective = resolve_monthly_limit(monthly_preference, totals.income);
    let spend = aggregate_by_category(transactions);
    let limits = category_limits(budgets, month, policy, effective, &spend);
    build_status(&limits, &spend)
}

pub fn compute_report_insights(
    transactions: &[TransactionRecord],
    day_of_month: u32,
) -> ReportInsights {
    build_insights(transactions, day_of_month)
}

/// Share text for the snapshot; summary and top categories come from the same
/// computations the on-screen report uses.
pub fn format_share_text(
    transactions: &[TransactionRecord],
    monthly_preference: Decimal,
    symbol: &str,
) -> String {
    let summary = compute_monthly_summary(transactions, monthly_preference);
    let mut top = aggregate_by_category(transactions);
    sort_by_amount(&mut top);
    top.truncate(TOP_N);
    export::build_share_text(&summary, &top, symbol)
}

pub fn format_export_rows(transactions: &[TransactionRecord]) -> ExportTable {
    export::build_export_table(&aggregate_by_category(transactions))
}




#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;

#[cfg(test)]
mod tests;
