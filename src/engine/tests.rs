#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{BudgetLimit, MonthKey, TransactionKind, TransactionRecord};

fn march() -> MonthKey {
    MonthKey::parse("2024-03").unwrap()
}

fn record(kind: TransactionKind, category: &str, amount: Decimal, day: u32) -> TransactionRecord {
    TransactionRecord::new(
        7,
        kind,
        amount,
        category.into(),
        icon_for(category).into(),
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap(),
    )
}

fn scenario() -> Vec<TransactionRecord> {
    vec![
        record(TransactionKind::Expense, "Food", dec!(500), 3),
        record(TransactionKind::Expense, "Food", dec!(300), 4),
        record(TransactionKind::Income, "Salary", dec!(2000), 1),
    ]
}

// ── compute_monthly_summary ───────────────────────────────────

#[test]
fn test_summary_uses_income_default() {
    let s = compute_monthly_summary(&scenario(), Decimal::ZERO);
    assert_eq!(s.income, dec!(2000));
    assert_eq!(s.expense, dec!(800));
    assert_eq!(s.savings, dec!(1200));
    assert_eq!(s.effective_limit, dec!(1200));
    assert_eq!(s.remaining, dec!(400));
    assert!(!s.is_over);
}

#[test]
fn test_summary_manual_override() {
    let s = compute_monthly_summary(&scenario(), dec!(700));
    assert_eq!(s.effective_limit, dec!(700));
    assert!(s.is_over);
    assert_eq!(s.overage, dec!(100));
}

#[test]
fn test_summary_no_income_no_manual() {
    let s = compute_monthly_summary(&[], Decimal::ZERO);
    assert_eq!(s.effective_limit, Decimal::ZERO);
    assert_eq!(s.percent_used, Decimal::ZERO);
    assert_eq!(s.display_percent(), Decimal::ZERO);
}

// ── compute_budget_statuses ───────────────────────────────────

#[test]
fn test_statuses_for_budgeted_category() {
    let budgets = vec![BudgetLimit::new(7, "Food".into(), dec!(600), march())];
    let statuses = compute_budget_statuses(
        &scenario(),
        &budgets,
        Decimal::ZERO,
        march(),
        CategoryLimitPolicy::ExplicitOnly,
    );
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].spent, dec!(800));
    assert_eq!(statuses[0].remaining, dec!(-200));
    assert!(statuses[0].is_over);
}

#[test]
fn test_statuses_empty_without_budgets() {
    let statuses = compute_budget_statuses(
        &scenario(),
        &[],
        Decimal::ZERO,
        march(),
        CategoryLimitPolicy::ExplicitOnly,
    );
    assert!(statuses.is_empty());
}

#[test]
fn test_statuses_fallback_mode_lists_spending_categories() {
    let statuses = compute_budget_statuses(
        &scenario(),
        &[],
        Decimal::ZERO,
        march(),
        CategoryLimitPolicy::FallbackShare,
    );
    assert_eq!(statuses.len(), 1);
    // 20% of the 60%-of-income default
    assert_eq!(statuses[0].limit, dec!(240));
    assert!(statuses[0].is_over);
}

// ── compute_report_insights ───────────────────────────────────

#[test]
fn test_insights_facade() {
    let r = compute_report_insights(&scenario(), 4);
    assert_eq!(r.totals.savings(), dec!(1200));
    assert_eq!(r.daily_average, dec!(200));
    assert_eq!(r.top_categories.len(), 1);
    assert_eq!(r.top_days.len(), 2);
}

// ── formatting ────────────────────────────────────────────────

#[test]
fn test_export_rows_agree_with_totals() {
    let mut txns = scenario();
    txns.push(record(TransactionKind::Expense, "Bills", dec!(99.95), 5));
    txns.push(record(TransactionKind::Expense, "Pets", dec!(0.05), 5));
    let table = format_export_rows(&txns);
    assert_eq!(table.total, totals(&txns).expense);
    let row_sum: Decimal = table.rows.iter().map(|r| r.amount).sum();
    assert_eq!(row_sum, table.total);
}

#[test]
fn test_share_text_uses_summary_values() {
    let text = format_share_text(&scenario(), Decimal::ZERO, "₹");
    assert!(text.starts_with("📊 SpendSense Report"));
    assert!(text.contains("Income: ₹2,000.00"));
    assert!(text.contains("Expense: ₹800.00"));
    assert!(text.contains("Savings: ₹1,200.00"));
    assert!(text.contains("Food: ₹800.00"));
}

#[test]
fn test_summary_with_huge_expense_does_not_panic() {
    let txns = vec![record(
        TransactionKind::Expense,
        "Bills",
        Decimal::MAX / Decimal::TEN,
        2,
    )];
    let s = compute_monthly_summary(&txns, Decimal::ONE);
    assert!(s.is_over);
    assert_eq!(s.percent_used, Decimal::MAX);
    assert_eq!(s.display_percent(), dec!(100));
}

#[test]
fn test_export_total_saturates() {
    let txns = vec![
        record(TransactionKind::Expense, "Bills", Decimal::MAX, 2),
        record(TransactionKind::Expense, "Food", Decimal::MAX, 2),
    ];
    let table = format_export_rows(&txns);
    assert_eq!(table.total, Decimal::MAX);
    assert_eq!(table.total, totals(&txns).expense);
}
