#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use super::*;

fn spend(category: &str, icon: &str, amount: Decimal) -> CategorySpend {
    CategorySpend {
        category_name: category.into(),
        icon: icon.into(),
        amount,
    }
}

fn limits(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
    entries
        .iter()
        .map(|(name, limit)| (name.to_string(), *limit))
        .collect()
}

// ── build_status ──────────────────────────────────────────────

#[test]
fn test_over_budget_category() {
    let statuses = build_status(
        &limits(&[("Food", dec!(600))]),
        &[spend("Food", "🍔", dec!(800))],
    );
    assert_eq!(statuses.len(), 1);
    let s = &statuses[0];
    assert_eq!(s.limit, dec!(600));
    assert_eq!(s.spent, dec!(800));
    assert_eq!(s.remaining, dec!(-200));
    assert!(s.is_over);
    assert_eq!(s.overage(), dec!(200));
    assert!(s.percent_used > dec!(100));
    assert_eq!(s.display_percent(), dec!(100));
}

#[test]
fn test_within_budget_category() {
    let statuses = build_status(
        &limits(&[("Food", dec!(1000))]),
        &[spend("Food", "🍔", dec!(250))],
    );
    let s = &statuses[0];
    assert_eq!(s.remaining, dec!(750));
    assert_eq!(s.percent_used, dec!(25));
    assert!(!s.is_over);
    assert_eq!(s.overage(), Decimal::ZERO);
}

#[test]
fn test_exactly_at_limit_is_not_over() {
    let statuses = build_status(
        &limits(&[("Bills", dec!(100))]),
        &[spend("Bills", "📄", dec!(100))],
    );
    assert!(!statuses[0].is_over);
    assert_eq!(statuses[0].remaining, Decimal::ZERO);
    assert_eq!(statuses[0].display_percent(), dec!(100));
}

#[test]
fn test_no_budgets_means_empty_listing() {
    let statuses = build_status(&BTreeMap::new(), &[spend("Food", "🍔", dec!(800))]);
    assert!(statuses.is_empty());
}

#[test]
fn test_unbudgeted_spending_excluded() {
    let statuses = build_status(
        &limits(&[("Food", dec!(600))]),
        &[
            spend("Food", "🍔", dec!(100)),
            spend("Shopping", "🛍️", dec!(900)),
        ],
    );
    assert_eq!(statuses.len(), 1);
    assert!(statuses.iter().all(|s| s.category_name != "Shopping"));
}

#[test]
fn test_budget_without_spending_uses_resolver_icon() {
    let statuses = build_status(&limits(&[("Health", dec!(200))]), &[]);
    let s = &statuses[0];
    assert_eq!(s.spent, Decimal::ZERO);
    assert_eq!(s.icon, "💊");
    assert_eq!(s.remaining, dec!(200));
    assert_eq!(s.percent_used, Decimal::ZERO);
}

#[test]
fn test_unknown_category_gets_default_icon() {
    let statuses = build_status(&limits(&[("Pets", dec!(50))]), &[]);
    assert_eq!(statuses[0].icon, DEFAULT_ICON);
}

#[test]
fn test_icon_from_spending_preferred() {
    let statuses = build_status(
        &limits(&[("Food", dec!(50))]),
        &[spend("Food", "🥗", dec!(10))],
    );
    assert_eq!(statuses[0].icon, "🥗");
}

#[test]
fn test_statuses_in_name_order() {
    let statuses = build_status(
        &limits(&[("Transport", dec!(50)), ("Bills", dec!(50)), ("Food", dec!(50))]),
        &[],
    );
    let names: Vec<&str> = statuses.iter().map(|s| s.category_name.as_str()).collect();
    assert_eq!(names, vec!["Bills", "Food", "Transport"]);
}

// ── build_monthly_summary ─────────────────────────────────────

#[test]
fn test_summary_within_limit() {
    let s = build_monthly_summary(dec!(1200), dec!(800), dec!(2000));
    assert_eq!(s.savings, dec!(1200));
    assert_eq!(s.remaining, dec!(400));
    assert_eq!(s.overage, Decimal::ZERO);
    assert!(!s.is_over);
    assert_eq!(s.display_percent().trunc(), dec!(66));
}

#[test]
fn test_summary_over_limit_hides_negative_remaining() {
    let s = build_monthly_summary(dec!(500), dec!(800), dec!(0));
    assert!(s.is_over);
    assert_eq!(s.remaining, Decimal::ZERO);
    assert_eq!(s.overage, dec!(300));
    assert_eq!(s.percent_used, dec!(160));
    assert_eq!(s.display_percent(), dec!(100));
    assert_eq!(s.savings, dec!(-800));
}

#[test]
fn test_summary_zero_limit_zero_percent() {
    let s = build_monthly_summary(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
    assert_eq!(s.percent_used, Decimal::ZERO);
    assert!(!s.is_over);
}

#[test]
fn test_summary_zero_limit_with_spending_is_over() {
    let s = build_monthly_summary(Decimal::ZERO, dec!(10), Decimal::ZERO);
    assert_eq!(s.percent_used, Decimal::ZERO);
    assert!(s.is_over);
    assert_eq!(s.overage, dec!(10));
}

// ── Range limits ──────────────────────────────────────────────

#[test]
fn test_status_percent_saturates_for_tiny_limit() {
    let huge = Decimal::MAX / Decimal::TEN;
    let statuses = build_status(
        &limits(&[("Food", dec!(0.01))]),
        &[spend("Food", "🍔", huge)],
    );
    let s = &statuses[0];
    assert_eq!(s.percent_used, Decimal::MAX);
    assert_eq!(s.display_percent(), dec!(100));
    assert!(s.is_over);
    assert!(s.remaining < Decimal::ZERO);
}

#[test]
fn test_summary_percent_saturates_for_tiny_limit() {
    let huge = Decimal::MAX / Decimal::TEN;
    let summary = build_monthly_summary(Decimal::ONE, huge, Decimal::ZERO);
    assert_eq!(summary.percent_used, Decimal::MAX);
    assert!(summary.is_over);
    assert_eq!(summary.overage, huge - Decimal::ONE);
}
