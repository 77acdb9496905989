use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::engine::aggregate::CategorySpend;
use crate::models::{BudgetLimit, MonthKey};

/// Share of income budgeted when the user has not set a monthly limit.
pub const DEFAULT_INCOME_SHARE: Decimal = Decimal::from_parts(60, 0, 0, false, 2);

/// Share of the monthly limit given to unbudgeted categories under
/// [`CategoryLimitPolicy::FallbackShare`].
pub const FALLBACK_CATEGORY_SHARE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// How categories without an explicit budget are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryLimitPolicy {
    /// Only explicitly budgeted categories get a limit.
    #[default]
    ExplicitOnly,
    /// Every category with spending gets a limit; unbudgeted ones receive
    /// [`FALLBACK_CATEGORY_SHARE`] of the effective monthly limit.
    FallbackShare,
}

/// Effective monthly ceiling: a manual override wins, then 60% of income, else 0.
pub fn resolve_monthly_limit(manual_limit: Decimal, total_income: Decimal) -> Decimal {
    if manual_limit > Decimal::ZERO {
        manual_limit
    } else if total_income > Decimal::ZERO {
        total_income.saturating_mul(DEFAULT_INCOME_SHARE)
    } else {
        Decimal::ZERO
    }
}

/// Explicit limit for `category_name` in `month`, if one is active.
///
/// Among duplicates the most recently created one wins.
pub fn resolve_category_limit(
    category_name: &str,
    budgets: &[BudgetLimit],
    month: MonthKey,
) -> Option<Decimal> {
    budgets
        .iter()
        .filter(|b| b.category_name == category_name && b.month == month)
        .max_by_key(|b| b.created_at)
        .filter(|b| b.is_active())
        .map(|b| b.limit)
}

/// Limit per category for `month` under `policy`.
pub fn category_limits(
    budgets: &[BudgetLimit],
    month: MonthKey,
    policy: CategoryLimitPolicy,
    effective_monthly_limit: Decimal,
    spend: &[CategorySpend],
) -> BTreeMap<String, Decimal> {
    let mut limits = BTreeMap::new();
    for budget in budgets.iter().filter(|b| b.month == month) {
        if limits.contains_key(&budget.category_name) {
            continue;
        }
        if let Some(limit) = resolve_category_limit(&budget.category_name, budgets, month) {
            limits.insert(budget.category_name.clone(), limit);
        }
    }

    if policy == CategoryLimitPolicy::FallbackShare {
        let share = effective_monthly_limit.saturating_mul(FALLBACK_CATEGORY_SHARE);
        if share > Decimal::ZERO {
            for entry in spend {
                limits
                    .entry(entry.category_name.clone())
                    .or_insert(share);
            }
        }
    }

    tracing::debug!(
        month = %month,
        ?policy,
        categories = limits.len(),
        "resolved category limits"
    );
    limits
}
