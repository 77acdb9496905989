use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::engine::aggregate::CategorySpend;
use crate::engine::icons::icon_for;

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category_name: String,
    pub icon: String,
    pub limit: Decimal,
    pub spent: Decimal,
    /// `limit - spent`; negative once over budget.
    pub remaining: Decimal,
    /// Unclamped; can exceed 100.
    pub percent_used: Decimal,
    pub is_over: bool,
}

impl BudgetStatus {
    pub fn display_percent(&self) -> Decimal {
        clamp_percent(self.percent_used)
    }

    /// How far past the limit spending is, 0 when within budget.
    pub fn overage(&self) -> Decimal {
        if self.is_over {
            self.remaining.abs()
        } else {
            Decimal::ZERO
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
    pub effective_limit: Decimal,
    /// Never negative; see `overage` when `is_over`.
    pub remaining: Decimal,
    pub overage: Decimal,
    pub percent_used: Decimal,
    pub is_over: bool,
}

impl MonthlySummary {
    pub fn display_percent(&self) -> Decimal {
        clamp_percent(self.percent_used)
    }
}

/// `part / whole × 100`; 0 when `whole` is not positive, `Decimal::MAX` when
/// the ratio leaves the representable range.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

pub(crate) fn clamp_percent(raw: Decimal) -> Decimal {
    raw.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// One status per budgeted category, in name order. Categories with spending
/// but no limit are left out.
pub fn build_status(
    category_limits: &BTreeMap<String, Decimal>,
    category_spend: &[CategorySpend],
) -> Vec<BudgetStatus> {
    category_limits
        .iter()
        .map(|(name, &limit)| {
            let spend = category_spend.iter().find(|s| &s.category_name == name);
            let spent = spend.map(|s| s.amount).unwrap_or(Decimal::ZERO);
            let icon = spend
                .map(|s| s.icon.clone())
                .unwrap_or_else(|| icon_for(name).to_string());
            let remaining = limit.saturating_sub(spent);
            BudgetStatus {
                category_name: name.clone(),
                icon,
                limit,
                spent,
                remaining,
                percent_used: percent_of(spent, limit),
                is_over: remaining < Decimal::ZERO,
            }
        })
        .collect()
}

pub fn build_monthly_summary(
    effective_limit: Decimal,
    expense: Decimal,
    income: Decimal,
) -> MonthlySummary {
    let remaining = effective_limit.saturating_sub(expense);
    let is_over = remaining < Decimal::ZERO;
    MonthlySummary {
        income,
        expense,
        savings: income.saturating_sub(expense),
        effective_limit,
        remaining: if is_over { Decimal::ZERO } else { remaining },
        overage: if is_over { remaining.abs() } else { Decimal::ZERO },
        percent_used: percent_of(expense, effective_limit),
        is_over,
    }
}
