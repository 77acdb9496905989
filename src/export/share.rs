use crate::engine::{CategorySpend, MonthlySummary};
use crate::export::format::format_amount;
use crate::engine::TOP_N;

pub const REPORT_TITLE: &str = "📊 SpendSense Report";

/// Plain-text report for sharing. Only formats what it is given; totals come
/// from the same summary the on-screen report shows.
pub fn build_share_text(
    summary: &MonthlySummary,
    top_categories: &[CategorySpend],
    symbol: &str,
) -> String {
    let mut lines = vec![
        REPORT_TITLE.to_string(),
        format!("Income: {}", format_amount(summary.income, symbol)),
        format!("Expense: {}", format_amount(summary.expense, symbol)),
        format!("Savings: {}", format_amount(summary.savings, symbol)),
    ];

    if !top_categories.is_empty() {
        lines.push(String::new());
        lines.push("Top Categories:".to_string());
        for cat in top_categories.iter().take(TOP_N) {
            lines.push(format!(
                "{} {}: {}",
                cat.icon,
                cat.category_name,
                format_amount(cat.amount, symbol)
            ));
        }
    }

    lines.join("\n")
}
