use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::time::Duration;

use super::args::{day_of_month, flag_value, has_flag, month_or_current, positionals};
use super::Invocation;
use crate::config::expand_home;
use crate::engine::{
    build_dashboard, compute_budget_statuses, compute_monthly_summary, compute_report_insights,
    format_export_rows, format_share_text, in_month, CategoryLimitPolicy, DAY_LABEL_FORMAT,
};
use crate::export::{format_percent, write_csv_file};
use crate::models::{MonthKey, TransactionRecord};
use crate::store::RecordStore;
use crate::watch::Recompute;

const RECOMPUTE_TIMEOUT: Duration = Duration::from_secs(10);

fn month_snapshot(inv: &Invocation<'_>, month: MonthKey) -> Result<Vec<TransactionRecord>> {
    let all = inv.db.list_transactions(inv.user_id)?;
    Ok(in_month(&all, month))
}

/// Same labels the day aggregation produces.
pub(super) fn day_label(at: NaiveDateTime) -> String {
    at.format(DAY_LABEL_FORMAT).to_string()
}

fn month_from_args(args: &[String]) -> Result<MonthKey> {
    month_or_current(positionals(args, &[]).first().copied())
}

pub(super) fn cli_budgets(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let month = month_from_args(args)?;
    let policy = if has_flag(args, "--fallback") {
        CategoryLimitPolicy::FallbackShare
    } else {
        CategoryLimitPolicy::ExplicitOnly
    };

    let txns = month_snapshot(inv, month)?;
    let budgets = inv.db.list_budgets(inv.user_id)?;
    let preference = inv.db.monthly_preference(inv.user_id)?;
    let statuses = compute_budget_statuses(&txns, &budgets, preference, month, policy);

    if statuses.is_empty() {
        println!("No budgets set for {month}");
        return Ok(());
    }

    println!("Budgets for {month}");
    println!(
        "{:<20} {:>14} {:>14} {:>14} {:>6}",
        "Category", "Spent", "Limit", "Left", "Used"
    );
    println!("{}", "─".repeat(72));
    for status in &statuses {
        let left = if status.is_over {
            format!("-{}", inv.money(status.overage()))
        } else {
            inv.money(status.remaining)
        };
        println!(
            "{:<20} {:>14} {:>14} {:>14} {:>6}{}",
            format!("{} {}", status.icon, status.category_name),
            inv.money(status.spent),
            inv.money(status.limit),
            left,
            format_percent(status.display_percent()),
            if status.is_over { "  OVER" } else { "" },
        );
    }
    Ok(())
}

/// Computed by a recompute worker fed from a snapshot subscription.
pub(super) fn cli_summary(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let month = month_from_args(args)?;
    let preference = inv.db.monthly_preference(inv.user_id)?;

    let snapshots = inv.db.subscribe_transactions(inv.user_id)?;
    let mut job = Recompute::spawn(snapshots, move |txns| {
        let scoped = in_month(txns, month);
        (
            compute_monthly_summary(&scoped, preference),
            build_dashboard(&scoped),
        )
    });
    let result = job.next_timeout(RECOMPUTE_TIMEOUT);
    job.cancel();
    let Some((summary, dashboard)) = result else {
        bail!("Timed out computing summary for {month}");
    };

    println!("SpendSense {month}");
    println!("{}", "─".repeat(40));
    println!("  Income:        {}", inv.money(summary.income));
    println!("  Expense:       {}", inv.money(summary.expense));
    println!("  Savings:       {}", inv.money(summary.savings));
    let source = if preference > rust_decimal::Decimal::ZERO {
        "manual"
    } else {
        "60% of income"
    };
    println!(
        "  Monthly limit: {} ({source})",
        inv.money(summary.effective_limit)
    );
    println!("  Used:          {}", format_percent(summary.display_percent()));
    if summary.is_over {
        println!("  Over by:       {}", inv.money(summary.overage));
    } else {
        println!("  Remaining:     {}", inv.money(summary.remaining));
    }
    println!("  Transactions:  {}", dashboard.transaction_count);
    if let Some(top) = &dashboard.top_category {
        println!(
            "  Top category:  {} {} ({})",
            top.icon,
            top.category_name,
            inv.money(top.amount)
        );
    }

    if !dashboard.recent.is_empty() {
        println!();
        println!("Recent:");
        for txn in &dashboard.recent {
            let sign = if txn.is_income() { "+" } else { "-" };
            println!(
                "  {}  {} {:<18} {sign}{}",
                day_label(txn.occurred_at),
                txn.category_icon,
                txn.category_name,
                inv.money(txn.amount)
            );
        }
    }
    Ok(())
}

pub(super) fn cli_report(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let month = month_from_args(args)?;
    let txns = month_snapshot(inv, month)?;
    let today = chrono::Local::now().date_naive();
    let insights = compute_report_insights(&txns, day_of_month(month, today));

    println!("Report for {month}");
    println!("{}", "─".repeat(40));
    println!("  Income:        {}", inv.money(insights.totals.income));
    println!("  Expense:       {}", inv.money(insights.totals.expense));
    println!("  Savings:       {}", inv.money(insights.totals.savings()));
    println!("  Daily average: {}", inv.money(insights.daily_average));
    println!("  Transactions:  {}", insights.transaction_count);
    if let Some(largest) = &insights.largest_transaction {
        println!(
            "  Largest:       {} {} {} on {}",
            largest.category_icon,
            largest.category_name,
            inv.money(largest.amount),
            day_label(largest.occurred_at)
        );
    }

    if !insights.top_categories.is_empty() {
        println!();
        println!("Top Categories:");
        for cat in &insights.top_categories {
            let share = cat.share_of(insights.totals.expense).round_dp(1);
            println!(
                "  {} {:<18} {:>14}  {share:.1}%",
                cat.icon,
                cat.category_name,
                inv.money(cat.amount)
            );
        }
    }

    if !insights.top_days.is_empty() {
        println!();
        println!("Top Spending Days:");
        for day in &insights.top_days {
            println!("  {:<8} {:>14}", day.label, inv.money(day.amount));
        }
    }
    Ok(())
}

pub(super) fn cli_share(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let month = month_from_args(args)?;
    let txns = month_snapshot(inv, month)?;
    let preference = inv.db.monthly_preference(inv.user_id)?;
    println!(
        "{}",
        format_share_text(&txns, preference, &inv.config.currency_symbol)
    );
    Ok(())
}

pub(super) fn cli_export(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let month = month_or_current(flag_value(args, "--month"))?;
    let output_path = positionals(args, &["--month"])
        .first()
        .map(|p| expand_home(p))
        .unwrap_or_else(|| expand_home(&format!("~/spendsense-export-{month}.csv")));

    let txns = month_snapshot(inv, month)?;
    let table = format_export_rows(&txns);
    if table.is_empty() {
        println!("No expenses for {month}");
        return Ok(());
    }

    let count = write_csv_file(&table, &PathBuf::from(&output_path))?;
    println!("Exported {count} categories to {output_path}");
    Ok(())
}
