use anyhow::{bail, Context, Result};
use chrono::Local;
use rust_decimal::Decimal;

use super::args::{flag_value, has_flag, month_or_current, parse_date, positionals};
use super::Invocation;
use crate::engine::{filter, icon_for, Selection, TransactionFilter};
use crate::export::truncate;
use crate::models::{parse_amount, BudgetLimit, TransactionKind, TransactionRecord};
use crate::store::RecordStore;

pub(super) fn cli_add(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let pos = positionals(args, &["--date"]);
    if pos.len() < 3 {
        bail!("Usage: spendsense add <expense|income> <amount> <category> [description...] [--date YYYY-MM-DD]");
    }

    let kind = TransactionKind::parse(pos[0])?;
    let amount = parse_amount(pos[1])?;
    if amount.is_zero() {
        bail!("Amount must be greater than zero");
    }

    let now = Local::now().naive_local();
    let occurred_at = match flag_value(args, "--date") {
        Some(d) => parse_date(d)?.and_time(now.time()),
        None => now,
    };

    // Catalog entries supply the canonical name and icon; anything else is
    // stored as typed with the table icon.
    let (category_id, name, icon) = match inv.db.find_category(pos[2])? {
        Some(cat) => (cat.id, cat.name, cat.icon),
        None => {
            let name = pos[2].trim().to_string();
            let icon = icon_for(&name).to_string();
            (None, name, icon)
        }
    };

    let mut txn = TransactionRecord::new(inv.user_id, kind, amount, name, icon, occurred_at);
    txn.category_id = category_id;
    txn.description = pos[3..].join(" ");

    let id = inv.db.insert_transaction(&txn)?;
    println!(
        "Added {kind} #{id}: {} {} {}",
        txn.category_icon,
        txn.category_name,
        inv.money(txn.amount)
    );
    Ok(())
}

pub(super) fn cli_delete(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let Some(raw) = args.first() else {
        bail!("Usage: spendsense delete <id>");
    };
    let id: i64 = raw
        .parse()
        .with_context(|| format!("Invalid transaction id: '{raw}'"))?;
    if !inv.db.delete_transaction(inv.user_id, id)? {
        bail!("Transaction {id} not found");
    }
    println!("Deleted transaction #{id}");
    Ok(())
}

pub(super) fn cli_list(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let selection = if has_flag(args, "--income") {
        Selection::Income
    } else if let Some(name) = flag_value(args, "--category") {
        Selection::Category(name.to_string())
    } else {
        Selection::All
    };
    let criteria = TransactionFilter {
        selection,
        search: flag_value(args, "--search").map(str::to_string),
    };

    let all = inv.db.list_transactions(inv.user_id)?;
    let shown = filter(&all, &criteria);
    if shown.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<6} {:<10} {:<18} {:<24} {:>14}",
        "ID", "Date", "Category", "Description", "Amount"
    );
    println!("{}", "─".repeat(76));
    for txn in &shown {
        let signed = if txn.is_income() {
            txn.amount
        } else {
            -txn.amount
        };
        println!(
            "{:<6} {:<10} {:<18} {:<24} {:>14}",
            txn.id.unwrap_or(0),
            txn.occurred_at.format("%Y-%m-%d"),
            truncate(&format!("{} {}", txn.category_icon, txn.category_name), 18),
            truncate(&txn.description, 24),
            inv.money(signed),
        );
    }
    println!();
    println!("{} of {} transactions", shown.len(), all.len());
    Ok(())
}

pub(super) fn cli_budget(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let pos = positionals(args, &["--month"]);
    if pos.len() < 2 {
        bail!("Usage: spendsense budget <category> <limit> [--month YYYY-MM]");
    }
    let month = month_or_current(flag_value(args, "--month"))?;
    let limit = parse_amount(pos[1])?;
    let category_name = match inv.db.find_category(pos[0])? {
        Some(cat) => cat.name,
        None => pos[0].trim().to_string(),
    };

    let budget = BudgetLimit::new(inv.user_id, category_name, limit, month);
    inv.db.upsert_budget(&budget)?;
    if budget.is_active() {
        println!(
            "Budget for {} set to {} ({month})",
            budget.category_name,
            inv.money(limit)
        );
    } else {
        println!("Budget for {} cleared", budget.category_name);
    }
    Ok(())
}

pub(super) fn cli_monthly_limit(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let Some(raw) = args.first() else {
        bail!("Usage: spendsense monthly-limit <amount>");
    };
    let limit = parse_amount(raw)?;
    inv.db.set_monthly_preference(inv.user_id, limit)?;
    if limit > Decimal::ZERO {
        println!("Monthly limit set to {}", inv.money(limit));
    } else {
        println!("Monthly limit cleared; using 60% of income");
    }
    Ok(())
}

pub(super) fn cli_categories(args: &[String], inv: &mut Invocation<'_>) -> Result<()> {
    let kind = args.first().map(|k| TransactionKind::parse(k)).transpose()?;
    let categories = inv.db.get_categories(kind)?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }
    for cat in &categories {
        println!("{:<24} {}", cat.to_string(), cat.kind);
    }
    Ok(())
}
