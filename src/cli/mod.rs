mod args;
mod records;
mod reports;

use anyhow::Result;

use crate::config::Config;
use crate::db::Database;

pub use args::{day_of_month, split_user, DEFAULT_USER};

/// One command's worth of context. The user is always explicit.
pub(crate) struct Invocation<'a> {
    pub(crate) db: &'a mut Database,
    pub(crate) config: &'a Config,
    pub(crate) user_id: i64,
}

impl Invocation<'_> {
    fn money(&self, amount: rust_decimal::Decimal) -> String {
        crate::export::format_amount(amount, &self.config.currency_symbol)
    }
}

/// Dispatch a command line (program name already stripped).
pub fn run(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let (user_id, args) = split_user(args)?;
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    let rest = &args[1..];
    tracing::debug!(command = %command, user_id, "dispatching");

    let mut inv = Invocation {
        db,
        config,
        user_id,
    };
    match command.as_str() {
        "add" | "a" => records::cli_add(rest, &mut inv),
        "delete" | "rm" => records::cli_delete(rest, &mut inv),
        "list" | "ls" => records::cli_list(rest, &mut inv),
        "budget" => records::cli_budget(rest, &mut inv),
        "monthly-limit" => records::cli_monthly_limit(rest, &mut inv),
        "categories" => records::cli_categories(rest, &mut inv),
        "budgets" => reports::cli_budgets(rest, &mut inv),
        "summary" | "s" => reports::cli_summary(rest, &mut inv),
        "report" => reports::cli_report(rest, &mut inv),
        "share" => reports::cli_share(rest, &mut inv),
        "export" => reports::cli_export(rest, &mut inv),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!(
                "spendsense {} (schema v{})",
                env!("CARGO_PKG_VERSION"),
                inv.db.schema_version()?
            );
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendSense - budgets and spending reports");
    println!();
    println!("Usage: spendsense [--user <id>] <command>");
    println!();
    println!("Commands:");
    println!("  add <expense|income> <amount> <category> [description...]");
    println!("    --date <YYYY-MM-DD>           When it happened (default: now)");
    println!("  delete <id>                     Delete a transaction");
    println!("  list                            List transactions, newest first");
    println!("    --income                      Only income");
    println!("    --category <name>             Only one category");
    println!("    --search <text>               Match description or category");
    println!("  budget <category> <limit>       Set a category limit (0 clears it)");
    println!("    --month <YYYY-MM>             Month the limit applies to (default: current)");
    println!("  monthly-limit <amount>          Set the monthly limit (0 = 60% of income)");
    println!("  budgets [YYYY-MM]               Category budget status");
    println!("    --fallback                    Give unbudgeted categories 20% of the monthly limit");
    println!("  summary [YYYY-MM]               Monthly totals and limit usage");
    println!("  report [YYYY-MM]                Insights: averages, top categories and days");
    println!("  share [YYYY-MM]                 Plain-text report for sharing");
    println!("  export [path]                   Export category spending to CSV");
    println!("    --month <YYYY-MM>             Month to export (default: current)");
    println!("  categories [expense|income]     List the category catalog");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
    println!();
    println!("Global:");
    println!("  --user <id>                     Whose records to use (default: {DEFAULT_USER})");
}
