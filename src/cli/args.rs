use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::models::MonthKey;

pub const DEFAULT_USER: i64 = 1;

/// Pull `--user <id>` out of the argument list, wherever it appears.
pub fn split_user(args: &[String]) -> Result<(i64, Vec<String>)> {
    let mut user_id = DEFAULT_USER;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--user" {
            let Some(value) = iter.next() else {
                bail!("--user needs an id");
            };
            user_id = value
                .parse()
                .with_context(|| format!("Invalid user id: '{value}'"))?;
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((user_id, rest))
}

pub(crate) fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

pub(crate) fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Arguments that are neither `--flags` nor the value following one of
/// `valued`.
pub(crate) fn positionals<'a>(args: &'a [String], valued: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if valued.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

pub(crate) fn month_or_current(arg: Option<&str>) -> Result<MonthKey> {
    match arg {
        Some(s) => MonthKey::parse(s),
        None => Ok(MonthKey::current()),
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{s}' (expected YYYY-MM-DD)"))
}

/// Days elapsed for a daily average: today's day in the current month, the
/// whole month otherwise.
pub fn day_of_month(month: MonthKey, today: NaiveDate) -> u32 {
    if MonthKey::of(today) == month {
        today.day()
    } else {
        month.days()
    }
}
