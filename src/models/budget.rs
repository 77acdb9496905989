use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// A `YYYY-MM` budgeting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Month out of range: {month}");
        }
        if !(0..=9999).contains(&year) {
            bail!("Year out of range: {year}");
        }
        Ok(Self { year, month })
    }

    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some((y, m)) = s.split_once('-') else {
            bail!("Invalid month '{s}' (expected YYYY-MM)");
        };
        if y.len() != 4 || m.len() != 2 {
            bail!("Invalid month '{s}' (expected YYYY-MM)");
        }
        let (Ok(year), Ok(month)) = (y.parse::<i32>(), m.parse::<u32>()) else {
            bail!("Invalid month '{s}' (expected YYYY-MM)");
        };
        Self::new(year, month)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at.year() == self.year && at.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of calendar days in the period.
    pub fn days(&self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match (self.first_day(), next) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            _ => 0,
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A user-declared spending cap for one category in one month.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLimit {
    pub id: Option<i64>,
    pub user_id: i64,
    pub category_name: String,
    pub limit: Decimal,
    pub month: MonthKey,
    pub created_at: NaiveDateTime,
}

impl BudgetLimit {
    pub fn new(user_id: i64, category_name: String, limit: Decimal, month: MonthKey) -> Self {
        Self {
            id: None,
            user_id,
            category_name,
            limit,
            month,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    /// A limit of zero or less counts as no limit at all.
    pub fn is_active(&self) -> bool {
        self.limit > Decimal::ZERO
    }
}
