use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;

use crate::engine::{sort_by_amount, CategorySpend};

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub category: String,
    pub icon: String,
    pub amount: Decimal,
    pub share_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub rows: Vec<ExportRow>,
    /// Sum of `rows`, which equals total expense for the same snapshot.
    pub total: Decimal,
}

impl ExportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Category breakdown rows, largest first.
pub fn build_export_table(category_spend: &[CategorySpend]) -> ExportTable {
    let mut spend = category_spend.to_vec();
    sort_by_amount(&mut spend);
    let total = spend
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.amount));
    let rows = spend
        .iter()
        .map(|s| ExportRow {
            category: s.category_name.clone(),
            icon: s.icon.clone(),
            amount: s.amount,
            share_percent: s.share_of(total).round_dp(1),
        })
        .collect();
    ExportTable { rows, total }
}

/// Write the table as CSV. Returns the number of data rows written.
pub fn write_csv<W: Write>(table: &ExportTable, writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Category", "Amount", "Share"])
        .context("Failed to write CSV header")?;
    for row in &table.rows {
        wtr.write_record([
            row.category.clone(),
            format!("{:.2}", row.amount),
            format!("{:.1}", row.share_percent),
        ])
        .context("Failed to write CSV row")?;
    }
    wtr.write_record(["Total".to_string(), format!("{:.2}", table.total), String::new()])
        .context("Failed to write CSV total")?;
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(table.rows.len())
}

pub fn write_csv_file(table: &ExportTable, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(table, file)?;
    tracing::info!(rows = count, path = %path.display(), "exported category breakdown");
    Ok(count)
}
