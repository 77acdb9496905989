//! Presentation-ready text and table builders over already-computed engine
//! output. Nothing here sums transactions on its own.

mod format;
mod share;
mod table;

pub use format::{format_amount, format_percent, truncate};
pub use share::{build_share_text, REPORT_TITLE};
pub use table::{build_export_table, write_csv, write_csv_file, ExportRow, ExportTable};
