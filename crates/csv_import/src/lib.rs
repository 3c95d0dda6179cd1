//! CSV import pipeline for historical sales: parse loosely-structured
//! spreadsheet exports, normalize locale-specific price/date cells, map each
//! row to a canonical [`Sale`] and persist it through a [`SaleRepository`].
//!
//! The contract is best effort, full report: one malformed row never aborts
//! a multi-hundred-row import. Rows are processed strictly in file order
//! with one outstanding write, so the row numbers in error messages always
//! match the source file as a spreadsheet user would count it.

pub mod mapper;
pub mod normalize;
pub mod parser;

pub use mapper::row_to_sale;
pub use normalize::{categorize, parse_date, parse_price};
pub use parser::parse_csv;

use std::path::Path;

use models::{ImportReport, Sale};
use sales_store::SaleRepository;

fn is_valid(sale: &Sale) -> bool {
    !sale.customer_name.is_empty() && !sale.cake.is_empty() && sale.quantity > 0 && sale.price > 0.0
}

/// Import sales from raw CSV text.
///
/// Each parsed row is mapped, validated and written sequentially; failures
/// are recorded per row and never thrown past this boundary. Reported row
/// numbers are 1-based and account for the header line, so the first data
/// row is "Row 2".
pub async fn import_sales_from_csv(repo: &dyn SaleRepository, csv_text: &str) -> ImportReport {
    let mut report = ImportReport::default();
    let rows = parse_csv(csv_text);

    for (i, row) in rows.iter().enumerate() {
        let row_number = i + 2;
        let sale = row_to_sale(row);

        if !is_valid(&sale) {
            report.failed += 1;
            report.errors.push(format!(
                "Row {}: Invalid data - missing required fields",
                row_number
            ));
            continue;
        }

        match repo.create(&sale).await {
            Ok(_) => report.success += 1,
            Err(e) => {
                tracing::warn!("row {} rejected by store: {}", row_number, e);
                report.failed += 1;
                report
                    .errors
                    .push(format!("Row {}: Failed to add sale - {}", row_number, e));
            }
        }
    }

    report
}

/// Import sales from a CSV file: decode the file's text content, then
/// delegate to [`import_sales_from_csv`]. An unreadable file degrades to a
/// report with a single summary error instead of failing the call.
pub async fn import_sales_from_file(repo: &dyn SaleRepository, path: &Path) -> ImportReport {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => import_sales_from_csv(repo, &text).await,
        Err(e) => {
            let mut report = ImportReport::default();
            report.errors.push(format!("CSV parsing error: {}", e));
            report
        }
    }
}
