use std::collections::HashMap;

use models::Sale;

use crate::normalize::{parse_date, parse_price};

/// Return the first candidate header with a non-empty value. Source files
/// vary between capitalized and lowercase header names, so every lookup
/// carries both forms in priority order; an empty cell falls through to the
/// next candidate.
fn field<'a>(row: &'a HashMap<String, String>, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|key| row.get(*key).map(String::as_str).filter(|v| !v.is_empty()))
}

fn text_field(row: &HashMap<String, String>, candidates: &[&str], default: &str) -> String {
    field(row, candidates).unwrap_or(default).to_string()
}

/// Assemble a best-effort Sale from one parsed CSV row, applying the field
/// normalizers and per-field defaults. Never fails; correctness checks
/// (required fields, positive amounts) belong to the import loop.
pub fn row_to_sale(row: &HashMap<String, String>) -> Sale {
    Sale {
        date: parse_date(field(row, &["Date", "date"]).unwrap_or("")),
        customer_name: text_field(row, &["Name", "name", "Customer Name", "customer name"], ""),
        contact: text_field(row, &["Contact", "contact"], ""),
        cake: text_field(row, &["Cake", "cake"], ""),
        size: text_field(row, &["Size", "size"], "10cm"),
        // Unlike price, a missing or unparseable quantity defaults to 1 so
        // the row is not auto-rejected downstream.
        quantity: field(row, &["Quantity", "quantity"])
            .and_then(|q| q.trim().parse().ok())
            .unwrap_or(1),
        order_type: text_field(row, &["Order type", "order type"], "Pickup"),
        // No dedicated pickup-date column falls back to the order date
        pickup_date: parse_date(
            field(row, &["Date of Pickup", "date of pickup", "Date", "date"]).unwrap_or(""),
        ),
        pickup_time: text_field(row, &["Time of Pickup", "time of pickup"], ""),
        price: parse_price(field(row, &["Price", "price"]).unwrap_or("")),
        payment: text_field(row, &["Payment", "payment"], "Pending"),
        preparation: text_field(row, &["Preparation", "preparation"], "Pending"),
        delivery: text_field(row, &["Delivery", "delivery"], "Pending"),
        address: text_field(row, &["Address", "address"], ""),
    }
}
