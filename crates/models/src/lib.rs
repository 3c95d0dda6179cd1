use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Field names are serialized camelCase so the persisted documents keep the
// shape of the existing sales data.

/// One customer order as entered through the admin form or the CSV importer.
///
/// Dates stay as `YYYY-MM-DD` strings: the normalizer always produces that
/// form, and records loaded from older exports must round-trip untouched.
/// The three status fields are independent stage trackers; transitions are
/// free-form, so they are plain strings rather than a state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Order date, `YYYY-MM-DD`.
    pub date: String,
    pub customer_name: String,
    #[serde(default)]
    pub contact: String,
    /// Product name; also doubles as the category in the raw aggregation.
    pub cake: String,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default = "default_order_type")]
    pub order_type: String,
    /// Pickup date, `YYYY-MM-DD`; falls back to the order date on import.
    pub pickup_date: String,
    #[serde(default)]
    pub pickup_time: String,
    /// Total price for the order (not per unit), in Rupiah.
    pub price: f64,
    #[serde(default = "default_status")]
    pub payment: String,
    #[serde(default = "default_status")]
    pub preparation: String,
    #[serde(default = "default_status")]
    pub delivery: String,
    /// Required only for delivery orders.
    #[serde(default)]
    pub address: String,
}

fn default_size() -> String {
    "10cm".to_string()
}

fn default_quantity() -> i64 {
    1
}

fn default_order_type() -> String {
    "Pickup".to_string()
}

fn default_status() -> String {
    "Pending".to_string()
}

/// A persisted sale. The id and timestamps are assigned by the store on
/// create; `created_at` is immutable, `updated_at` is refreshed on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    #[serde(flatten)]
    pub sale: Sale,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

/// Outcome of one CSV import call: counts plus one message per failed row,
/// in file order. Built incrementally, never mutated after the call returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// One `YYYY-MM` bucket of the monthly sales series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Human-readable month, e.g. `Nov 2024`.
    pub label: String,
    pub total: f64,
    pub count: usize,
}

/// One bucket of the keyword-category aggregation variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub total: f64,
    pub count: usize,
}

/// Derived dashboard aggregates. Never persisted; recomputed from the full
/// sale collection on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub average_order_value: f64,
    /// Keyed `YYYY-MM`, ascending.
    pub by_month: BTreeMap<String, MonthBucket>,
    /// Keyed by the literal cake name, summed price.
    pub by_category: BTreeMap<String, f64>,
}
