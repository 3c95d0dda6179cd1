//! Dashboard aggregation over the full sale collection. Pure folds, no
//! caching: every summary is recomputed from scratch on each call, and
//! totals are independent of input order.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use csv_import::categorize;
use models::{AnalyticsSummary, CategoryBucket, MonthBucket, SaleRecord};

/// Price with non-finite values treated as zero, so one corrupted record
/// cannot poison the revenue totals.
fn price_of(record: &SaleRecord) -> f64 {
    let price = record.sale.price;
    if price.is_finite() { price } else { 0.0 }
}

/// Fold a sale collection into revenue totals, the monthly series and the
/// per-product breakdown.
///
/// `by_month` is keyed `YYYY-MM` (ascending); sales whose order date does
/// not parse still count toward revenue and order totals but produce no
/// month bucket. `by_category` groups by the literal cake name — the
/// keyword-derived grouping is a separate scheme, exposed through
/// [`summarize_by_keyword_category`], never merged into this one.
pub fn summarize(sales: &[SaleRecord]) -> AnalyticsSummary {
    let total_revenue: f64 = sales.iter().map(price_of).sum();
    let total_orders = sales.len();
    let average_order_value = if total_orders > 0 {
        total_revenue / total_orders as f64
    } else {
        0.0
    };

    let mut by_month: BTreeMap<String, MonthBucket> = BTreeMap::new();
    for record in sales {
        let Ok(date) = NaiveDate::parse_from_str(&record.sale.date, "%Y-%m-%d") else {
            continue;
        };
        let bucket = by_month
            .entry(date.format("%Y-%m").to_string())
            .or_insert_with(|| MonthBucket {
                label: date.format("%b %Y").to_string(),
                total: 0.0,
                count: 0,
            });
        bucket.total += price_of(record);
        bucket.count += 1;
    }

    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    for record in sales {
        let name = if record.sale.cake.is_empty() {
            "Unknown"
        } else {
            record.sale.cake.as_str()
        };
        *by_category.entry(name.to_string()).or_insert(0.0) += price_of(record);
    }

    AnalyticsSummary {
        total_revenue,
        total_orders,
        average_order_value,
        by_month,
        by_category,
    }
}

/// Aggregation variant that groups by the keyword-derived category label
/// (`Cakes` / `Custom Orders` / `Other`) instead of the raw product name.
pub fn summarize_by_keyword_category(sales: &[SaleRecord]) -> BTreeMap<String, CategoryBucket> {
    let mut buckets: BTreeMap<String, CategoryBucket> = BTreeMap::new();
    for record in sales {
        let bucket = buckets
            .entry(categorize(&record.sale.cake).to_string())
            .or_default();
        bucket.total += price_of(record);
        bucket.count += 1;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Sale;

    fn record(date: &str, cake: &str, price: f64) -> SaleRecord {
        SaleRecord {
            id: format!("test-{}-{}", date, cake),
            sale: Sale {
                date: date.to_string(),
                customer_name: "Sari".to_string(),
                contact: String::new(),
                cake: cake.to_string(),
                size: "10cm".to_string(),
                quantity: 1,
                order_type: "Pickup".to_string(),
                pickup_date: date.to_string(),
                pickup_time: String::new(),
                price,
                payment: "Pending".to_string(),
                preparation: "Pending".to_string(),
                delivery: "Pending".to_string(),
                address: String::new(),
            },
            created_at: "2024-11-25T08:00:00+00:00".to_string(),
            updated_at: "2024-11-25T08:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_summarize_empty_collection() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.average_order_value, 0.0);
        assert!(summary.by_month.is_empty());
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_summarize_totals_and_average() {
        let sales = vec![
            record("2024-11-25", "Bento Cake", 240000.0),
            record("2024-11-26", "Basque", 360000.0),
        ];

        let summary = summarize(&sales);
        assert_eq!(summary.total_revenue, 600000.0);
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.average_order_value, 300000.0);
    }

    #[test]
    fn test_summarize_month_buckets_ascending() {
        let sales = vec![
            record("2025-01-10", "Bento Cake", 100.0),
            record("2024-11-25", "Bento Cake", 200.0),
            record("2024-11-30", "Basque", 300.0),
            record("2024-12-01", "Basque", 400.0),
        ];

        let summary = summarize(&sales);
        let keys: Vec<&String> = summary.by_month.keys().collect();
        assert_eq!(keys, vec!["2024-11", "2024-12", "2025-01"]);

        let november = &summary.by_month["2024-11"];
        assert_eq!(november.label, "Nov 2024");
        assert_eq!(november.total, 500.0);
        assert_eq!(november.count, 2);
    }

    #[test]
    fn test_summarize_unparseable_date_still_counts_in_totals() {
        let sales = vec![
            record("not-a-date", "Bento Cake", 100.0),
            record("2024-11-25", "Basque", 200.0),
        ];

        let summary = summarize(&sales);
        assert_eq!(summary.total_revenue, 300.0);
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.by_month.len(), 1);
    }

    #[test]
    fn test_summarize_by_category_uses_raw_cake_name() {
        let sales = vec![
            record("2024-11-25", "Bento Cake", 100.0),
            record("2024-11-26", "Bento Cake", 150.0),
            record("2024-11-27", "Wedding Tier", 500.0),
            record("2024-11-28", "", 50.0),
        ];

        let summary = summarize(&sales);
        assert_eq!(summary.by_category["Bento Cake"], 250.0);
        assert_eq!(summary.by_category["Wedding Tier"], 500.0);
        assert_eq!(summary.by_category["Unknown"], 50.0);
    }

    #[test]
    fn test_summarize_order_independent() {
        let mut sales = vec![
            record("2024-11-25", "Bento Cake", 100.0),
            record("2024-12-01", "Basque", 200.0),
            record("2025-01-05", "Wedding Tier", 300.0),
        ];

        let forward = summarize(&sales);
        sales.reverse();
        let backward = summarize(&sales);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_summarize_idempotent() {
        let sales = vec![
            record("2024-11-25", "Bento Cake", 100.0),
            record("2024-12-01", "Basque", 200.0),
        ];
        assert_eq!(summarize(&sales), summarize(&sales));
    }

    #[test]
    fn test_keyword_category_variant() {
        let sales = vec![
            record("2024-11-25", "Bento Cake", 100.0),
            record("2024-11-26", "Matcha Burnt", 200.0),
            record("2024-11-27", "Wedding Tier", 500.0),
            record("2024-11-28", "", 50.0),
        ];

        let buckets = summarize_by_keyword_category(&sales);
        assert_eq!(buckets["Cakes"].total, 300.0);
        assert_eq!(buckets["Cakes"].count, 2);
        assert_eq!(buckets["Custom Orders"].total, 500.0);
        assert_eq!(buckets["Other"].count, 1);
    }
}
