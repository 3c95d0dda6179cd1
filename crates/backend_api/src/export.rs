use models::SaleRecord;

/// Column order of the export file; mirrors the import schema.
const EXPORT_HEADERS: [&str; 16] = [
    "ID",
    "Date",
    "Customer Name",
    "Contact",
    "Address",
    "Cake",
    "Size",
    "Quantity",
    "Price",
    "Order Type",
    "Pickup Date",
    "Pickup Time",
    "Payment Status",
    "Preparation Status",
    "Delivery Status",
    "Created At",
];

/// Quote a text field, doubling any embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render the sale collection as CSV. Free-text fields are always quoted;
/// everything else is written as-is.
pub fn sales_to_csv(sales: &[SaleRecord]) -> String {
    let mut rows = Vec::with_capacity(sales.len() + 1);
    rows.push(EXPORT_HEADERS.join(","));

    for record in sales {
        let sale = &record.sale;
        rows.push(
            [
                record.id.clone(),
                sale.date.clone(),
                quote(&sale.customer_name),
                quote(&sale.contact),
                quote(&sale.address),
                quote(&sale.cake),
                sale.size.clone(),
                sale.quantity.to_string(),
                sale.price.to_string(),
                sale.order_type.clone(),
                sale.pickup_date.clone(),
                sale.pickup_time.clone(),
                sale.payment.clone(),
                sale.preparation.clone(),
                sale.delivery.clone(),
                record.created_at.clone(),
            ]
            .join(","),
        );
    }

    rows.join("\n")
}
