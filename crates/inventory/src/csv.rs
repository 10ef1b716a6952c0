//! CSV rendering of an [`InventoryReport`].

use crate::report::InventoryReport;

const LINE_END: &str = "\r\n";

/// Render the export: product table, summary block, category breakdown.
pub fn render(report: &InventoryReport) -> String {
    let mut out = String::new();

    write_row(
        &mut out,
        &["ID", "Product Name", "Category", "Price", "Quantity", "Status", "Total Value"],
    );
    for p in &report.products {
        write_row(
            &mut out,
            &[
                &p.id.to_string(),
                &p.name,
                &p.category,
                &money(p.price),
                &p.quantity.to_string(),
                report.policy.status(p.quantity).label(),
                &money(p.stock_value()),
            ],
        );
    }

    out.push_str(LINE_END);
    write_row(&mut out, &["SUMMARY"]);
    write_row(&mut out, &["Total Products", &report.total_products.to_string()]);
    write_row(&mut out, &["Total Inventory Value", &money(report.total_value)]);
    write_row(&mut out, &["Low Stock Items", &report.low_stock_count.to_string()]);

    out.push_str(LINE_END);
    write_row(&mut out, &["CATEGORY BREAKDOWN"]);
    write_row(
        &mut out,
        &["Category", "Product Count", "Total Quantity", "Total Value"],
    );
    for stat in &report.category_stats {
        write_row(
            &mut out,
            &[
                &stat.category,
                &stat.count.to_string(),
                &stat.total_qty.to_string(),
                &money(stat.total_value),
            ],
        );
    }

    out
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn write_row(out: &mut String, fields: &[&str]) {
    let row = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&row);
    out.push_str(LINE_END);
}

/// Quote a field when it contains a delimiter, quote or line break.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}
