use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pmu_cli::pipeline::{ProductStatus, RunReport};
use pmu_ingest::ProductEntry;
use pmu_normalize::Diagnostic;

/// Run summary on stderr; stdout may carry the tables.
pub fn print_summary(report: &RunReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Product"),
        header_cell("Status"),
        header_cell("Events"),
        header_cell("Metrics"),
        header_cell("Groups"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = [0usize; 4];
    for product in &report.products {
        let skipped = product.diagnostics.len();
        totals[0] += product.events;
        totals[1] += product.metrics;
        totals[2] += product.groups;
        totals[3] += skipped;
        table.add_row(vec![
            Cell::new(&product.product)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            status_cell(&product.status),
            count_cell(product.events, None),
            count_cell(product.metrics, None),
            count_cell(product.groups, None),
            count_cell(skipped, Some(Color::Yellow)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} products", report.products.len())),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        Cell::new(totals[1]).add_attribute(Attribute::Bold),
        Cell::new(totals[2]).add_attribute(Attribute::Bold),
        count_cell(totals[3], Some(Color::Yellow)).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");

    let diagnostics: Vec<&Diagnostic> = report
        .products
        .iter()
        .flat_map(|product| &product.diagnostics)
        .collect();
    print_diagnostics(&diagnostics);

    let failures: Vec<(&str, &str)> = report
        .products
        .iter()
        .filter_map(|product| match &product.status {
            ProductStatus::Failed { reason } => Some((product.product.as_str(), reason.as_str())),
            _ => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (product, reason) in failures {
            eprintln!("- {product}: {reason}");
        }
    }
}

/// Skipped records, one row each, on stderr.
pub fn print_diagnostics(diagnostics: &[&Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Product"),
        header_cell("Kind"),
        header_cell("Record"),
        header_cell("Reason"),
    ]);
    apply_condensed_style(&mut table);
    for diagnostic in diagnostics {
        table.add_row(vec![
            Cell::new(&diagnostic.product),
            Cell::new(diagnostic.kind),
            Cell::new(&diagnostic.record).fg(Color::Yellow),
            Cell::new(&diagnostic.reason),
        ]);
    }
    eprintln!();
    eprintln!("Skipped records:");
    eprintln!("{table}");
}

/// Catalog listing on stdout.
pub fn print_catalog(entries: &[ProductEntry]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Family"),
        header_cell("Product"),
        header_cell("Document"),
    ]);
    apply_condensed_style(&mut table);
    for entry in entries {
        table.add_row(vec![
            dim_cell(&entry.family),
            Cell::new(&entry.product)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&entry.document),
        ]);
    }
    println!("{table}");
}

fn status_cell(status: &ProductStatus) -> Cell {
    match status {
        ProductStatus::Emitted => Cell::new("✓ tables").fg(Color::Green),
        ProductStatus::Alias { target } => Cell::new(format!("→ {target}")).fg(Color::DarkGrey),
        ProductStatus::Failed { .. } => Cell::new("✗ failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, highlight: Option<Color>) -> Cell {
    match highlight {
        Some(color) if count > 0 => Cell::new(count).fg(color).add_attribute(Attribute::Bold),
        _ if count == 0 => dim_cell(count),
        _ => Cell::new(count),
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_condensed_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
