use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use aiv_model::{Category, FailureMode, LineError};
use aiv_validate::BatchReport;

use crate::types::ValidateResult;

/// Error rows printed before the table is cut off.
const MAX_ERROR_ROWS: usize = 200;

pub fn print_summary(result: &ValidateResult) {
    println!("Input: {}", result.input.display());
    println!(
        "Mode: {}",
        match result.options.failure_mode {
            FailureMode::FailFast => "fail-fast",
            FailureMode::CollectAll => "collect-all",
        }
    );
    if let Some(path) = &result.output {
        println!("Validated records: {}", path.display());
    }
    if let Some(path) = &result.report_path {
        println!("Validation report: {}", path.display());
    }
    println!("{}", totals_table(&result.report));
    if let Some(table) = error_table(&result.report.errors) {
        println!();
        println!("Errors:");
        println!("{table}");
        if result.report.errors.len() > MAX_ERROR_ROWS {
            println!(
                "... {} more (write a report with --report-dir for the full list)",
                result.report.errors.len() - MAX_ERROR_ROWS
            );
        }
    }
    if result.report.aborted {
        eprintln!(
            "Stopped after {} of {} records.",
            result.report.processed, result.report.records
        );
    }
}

pub fn totals_table(report: &BatchReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let counts = report.counts_by_category();
    for category in [
        Category::Ontology,
        Category::Structure,
        Category::Geometry,
        Category::Consistency,
        Category::CrossReference,
        Category::Uniqueness,
    ] {
        let count = counts.get(&category).copied().unwrap_or(0);
        table.add_row(vec![Cell::new(category.label()), count_cell(count, Color::Red)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.errors.len(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Records"),
        Cell::new(format!(
            "{} valid / {} processed / {} total",
            report.valid, report.processed, report.records
        )),
    ]);
    table
}

fn error_table(errors: &[LineError]) -> Option<Table> {
    if errors.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Kind"),
        header_cell("Field"),
        header_cell("Message"),
        header_cell("Suggestion"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for error in errors.iter().take(MAX_ERROR_ROWS) {
        table.add_row(vec![
            Cell::new(error.line_number()),
            Cell::new(error.kind().as_str()).fg(Color::Red),
            error
                .error
                .field()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(error.error.to_string()),
            error
                .error
                .suggestion()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(26)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
