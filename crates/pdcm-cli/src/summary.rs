use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use pdcm_model::{ValidationReport, ValidationStatus};

pub fn print_summary(report: &ValidationReport) {
    println!("File: {}", report.file_name);
    println!(
        "Dictionary: {} {}",
        report.dictionary_name, report.dictionary_version
    );
    println!("Validated: {}", report.date.to_rfc3339());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Status"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for sheet in &report.sheets_validation_results {
        table.add_row(vec![
            Cell::new(&sheet.sheet_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            status_cell(sheet.status),
            count_cell(sheet.error_count()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        status_cell(report.status).add_attribute(Attribute::Bold),
        count_cell(report.error_count()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_error_table(report);
    print_score_table(report);
}

fn print_error_table(report: &ValidationReport) {
    if report.error_count() == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Line"),
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Format"),
        header_cell("Message"),
    ]);
    apply_error_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for sheet in report.invalid_sheets() {
        for error in &sheet.result {
            let format = error
                .info
                .get("format")
                .and_then(|value| value.as_str())
                .map_or_else(|| dim_cell("-"), Cell::new);
            table.add_row(vec![
                Cell::new(&sheet.sheet_name).fg(Color::Blue),
                Cell::new(error.index),
                Cell::new(&error.field_name),
                Cell::new(&error.error_type).fg(Color::Red),
                format,
                Cell::new(&error.message),
            ]);
        }
    }
    println!();
    println!("Errors:");
    println!("{table}");
}

fn print_score_table(report: &ValidationReport) {
    let Some(scores) = report.model_score.as_ref().filter(|s| !s.is_empty()) else {
        return;
    };
    let mut table = Table::new();
    table.set_header(vec![header_cell("Model"), header_cell("Completeness %")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (model_id, score) in scores {
        table.add_row(vec![Cell::new(model_id), score_cell(*score)]);
    }
    println!();
    println!("Model completeness:");
    println!("{table}");
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

fn apply_error_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: ValidationStatus) -> Cell {
    match status {
        ValidationStatus::Valid => Cell::new("VALID").fg(Color::Green),
        ValidationStatus::Invalid => Cell::new("INVALID").fg(Color::Red),
        ValidationStatus::NotProcessed => dim_cell("NOT PROCESSED"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn score_cell(score: f64) -> Cell {
    let color = if score >= 80.0 {
        Color::Green
    } else if score >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{score:.2}")).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
