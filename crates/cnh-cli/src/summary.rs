use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cnh_cli::pipeline::PipelineOutput;
use cnh_cli::types::RunResult;
use cnh_model::{FIELD_LAYOUT, FinalRecord, PadRule, Severity, Stage};
use cnh_report::JOINED_COLUMNS;

/// Final-table columns shown in previews; the rest are constants.
const FINAL_PREVIEW_COLUMNS: [&str; 8] = [
    "nu-seq-trans",
    "codusu",
    "numero-cnh",
    "Numero Certificado",
    "data-inicio-curso",
    "data-fim-curso",
    "data-validade",
    "categoria",
];

pub fn print_summary(result: &RunResult, preview: usize) {
    let params = &result.params;
    println!(
        "Run date: {} (dia-juliano {})",
        params.run_date,
        params.run_date.format("%j")
    );
    println!(
        "Parameters: start {} | update type {} | hours {}",
        params.starting_sequence_number, params.update_type, params.course_hours
    );
    match &result.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: dry run, no files written"),
    }
    if let Some(path) = &result.run_report {
        println!("Run report: {}", path.display());
    }

    println!("{}", stage_table(&result.pipeline));
    print_messages(&result.pipeline);
    if !result.outputs.is_empty() {
        print_outputs(result);
    }
    for path in &result.removed {
        println!("Removed stale output: {}", path.display());
    }
    if preview > 0 {
        print_previews(&result.pipeline, preview);
    }
    print_integrity(&result.pipeline);
}

fn stage_table(pipeline: &PipelineOutput) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Detail"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let course = &pipeline.course;
    let rows = [
        (
            Stage::CourseReport,
            Some(course.main.len()),
            format!(
                "{} read, {} under 5 days, {} without dates",
                pipeline.course_rows,
                course.short_duration.len(),
                course.undated
            ),
        ),
        (
            Stage::Registration,
            Some(pipeline.registrations.len()),
            String::new(),
        ),
        (Stage::Join, Some(pipeline.joined.len()), String::new()),
        (
            Stage::Assembly,
            Some(pipeline.records.len()),
            "transaction-181 records".to_string(),
        ),
        (
            Stage::Integrity,
            None,
            format!(
                "{} leading zero, {} width overflows",
                pipeline.integrity.leading_zero.len(),
                pipeline.integrity.width_overflows.len()
            ),
        ),
    ];
    for (stage, count, detail) in rows {
        table.add_row(vec![
            stage_cell(stage, worst_severity(pipeline, stage)),
            count.map_or_else(|| dim_cell("-"), Cell::new),
            if detail.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(detail)
            },
        ]);
    }
    table
}

fn print_messages(pipeline: &PipelineOutput) {
    if pipeline.messages.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Severity"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for message in &pipeline.messages {
        table.add_row(vec![
            Cell::new(message.stage.label()),
            severity_cell(message.severity),
            Cell::new(&message.text),
        ]);
    }
    println!();
    println!("Messages:");
    println!("{table}");
}

fn print_outputs(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for output in &result.outputs {
        table.add_row(vec![
            Cell::new(output.name)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new(output.rows),
            dim_cell(&output.sha256[..output.sha256.len().min(16)]),
        ]);
    }
    println!();
    println!("Files:");
    println!("{table}");
}

fn print_previews(pipeline: &PipelineOutput, limit: usize) {
    if !pipeline.joined.is_empty() {
        let mut table = Table::new();
        table.set_header(JOINED_COLUMNS.iter().map(|name| header_cell(name)));
        apply_table_style(&mut table);
        for record in pipeline.joined.iter().take(limit) {
            table.add_row(vec![
                &record.identifier_original,
                &record.identifier,
                &record.start_date_code,
                &record.end_date_code,
                &record.license_number,
                &record.license_category,
            ]);
        }
        println!();
        println!("Joined table (first {limit} rows):");
        println!("{table}");
    }

    if !pipeline.records.is_empty() {
        let mut table = Table::new();
        table.set_header(FINAL_PREVIEW_COLUMNS.iter().map(|name| header_cell(name)));
        apply_table_style(&mut table);
        for record in pipeline.records.iter().take(limit) {
            table.add_row(preview_values(record));
        }
        println!();
        println!("Final table (first {limit} rows):");
        println!("{table}");
    }
}

fn preview_values(record: &FinalRecord) -> Vec<&str> {
    let values = record.values();
    FINAL_PREVIEW_COLUMNS
        .iter()
        .filter_map(|name| {
            FIELD_LAYOUT
                .iter()
                .position(|spec| spec.name == *name)
                .map(|index| values[index])
        })
        .collect()
}

fn print_integrity(pipeline: &PipelineOutput) {
    let integrity = &pipeline.integrity;
    if !integrity.leading_zero.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Row"), header_cell("codusu")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for finding in &integrity.leading_zero {
            table.add_row(vec![
                Cell::new(finding.row + 1),
                Cell::new(&finding.user_code).fg(Color::Yellow),
            ]);
        }
        println!();
        println!("codusu values starting with '0':");
        println!("{table}");
    }

    if !integrity.width_overflows.is_empty() {
        // field -> (declared width, widest value, rows)
        let mut by_field: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
        for overflow in &integrity.width_overflows {
            let entry = by_field
                .entry(overflow.field)
                .or_insert((overflow.width, 0, 0));
            entry.1 = entry.1.max(overflow.actual);
            entry.2 += 1;
        }
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Field"),
            header_cell("Width"),
            header_cell("Widest"),
            header_cell("Rows"),
        ]);
        apply_table_style(&mut table);
        for column in 1..4 {
            align_column(&mut table, column, CellAlignment::Right);
        }
        for (field, (width, widest, rows)) in by_field {
            table.add_row(vec![
                Cell::new(field),
                Cell::new(width),
                Cell::new(widest).fg(Color::Yellow),
                Cell::new(rows),
            ]);
        }
        println!();
        println!("Values wider than their field (written unchanged):");
        println!("{table}");
    }
}

pub fn print_layout() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Field"),
        header_cell("Width"),
        header_cell("Pad"),
        header_cell("Content"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, spec) in FIELD_LAYOUT.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(spec.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            spec.width.map_or_else(|| dim_cell("-"), Cell::new),
            pad_cell(spec.pad),
            Cell::new(spec.content),
        ]);
    }
    println!("{table}");
}

fn worst_severity(pipeline: &PipelineOutput, stage: Stage) -> Option<Severity> {
    pipeline
        .messages
        .iter()
        .filter(|message| message.stage == stage)
        .map(|message| message.severity)
        .max()
}

fn stage_cell(stage: Stage, severity: Option<Severity>) -> Cell {
    let cell = Cell::new(stage.label()).add_attribute(Attribute::Bold);
    match severity {
        Some(Severity::Error) => cell.fg(Color::Red),
        Some(Severity::Warning) => cell.fg(Color::Yellow),
        Some(Severity::Notice) | None => cell.fg(Color::Blue),
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Notice => Cell::new("INFO").fg(Color::DarkGrey),
    }
}

fn pad_cell(pad: PadRule) -> Cell {
    match pad {
        PadRule::ZeroLeft => Cell::new("zero-left"),
        PadRule::SpaceRight => Cell::new("space-right"),
        PadRule::None => dim_cell("none"),
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_width(100);
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
