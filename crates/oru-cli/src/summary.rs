//! Terminal rendering of analyses and catalogs.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use oru_analysis::AnalysisOutcome;
use oru_model::{AtRisk, Metric, PersonalDetails, format_number};

/// Prints the patient, the analysis tree and what was left out of it.
pub fn print_analysis(outcome: &AnalysisOutcome) {
    println!("{}", patient_line(&outcome.analysis.personal_details));
    if outcome.analysis.data.is_empty() {
        println!("No results matched the catalog.");
    } else {
        println!("{}", analysis_table(outcome));
    }
    let dropped = &outcome.dropped;
    if dropped.total() > 0 {
        println!(
            "Left out: {} skipped observation(s), {} unmatched result(s), {} metric(s) without a group",
            dropped.skipped_observations, dropped.unmatched_results, dropped.groupless_metrics
        );
    }
}

pub fn patient_line(details: &PersonalDetails) -> String {
    let name = match (&details.first_name, &details.last_name) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(name), None) | (None, Some(name)) => name.clone(),
        (None, None) => "-".to_string(),
    };
    let age = details
        .age
        .map_or_else(|| "-".to_string(), |age| age.to_string());
    let gender = details.gender.map_or("-", |gender| gender.as_str());
    format!("Patient: {name} | Age: {age} | Gender: {gender}")
}

/// One row per leaf, in tree order.
pub fn analysis_table(outcome: &AnalysisOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Diagnostic"),
        header_cell("Metric"),
        header_cell("Result"),
        header_cell("Unit"),
        header_cell("Standard"),
        header_cell("At risk"),
        header_cell("Everlab"),
        header_cell("At risk"),
    ]);
    apply_analysis_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    align_column(&mut table, 8, CellAlignment::Center);

    for (group, diagnostics) in &outcome.analysis.data {
        for (diagnostic, leaves) in diagnostics {
            for leaf in leaves {
                let metric = &leaf.metric;
                table.add_row(vec![
                    Cell::new(group).add_attribute(Attribute::Bold),
                    Cell::new(diagnostic),
                    Cell::new(&metric.metric_name),
                    Cell::new(&metric.result_value),
                    dim_cell(&metric.metric_unit),
                    dim_cell(format_range(
                        metric.metric_standard_lower,
                        metric.metric_standard_higher,
                    )),
                    risk_cell(metric.standard_at_risk),
                    dim_cell(format_range(
                        metric.metric_everlab_lower,
                        metric.metric_everlab_higher,
                    )),
                    risk_cell(metric.everlab_at_risk),
                ]);
            }
        }
    }
    table
}

/// One row per catalog metric, in catalog order.
pub fn metrics_table(metrics: &[Metric]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Metric",
        "Codes",
        "Units",
        "Age",
        "Gender",
        "Standard",
        "Everlab",
        "Diagnostic",
        "Groups",
    ]);
    apply_table_style(&mut table);
    for metric in metrics {
        table.add_row(vec![
            metric.name.clone(),
            metric.oru_sonic_codes.join(", "),
            metric.oru_sonic_units.join(", "),
            format_age(metric.min_age, metric.max_age),
            metric.gender.to_string(),
            format_range(metric.standard_lower, metric.standard_higher),
            format_range(metric.everlab_lower, metric.everlab_higher),
            metric.diagnostic_name().unwrap_or("-").to_string(),
            metric.group_names().join(", "),
        ]);
    }
    table
}

pub fn format_range(lower: Option<f64>, higher: Option<f64>) -> String {
    match (lower, higher) {
        (Some(lower), Some(higher)) => {
            format!("{} - {}", format_number(lower), format_number(higher))
        }
        (Some(lower), None) => format!(">= {}", format_number(lower)),
        (None, Some(higher)) => format!("<= {}", format_number(higher)),
        (None, None) => "-".to_string(),
    }
}

pub fn format_age(min_age: Option<u32>, max_age: Option<u32>) -> String {
    match (min_age, max_age) {
        (Some(min), Some(max)) => format!("{min} - {max}"),
        (Some(min), None) => format!(">= {min}"),
        (None, Some(max)) => format!("<= {max}"),
        (None, None) => "any".to_string(),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn risk_cell(risk: AtRisk) -> Cell {
    match risk {
        AtRisk::Yes => Cell::new(risk).fg(Color::Red).add_attribute(Attribute::Bold),
        AtRisk::Possible => Cell::new(risk).fg(Color::Yellow),
        AtRisk::No => Cell::new(risk).fg(Color::Green),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_analysis_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
