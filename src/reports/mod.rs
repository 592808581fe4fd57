use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use shbdo::batch::BatchOutcome;
use shbdo::record::DetectorRecord;

fn format_dims(record: &DetectorRecord) -> String {
    let [nx, ny, nz] = record.dimensions();
    format!("{}x{}x{}", nx, ny, nz)
}

fn format_range(record: &DetectorRecord) -> String {
    let (min, max) = record.axis_bounds();
    format!(
        "[{}, {}] [{}, {}] [{}, {}]",
        min[0], max[0], min[1], max[1], min[2], max[2]
    )
}

pub fn print_summary_table(outcomes: &[BatchOutcome]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("File").add_attribute(Attribute::Bold),
        Cell::new("Geometry"),
        Cell::new("Detector"),
        Cell::new("Bins"),
        Cell::new("Range"),
        Cell::new("NSTAT"),
        Cell::new("Offset"),
        Cell::new("Stride"),
        Cell::new("Unit"),
        Cell::new("Title").add_attribute(Attribute::Bold),
    ]);

    for i in 5..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for outcome in outcomes {
        let name = outcome.path.display().to_string();
        match &outcome.result {
            Ok(record) => {
                let geometry = if record.geometry_type().to_string()
                    == record.geometry_tag().to_lowercase()
                {
                    record.geometry_type().to_string()
                } else {
                    format!("{} ({})", record.geometry_type(), record.geometry_tag())
                };
                table.add_row(vec![
                    Cell::new(name).add_attribute(Attribute::Bold),
                    Cell::new(geometry),
                    Cell::new(record.detector_type().to_string()),
                    Cell::new(format_dims(record)),
                    Cell::new(format_range(record)),
                    Cell::new(record.statistics_count()),
                    Cell::new(record.payload_offset()),
                    Cell::new(record.record_stride()),
                    Cell::new(record.units().value.trim()),
                    Cell::new(record.title()).add_attribute(Attribute::Bold),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    Cell::new(name).add_attribute(Attribute::Bold),
                    Cell::new(e.to_string()).fg(Color::Red),
                ]);
            }
        }
    }
    println!("{}", table);
}

pub fn print_json(outcomes: &[BatchOutcome]) -> serde_json::Result<()> {
    let records: Vec<&DetectorRecord> = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
