use crate::domain::model::SolveRecord;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CsvRow<'a> {
    id: u64,
    timestamp: String,
    facelet_string: &'a str,
    solution: &'a str,
    move_count: u32,
    solve_time_ms: f64,
    ip_address: &'a str,
}

/// Writes solve records as CSV with a header row.
pub fn write_history_csv<W: Write>(writer: W, records: &[SolveRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(CsvRow {
            id: record.id,
            timestamp: record.timestamp.to_rfc3339(),
            facelet_string: &record.facelet_string,
            solution: &record.solution,
            move_count: record.move_count,
            solve_time_ms: record.solve_time_ms,
            ip_address: record.ip_address.as_deref().unwrap_or(""),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
