//! CSV table output.
//!
//! Writes accumulated rows in the fixed lookup-table schema. Numeric fields
//! use `.` as the decimal separator and money is always printed with two
//! decimal places, regardless of locale.

use std::path::Path;

use csv::Writer;

/// Column header of the lookup-table schema.
const CSV_HEADER: [&str; 6] = [
    "ZipCodeStart",
    "ZipCodeEnd",
    "WeightStart",
    "WeightEnd",
    "AbsoluteMoneyCost",
    "TimeCost",
];

/// One persisted table row: the quoted cost and transit time for a
/// (postal range, weight bracket) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRow {
    /// First postal code of the range.
    pub zip_start: u32,
    /// Last postal code of the range.
    pub zip_end: u32,
    /// Bracket lower bound in grams.
    pub weight_start_grams: u32,
    /// Bracket upper bound in grams.
    pub weight_end_grams: u32,
    /// Shipping cost in BRL.
    pub money_cost: f64,
    /// Delivery time in days.
    pub time_days: u32,
}

/// Writes the header and all rows to `path`, in the order given.
pub fn write_table(path: &Path, rows: &[OutputRow]) -> Result<(), csv::Error> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record(&[
            row.zip_start.to_string(),
            row.zip_end.to_string(),
            row.weight_start_grams.to_string(),
            row.weight_end_grams.to_string(),
            format!("{:.2}", row.money_cost),
            row.time_days.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
