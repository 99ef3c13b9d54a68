//! CSV export for computed site layouts.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::site::types::LayoutResult;

/// Column header for layout CSV export.
const HEADER: &str = "index,device_id,name,x_ft,y_ft,width_ft,depth_ft";

/// Exports a layout to a CSV file at the given path.
///
/// Writes a header row followed by one row per placed unit, in placement
/// order. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(layout: &LayoutResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(layout, buf)
}

/// Writes a layout as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(layout: &LayoutResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for (i, unit) in layout.items.iter().enumerate() {
        wtr.write_record(&[
            i.to_string(),
            unit.device_id.clone(),
            unit.name.clone(),
            unit.x.to_string(),
            unit.y.to_string(),
            unit.width.to_string(),
            unit.depth.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
