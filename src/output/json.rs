//! JSON result files
//!
//! Records are written as a pretty-printed JSON array. serde_json leaves `&`,
//! `<` and `>` as literal characters, which downstream consumers rely on.

use crate::output::{OutputError, OutputResult};
use crate::record::Record;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serializes records to a JSON string
pub fn records_to_json(records: &[Record]) -> OutputResult<String> {
    serde_json::to_string_pretty(records).map_err(OutputError::Json)
}

/// Writes records to `path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(OutputError)` - Failed to serialize or write
pub fn write_records(records: &[Record], path: &Path) -> OutputResult<()> {
    let json = records_to_json(records)?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Reads a result file written by [`write_records`]
pub fn read_records(path: &Path) -> OutputResult<Vec<Record>> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(OutputError::Json)
}
