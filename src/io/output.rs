use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::entry::ComparisonResult;

/// Serializes a comparison result for the downstream consumers (viewer,
/// storage layer). The payload is read-only from their side.
pub fn comparison_to_json_string(result: &ComparisonResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize comparison result")
}

/// Writes the comparison result as pretty-printed JSON.
pub fn write_comparison_json<P: AsRef<Path>>(result: &ComparisonResult, path: P) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("failed to create output file {:?}", path.as_ref()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, result)
        .with_context(|| format!("failed to write comparison result to {:?}", path.as_ref()))?;
    Ok(())
}
