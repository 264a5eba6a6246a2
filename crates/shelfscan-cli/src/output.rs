//! Writes the catalog snapshot artifact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use shelfscan_core::ProductRecord;

/// Serializes `records` as a JSON array to `path`, creating or truncating it.
///
/// Uses a four-space indent and writes UTF-8 as-is, so non-Latin names and
/// brands stay readable instead of becoming `\uXXXX` escapes.
pub(crate) fn write_products(path: &Path, records: &[ProductRecord]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialize products to {}", path.display()))?;

    writer
        .flush()
        .with_context(|| format!("failed to flush output file {}", path.display()))?;
    Ok(())
}
