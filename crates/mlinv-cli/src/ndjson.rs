use std::io::{BufRead, Write};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read one JSON value per non-blank line.
pub(crate) fn read_ndjson<T: DeserializeOwned>(reader: impl BufRead) -> anyhow::Result<Vec<T>> {
    let mut items = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(&line)
            .with_context(|| format!("invalid JSON on line {}", idx + 1))?;
        items.push(item);
    }
    Ok(items)
}

pub(crate) fn write_ndjson<T: Serialize>(mut writer: impl Write, items: &[T]) -> anyhow::Result<()> {
    for item in items {
        serde_json::to_writer(&mut writer, item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
