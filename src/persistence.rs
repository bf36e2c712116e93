use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Indentation used for every file this crate writes
const INDENT: &[u8] = b"    ";

/// Load and parse a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse file: {}", path.display()))?;

    debug!("Loaded {}", path.display());
    Ok(value)
}

/// Serialize a value to JSON with 4-space indentation
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .context("Failed to serialize data")?;

    String::from_utf8(buf).context("Serialized data is not valid UTF-8")
}

/// Overwrite a file with the JSON form of `value`
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = to_json_string(value)?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    debug!("Wrote {}", path.display());
    Ok(())
}
