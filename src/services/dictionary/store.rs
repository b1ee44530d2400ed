use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::normalize;
use crate::error::{CoreError, Result};
use crate::model::entry::Entry;
use crate::services::encoding;

#[derive(Debug, Serialize)]
pub struct DedupeReport {
    pub input_entries: usize,
    pub output_entries: usize,
    pub output: String,
}

/// Parses a dictionary document: a JSON array of `{en, de, fr}` objects.
pub fn parse(text: &str, origin: &str) -> Result<Vec<Entry>> {
    let value: Value = serde_json::from_str(text).map_err(|e| CoreError::json(origin, e))?;
    if !value.is_array() {
        return Err(CoreError::NotAList(origin.to_string()));
    }
    serde_json::from_value(value).map_err(|e| CoreError::json(origin, e))
}

pub fn load_file(path: &Path) -> Result<Vec<Entry>> {
    let bytes = fs::read(path).map_err(|e| CoreError::read(path, e))?;
    let decoded = encoding::decode_bytes(&bytes, Some("utf-8"))?;
    parse(&decoded.text, &path.display().to_string())
}

pub fn save(path: &Path, entries: &[Entry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| CoreError::json(path.display().to_string(), e))?;
    write_atomic(path, json.as_bytes())
}

/// Keeps the first entry per English name (trimmed, case-insensitive) and
/// drops entries without an English name.
pub fn dedupe(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen: HashSet<String> = HashSet::new();
    entries
        .into_iter()
        .filter(|e| {
            let key = normalize::dedupe_key(&e.en);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

pub fn dedupe_file(input: &Path, output: &Path) -> Result<DedupeReport> {
    let entries = load_file(input)?;
    let input_entries = entries.len();

    let deduped = dedupe(entries);
    save(output, &deduped)?;

    log::info!(
        "[dictionary] deduplicated {} -> {} entries into {}",
        input_entries,
        deduped.len(),
        output.display()
    );

    Ok(DedupeReport {
        input_entries,
        output_entries: deduped.len(),
        output: output.display().to_string(),
    })
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| CoreError::write(parent, e))?;
        }
    }

    fs::write(&tmp, bytes).map_err(|e| CoreError::write(&tmp, e))?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| CoreError::write(path, e))?;
    }

    fs::rename(&tmp, path).map_err(|e| CoreError::write(path, e))?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "dictionary".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
