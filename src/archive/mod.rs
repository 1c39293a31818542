//! Export archive parsing.
//!
//! Extracts a ZIP archive fully in memory, locates the followers/following
//! JSON documents by filename heuristic, and flattens them into two
//! deduplicated account lists:
//! - candidate entries: lowercased path contains "followers" or "following"
//!   and ends in ".json"
//! - each document is a JSON array of items carrying a string_list_data list
//!   of { value, timestamp? } pairs, flattened across items and files
//! - duplicate usernames keep the last-encountered record, in first-seen order

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::{Cursor, Read};

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// One account as found in an export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRecord {
    pub username: String,
    /// RFC 3339 UTC instant. None when the export omitted or zeroed the timestamp.
    pub ts: Option<String>,
}

/// Normalized output of a parsed archive.
#[derive(Debug)]
pub struct ParsedArchive {
    pub followers: Vec<AccountRecord>,
    pub following: Vec<AccountRecord>,
    pub diagnostics: Vec<String>,
}

/// Parse an export archive into deduplicated follower and following lists.
///
/// Pure transform over the input bytes; identical bytes yield identical output.
pub fn parse(bytes: &[u8]) -> Result<ParsedArchive> {
    let entries = extract_entries(bytes)?;
    let mut diagnostics = Vec::new();

    let followers = collect_category(&entries, "followers", &mut diagnostics)?;
    let following = collect_category(&entries, "following", &mut diagnostics)?;

    Ok(ParsedArchive {
        followers,
        following,
        diagnostics,
    })
}

/// Decompress every file entry into (path, bytes) pairs, in archive order.
fn extract_entries(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::ArchiveFormat(e.to_string()))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| Error::ArchiveFormat(e.to_string()))?;

        if file.is_dir() {
            continue;
        }

        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)
            .map_err(|e| Error::ArchiveFormat(e.to_string()))?;

        entries.push((file.name().to_string(), data));
    }

    Ok(entries)
}

/// Collect and deduplicate account records across every data file of one category.
fn collect_category(
    entries: &[(String, Vec<u8>)],
    category: &'static str,
    diagnostics: &mut Vec<String>,
) -> Result<Vec<AccountRecord>> {
    let mut records: Vec<AccountRecord> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut found = false;

    for (name, data) in entries {
        let lowered = name.to_lowercase();
        if !lowered.contains(category) || !lowered.ends_with(".json") {
            continue;
        }
        found = true;

        // exports are utf-8; decode lossily rather than reject odd bytes
        let text = String::from_utf8_lossy(data);
        let items: Vec<Value> = serde_json::from_str(&text).map_err(|source| Error::Validation {
            entry: name.clone(),
            source,
        })?;

        for item in &items {
            let Some(pairs) = item.get("string_list_data").and_then(Value::as_array) else {
                continue;
            };

            for pair in pairs {
                let Some(username) = pair.get("value").and_then(Value::as_str) else {
                    diagnostics.push(format!("{name}: item missing username value, skipped"));
                    continue;
                };

                let ts = convert_timestamp(pair.get("timestamp"), name, username, diagnostics);
                let record = AccountRecord {
                    username: username.to_string(),
                    ts,
                };

                // last write wins, first-seen position preserved
                match seen.entry(record.username.clone()) {
                    Entry::Occupied(slot) => records[*slot.get()] = record,
                    Entry::Vacant(slot) => {
                        slot.insert(records.len());
                        records.push(record);
                    }
                }
            }
        }
    }

    if !found {
        return Err(Error::DataNotFound { category });
    }

    Ok(records)
}

/// Seconds since epoch to RFC 3339 UTC. Absent and zero timestamps are both None.
fn convert_timestamp(
    raw: Option<&Value>,
    entry: &str,
    username: &str,
    diagnostics: &mut Vec<String>,
) -> Option<String> {
    let secs = raw.and_then(Value::as_i64).filter(|&s| s != 0)?;

    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => {
            diagnostics.push(format!(
                "{entry}: timestamp {secs} out of range for {username}"
            ));
            None
        }
    }
}
