//! Ingestion pipeline: archive bytes in, committed snapshot out.

use std::time::Instant;

use crate::archive;
use crate::error::Result;
use crate::store::Store;

/// What one import did, for the CLI to report.
#[derive(Debug)]
pub struct ImportSummary {
    pub snapshot_id: i64,
    pub follower_count: usize,
    pub following_count: usize,
    pub diagnostics: Vec<String>,
    pub duration_ms: u128,
    pub peak_memory_bytes: Option<usize>,
}

/// Parse the archive and persist the result as a new snapshot.
///
/// Parser and store errors pass through unchanged; a failed import leaves
/// the store exactly as it was. Counts are the deduplicated list lengths.
pub fn import_archive(
    store: &mut Store,
    bytes: &[u8],
    source_filename: Option<&str>,
) -> Result<ImportSummary> {
    let start = Instant::now();

    let parsed = archive::parse(bytes)?;
    let snapshot_id =
        store.create_snapshot(&parsed.followers, &parsed.following, source_filename)?;

    Ok(ImportSummary {
        snapshot_id,
        follower_count: parsed.followers.len(),
        following_count: parsed.following.len(),
        diagnostics: parsed.diagnostics,
        duration_ms: start.elapsed().as_millis(),
        peak_memory_bytes: memory_stats::memory_stats().map(|usage| usage.physical_mem),
    })
}
