//! Terminal table rendering for snapshots and diff views.
//!
//! Fixed-width columns, newest or alphabetically-first rows on top,
//! a short hint line when there is nothing to show.

use crate::store::diff::{LostFollower, NotFollowingBack};
use crate::store::Snapshot;

use super::format_instant;

pub fn snapshots(rows: &[Snapshot]) -> String {
    if rows.is_empty() {
        return String::from("No snapshots yet. Run 'followtrack import' to create one.\n");
    }

    let mut output = String::new();
    output.push_str(&format!("{:<6} {:<20} {}\n", "ID", "Taken", "Source"));
    output.push_str(&format!("{}\n", "-".repeat(60)));

    for snapshot in rows {
        output.push_str(&format!(
            "{:<6} {:<20} {}\n",
            snapshot.id,
            format_instant(&snapshot.taken_at),
            snapshot.source_filename.as_deref().unwrap_or("")
        ));
    }

    output
}

pub fn lost_followers(rows: &[LostFollower]) -> String {
    if rows.is_empty() {
        return String::from("No lost followers. Import at least two snapshots to compare.\n");
    }

    let mut output = String::new();
    output.push_str(&format!("{:<32} {}\n", "Username", "Last seen"));
    output.push_str(&format!("{}\n", "-".repeat(52)));

    for row in rows {
        let last_seen = row
            .last_seen
            .as_deref()
            .map(format_instant)
            .unwrap_or_default();
        output.push_str(&format!("{:<32} {}\n", truncate(&row.username, 32), last_seen));
    }

    output
}

pub fn not_following_back(rows: &[NotFollowingBack]) -> String {
    if rows.is_empty() {
        return String::from("No one-sided follows detected.\n");
    }

    let mut output = String::new();
    output.push_str(&format!("{:<32} {}\n", "Username", "Followed"));
    output.push_str(&format!("{}\n", "-".repeat(52)));

    for row in rows {
        let followed_at = row
            .followed_at
            .as_deref()
            .map(format_instant)
            .unwrap_or_default();
        output.push_str(&format!(
            "{:<32} {}\n",
            truncate(&row.username, 32),
            followed_at
        ));
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_list_renders_hint() {
        assert!(snapshots(&[]).contains("No snapshots yet"));
    }

    #[test]
    fn snapshot_rows_include_id_and_source() {
        let rendered = snapshots(&[Snapshot {
            id: 7,
            taken_at: "2023-01-01T00:00:00Z".to_string(),
            source_filename: Some("export.zip".to_string()),
        }]);

        assert!(rendered.contains('7'));
        assert!(rendered.contains("2023-01-01 00:00:00"));
        assert!(rendered.contains("export.zip"));
    }

    #[test]
    fn missing_followed_at_renders_blank() {
        let rendered = not_following_back(&[NotFollowingBack {
            username: "carol".to_string(),
            followed_at: None,
        }]);

        assert!(rendered.contains("carol"));
        assert!(!rendered.contains("1970"));
    }

    #[test]
    fn long_usernames_are_truncated() {
        let rendered = lost_followers(&[LostFollower {
            username: "x".repeat(40),
            last_seen: None,
        }]);

        assert!(rendered.contains("..."));
    }
}
