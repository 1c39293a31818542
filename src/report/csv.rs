//! CSV export for the diff views.
//!
//! Every value is double-quoted with internal quotes doubled; missing values
//! render as an empty quoted string. Rows are joined by newline without a
//! trailing one. Headers are unquoted.

use crate::store::diff::{LostFollower, NotFollowingBack};

pub fn lost_followers(rows: &[LostFollower]) -> String {
    let mut lines = vec![String::from("username,last_seen")];
    for row in rows {
        lines.push(format!(
            "{},{}",
            field(Some(&row.username)),
            field(row.last_seen.as_deref())
        ));
    }
    lines.join("\n")
}

pub fn not_following_back(rows: &[NotFollowingBack]) -> String {
    let mut lines = vec![String::from("username,followed_at")];
    for row in rows {
        lines.push(format!(
            "{},{}",
            field(Some(&row.username)),
            field(row.followed_at.as_deref())
        ));
    }
    lines.join("\n")
}

fn field(value: Option<&str>) -> String {
    format!("\"{}\"", value.unwrap_or("").replace('"', "\"\""))
}
