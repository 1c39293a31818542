//! JSON output for snapshots and diff views.
//!
//! Serializes any renderable sequence for scripting and piping.

use serde::Serialize;

pub fn render<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| String::from("[]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::diff::LostFollower;

    #[test]
    fn renders_null_for_missing_timestamps() {
        let rendered = render(&vec![LostFollower {
            username: "bob".to_string(),
            last_seen: None,
        }]);

        assert!(rendered.contains("\"bob\""));
        assert!(rendered.contains("null"));
    }
}
