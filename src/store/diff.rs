//! Snapshot comparison engine.
//!
//! Two views over committed snapshots:
//! - lost followers: in the previous snapshot's follower set, gone from the latest
//! - not following back: followed in the latest snapshot, absent from its followers
//!
//! Both return empty results when too few snapshots exist, never an error.
//! The set comparisons are pure functions over the query results.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::Result;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LostFollower {
    pub username: String,
    pub last_seen: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFollowingBack {
    pub username: String,
    pub followed_at: Option<String>,
}

/// Followers present in the second-newest snapshot but gone from the newest.
///
/// Needs two snapshots to compare; with fewer, the view is empty.
pub fn lost_followers(store: &Store) -> Result<Vec<LostFollower>> {
    let snapshots = store.list_snapshots()?;
    if snapshots.len() < 2 {
        return Ok(Vec::new());
    }

    let current = &snapshots[0];
    let previous = &snapshots[1];

    let current_set = store.follower_usernames(current.id)?;
    let previous_set = store.follower_usernames(previous.id)?;

    Ok(compare_followers(
        &previous_set,
        &current_set,
        &previous.taken_at,
    ))
}

/// Accounts followed in the newest snapshot that do not follow back.
pub fn not_following_back(store: &Store) -> Result<Vec<NotFollowingBack>> {
    let snapshots = store.list_snapshots()?;
    let Some(current) = snapshots.first() else {
        return Ok(Vec::new());
    };

    let followers = store.follower_usernames(current.id)?;
    let following = store.following_map(current.id)?;

    Ok(compare_following(&following, &followers))
}

/// Set difference previous - current, tagged with the previous snapshot time.
pub fn compare_followers(
    previous: &HashSet<String>,
    current: &HashSet<String>,
    last_seen: &str,
) -> Vec<LostFollower> {
    let mut lost: Vec<LostFollower> = previous
        .iter()
        .filter(|username| !current.contains(username.as_str()))
        .map(|username| LostFollower {
            username: username.clone(),
            last_seen: Some(last_seen.to_string()),
        })
        .collect();

    // byte-wise username order keeps reruns bit-identical
    lost.sort_by(|a, b| a.username.cmp(&b.username));
    lost
}

/// Everyone in the following map missing from the follower set.
pub fn compare_following(
    following: &HashMap<String, Option<String>>,
    followers: &HashSet<String>,
) -> Vec<NotFollowingBack> {
    let mut out: Vec<NotFollowingBack> = following
        .iter()
        .filter(|(username, _)| !followers.contains(username.as_str()))
        .map(|(username, followed_at)| NotFollowingBack {
            username: username.clone(),
            followed_at: followed_at.clone(),
        })
        .collect();

    out.sort_by(|a, b| a.username.cmp(&b.username));
    out
}
