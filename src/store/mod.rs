//! SQLite snapshot storage.
//!
//! Persists imports to a local SQLite database with three tables:
//! - snapshots: id, taken_at, source_filename
//! - followers: (snapshot_id, username)
//! - following: (snapshot_id, username, followed_at)
//!
//! A snapshot and all of its child rows are written in one IMMEDIATE
//! transaction; readers never observe a snapshot with missing children.

pub mod diff;

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, TransactionBehavior};
use serde::Serialize;

use crate::archive::AccountRecord;
use crate::config::Config;
use crate::error::Result;

/// Snapshot metadata stored in database
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub id: i64,
    pub taken_at: String,
    pub source_filename: Option<String>,
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            taken_at TEXT NOT NULL,
            source_filename TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS followers (
            snapshot_id INTEGER NOT NULL,
            username TEXT NOT NULL,
            PRIMARY KEY (snapshot_id, username),
            FOREIGN KEY (snapshot_id) REFERENCES snapshots(id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS following (
            snapshot_id INTEGER NOT NULL,
            username TEXT NOT NULL,
            followed_at TEXT,
            PRIMARY KEY (snapshot_id, username),
            FOREIGN KEY (snapshot_id) REFERENCES snapshots(id) ON DELETE CASCADE
        )",
        [],
    )?;

    Ok(())
}

/// Database handle. Open once per command, reuse across all operations.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the configured database, creating the schema on first use.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(&config.db_path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        // concurrent writers wait for the lock instead of failing fast
        conn.busy_timeout(Duration::from_secs(5))?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    /// Persist one import as a new snapshot.
    ///
    /// The snapshot row and every follower/following row commit together;
    /// on any failure the whole snapshot rolls back. Ids are assigned by
    /// AUTOINCREMENT and strictly increase across the life of the database.
    pub fn create_snapshot(
        &mut self,
        followers: &[AccountRecord],
        following: &[AccountRecord],
        source_filename: Option<&str>,
    ) -> Result<i64> {
        let taken_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        // IMMEDIATE takes the write lock up front, serializing concurrent imports
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO snapshots (taken_at, source_filename) VALUES (?1, ?2)",
            params![taken_at, source_filename],
        )?;

        let snapshot_id = tx.last_insert_rowid();

        let mut stmt =
            tx.prepare_cached("INSERT INTO followers (snapshot_id, username) VALUES (?1, ?2)")?;
        for record in followers {
            stmt.execute(params![snapshot_id, record.username])?;
        }
        drop(stmt);

        let mut stmt = tx.prepare_cached(
            "INSERT INTO following (snapshot_id, username, followed_at) VALUES (?1, ?2, ?3)",
        )?;
        for record in following {
            stmt.execute(params![snapshot_id, record.username, record.ts.as_deref()])?;
        }
        drop(stmt);

        tx.commit()?;

        Ok(snapshot_id)
    }

    /// List all snapshots, newest first. The maximum id is the current snapshot.
    pub fn list_snapshots(&self) -> Result<Vec<Snapshot>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, taken_at, source_filename FROM snapshots ORDER BY id DESC")?;

        let snapshots = stmt
            .query_map([], snapshot_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(snapshots)
    }

    /// Follower usernames recorded in one snapshot.
    pub fn follower_usernames(&self, snapshot_id: i64) -> Result<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT username FROM followers WHERE snapshot_id = ?1")?;

        let usernames = stmt
            .query_map(params![snapshot_id], |row| row.get(0))?
            .collect::<rusqlite::Result<HashSet<String>>>()?;

        Ok(usernames)
    }

    /// Followed usernames recorded in one snapshot, with follow timestamps.
    pub fn following_map(&self, snapshot_id: i64) -> Result<HashMap<String, Option<String>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT username, followed_at FROM following WHERE snapshot_id = ?1")?;

        let map = stmt
            .query_map(params![snapshot_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<HashMap<String, Option<String>>>>()?;

        Ok(map)
    }

    /// Clear all three tables in one transaction. Irreversible.
    ///
    /// Snapshot ids keep counting up afterwards; the AUTOINCREMENT sequence
    /// survives the wipe.
    pub fn wipe_all(&mut self) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM following", [])?;
        tx.execute("DELETE FROM followers", [])?;
        tx.execute("DELETE FROM snapshots", [])?;

        tx.commit()?;
        Ok(())
    }
}

fn snapshot_from_row(row: &rusqlite::Row) -> rusqlite::Result<Snapshot> {
    Ok(Snapshot {
        id: row.get(0)?,
        taken_at: row.get(1)?,
        source_filename: row.get(2)?,
    })
}
