// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Audit trail — append-only SQLite log of every sealing operation.
//
// Schema:
//   seal_audit(
//     id         INTEGER PRIMARY KEY AUTOINCREMENT,
//     timestamp  TEXT    NOT NULL,   -- RFC 3339
//     operation  TEXT    NOT NULL,   -- "issue", "seal", "unseal"
//     nonce      TEXT    NOT NULL,   -- nonce involved ("" for unseal)
//     success    INTEGER NOT NULL,   -- 0 = failure, 1 = success
//     detail     TEXT                -- error code or token fingerprint
//   )

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use siegelwerk_core::error::SiegelwerkError;
use tracing::{debug, instrument};

/// Convert a `rusqlite::Error` into a `SiegelwerkError::Database`.
fn db_err(e: rusqlite::Error) -> SiegelwerkError {
    SiegelwerkError::Database(e.to_string())
}

/// SHA-256 fingerprint of a token string, as lowercase hex.
///
/// The audit log records fingerprints rather than full tokens so the log
/// never becomes a store of replayable bearer material.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// A single entry in the audit log, used for queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: String,
    pub operation: String,
    pub nonce: String,
    pub success: bool,
    pub detail: Option<String>,
}

/// Append-only audit log backed by a SQLite database.
///
/// Every issue, seal, and unseal is recorded with a timestamp, the nonce
/// involved, a success/failure flag, and either the error code or the
/// fingerprint of the produced token.
pub struct AuditLog {
    conn: Connection,
}

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS seal_audit (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp  TEXT    NOT NULL,
    operation  TEXT    NOT NULL,
    nonce      TEXT    NOT NULL,
    success    INTEGER NOT NULL,
    detail     TEXT
);";

impl AuditLog {
    /// Open (or create) the audit database at `path`.
    ///
    /// WAL mode is enabled for better concurrent-read performance.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SiegelwerkError> {
        let conn = Connection::open(path).map_err(db_err)?;

        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("audit log opened");
        Ok(Self { conn })
    }

    /// Open an in-memory audit database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SiegelwerkError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("in-memory audit log opened");
        Ok(Self { conn })
    }

    /// Record a new audit entry.
    ///
    /// `operation` is one of `"issue"`, `"seal"`, `"unseal"`. `detail` holds
    /// the wire error code on failure or a token fingerprint on success.
    #[instrument(skip(self, detail), fields(%operation, %nonce, success))]
    pub fn record(
        &self,
        operation: &str,
        nonce: &str,
        success: bool,
        detail: Option<&str>,
    ) -> Result<(), SiegelwerkError> {
        let timestamp = Utc::now().to_rfc3339();
        let success_int: i32 = if success { 1 } else { 0 };

        self.conn
            .execute(
                "INSERT INTO seal_audit (timestamp, operation, nonce, success, detail)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![timestamp, operation, nonce, success_int, detail],
            )
            .map_err(db_err)?;

        debug!("audit entry recorded");
        Ok(())
    }

    /// Retrieve all entries for a given nonce, ordered by timestamp
    /// ascending — the full issue-to-seal history of one token.
    pub fn entries_for_nonce(&self, nonce: &str) -> Result<Vec<AuditEntry>, SiegelwerkError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, nonce, success, detail
                 FROM seal_audit
                 WHERE nonce = ?1
                 ORDER BY timestamp ASC",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![nonce], |row| {
                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    operation: row.get(2)?,
                    nonce: row.get(3)?,
                    success: row.get::<_, i32>(4)? != 0,
                    detail: row.get(5)?,
                })
            })
            .map_err(db_err)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(db_err)?);
        }
        Ok(entries)
    }

    /// Retrieve the most recent `limit` entries, ordered newest-first.
    pub fn recent_entries(&self, limit: u32) -> Result<Vec<AuditEntry>, SiegelwerkError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, nonce, success, detail
                 FROM seal_audit
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    operation: row.get(2)?,
                    nonce: row.get(3)?,
                    success: row.get::<_, i32>(4)? != 0,
                    detail: row.get(5)?,
                })
            })
            .map_err(db_err)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(db_err)?);
        }
        Ok(entries)
    }

    /// Return the total number of entries in the audit log.
    pub fn count(&self) -> Result<u64, SiegelwerkError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM seal_audit", [], |row| row.get(0))
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_log() -> AuditLog {
        AuditLog::open_in_memory().expect("open in-memory audit log")
    }

    #[test]
    fn record_and_count() {
        let log = make_log();
        assert_eq!(log.count().unwrap(), 0);

        log.record("issue", "AAAA", true, None).unwrap();
        log.record("seal", "AAAA", true, Some("fp:deadbeef")).unwrap();

        assert_eq!(log.count().unwrap(), 2);
    }

    #[test]
    fn entries_for_nonce_follow_lifecycle() {
        let log = make_log();
        log.record("issue", "AAAA", true, None).unwrap();
        log.record("issue", "BBBB", true, None).unwrap();
        log.record("seal", "AAAA", false, Some("check_digit_mismatch"))
            .unwrap();

        let entries = log.entries_for_nonce("AAAA").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, "issue");
        assert!(entries[0].success);
        assert_eq!(entries[1].operation, "seal");
        assert!(!entries[1].success);
        assert_eq!(entries[1].detail.as_deref(), Some("check_digit_mismatch"));
    }

    #[test]
    fn recent_entries_ordering() {
        let log = make_log();
        for i in 0..5 {
            log.record("unseal", &format!("N{i}"), true, None).unwrap();
        }

        let recent = log.recent_entries(3).unwrap();
        assert_eq!(recent.len(), 3);
        // Newest first — IDs should be descending.
        assert!(recent[0].id > recent[1].id);
        assert!(recent[1].id > recent[2].id);
    }

    #[test]
    fn fingerprint_is_stable_and_token_free() {
        let token = "DNA2::eyJ2IjoxfQ==";
        let fp = token_fingerprint(token);
        assert_eq!(fp, token_fingerprint(token));
        assert_eq!(fp.len(), 64);
        assert!(!fp.contains("DNA2"));
    }
}
