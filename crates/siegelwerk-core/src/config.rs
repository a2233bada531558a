// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service configuration.
//
// All tunables are passed explicitly into constructors — no component reads
// ambient global state, which keeps every code path deterministic under test.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Complete configuration for the sealing service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealConfig {
    /// TCP port for the HTTP surface.
    pub port: u16,
    /// Long-lived HMAC signing secret, provisioned out-of-band.
    /// Absence (or an empty string) is a fatal startup condition for
    /// seal/unseal — never a per-request error.
    pub hmac_secret: Option<String>,
    /// Turnstile shared secret for the bot-verification collaborator.
    /// When unset, bot verification is an explicit operational bypass.
    pub turnstile_secret: Option<String>,
    /// Path for the SQLite audit trail. When unset, auditing is disabled.
    pub audit_path: Option<PathBuf>,
    /// Logical validity window for an issued nonce, in seconds.
    pub nonce_validity_secs: i64,
    /// Store-level retention for an issued nonce, in seconds. Deliberately
    /// longer than the logical window to tolerate clock/processing skew;
    /// redemption re-checks the logical expiry regardless.
    pub nonce_retention_secs: i64,
    /// Upper bound on the outbound bot-verification call, in milliseconds.
    /// Exceeding it is treated as a verification failure (fail closed).
    pub verify_timeout_ms: u64,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            port: 8787,
            hmac_secret: None,
            turnstile_secret: None,
            audit_path: None,
            nonce_validity_secs: 120,
            nonce_retention_secs: 180,
            verify_timeout_ms: 10_000,
        }
    }
}

impl SealConfig {
    /// Build a configuration from `SIEGELWERK_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: read_env("SIEGELWERK_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            hmac_secret: read_env("SIEGELWERK_HMAC_SECRET"),
            turnstile_secret: read_env("SIEGELWERK_TURNSTILE_SECRET"),
            audit_path: read_env("SIEGELWERK_AUDIT_PATH").map(PathBuf::from),
            nonce_validity_secs: read_env("SIEGELWERK_NONCE_VALIDITY_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.nonce_validity_secs),
            nonce_retention_secs: read_env("SIEGELWERK_NONCE_RETENTION_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.nonce_retention_secs),
            verify_timeout_ms: read_env("SIEGELWERK_VERIFY_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.verify_timeout_ms),
        }
    }
}

/// Read an environment variable, treating unset and empty identically.
fn read_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
