// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Nonce ledger — create-once, expire-after-TTL, delete-on-read storage for
// anti-replay tokens.
//
// The store retains entries for longer (180 s by default) than the logical
// validity window (120 s): redemption must therefore re-check the recorded
// expiry against current time rather than trusting store presence alone.
// The skew tolerance is intentional, not a bug.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use siegelwerk_core::config::SealConfig;
use siegelwerk_core::error::{Result, SiegelwerkError};
use siegelwerk_core::types::IssuedNonce;
use tracing::{debug, instrument};

/// A recorded nonce with both expiry horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceEntry {
    /// When the nonce was issued.
    pub issued_at: DateTime<Utc>,
    /// Logical validity bound — redemption past this instant fails even if
    /// the store still holds the entry.
    pub expires_at: DateTime<Utc>,
    /// Store-level retention bound, strictly later than `expires_at`.
    pub retained_until: DateTime<Utc>,
}

/// Key-value store abstraction for nonce entries.
///
/// `take` must be atomic remove-and-return: under concurrent redemption of
/// the same nonce, at most one caller may observe the entry. Implementations
/// backed by stores without a conditional-delete primitive must serialize
/// per key.
pub trait NonceStore: Send + Sync {
    /// Record a freshly issued nonce. Entries are never overwritten in
    /// practice — identifiers carry 128 bits of entropy.
    fn put(&self, nonce: &str, entry: NonceEntry) -> Result<()>;

    /// Atomically remove and return the entry, if present and still within
    /// its store-level retention window.
    fn take(&self, nonce: &str, now: DateTime<Utc>) -> Result<Option<NonceEntry>>;

    /// Drop entries past their retention bound; returns how many were
    /// removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize>;
}

/// In-memory `NonceStore` backed by a mutex-guarded map.
///
/// The mutex makes `take` an atomic check-and-delete, giving at-most-once
/// redemption under arbitrarily many concurrent workers. Expiry is lazy:
/// entries past retention are treated as absent on read and reclaimed by
/// `purge_expired`.
#[derive(Default)]
pub struct MemoryNonceStore {
    entries: Mutex<HashMap<String, NonceEntry>>,
}

impl MemoryNonceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, NonceEntry>>> {
        self.entries
            .lock()
            .map_err(|_| SiegelwerkError::Database("nonce store lock poisoned".into()))
    }
}

impl NonceStore for MemoryNonceStore {
    fn put(&self, nonce: &str, entry: NonceEntry) -> Result<()> {
        self.lock()?.insert(nonce.to_owned(), entry);
        Ok(())
    }

    fn take(&self, nonce: &str, now: DateTime<Utc>) -> Result<Option<NonceEntry>> {
        let mut entries = self.lock()?;
        match entries.remove(nonce) {
            Some(entry) if entry.retained_until > now => Ok(Some(entry)),
            // Past retention — the store would already have expired it.
            Some(_) | None => Ok(None),
        }
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, entry| entry.retained_until > now);
        Ok(before - entries.len())
    }
}

/// Issues and redeems anti-replay nonces against a backing store.
pub struct NonceLedger<S: NonceStore> {
    store: S,
    validity: Duration,
    retention: Duration,
}

impl<S: NonceStore> NonceLedger<S> {
    /// Build a ledger over `store` with the configured validity (logical)
    /// and retention (store-level) windows.
    pub fn new(store: S, config: &SealConfig) -> Self {
        Self {
            store,
            validity: Duration::seconds(config.nonce_validity_secs),
            retention: Duration::seconds(config.nonce_retention_secs),
        }
    }

    /// Generate and record a fresh nonce.
    #[instrument(skip_all)]
    pub fn issue(&self, now: DateTime<Utc>) -> Result<IssuedNonce> {
        let nonce = generate_nonce()?;
        let entry = NonceEntry {
            issued_at: now,
            expires_at: now + self.validity,
            retained_until: now + self.retention,
        };
        self.store.put(&nonce, entry)?;

        debug!(%nonce, expires_at = %entry.expires_at, "nonce issued");
        Ok(IssuedNonce {
            nonce,
            issued_at: now,
            expires_at: entry.expires_at,
        })
    }

    /// Consume a nonce, exactly once.
    ///
    /// The entry is removed from the store before the logical expiry check,
    /// so an expired redemption still burns the nonce — strict anti-replay
    /// wins over retry convenience.
    #[instrument(skip(self))]
    pub fn redeem(&self, nonce: &str, now: DateTime<Utc>) -> Result<NonceEntry> {
        match self.store.take(nonce, now)? {
            None => Err(SiegelwerkError::NonceInvalid),
            Some(entry) if now > entry.expires_at => {
                debug!(%nonce, expired_at = %entry.expires_at, "nonce past logical validity");
                Err(SiegelwerkError::NonceExpired)
            }
            Some(entry) => {
                debug!(%nonce, "nonce redeemed");
                Ok(entry)
            }
        }
    }

    /// Reclaim entries past their retention bound.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        self.store.purge_expired(now)
    }
}

/// 128 bits from the OS CSPRNG, rendered as uppercase hex.
fn generate_nonce() -> Result<String> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes)
        .map_err(|_| SiegelwerkError::Entropy("nonce generation failed".into()))?;
    Ok(hex::encode_upper(bytes))
}
