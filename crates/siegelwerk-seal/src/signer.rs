// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HMAC-SHA256 signing and verification over canonically encoded content.
//
// Signing is a pure function of (secret, message). Verification recomputes
// the tag and compares in constant time via `ring::hmac::verify`, so a
// mismatching signature leaks no timing information about the expected value.

use ring::hmac;
use siegelwerk_core::error::{Result, SiegelwerkError};

/// A validated signing secret.
///
/// Construction fails fast on an absent or empty secret — producing an
/// unkeyed (or trivially keyed) tag would silently void the tamper-evidence
/// guarantee, so this is a fatal configuration error, not a per-request one.
pub struct SigningSecret {
    key: hmac::Key,
}

impl SigningSecret {
    /// Build a secret from raw key material.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(SiegelwerkError::SecretMissing);
        }
        Ok(Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
        })
    }

    /// Build a secret from optional configuration, rejecting absence.
    pub fn from_config(secret: Option<&str>) -> Result<Self> {
        Self::new(secret.unwrap_or_default())
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never reach logs.
        f.write_str("SigningSecret(..)")
    }
}

/// Compute the HMAC-SHA256 tag over the UTF-8 bytes of `message`, rendered
/// as lowercase hexadecimal.
pub fn sign(secret: &SigningSecret, message: &str) -> String {
    let tag = hmac::sign(&secret.key, message.as_bytes());
    hex::encode(tag.as_ref())
}

/// Check `signature_hex` against a freshly computed tag for `message`.
///
/// A malformed hex string is simply an invalid signature, not an error.
pub fn verify(secret: &SigningSecret, message: &str, signature_hex: &str) -> bool {
    let Ok(tag) = hex::decode(signature_hex) else {
        return false;
    };
    hmac::verify(&secret.key, message.as_bytes(), &tag).is_ok()
}
