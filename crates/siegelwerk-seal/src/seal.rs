// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sealing service — orchestrates nonce redemption, bot verification,
// payload validation, score derivation, canonical encoding, and signing
// into the two core operations: seal and unseal.
//
// Seal consumes shared state (the nonce ledger). Unseal is pure: a sealed
// token carries everything needed to re-derive and check its own signature,
// so verification works forever and never touches the store.

use std::net::IpAddr;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use siegelwerk_core::error::{Result, SiegelwerkError};
use siegelwerk_core::types::{SealRequest, SealedRecord, Tier};
use tracing::{debug, instrument};

use crate::canonical::canonicalize;
use crate::ledger::{NonceLedger, NonceStore};
use crate::rating::derive_iq;
use crate::signer::{self, SigningSecret};
use crate::validator::validate_submission;

/// Literal tag prefixed to every rendered token string.
pub const TOKEN_PREFIX: &str = "DNA2::";

/// Current sealed-record format version.
pub const SEALED_VERSION: u32 = 1;

/// Outbound bot-verification collaborator.
///
/// Implementations must be bounded by a timeout and fail closed: a call
/// that errors or times out reports `false`. An unconfigured collaborator
/// passes everything — an explicit operational bypass, not a security
/// default — but a missing client token always fails.
#[async_trait]
pub trait BotVerifier: Send + Sync {
    async fn verify(&self, token: Option<&str>, remote_ip: Option<IpAddr>) -> bool;
}

/// A freshly sealed record plus its rendered token string.
#[derive(Debug, Clone)]
pub struct Sealed {
    pub record: SealedRecord,
    pub token: String,
}

/// The result of successfully verifying a sealed token.
#[derive(Debug, Clone)]
pub struct Unsealed {
    pub iq: i64,
    pub tier: String,
    pub timestamp: i64,
}

/// The sealing service.
pub struct Sealer {
    secret: SigningSecret,
}

impl Sealer {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// Produce a sealed token from a submission.
    ///
    /// The nonce is burned before any later check runs: a request that is
    /// aborted (or fails bot verification or validation) after redemption
    /// has permanently consumed its nonce. Strict anti-replay wins over
    /// retry convenience.
    #[instrument(skip_all, fields(nonce = %request.nonce))]
    pub async fn seal<S: NonceStore>(
        &self,
        ledger: &NonceLedger<S>,
        bot: &dyn BotVerifier,
        request: &SealRequest,
        remote_ip: Option<IpAddr>,
        now: DateTime<Utc>,
    ) -> Result<Sealed> {
        ledger.redeem(&request.nonce, now)?;

        if !bot
            .verify(request.turnstile_token.as_deref(), remote_ip)
            .await
        {
            return Err(SiegelwerkError::BotSuspected);
        }

        let submission: Value = serde_json::from_str(&request.profile_json)
            .map_err(|_| SiegelwerkError::ProfileNotJson)?;
        validate_submission(&submission, &request.nonce)?;

        let profile = submission
            .get("profile")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let iq = derive_iq(&profile);
        let tier = Tier::for_iq(iq);
        let transcript_hash = request.transcript_hash.clone().unwrap_or_default();

        let canonical = signable_subset(
            &request.nonce,
            request.timestamp,
            &transcript_hash,
            &submission,
            iq,
        );
        let sig = signer::sign(&self.secret, &canonical);

        let record = SealedRecord {
            v: SEALED_VERSION,
            nonce: request.nonce.clone(),
            timestamp: request.timestamp,
            transcript_hash,
            payload: submission,
            iq,
            tier: tier.label().to_owned(),
            sig,
        };
        let token = encode_token(&record)?;

        debug!(iq, tier = %tier, "submission sealed");
        Ok(Sealed { record, token })
    }

    /// Verify a previously issued token.
    ///
    /// Pure, replay-tolerant, and time-independent: no freshness check, no
    /// store access. A sealed token remains verifiable forever, unlike the
    /// nonce that produced it.
    #[instrument(skip_all)]
    pub fn unseal(&self, token: &str) -> Result<Unsealed> {
        let Some(encoded) = token.strip_prefix(TOKEN_PREFIX) else {
            return Err(SiegelwerkError::InvalidTokenFormat);
        };

        let bytes = BASE64
            .decode(encoded)
            .map_err(|_| SiegelwerkError::TokenParseFailed)?;
        let record: SealedRecord =
            serde_json::from_slice(&bytes).map_err(|_| SiegelwerkError::TokenParseFailed)?;

        let canonical = signable_subset(
            &record.nonce,
            record.timestamp,
            &record.transcript_hash,
            &record.payload,
            record.iq,
        );
        if !signer::verify(&self.secret, &canonical, &record.sig) {
            return Err(SiegelwerkError::SignatureInvalid);
        }

        debug!(iq = record.iq, "token verified");
        Ok(Unsealed {
            iq: record.iq,
            tier: record.tier,
            timestamp: record.timestamp,
        })
    }
}

/// Canonically encode the signable subset of a record.
///
/// Seal and unseal must build this from the same fields in the same way —
/// byte-identical logic is what makes signatures verifiable at all.
fn signable_subset(
    nonce: &str,
    timestamp: i64,
    transcript_hash: &str,
    submission: &Value,
    iq: i64,
) -> String {
    canonicalize(&json!({
        "nonce": nonce,
        "timestamp": timestamp,
        "transcript_hash": transcript_hash,
        "profile": submission.get("profile").cloned().unwrap_or(Value::Null),
        "context_messages": submission.get("context_messages").cloned().unwrap_or(Value::Null),
        "analysis_summary": submission.get("analysis_summary").cloned().unwrap_or(Value::Null),
        "iq": iq,
    }))
}

fn encode_token(record: &SealedRecord) -> Result<String> {
    let json = serde_json::to_string(record)?;
    Ok(format!("{TOKEN_PREFIX}{}", BASE64.encode(json)))
}
