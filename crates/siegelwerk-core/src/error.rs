// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Siegelwerk.
//
// Every client-facing failure maps to a stable machine-readable wire code and
// an HTTP status. Configuration and infrastructure failures are kept distinct
// so they can never be surfaced as a signed-looking response.

use thiserror::Error;

/// Top-level error type for all Siegelwerk operations.
#[derive(Debug, Error)]
pub enum SiegelwerkError {
    // -- Request shell --
    #[error("request body is not valid JSON or is missing required fields")]
    BadJson,

    #[error("request is missing the token field")]
    MissingToken,

    #[error("no such route")]
    RouteNotFound,

    // -- Nonce ledger --
    #[error("nonce is unknown or already consumed")]
    NonceInvalid,

    #[error("nonce is past its validity window")]
    NonceExpired,

    // -- Bot verification --
    #[error("bot verification failed")]
    BotSuspected,

    // -- Payload validation --
    #[error("profile_json is not a JSON-encoded string")]
    ProfileNotJson,

    #[error("submission is not a JSON object")]
    BadProfileObject,

    #[error("submission lacks a profile object")]
    MissingProfile,

    #[error("context_messages is not an integer")]
    ContextMessagesNotInt,

    #[error("analysis_summary is not a string")]
    AnalysisSummaryNotString,

    #[error("embedded nonce does not match the nonce being redeemed")]
    NonceMismatch,

    #[error("profile is missing indicator {0}")]
    MissingIndicator(String),

    #[error("indicator {0} has a malformed score")]
    BadScore(String),

    #[error("scores do not share a common check digit")]
    CheckDigitMismatch,

    #[error("score outside the [0, 100] range")]
    ScoreOutOfRange,

    // -- Token verification --
    #[error("token lacks the sealed-token prefix")]
    InvalidTokenFormat,

    #[error("token could not be decoded or parsed")]
    TokenParseFailed,

    #[error("signature mismatch — token has been tampered with")]
    SignatureInvalid,

    // -- Configuration / infrastructure --
    #[error("signing secret is absent or empty")]
    SecretMissing,

    #[error("entropy source failure: {0}")]
    Entropy(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SiegelwerkError {
    /// The stable machine-readable code surfaced to clients.
    ///
    /// Codes are part of the wire contract — they never change once shipped.
    /// Indicator-specific failures embed the indicator name so a client can
    /// point at the exact offending score.
    pub fn wire_code(&self) -> String {
        match self {
            Self::BadJson => "bad_json".into(),
            Self::MissingToken => "missing_token".into(),
            Self::RouteNotFound => "not_found".into(),
            Self::NonceInvalid => "nonce_invalid".into(),
            Self::NonceExpired => "nonce_expired".into(),
            Self::BotSuspected => "bot_suspected".into(),
            Self::ProfileNotJson => "profile_not_json".into(),
            Self::BadProfileObject => "bad_profile_obj".into(),
            Self::MissingProfile => "missing_profile".into(),
            Self::ContextMessagesNotInt => "context_messages_not_int".into(),
            Self::AnalysisSummaryNotString => "analysis_summary_not_string".into(),
            Self::NonceMismatch => "nonce_mismatch".into(),
            Self::MissingIndicator(key) => format!("missing_key_{key}"),
            Self::BadScore(key) => format!("bad_score_{key}"),
            Self::CheckDigitMismatch => "check_digit_mismatch".into(),
            Self::ScoreOutOfRange => "score_out_of_range".into(),
            Self::InvalidTokenFormat => "invalid_token_format".into(),
            Self::TokenParseFailed => "token_parse_failed".into(),
            Self::SignatureInvalid => "signature_invalid".into(),
            Self::SecretMissing
            | Self::Entropy(_)
            | Self::Database(_)
            | Self::Server(_)
            | Self::Io(_)
            | Self::Serialization(_) => "internal_error".into(),
        }
    }

    /// HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::RouteNotFound => 404,
            Self::BotSuspected => 403,
            Self::SecretMissing
            | Self::Entropy(_)
            | Self::Database(_)
            | Self::Server(_)
            | Self::Io(_)
            | Self::Serialization(_) => 500,
            _ => 400,
        }
    }

    /// Whether this error carries the explicit tamper flag.
    ///
    /// Only a signature mismatch is flagged — it is the one failure that
    /// proves the sealed record was altered after signing, as opposed to a
    /// request that was merely malformed.
    pub fn is_tampered(&self) -> bool {
        matches!(self, Self::SignatureInvalid)
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SiegelwerkError>;
