// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Siegelwerk sealing service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed, ordered set of indicator names every submission profile must
/// carry. Shared by the payload validator and the sealing service so that no
/// code path ever iterates a client-controlled key set.
///
/// Extra profile keys beyond this list are tolerated but not validated.
pub const INDICATOR_KEYS: [&str; 28] = [
    "logical_reasoning",
    "pattern_recognition",
    "verbal_comprehension",
    "mathematical_ability",
    "spatial_reasoning",
    "memory_recall",
    "processing_speed",
    "abstract_thinking",
    "critical_analysis",
    "problem_decomposition",
    "deductive_inductive_reasoning",
    "systems_thinking",
    "creative_problem_solving",
    "knowledge_integration",
    "deep_thinking",
    "critical_thinking",
    "building",
    "electronics",
    "software",
    "communication",
    "creativity",
    "analysis",
    "leadership",
    "research",
    "problem_solving",
    "technical_depth",
    "collaboration",
    "innovation",
];

/// A freshly issued anti-replay nonce.
///
/// The identifier is 128 bits of CSPRNG output rendered as uppercase hex.
/// `expires_at` is the *logical* validity bound (120 s by default); the
/// store retains the entry somewhat longer to tolerate skew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedNonce {
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Rating band for a derived score.
///
/// Bands are a fixed step function over the normalized score; the label
/// strings are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    GalaxyBrain,
    Genius,
    Smart,
    Average,
    BelowAverage,
    Dumbass,
}

impl Tier {
    /// Band for a normalized score in [70, 160].
    pub fn for_iq(iq: i64) -> Self {
        match iq {
            145.. => Self::GalaxyBrain,
            130..=144 => Self::Genius,
            115..=129 => Self::Smart,
            100..=114 => Self::Average,
            85..=99 => Self::BelowAverage,
            _ => Self::Dumbass,
        }
    }

    /// Wire-format label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GalaxyBrain => "galaxy_brain",
            Self::Genius => "genius",
            Self::Smart => "smart",
            Self::Average => "average",
            Self::BelowAverage => "below_average",
            Self::Dumbass => "dumbass",
        }
    }

    /// Commentary line returned alongside a freshly sealed result.
    pub fn commentary(&self) -> &'static str {
        match self {
            Self::GalaxyBrain => {
                "Galaxy brain detected. You're actually scary smart. Touch grass immediately."
            }
            Self::Genius => {
                "Certified genius. You probably corrected your teacher as a kid. Annoying but impressive."
            }
            Self::Smart => {
                "Above average. Smart enough to know you're not that smart. That's actually smart."
            }
            Self::Average => {
                "Perfectly average. The human equivalent of room temperature. Congratulations?"
            }
            Self::BelowAverage => "Below average. Your brain called. It wants a refund.",
            Self::Dumbass => {
                "Certified dumbass. If stupidity was an Olympic sport, you'd forget to show up."
            }
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An immutable, versioned sealed record.
///
/// Fully self-contained: everything needed to re-derive and check the
/// signature travels inside the record, so verification never consults the
/// nonce store. Field names are the wire format and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedRecord {
    /// Record format version tag.
    pub v: u32,
    /// The nonce that was consumed to produce this record.
    pub nonce: String,
    /// Client-supplied timestamp, epoch milliseconds.
    pub timestamp: i64,
    /// Optional transcript fingerprint; empty string when absent.
    #[serde(default)]
    pub transcript_hash: String,
    /// The full validated submission payload, verbatim.
    pub payload: serde_json::Value,
    /// Derived normalized score.
    pub iq: i64,
    /// Rating band label for the derived score.
    pub tier: String,
    /// Lowercase-hex HMAC-SHA256 over the canonical signable subset.
    pub sig: String,
}

/// Body of a seal request.
///
/// `profile_json` is deliberately double-encoded: a JSON string containing
/// the submission object. Deserialization failure of the outer body is a
/// `bad_json` malformed-request error.
#[derive(Debug, Clone, Deserialize)]
pub struct SealRequest {
    pub nonce: String,
    pub timestamp: i64,
    #[serde(default)]
    pub transcript_hash: Option<String>,
    pub profile_json: String,
    #[serde(default)]
    pub turnstile_token: Option<String>,
}

/// Body of an unseal (token validation) request.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateTokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// Status of the embedded HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerStatus {
    Stopped,
    Starting,
    Running,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_band_edges() {
        assert_eq!(Tier::for_iq(160), Tier::GalaxyBrain);
        assert_eq!(Tier::for_iq(145), Tier::GalaxyBrain);
        assert_eq!(Tier::for_iq(144), Tier::Genius);
        assert_eq!(Tier::for_iq(130), Tier::Genius);
        assert_eq!(Tier::for_iq(115), Tier::Smart);
        assert_eq!(Tier::for_iq(100), Tier::Average);
        assert_eq!(Tier::for_iq(85), Tier::BelowAverage);
        assert_eq!(Tier::for_iq(84), Tier::Dumbass);
        assert_eq!(Tier::for_iq(70), Tier::Dumbass);
    }

    #[test]
    fn indicator_set_is_fixed_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for key in INDICATOR_KEYS {
            assert!(seen.insert(key), "duplicate indicator {key}");
        }
        assert_eq!(INDICATOR_KEYS.len(), 28);
    }

    #[test]
    fn sealed_record_wire_field_names() {
        let record = SealedRecord {
            v: 1,
            nonce: "ABC".into(),
            timestamp: 1_700_000_000_000,
            transcript_hash: String::new(),
            payload: serde_json::json!({}),
            iq: 115,
            tier: "smart".into(),
            sig: "00".into(),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        for field in ["v", "nonce", "timestamp", "transcript_hash", "payload", "iq", "tier", "sig"] {
            assert!(json.get(field).is_some(), "missing wire field {field}");
        }
    }

    #[test]
    fn seal_request_tolerates_missing_optionals() {
        let body = r#"{"nonce":"N","timestamp":1,"profile_json":"{}"}"#;
        let req: SealRequest = serde_json::from_str(body).expect("deserialize");
        assert!(req.transcript_hash.is_none());
        assert!(req.turnstile_token.is_none());
    }
}
