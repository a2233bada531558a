// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Payload validation — structural shape plus the check-digit consistency
// rule across the fixed indicator set.
//
// The check digit is the sum of a score's four fractional digits, modulo 10.
// All scores in one submission must share the same check digit; a client
// that edits one score without recomputing its fractional checksum (or
// without updating the sibling scores to match) is immediately detectable.
// This is a cheap economic deterrent — the real tamper-evidence guarantee
// comes from the HMAC signature in `signer`.

use serde_json::Value;
use siegelwerk_core::error::{Result, SiegelwerkError};
use siegelwerk_core::types::INDICATOR_KEYS;

/// A score that passed format validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInfo {
    /// Parsed numeric value.
    pub value: f64,
    /// Sum of the four fractional digits, modulo 10.
    pub check: u8,
}

/// Parse a profile score into its value and check digit.
///
/// Accepts a string in fixed `D{1,3}.DDDD` form, or a number (rendered to
/// four fractional digits first). Returns `None` on any format violation.
pub fn parse_score(raw: &Value) -> Option<ScoreInfo> {
    let rendered = match raw {
        Value::Number(n) => format!("{:.4}", n.as_f64()?),
        Value::String(s) => s.clone(),
        _ => return None,
    };

    let (int_part, frac_part) = rendered.split_once('.')?;
    if int_part.is_empty() || int_part.len() > 3 {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac_part.len() != 4 || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value: f64 = rendered.parse().ok()?;
    let digit_sum: u32 = frac_part.bytes().map(|b| u32::from(b - b'0')).sum();

    Some(ScoreInfo {
        value,
        check: (digit_sum % 10) as u8,
    })
}

/// Validate a decoded submission against the expected nonce.
///
/// Steps run in order and short-circuit on the first failure:
/// structural shape, field types, nonce equality, indicator presence, then
/// per-score format / range / check-digit consistency. Extra profile keys
/// are tolerated but not validated.
pub fn validate_submission(submission: &Value, expected_nonce: &str) -> Result<()> {
    let Some(obj) = submission.as_object() else {
        return Err(SiegelwerkError::BadProfileObject);
    };
    let Some(profile) = obj.get("profile").and_then(Value::as_object) else {
        return Err(SiegelwerkError::MissingProfile);
    };

    let context_messages = obj.get("context_messages");
    if !context_messages.is_some_and(|v| v.is_i64() || v.is_u64()) {
        return Err(SiegelwerkError::ContextMessagesNotInt);
    }
    if !obj.get("analysis_summary").is_some_and(Value::is_string) {
        return Err(SiegelwerkError::AnalysisSummaryNotString);
    }

    if obj.get("nonce").and_then(Value::as_str) != Some(expected_nonce) {
        return Err(SiegelwerkError::NonceMismatch);
    }

    for key in INDICATOR_KEYS {
        if !profile.contains_key(key) {
            return Err(SiegelwerkError::MissingIndicator(key.into()));
        }
    }

    // Reference check digit comes from the first indicator; every other
    // score must agree with it.
    let first_key = INDICATOR_KEYS[0];
    let reference = profile
        .get(first_key)
        .and_then(parse_score)
        .ok_or_else(|| SiegelwerkError::BadScore(first_key.into()))?;

    for key in INDICATOR_KEYS {
        let info = profile
            .get(key)
            .and_then(parse_score)
            .ok_or_else(|| SiegelwerkError::BadScore(key.into()))?;
        if info.check != reference.check {
            return Err(SiegelwerkError::CheckDigitMismatch);
        }
        if !(0.0..=100.0).contains(&info.value) {
            return Err(SiegelwerkError::ScoreOutOfRange);
        }
    }

    Ok(())
}
