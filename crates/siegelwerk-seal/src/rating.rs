// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Score derivation — the fixed affine transform from profile mean to a
// bounded normalized score.

use serde_json::{Map, Value};

/// Lower bound of the normalized score range.
pub const IQ_FLOOR: i64 = 70;

/// Upper bound of the normalized score range.
pub const IQ_CEILING: i64 = 160;

/// Derive the normalized score from a submission profile.
///
/// `round(70 + 0.9 * mean)`, clamped into `[70, 160]`, where the mean is
/// taken over every profile value that parses as a number. Validation has
/// already guaranteed the fixed indicator set parses; tolerated extra keys
/// that do not parse are simply excluded from the mean.
pub fn derive_iq(profile: &Map<String, Value>) -> i64 {
    let scores: Vec<f64> = profile.values().filter_map(numeric_value).collect();
    let mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    let iq = (70.0 + mean * 0.9).round() as i64;
    iq.clamp(IQ_FLOOR, IQ_CEILING)
}

fn numeric_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use siegelwerk_core::types::INDICATOR_KEYS;

    fn profile_of(score: &str) -> Map<String, Value> {
        INDICATOR_KEYS
            .iter()
            .map(|k| (k.to_string(), json!(score)))
            .collect()
    }

    #[test]
    fn mean_fifty_gives_115() {
        let profile = profile_of("50.0000");
        assert_eq!(derive_iq(&profile), 115);
    }

    #[test]
    fn clamped_to_floor_and_ceiling() {
        assert_eq!(derive_iq(&profile_of("0.0000")), 70);
        // 70 + 0.9*100 = 160, exactly the ceiling.
        assert_eq!(derive_iq(&profile_of("100.0000")), 160);
    }

    #[test]
    fn rounds_to_nearest_integer() {
        // mean 50.6 -> 70 + 45.54 = 115.54 -> 116
        let profile = profile_of("50.6000");
        assert_eq!(derive_iq(&profile), 116);
    }

    #[test]
    fn unparseable_extras_are_excluded() {
        let mut profile = profile_of("50.0000");
        profile.insert("vibes".into(), json!("immaculate"));
        profile.insert("notes".into(), json!({"nested": true}));
        assert_eq!(derive_iq(&profile), 115);
    }

    #[test]
    fn empty_profile_hits_floor() {
        assert_eq!(derive_iq(&Map::new()), 70);
    }
}
