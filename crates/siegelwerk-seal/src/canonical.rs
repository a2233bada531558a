// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canonical JSON encoding — deterministic, key-order-independent
// serialization used as the exact message input to signing.
//
// Two semantically equal values (same keys and values, regardless of key
// insertion order) always produce identical output; any change to any key,
// value, or structure changes the output. The signer and verifier both call
// this function, so the encoding must never diverge between them.

use serde_json::Value;

/// Serialize `value` into its canonical byte form.
///
/// Scalars use the standard JSON scalar encoding. Sequences encode as
/// `[` + comma-joined recursive encodings + `]`. Mappings encode as
/// `{` + comma-joined `"key":value` pairs, ordered by lexicographic sort of
/// the key strings. No whitespace anywhere.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(&mut out, value);
    out
}

fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Keys are encoded as JSON strings, with escaping.
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                if let Some(child) = map.get(*key) {
                    write_canonical(out, child);
                }
            }
            out.push('}');
        }
        // Null, Bool, Number, String: serde_json's compact Display is the
        // standard JSON scalar encoding.
        scalar => out.push_str(&scalar.to_string()),
    }
}
