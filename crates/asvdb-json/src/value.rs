// Dweve ASVDb - Benchmark results database
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lenient field decoders shared by the document types.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Render a JSON parameter value the way it is stored on an axis.
///
/// Strings are taken as-is, `null` becomes `"NaN"` and any other value
/// becomes its JSON text.
pub fn param_value_to_string(value: JsonValue) -> String {
    match value {
        JsonValue::String(s) => s,
        JsonValue::Null => "NaN".to_string(),
        other => other.to_string(),
    }
}

/// Parameter axes: a list of lists of values.
pub(crate) fn axes<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Vec<JsonValue>> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|axis| axis.into_iter().map(param_value_to_string).collect())
        .collect())
}

/// An integer that older writers may have emitted as a float (`1.0`).
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("expected an integer, found {}", value))),
    }
}

/// A schema version marker.
pub(crate) fn version<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = integer(deserializer)?;
    u32::try_from(v).map_err(|_| D::Error::custom(format!("invalid schema version {}", v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "axes")]
        params: Vec<Vec<String>>,
        #[serde(deserialize_with = "version")]
        version: u32,
        #[serde(deserialize_with = "integer")]
        date: i64,
    }

    #[test]
    fn test_param_value_to_string() {
        assert_eq!(param_value_to_string(json!("dolphins.csv")), "dolphins.csv");
        assert_eq!(param_value_to_string(json!(100)), "100");
        assert_eq!(param_value_to_string(json!(1.5)), "1.5");
        assert_eq!(param_value_to_string(json!(true)), "true");
        assert_eq!(param_value_to_string(json!(null)), "NaN");
    }

    #[test]
    fn test_lenient_fields() {
        let probe: Probe = serde_json::from_value(json!({
            "params": [["a", 1], [null]],
            "version": 1.0,
            "date": 1571346000000u64
        }))
        .unwrap();
        assert_eq!(probe.params, vec![vec!["a", "1"], vec!["NaN"]]);
        assert_eq!(probe.version, 1);
        assert_eq!(probe.date, 1_571_346_000_000);
    }

    #[test]
    fn test_rejects_fractional_version() {
        let err = serde_json::from_value::<Probe>(json!({
            "params": [],
            "version": 1.5,
            "date": 0
        }))
        .err()
        .unwrap();
        assert!(err.to_string().contains("expected an integer"));
    }

    #[test]
    fn test_rejects_negative_version() {
        assert!(serde_json::from_value::<Probe>(json!({
            "params": [],
            "version": -1,
            "date": 0
        }))
        .is_err());
    }
}
