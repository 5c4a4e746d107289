//! YAML override files for estimator parameters.
//!
//! Supports a small override file format:
//!
//! ```yaml
//! "**":
//!   params:
//!     num_workers: 4
//!
//! linear_regression:
//!   params:
//!     max_iter: 200
//!     loss: "squaredError"
//! ```
//!
//! The `**` selector matches every estimator; later entries override earlier
//! ones, so estimator-specific sections should follow the wildcard. The
//! resulting map feeds [`EstimatorStore::with_overrides`].
//!
//! [`EstimatorStore::with_overrides`]: crate::store::EstimatorStore::with_overrides

use std::collections::HashMap;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::value::ParamValue;

/// Load parameter overrides from a YAML file for the given estimator.
pub fn load_override_file(path: &Path, estimator: &str) -> Result<HashMap<String, ParamValue>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::OverrideFile {
        reason: format!("failed to read {path:?}: {e}"),
    })?;
    load_override_string(&content, estimator)
}

/// Parse a YAML string and extract the overrides applicable to `estimator`.
pub fn load_override_string(yaml: &str, estimator: &str) -> Result<HashMap<String, ParamValue>> {
    let doc: Value = serde_yaml::from_str(yaml).map_err(|e| Error::OverrideFile {
        reason: format!("failed to parse YAML: {e}"),
    })?;

    let mapping = doc.as_mapping().ok_or_else(|| Error::OverrideFile {
        reason: "root must be a mapping".into(),
    })?;

    let mut result = HashMap::new();

    for (key, section) in mapping {
        let selector = key.as_str().ok_or_else(|| Error::OverrideFile {
            reason: "selectors must be strings".into(),
        })?;

        if !matches_estimator(selector, estimator) {
            continue;
        }

        let section_map = section.as_mapping().ok_or_else(|| Error::OverrideFile {
            reason: format!("value for '{selector}' must be a mapping"),
        })?;

        let params_key = Value::String("params".to_string());
        if let Some(params) = section_map.get(&params_key) {
            let params_map = params.as_mapping().ok_or_else(|| Error::OverrideFile {
                reason: format!("'{selector}.params' must be a mapping"),
            })?;

            for (pname, pval) in params_map {
                let name = pname.as_str().ok_or_else(|| Error::OverrideFile {
                    reason: "parameter names must be strings".into(),
                })?;

                if let Some(value) = yaml_value_to_param(pval) {
                    // Later entries override earlier ones
                    result.insert(name.to_string(), value);
                }
            }
        }
    }

    Ok(result)
}

/// Whether a selector applies to the given estimator name.
///
/// `**` matches everything; anything else is an exact match.
fn matches_estimator(selector: &str, estimator: &str) -> bool {
    selector == "**" || selector == estimator
}

/// Convert a YAML scalar or homogeneous sequence to a `ParamValue`.
///
/// Nested mappings are not representable as parameter values and are skipped.
fn yaml_value_to_param(val: &Value) -> Option<ParamValue> {
    match val {
        Value::Bool(b) => Some(ParamValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(ParamValue::Integer)
            .or_else(|| n.as_f64().map(ParamValue::Double)),
        Value::String(s) => Some(ParamValue::String(s.clone())),
        Value::Sequence(seq) => infer_sequence_type(seq),
        Value::Null => Some(ParamValue::NotSet),
        _ => None,
    }
}

fn infer_sequence_type(seq: &[Value]) -> Option<ParamValue> {
    // Element type is taken from the first element; empty defaults to strings
    match seq.first() {
        None => Some(ParamValue::StringArray(vec![])),
        Some(Value::Bool(_)) => {
            let bools: Option<Vec<bool>> = seq.iter().map(|v| v.as_bool()).collect();
            bools.map(ParamValue::BoolArray)
        }
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => {
            let ints: Option<Vec<i64>> = seq.iter().map(|v| v.as_i64()).collect();
            ints.map(ParamValue::IntegerArray)
        }
        Some(Value::Number(_)) => {
            let floats: Option<Vec<f64>> = seq.iter().map(|v| v.as_f64()).collect();
            floats.map(ParamValue::DoubleArray)
        }
        Some(Value::String(_)) => {
            let strings: Option<Vec<String>> = seq
                .iter()
                .map(|v| v.as_str().map(|s| s.to_string()))
                .collect();
            strings.map(ParamValue::StringArray)
        }
        _ => None,
    }
}
