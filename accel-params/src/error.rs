//! Error taxonomy for parameter declaration, mapping, and synchronization.
//!
//! All errors surface synchronously to the caller of the triggering
//! operation; nothing here is a transient-failure domain, so nothing is
//! retried. Within a batch set, earlier keys stay applied when a later key
//! fails — callers needing atomicity must pre-validate.

use thiserror::Error;

use crate::value::ParamValue;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A batch set named both sides of a two-way alias.
    #[error("'{native}' is an alias of '{orch}', set one or the other")]
    AmbiguousAlias { orch: String, native: String },

    /// The value has no equivalent on the native side for this parameter.
    #[error("value '{}' for '{}' param is unsupported, expected one of: {}", .value, .name, format_values(.supported))]
    UnsupportedValue {
        name: String,
        value: ParamValue,
        supported: Vec<ParamValue>,
    },

    /// The name matches neither a declared parameter nor a native table key.
    #[error("unsupported param '{name}'")]
    UnknownParameter { name: String },

    /// The native class exposes no constructor signature metadata.
    #[error("cannot introspect constructor of native class '{class}'")]
    Introspection { class: String },

    #[error("parameter '{name}' already declared")]
    AlreadyDeclared { name: String },

    #[error("parameter '{name}' not declared")]
    NotDeclared { name: String },

    /// The store refused the value (type, range, or read-only violation).
    #[error("parameter '{name}' rejected: {reason}")]
    Rejected { name: String, reason: String },

    #[error("override file: {reason}")]
    OverrideFile { reason: String },
}

fn format_values(values: &[ParamValue]) -> String {
    let mut rendered: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    rendered.sort();
    rendered.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_value_names_the_supported_set() {
        let err = Error::UnsupportedValue {
            name: "loss".into(),
            value: ParamValue::String("huber".into()),
            supported: vec![ParamValue::String("squared_loss".into())],
        };
        let msg = err.to_string();
        assert!(msg.contains("huber"));
        assert!(msg.contains("loss"));
        assert!(msg.contains("squared_loss"));
    }

    #[test]
    fn test_alias_message_names_both_sides() {
        let err = Error::AmbiguousAlias {
            orch: "k".into(),
            native: "n_components".into(),
        };
        assert_eq!(
            err.to_string(),
            "'n_components' is an alias of 'k', set one or the other"
        );
    }
}
