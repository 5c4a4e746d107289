//! Native accelerator class signatures and constructor introspection.
//!
//! The execution layer constructs native classes from a flat table of keyword
//! arguments. Each class ships a [`NativeClass`] descriptor carrying its
//! constructor signature (parameter names and defaults); backends without
//! signature metadata expose an opaque descriptor, which cannot be
//! introspected.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::ParamValue;

/// One constructor parameter of a native class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeParam {
    pub name: String,
    pub default: ParamValue,
}

/// Constructor signature descriptor for a native accelerator class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeClass {
    pub name: String,
    /// `None` when the binding exposes no constructor metadata.
    pub signature: Option<Vec<NativeParam>>,
}

impl NativeClass {
    /// Create a class descriptor with an empty constructor signature.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: Some(Vec::new()),
        }
    }

    /// Create a class descriptor whose constructor cannot be introspected.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: None,
        }
    }

    /// Append a constructor parameter with its default value.
    pub fn with_param(mut self, name: impl Into<String>, default: impl Into<ParamValue>) -> Self {
        self.signature.get_or_insert_with(Vec::new).push(NativeParam {
            name: name.into(),
            default: default.into(),
        });
        self
    }
}

/// Collect `class`'s constructor parameter defaults, skipping `excluded` names.
///
/// Fails when the class exposes no signature metadata.
pub fn constructor_defaults(
    class: &NativeClass,
    excluded: &HashSet<String>,
) -> Result<HashMap<String, ParamValue>> {
    let Some(signature) = &class.signature else {
        return Err(Error::Introspection {
            class: class.name.clone(),
        });
    };
    Ok(signature
        .iter()
        .filter(|p| !excluded.contains(&p.name))
        .map(|p| (p.name.clone(), p.default.clone()))
        .collect())
}
