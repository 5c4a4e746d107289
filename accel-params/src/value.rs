//! Typed parameter values shared by both parameter namespaces.
//!
//! `ParamValue` is the single value representation used on the orchestration
//! side (declared estimator parameters) and in the native parameter table
//! (constructor keyword arguments). Signature tables are shipped as data, so
//! values are serde-(de)serializable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ParamType {
    NotSet,
    Bool,
    Integer,
    Double,
    String,
    BoolArray,
    IntegerArray,
    DoubleArray,
    StringArray,
}

/// A typed parameter value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    #[default]
    NotSet,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    BoolArray(Vec<bool>),
    IntegerArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
}

impl ParamValue {
    /// Returns the parameter type of this value.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::NotSet => ParamType::NotSet,
            Self::Bool(_) => ParamType::Bool,
            Self::Integer(_) => ParamType::Integer,
            Self::Double(_) => ParamType::Double,
            Self::String(_) => ParamType::String,
            Self::BoolArray(_) => ParamType::BoolArray,
            Self::IntegerArray(_) => ParamType::IntegerArray,
            Self::DoubleArray(_) => ParamType::DoubleArray,
            Self::StringArray(_) => ParamType::StringArray,
        }
    }

    pub fn is_not_set(&self) -> bool {
        matches!(self, Self::NotSet)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSet => write!(f, "<not set>"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
            Self::BoolArray(v) => write!(f, "{v:?}"),
            Self::IntegerArray(v) => write!(f, "{v:?}"),
            Self::DoubleArray(v) => write!(f, "{v:?}"),
            Self::StringArray(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Integer(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type() {
        assert_eq!(ParamValue::NotSet.param_type(), ParamType::NotSet);
        assert_eq!(ParamValue::Integer(3).param_type(), ParamType::Integer);
        assert_eq!(
            ParamValue::StringArray(vec!["a".into()]).param_type(),
            ParamType::StringArray
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(ParamValue::from(42), ParamValue::Integer(42));
        assert_eq!(ParamValue::from(0.5), ParamValue::Double(0.5));
        assert_eq!(ParamValue::from("eig"), ParamValue::String("eig".into()));
        assert_eq!(ParamValue::Integer(2).as_f64(), Some(2.0));
        assert_eq!(ParamValue::Bool(true).as_i64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::String("squared_loss".into()).to_string(), "squared_loss");
        assert_eq!(ParamValue::NotSet.to_string(), "<not set>");
        assert_eq!(ParamType::Double.to_string(), "Double");
    }
}
