//! Orchestration-side parameter storage with validation.
//!
//! `EstimatorStore` holds the declared parameters of one configuration
//! instance: descriptor, optional default, and optional explicit value. It
//! enforces type constraints, range checks, and read-only restrictions.
//! The synchronizer only depends on the [`ParamStore`] capability, so an
//! embedding framework can supply its own store.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{Error, Result};
use crate::value::{ParamType, ParamValue};

/// Capability surface the synchronizer needs from the orchestration store.
pub trait ParamStore {
    /// Whether a parameter with this name is declared.
    fn has_param(&self, name: &str) -> bool;

    /// Whether the parameter was declared with a default value.
    fn has_default(&self, name: &str) -> bool;

    /// Current explicit value, falling back to the declared default.
    fn get_or_default(&self, name: &str) -> Option<ParamValue>;

    /// Set the explicit value of a declared parameter.
    fn set(&mut self, name: &str, value: ParamValue) -> Result<()>;

    /// Drop the explicit value, restoring the declared default.
    fn clear(&mut self, name: &str) -> Result<()>;
}

/// Range constraint for integer parameters.
#[derive(Debug, Clone)]
pub struct IntegerRange {
    pub from_value: i64,
    pub to_value: i64,
    /// Step of 0 accepts any value inside the range.
    pub step: u64,
}

/// Range constraint for floating point parameters.
#[derive(Debug, Clone)]
pub struct FloatingPointRange {
    pub from_value: f64,
    pub to_value: f64,
    /// Step of 0.0 accepts any value inside the range.
    pub step: f64,
}

/// Descriptor for a declared parameter, including constraints.
#[derive(Debug, Clone)]
pub struct ParamDescriptor {
    pub name: String,
    pub type_: ParamType,
    pub doc: String,
    pub read_only: bool,
    /// Allow the value's type to change after declaration.
    pub dynamic_typing: bool,
    pub integer_range: Option<IntegerRange>,
    pub floating_point_range: Option<FloatingPointRange>,
}

impl Default for ParamDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            type_: ParamType::NotSet,
            doc: String::new(),
            read_only: false,
            dynamic_typing: false,
            integer_range: None,
            floating_point_range: None,
        }
    }
}

impl ParamDescriptor {
    /// Create a new descriptor with the given name and type.
    pub fn new(name: impl Into<String>, type_: ParamType) -> Self {
        Self {
            name: name.into(),
            type_,
            ..Default::default()
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

/// Internal storage entry for a single declared parameter.
#[derive(Debug, Clone)]
struct ParamEntry {
    /// Explicit per-instance value, if one was set.
    value: Option<ParamValue>,
    default: Option<ParamValue>,
    descriptor: ParamDescriptor,
}

/// Declared parameters of one configuration instance.
#[derive(Debug, Default)]
pub struct EstimatorStore {
    parameters: HashMap<String, ParamEntry>,
    /// Overrides applied at declaration time, e.g. from a parameter file.
    overrides: HashMap<String, ParamValue>,
}

impl EstimatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: HashMap<String, ParamValue>) -> Self {
        Self {
            parameters: HashMap::new(),
            overrides,
        }
    }

    /// Declare a parameter with an optional default value and a descriptor.
    ///
    /// If an override exists for this name it becomes the explicit value, so
    /// `clear` still restores the declared default. Returns the effective
    /// initial value.
    pub fn declare(
        &mut self,
        name: &str,
        default: Option<ParamValue>,
        mut descriptor: ParamDescriptor,
    ) -> Result<Option<ParamValue>> {
        if self.parameters.contains_key(name) {
            return Err(Error::AlreadyDeclared { name: name.into() });
        }

        // Infer type from the default if the descriptor leaves it open
        if descriptor.type_ == ParamType::NotSet
            && let Some(ref value) = default
        {
            descriptor.type_ = value.param_type();
        }
        descriptor.name = name.to_string();

        if let Some(ref value) = default {
            validate_value(value, &descriptor).map_err(|reason| Error::Rejected {
                name: name.into(),
                reason: format!("invalid default: {reason}"),
            })?;
        }

        let value = match self.overrides.remove(name) {
            Some(override_value) => {
                validate_value(&override_value, &descriptor).map_err(|reason| Error::Rejected {
                    name: name.into(),
                    reason: format!("invalid override: {reason}"),
                })?;
                if default.is_some() {
                    warn!("[PRM] override shadows declared default of '{name}'");
                }
                Some(override_value)
            }
            None => None,
        };

        let initial = value.clone().or_else(|| default.clone());
        self.parameters.insert(
            name.to_string(),
            ParamEntry {
                value,
                default,
                descriptor,
            },
        );
        Ok(initial)
    }

    /// Get the descriptor of a declared parameter.
    pub fn describe(&self, name: &str) -> Option<&ParamDescriptor> {
        self.parameters.get(name).map(|e| &e.descriptor)
    }

    /// Whether an explicit value was set (as opposed to the default).
    pub fn is_set(&self, name: &str) -> bool {
        self.parameters
            .get(name)
            .is_some_and(|e| e.value.is_some())
    }
}

impl ParamStore for EstimatorStore {
    fn has_param(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    fn has_default(&self, name: &str) -> bool {
        self.parameters
            .get(name)
            .is_some_and(|e| e.default.is_some())
    }

    fn get_or_default(&self, name: &str) -> Option<ParamValue> {
        let entry = self.parameters.get(name)?;
        entry.value.clone().or_else(|| entry.default.clone())
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let entry = self
            .parameters
            .get_mut(name)
            .ok_or_else(|| Error::NotDeclared { name: name.into() })?;

        if entry.descriptor.read_only {
            return Err(Error::Rejected {
                name: name.into(),
                reason: "read-only".into(),
            });
        }
        validate_value(&value, &entry.descriptor).map_err(|reason| Error::Rejected {
            name: name.into(),
            reason,
        })?;

        entry.value = Some(value);
        Ok(())
    }

    fn clear(&mut self, name: &str) -> Result<()> {
        let entry = self
            .parameters
            .get_mut(name)
            .ok_or_else(|| Error::NotDeclared { name: name.into() })?;
        entry.value = None;
        Ok(())
    }
}

/// Name of the worker-count parameter shared by all estimator configurations.
pub const NUM_WORKERS: &str = "num_workers";

/// Declare the common `num_workers` parameter: number of parallel workers,
/// where each worker corresponds to one scheduled task.
pub fn declare_num_workers(store: &mut EstimatorStore) -> Result<()> {
    let mut descriptor = ParamDescriptor::new(NUM_WORKERS, ParamType::Integer)
        .with_doc("number of parallel workers, one per scheduled task");
    descriptor.integer_range = Some(IntegerRange {
        from_value: 1,
        to_value: i64::MAX,
        step: 0,
    });
    store.declare(NUM_WORKERS, Some(ParamValue::Integer(1)), descriptor)?;
    Ok(())
}

/// Validate a value against a descriptor's constraints.
fn validate_value(value: &ParamValue, descriptor: &ParamDescriptor) -> std::result::Result<(), String> {
    // Type check
    if descriptor.type_ != ParamType::NotSet
        && !descriptor.dynamic_typing
        && value.param_type() != ParamType::NotSet
        && value.param_type() != descriptor.type_
    {
        return Err(format!(
            "expected type {}, got {}",
            descriptor.type_,
            value.param_type()
        ));
    }

    if let Some(ref range) = descriptor.integer_range
        && let ParamValue::Integer(v) = value
    {
        validate_integer_range(*v, range)?;
    }

    if let Some(ref range) = descriptor.floating_point_range
        && let ParamValue::Double(v) = value
    {
        validate_float_range(*v, range)?;
    }

    Ok(())
}

fn validate_integer_range(value: i64, range: &IntegerRange) -> std::result::Result<(), String> {
    if value < range.from_value || value > range.to_value {
        return Err(format!(
            "value {} out of range [{}, {}]",
            value, range.from_value, range.to_value
        ));
    }

    if range.step != 0 {
        let offset = (value - range.from_value).unsigned_abs();
        // Upper bound is always valid
        if !offset.is_multiple_of(range.step) && value != range.to_value {
            return Err(format!(
                "value {} not on step grid (from={}, step={})",
                value, range.from_value, range.step
            ));
        }
    }

    Ok(())
}

fn validate_float_range(value: f64, range: &FloatingPointRange) -> std::result::Result<(), String> {
    if value < range.from_value || value > range.to_value {
        return Err(format!(
            "value {} out of range [{}, {}]",
            value, range.from_value, range.to_value
        ));
    }

    if range.step != 0.0 {
        let offset = value - range.from_value;
        let remainder = offset % range.step.abs();
        // Tolerate floating point error; the upper bound is always valid
        if remainder > 1e-9
            && (range.step.abs() - remainder) > 1e-9
            && (value - range.to_value).abs() > 1e-9
        {
            return Err(format!(
                "value {} not on step grid (from={}, step={})",
                value, range.from_value, range.step
            ));
        }
    }

    Ok(())
}
