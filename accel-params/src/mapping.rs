//! Declarative metadata tying a configuration type to its native classes.
//!
//! Each concrete configuration type supplies a [`NativeMapping`]: which
//! native classes define its canonical defaults, which native parameters to
//! hide, and how names and values translate between the orchestration and
//! native namespaces. The metadata is pure — the synchronizer queries it once
//! per operation and the mapping never calls back.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::native::{NativeClass, constructor_defaults};
use crate::value::ParamValue;

/// Per-parameter translation table from orchestration values to native values.
///
/// A `None` target marks the source value as categorically unsupported on the
/// native side. Entries are kept in insertion order; tables are small enough
/// that lookups scan.
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
    entries: Vec<(ParamValue, Option<ParamValue>)>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate `from` to `to`.
    pub fn map(mut self, from: impl Into<ParamValue>, to: impl Into<ParamValue>) -> Self {
        self.entries.push((from.into(), Some(to.into())));
        self
    }

    /// Mark `from` as having no native equivalent.
    pub fn unsupported(mut self, from: impl Into<ParamValue>) -> Self {
        self.entries.push((from.into(), None));
        self
    }

    /// Look up `from` as a source value. `Some(None)` means explicitly
    /// unsupported; `None` means not present in the table at all.
    pub fn lookup(&self, from: &ParamValue) -> Option<&Option<ParamValue>> {
        self.entries
            .iter()
            .find(|(source, _)| source == from)
            .map(|(_, target)| target)
    }

    /// The distinct native-side values reachable through this table.
    pub fn supported(&self) -> Vec<ParamValue> {
        let mut out = Vec::new();
        for (_, target) in &self.entries {
            if let Some(value) = target
                && !out.contains(value)
            {
                out.push(value.clone());
            }
        }
        out
    }
}

/// Metadata provider for one concrete configuration type.
pub trait NativeMapping {
    /// Native classes whose constructors define the canonical default set.
    fn native_classes(&self) -> Vec<&NativeClass>;

    /// Native constructor parameters to never surface (internal handles and
    /// the like).
    fn excluded_native_params(&self) -> HashSet<String> {
        HashSet::new()
    }

    /// Orchestration parameter name → native parameter name.
    fn name_mapping(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Per native parameter, orchestration value → native value translation.
    fn value_mapping(&self) -> HashMap<String, ValueMap> {
        HashMap::new()
    }

    /// Merged constructor defaults across [`Self::native_classes`].
    ///
    /// Later classes override earlier ones on name collisions.
    fn default_native_values(&self) -> Result<HashMap<String, ParamValue>> {
        let excluded = self.excluded_native_params();
        let mut defaults = HashMap::new();
        for class in self.native_classes() {
            defaults.extend(constructor_defaults(class, &excluded)?);
        }
        Ok(defaults)
    }
}
