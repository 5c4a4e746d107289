//! Synchronization between orchestration parameters and the native table.
//!
//! `ParamSync` owns one configuration instance's native parameter table and
//! keeps it consistent with the orchestration store on every set, clear, and
//! copy. The table is a derived cache: it can always be rebuilt from the
//! mapping metadata and the store via [`ParamSync::initialize`].
//!
//! Single-threaded by design — one `ParamSync` per configuration instance,
//! never shared across threads without external locking.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::mapping::NativeMapping;
use crate::store::{EstimatorStore, NUM_WORKERS, ParamStore};
use crate::value::ParamValue;

/// Keeps a native parameter table consistent with an orchestration store.
#[derive(Debug)]
pub struct ParamSync<M, S = EstimatorStore> {
    mapping: M,
    store: S,
    /// Native parameter name → current value. Always a fresh per-instance
    /// table, initialized by [`ParamSync::initialize`].
    native: HashMap<String, ParamValue>,
}

impl<M: NativeMapping, S: ParamStore> ParamSync<M, S> {
    pub fn new(mapping: M, store: S) -> Self {
        Self {
            mapping,
            store,
            native: HashMap::new(),
        }
    }

    pub fn mapping(&self) -> &M {
        &self.mapping
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Read access to the native parameter table.
    pub fn native_params(&self) -> &HashMap<String, ParamValue> {
        &self.native
    }

    /// Rebuild the native table: introspected constructor defaults first,
    /// then every mapped orchestration parameter that currently carries a
    /// default or explicit value.
    ///
    /// On failure the table is left empty and the instance must be treated
    /// as not yet initialized.
    pub fn initialize(&mut self) -> Result<()> {
        self.native.clear();
        self.native = self.mapping.default_native_values()?;
        if let Err(err) = self.apply_store_values() {
            self.native.clear();
            return Err(err);
        }
        debug!("[PRM] native table initialized, {} entries", self.native.len());
        Ok(())
    }

    fn apply_store_values(&mut self) -> Result<()> {
        let name_map = self.mapping.name_mapping();
        for (orch, native) in &name_map {
            if let Some(value) = self.store.get_or_default(orch) {
                self.set_native_value(native, value)?;
            }
        }
        Ok(())
    }

    /// Apply a batch of name → value pairs, in caller order.
    ///
    /// Names may be orchestration names, native-only names, or both in one
    /// call. Setting both sides of a two-way alias in the same batch is
    /// rejected before anything is applied. After that, keys apply
    /// fail-fast: a failing key aborts the batch but earlier keys stay
    /// applied.
    ///
    /// A native-only key that is the target of a name mapping also sets the
    /// matching orchestration parameter to the raw, untranslated value.
    pub fn set_batch(&mut self, pairs: &[(&str, ParamValue)]) -> Result<&mut Self> {
        let name_map = self.mapping.name_mapping();

        for (orch, native) in &name_map {
            if orch != native
                && pairs.iter().any(|(k, _)| *k == orch.as_str())
                && pairs.iter().any(|(k, _)| *k == native.as_str())
            {
                return Err(Error::AmbiguousAlias {
                    orch: orch.clone(),
                    native: native.clone(),
                });
            }
        }

        for (key, value) in pairs {
            if self.store.has_param(key) {
                self.store.set(key, value.clone())?;
                if let Some(native) = name_map.get(*key) {
                    self.set_native_value(native, value.clone())?;
                }
            } else if self.native.contains_key(*key) {
                // Native-only key: raw write, no value translation
                self.native.insert((*key).to_string(), value.clone());
                for (orch, native) in &name_map {
                    if native.as_str() == *key {
                        self.store.set(orch, value.clone())?;
                    }
                }
            } else {
                return Err(Error::UnknownParameter {
                    name: (*key).to_string(),
                });
            }
        }
        Ok(self)
    }

    /// Reset one orchestration parameter to its declared default, re-applying
    /// the default to the native table if the name is mapped.
    ///
    /// A parameter declared without a default leaves its native entry
    /// untouched.
    pub fn reset_to_default(&mut self, name: &str) -> Result<()> {
        self.store.clear(name)?;
        let name_map = self.mapping.name_mapping();
        if let Some(native) = name_map.get(name)
            && let Some(value) = self.store.get_or_default(name)
        {
            self.set_native_value(native, value)?;
        }
        Ok(())
    }

    /// Copy this instance's native values into `target`, only overwriting
    /// keys that already exist there. Keys absent on the target side are
    /// never added.
    pub fn copy_into<'a>(&self, target: &'a mut Self) -> &'a mut Self {
        for (key, value) in &self.native {
            if let Some(slot) = target.native.get_mut(key) {
                *slot = value.clone();
            }
        }
        target
    }

    /// Set one native table entry, translating through the value mapping.
    ///
    /// Values already valid on the native side pass through unchanged, so
    /// re-applying a translated value is idempotent. A value whose mapped
    /// target is absent or explicitly marked unsupported fails without
    /// touching the table.
    pub fn set_native_value(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let value_maps = self.mapping.value_mapping();
        match value_maps.get(name) {
            None => {
                self.native.insert(name.to_string(), value);
            }
            Some(table) => {
                let supported = table.supported();
                if supported.contains(&value) {
                    self.native.insert(name.to_string(), value);
                } else {
                    match table.lookup(&value) {
                        Some(Some(mapped)) => {
                            debug!("[PRM] '{name}': translated '{value}' -> '{mapped}'");
                            self.native.insert(name.to_string(), mapped.clone());
                        }
                        Some(None) | None => {
                            return Err(Error::UnsupportedValue {
                                name: name.to_string(),
                                value,
                                supported,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Current worker count, falling back to the declared default.
    pub fn num_workers(&self) -> Option<i64> {
        self.store.get_or_default(NUM_WORKERS).and_then(|v| v.as_i64())
    }

    /// Set the worker count, keeping any native mapping in sync.
    pub fn set_num_workers(&mut self, value: i64) -> Result<&mut Self> {
        self.set_batch(&[(NUM_WORKERS, ParamValue::Integer(value))])
    }
}
