//! accel-params — parameter synchronization for accelerated estimators.
//!
//! A single estimator configuration presents itself to two layers at once:
//! the orchestration layer, which expects named, typed, validated parameters
//! with defaults, and the execution layer, which expects a flat table of
//! keyword arguments matching a native accelerator class constructor. This
//! crate keeps the two namespaces consistent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ParamSync  (one per configuration instance)                │
//! │  ├── store: orchestration parameters (declare/set/clear)    │
//! │  ├── native: native name → current value                    │
//! │  └── mapping: NativeMapping metadata                        │
//! │      ├── native_classes()        constructor defaults       │
//! │      ├── excluded_native_params() hidden internals          │
//! │      ├── name_mapping()          orch name → native name    │
//! │      └── value_mapping()         orch value → native value  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mapping is pure declarative metadata; `ParamSync` queries it once per
//! operation and owns all mutable state. The native table is a derived cache,
//! rebuilt by [`ParamSync::initialize`] and maintained by every set, clear,
//! and copy.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut store = EstimatorStore::new();
//! store.declare("k", Some(ParamValue::Integer(3)),
//!     ParamDescriptor::new("k", ParamType::Integer))?;
//!
//! let mut sync = ParamSync::new(PcaMapping::new(), store);
//! sync.initialize()?;
//! sync.set_batch(&[("k", ParamValue::Integer(5))])?;
//! assert_eq!(sync.native_params()["n_components"], ParamValue::Integer(5));
//! ```

pub mod error;
pub mod mapping;
pub mod native;
pub mod store;
pub mod sync;
pub mod value;
pub mod yaml;

pub use error::{Error, Result};
pub use mapping::{NativeMapping, ValueMap};
pub use native::{NativeClass, NativeParam, constructor_defaults};
pub use store::{
    EstimatorStore, FloatingPointRange, IntegerRange, NUM_WORKERS, ParamDescriptor, ParamStore,
    declare_num_workers,
};
pub use sync::ParamSync;
pub use value::{ParamType, ParamValue};
