//! Hierarchical key-value registry for Regis.
//!
//! A [`Registry`] holds an insertion-ordered tree of [`Value`]s addressed by
//! separator-delimited paths (`"db.primary.host"`). Reads never create
//! anything and never fail: a missing path yields `None` or the caller's
//! default. Writes create intermediate maps as needed.
//!
//! [`FlatRegistry`] stores keys verbatim and only splits dotted keys when
//! asked to during loading.
//!
//! # Modules
//!
//! - [`path`]: Path splitting and traversal over nested maps
//! - [`registry`]: The hierarchical [`Registry`]
//! - [`flat`]: The verbatim-key [`FlatRegistry`]
//! - [`error`]: Error types for load and serialization operations
//!
//! # Design Rules
//!
//! 1. Structural misses (absent keys, empty paths, scalars in the way of a
//!    read) are absorbed as defaults, never reported as errors.
//! 2. Writing through a scalar replaces it with a map.
//! 3. Opaque objects are stored by handle; they are never copied, merged into
//!    or flattened through.
//! 4. Registries are not synchronized; callers serialize concurrent access.
//!
//! [`Value`]: regis_types::Value

pub mod error;
pub mod flat;
mod ops;
pub mod path;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use flat::FlatRegistry;
pub use path::DEFAULT_SEPARATOR;
pub use registry::Registry;
