//! Foundation types for Regis.
//!
//! This crate provides the value model stored by every registry. Every other
//! Regis crate depends on `regis-types`.
//!
//! # Key Types
//!
//! - [`Value`]: Tagged union of scalars, lists, nested maps and opaque objects
//! - [`Map`]: Insertion-ordered mapping from string keys to values
//! - [`Opaque`]: Shared handle to a caller-owned object, compared by identity
//! - [`Object`]: Trait implemented by types stored behind an [`Opaque`] handle
//!
//! # Design Rules
//!
//! 1. Maps keep insertion order; serializers emit keys in that order.
//! 2. Opaque objects are never cloned, descended into or round-tripped.
//!    Cloning a [`Value::Object`] clones the handle only.
//! 3. A value is *blank* when it is `Null` or the empty string. `0` and
//!    `false` are never blank.

pub mod error;
pub mod opaque;
mod serde_impl;
pub mod value;

pub use error::TypeError;
pub use opaque::{Object, Opaque};
pub use value::{Map, Value};
