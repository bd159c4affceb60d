//! Identity-preserving handles to caller-owned objects.
//!
//! A registry may hold references to arbitrary objects (service instances,
//! handles, loaded plugins). Those values are stored behind an [`Opaque`]
//! handle: the registry clones the handle when it copies containers, but the
//! object itself is shared. Two handles are equal only if they point to the
//! same allocation.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Upcast helper so [`Opaque::downcast_ref`] can reach `dyn Any`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type that can live inside a registry as an opaque value.
///
/// The registry never inspects the object. `export` is only consulted when
/// the registry is serialized to a text format; the default exports `Null`.
pub trait Object: AsAny + fmt::Debug + Send + Sync {
    /// Data written in place of this object when the registry is encoded.
    fn export(&self) -> Value {
        Value::Null
    }
}

/// Shared handle to an [`Object`].
#[derive(Clone)]
pub struct Opaque(Arc<dyn Object>);

impl Opaque {
    /// Wrap a new object.
    pub fn new<T: Object>(object: T) -> Self {
        Self(Arc::new(object))
    }

    /// Wrap an existing shared object without copying it.
    pub fn from_arc(object: Arc<dyn Object>) -> Self {
        Self(object)
    }

    /// Returns `true` if both handles point to the same object.
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// Borrow the object as a concrete type.
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        AsAny::as_any(&*self.0).downcast_ref::<T>()
    }

    /// The shared object.
    pub fn as_arc(&self) -> &Arc<dyn Object> {
        &self.0
    }

    /// Value exported by the object for serialization.
    pub fn export(&self) -> Value {
        self.0.export()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({:?})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Service {
        name: &'static str,
    }

    impl Object for Service {}

    #[derive(Debug)]
    struct Exported;

    impl Object for Exported {
        fn export(&self) -> Value {
            Value::from("exported")
        }
    }

    #[test]
    fn clone_shares_identity() {
        let a = Opaque::new(Service { name: "db" });
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_objects_are_not_equal() {
        let a = Opaque::new(Service { name: "db" });
        let b = Opaque::new(Service { name: "db" });
        assert_ne!(a, b);
    }

    #[test]
    fn downcast_to_concrete_type() {
        let handle = Opaque::new(Service { name: "cache" });
        let service = handle.downcast_ref::<Service>().expect("should downcast");
        assert_eq!(service.name, "cache");
        assert!(handle.downcast_ref::<Exported>().is_none());
    }

    #[test]
    fn export_defaults_to_null() {
        assert_eq!(Opaque::new(Service { name: "x" }).export(), Value::Null);
        assert_eq!(Opaque::new(Exported).export(), Value::from("exported"));
    }

    #[test]
    fn from_arc_keeps_allocation() {
        let shared: Arc<dyn Object> = Arc::new(Service { name: "shared" });
        let a = Opaque::from_arc(Arc::clone(&shared));
        let b = Opaque::from_arc(shared);
        assert!(a.ptr_eq(&b));
    }
}
