//! Runtime type identity.
//!
//! Same-type recovery and the pipeline's return-type check both compare
//! [`TypeTag`]s. Comparison uses [`TypeId`]; the name is only for messages.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A comparable identifier for a `'static` type, with its display name.
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// The tag of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The Rust type name, e.g. `i32` or `alloc::string::String`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a value tagged `self` can stand in for one tagged `target`.
    ///
    /// Concrete Rust types have no subtyping, so this is identity.
    pub fn is_assignable_to(&self, target: &TypeTag) -> bool {
        self == target
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Reinterpret `value` as `U` when `T` and `U` are the same type.
///
/// Returns `None` (dropping `value`) otherwise.
pub(crate) fn reinterpret<T: 'static, U: 'static>(value: T) -> Option<U> {
    let mut slot = Some(value);
    (&mut slot as &mut dyn Any)
        .downcast_mut::<Option<U>>()
        .and_then(Option::take)
}
