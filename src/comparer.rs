use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr;

use crate::identity::{identity_hash_of, IdentityPtr};

/// Equality and hashing strategy for configuring hash-based containers.
///
/// Contract: if `equals(a, b)` returns true then `hash(a) == hash(b)`.
/// There is no requirement that unequal items hash differently.
pub trait EqualityComparer<T> {
    fn equals(&self, a: &T, b: &T) -> bool;
    fn hash(&self, item: &T) -> u64;
}

/// Compares handles by reference identity alone.
///
/// Two handles are equal exactly when they denote the same object instance;
/// hashing derives from the instance's address. Any `PartialEq`/`Hash` the
/// element type defines is ignored entirely.
pub struct ReferenceComparer<E> {
    _marker: PhantomData<fn(&E)>,
}

impl<E> ReferenceComparer<E> {
    #[inline(always)]
    pub fn new() -> Self {
        ReferenceComparer {
            _marker: PhantomData,
        }
    }
}

impl<E> Default for ReferenceComparer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ReferenceComparer<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ReferenceComparer<E> {}

impl<E: IdentityPtr> EqualityComparer<E> for ReferenceComparer<E> {
    #[inline(always)]
    fn equals(&self, a: &E, b: &E) -> bool {
        ptr::eq(a.identity_ptr(), b.identity_ptr())
    }

    #[inline(always)]
    fn hash(&self, item: &E) -> u64 {
        identity_hash_of(item)
    }
}

/// Comparer delegating to the element type's own `Eq` and `Hash`.
///
/// This is the value-semantics behavior that [`ReferenceComparer`] overrides.
pub struct DefaultComparer<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T> DefaultComparer<T> {
    #[inline(always)]
    pub fn new() -> Self {
        DefaultComparer {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for DefaultComparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DefaultComparer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DefaultComparer<T> {}

impl<T: Eq + Hash> EqualityComparer<T> for DefaultComparer<T> {
    #[inline(always)]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline(always)]
    fn hash(&self, item: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        hasher.finish()
    }
}
