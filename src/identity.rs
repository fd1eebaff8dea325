use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

/// Error produced by the raw-pointer identity hash entry point.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// A null pointer carries no identity.
    #[error("cannot compute an identity hash for a null pointer")]
    NullPointer,
}

/// Returns a hash derived from the referent's address, independent of any
/// `Hash` implementation the referent's type may define.
///
/// The value is stable for as long as the referent does not move. Referents
/// behind `Box`, `Rc`, or `Arc` are pinned to their heap allocation for their
/// whole lifetime and always qualify; a referent on the stack is stable only
/// until it is moved.
#[inline(always)]
pub fn identity_hash_code<T: ?Sized>(obj: &T) -> u64 {
    hash_address(obj as *const T as *const () as usize)
}

/// Raw-pointer variant of [`identity_hash_code`].
///
/// Rejects null with [`IdentityError::NullPointer`]; any other pointer value
/// is hashed as-is. The pointer is never dereferenced.
#[inline(always)]
pub fn try_identity_hash_ptr<T>(ptr: *const T) -> Result<u64, IdentityError> {
    if ptr.is_null() {
        return Err(IdentityError::NullPointer);
    }
    Ok(hash_address(ptr as usize))
}

/// Returns the identity hash of whatever allocation a handle refers to.
///
/// Equivalent to `identity_hash_code(&*handle)` for the smart pointer impls.
#[inline(always)]
pub fn identity_hash_of<E: IdentityPtr>(handle: &E) -> u64 {
    hash_address(handle.identity_ptr() as usize)
}

#[inline(always)]
fn hash_address(address: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    address.hash(&mut hasher);
    hasher.finish()
}

/// Maps a handle to the address that constitutes its referent's identity.
///
/// Two handles denote the same object instance exactly when their identity
/// pointers are equal. Implemented for plain references and for the owning
/// handle types whose referent cannot move.
///
/// Note that `Box<T>` performs no allocation when `T` is zero-sized, so two
/// distinct boxes of a zero-sized type may share an identity. `Rc` and `Arc`
/// always allocate their count block and are unaffected.
pub trait IdentityPtr {
    /// The address of the referent, with any pointer metadata discarded.
    fn identity_ptr(&self) -> *const ();
}

impl<T: ?Sized> IdentityPtr for &T {
    #[inline(always)]
    fn identity_ptr(&self) -> *const () {
        *self as *const T as *const ()
    }
}

impl<T: ?Sized> IdentityPtr for Box<T> {
    #[inline(always)]
    fn identity_ptr(&self) -> *const () {
        &**self as *const T as *const ()
    }
}

impl<T: ?Sized> IdentityPtr for Rc<T> {
    #[inline(always)]
    fn identity_ptr(&self) -> *const () {
        Rc::as_ptr(self) as *const ()
    }
}

impl<T: ?Sized> IdentityPtr for Arc<T> {
    #[inline(always)]
    fn identity_ptr(&self) -> *const () {
        Arc::as_ptr(self) as *const ()
    }
}
