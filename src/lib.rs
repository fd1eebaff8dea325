//! Reference-identity hashing and equality.
//!
//! Many types override `Eq` and `Hash` to implement value-based equality.
//! This crate provides the opposite: a hash derived from an object's
//! allocation address, and an equality comparer that treats two handles as
//! equal only when they denote the same instance, regardless of what the
//! element type itself considers equal. A comparer-parameterized hash set
//! and a key wrapper for the standard containers put both to work.

pub mod comparer;
pub mod identity;
pub mod key;
pub mod set;

pub use comparer::{DefaultComparer, EqualityComparer, ReferenceComparer};
pub use identity::{
    identity_hash_code, identity_hash_of, try_identity_hash_ptr, IdentityError, IdentityPtr,
};
pub use key::IdentityKey;
pub use set::{HashedSet, IdentitySet};
