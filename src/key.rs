use std::hash::{Hash, Hasher};
use std::ptr;

use crate::identity::IdentityPtr;

/// Key wrapper giving a handle identity semantics in the standard library's
/// hash containers.
///
/// `Hash`, `PartialEq`, and `Eq` are implemented over the handle's identity
/// address, so a `std::collections::HashSet<IdentityKey<Rc<T>>>` behaves like
/// an [`IdentitySet`](crate::set::IdentitySet) regardless of what `T` itself
/// considers equal.
pub struct IdentityKey<E>(E);

impl<E: IdentityPtr> IdentityKey<E> {
    #[inline(always)]
    pub fn new(handle: E) -> Self {
        IdentityKey(handle)
    }

    /// Unwraps the underlying handle.
    pub fn into_inner(self) -> E {
        self.0
    }
}

impl<E: Clone> Clone for IdentityKey<E> {
    fn clone(&self) -> Self {
        IdentityKey(self.0.clone())
    }
}

impl<E: IdentityPtr> Hash for IdentityKey<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.0.identity_ptr(), state);
    }
}

impl<E: IdentityPtr> PartialEq for IdentityKey<E> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0.identity_ptr(), other.0.identity_ptr())
    }
}

impl<E: IdentityPtr> Eq for IdentityKey<E> {}

impl<E> AsRef<E> for IdentityKey<E> {
    fn as_ref(&self) -> &E {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::rc::Rc;

    struct AlwaysEqual;

    impl PartialEq for AlwaysEqual {
        fn eq(&self, _: &Self) -> bool {
            true
        }
    }

    impl Eq for AlwaysEqual {}

    impl Hash for AlwaysEqual {
        fn hash<H: Hasher>(&self, state: &mut H) {
            state.write_u64(123);
        }
    }

    #[test]
    fn std_hashset_keeps_distinct_instances() {
        let mut set = HashSet::new();
        for _ in 0..1000 {
            set.insert(IdentityKey::new(Rc::new(AlwaysEqual)));
        }
        assert_eq!(set.len(), 1000);
    }

    #[test]
    fn std_hashset_deduplicates_shared_handles() {
        let instance = Rc::new(AlwaysEqual);
        let mut set = HashSet::new();
        assert!(set.insert(IdentityKey::new(Rc::clone(&instance))));
        assert!(!set.insert(IdentityKey::new(Rc::clone(&instance))));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&IdentityKey::new(instance)));
    }

    #[test]
    fn clone_preserves_identity() {
        let key = IdentityKey::new(Rc::new(AlwaysEqual));
        let cloned = key.clone();
        assert!(key == cloned);
    }
}
