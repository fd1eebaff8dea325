use crate::comparer::{EqualityComparer, ReferenceComparer};
use crate::identity::IdentityPtr;

/// Table slots hold one plus the index of an element; 0 means 'not taken'.
const EMPTY: u32 = 0;

/// Desired size of the table relative to the element capacity as a power of 2.
/// An offset of 2 keeps the table at 4x the element capacity.
const TABLE_POWER_OFFSET: u32 = 2;

const MINIMUM_CAPACITY: usize = 4;

pub struct HashHelper;

impl HashHelper {
    /// Redistributes a hash. Useful when hashes show sequential clumping,
    /// such as address-derived hashes from a bump allocator.
    #[inline(always)]
    pub fn rehash(hash: u64) -> u64 {
        const A: u32 = 6;
        const B: u32 = 13;
        const C: u32 = 25;

        let uhash = hash.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        uhash.rotate_left(A) ^ uhash.rotate_left(B) ^ uhash.rotate_left(C)
    }
}

/// Hash-based set whose membership is governed entirely by the supplied
/// equality comparer, never by the element type's own `Eq`/`Hash`.
///
/// Uses hash-based indexing with linear probing for collision resolution:
/// a power-of-2 table of element indices over dense element storage.
pub struct HashedSet<T, C> {
    /// Dense storage containing the elements of the set, in insertion order
    /// except where removals have swapped elements around.
    elements: Vec<T>,

    /// Backing table mapping probe slots to element indices, offset by one.
    /// A slot containing 0 is unused.
    table: Vec<u32>,

    /// Mask for fast modulo on probe slots. Requires a power-of-2 table.
    table_mask: usize,

    /// Equality comparer used to compare and hash elements.
    comparer: C,
}

impl<T, C: EqualityComparer<T>> HashedSet<T, C> {
    /// Creates an empty set. No allocation occurs until the first add.
    pub fn new(comparer: C) -> Self {
        HashedSet {
            elements: Vec::new(),
            table: Vec::new(),
            table_mask: 0,
            comparer,
        }
    }

    /// Creates a set with room for `capacity` elements before any regrowth.
    pub fn with_capacity(capacity: usize, comparer: C) -> Self {
        let mut set = Self::new(comparer);
        if capacity > 0 {
            set.rebuild_table(capacity);
        }
        set
    }

    /// Number of elements in the set.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements the set can hold before the table is rebuilt.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.table.len() >> TABLE_POWER_OFFSET
    }

    #[inline(always)]
    fn home_slot(&self, element: &T) -> usize {
        (HashHelper::rehash(self.comparer.hash(element)) as usize) & self.table_mask
    }

    /// Walks the probe sequence for `element`. Returns the table slot the
    /// walk stopped at and, if the element is present, its index in the
    /// dense storage. The stop slot is the insertion point when absent.
    ///
    /// The table must be non-empty and must contain at least one open slot.
    fn probe(&self, element: &T) -> (usize, Option<usize>) {
        debug_assert!(!self.table.is_empty());
        let mut table_index = self.home_slot(element);
        loop {
            let slot = self.table[table_index];
            if slot == EMPTY {
                return (table_index, None);
            }
            // This table slot is taken. Is it the specified element?
            // Remember to decode the element index.
            let element_index = (slot - 1) as usize;
            if self.comparer.equals(&self.elements[element_index], element) {
                return (table_index, Some(element_index));
            }
            table_index = (table_index + 1) & self.table_mask;
        }
    }

    /// Gets the index of the element in the dense storage if it is present.
    #[inline(always)]
    pub fn index_of(&self, element: &T) -> Option<usize> {
        if self.table.is_empty() {
            return None;
        }
        self.probe(element).1
    }

    /// Checks if a given element already belongs to the set.
    #[inline(always)]
    pub fn contains(&self, element: &T) -> bool {
        self.index_of(element).is_some()
    }

    /// Adds an element to the set if no equal element is present.
    /// Grows the backing storage if necessary.
    /// Returns true if the element was added, false if it was already present.
    pub fn add(&mut self, element: T) -> bool {
        if self.elements.len() == self.capacity() {
            // There's no room left; resize.
            self.rebuild_table(self.elements.len() * 2);
        }
        let (table_index, existing) = self.probe(&element);
        if existing.is_some() {
            // Already present!
            return false;
        }
        debug_assert!(self.elements.len() < u32::MAX as usize);
        self.elements.push(element);
        // All table entries are offset by 1 since 0 represents 'empty'.
        self.table[table_index] = self.elements.len() as u32;
        true
    }

    /// Rebuilds the table for at least `capacity` elements, rehashing every
    /// element currently in the set.
    fn rebuild_table(&mut self, capacity: usize) {
        let capacity = capacity.max(MINIMUM_CAPACITY).next_power_of_two();
        debug_assert!(capacity >= self.elements.len());

        let table_len = capacity << TABLE_POWER_OFFSET;
        self.table.clear();
        self.table.resize(table_len, EMPTY);
        self.table_mask = table_len - 1;
        self.elements.reserve(capacity - self.elements.len());

        for index in 0..self.elements.len() {
            let mut table_index = self.home_slot(&self.elements[index]);
            // Find the first open slot in the probe sequence.
            while self.table[table_index] != EMPTY {
                table_index = (table_index + 1) & self.table_mask;
            }
            self.table[table_index] = (index + 1) as u32;
        }
    }

    /// Removes an element from the set if an equal element is present.
    /// Does not preserve element order.
    /// Returns true if an element was found and removed.
    pub fn remove(&mut self, element: &T) -> bool {
        if self.table.is_empty() {
            return false;
        }
        match self.probe(element) {
            (table_index, Some(element_index)) => {
                self.remove_at(table_index, element_index);
                true
            }
            (_, None) => false,
        }
    }

    /// Removes the element at the given table slot and dense index.
    fn remove_at(&mut self, table_index: usize, element_index: usize) {
        // Maintain the invariant that every element is reachable from its
        // home slot without crossing an open slot. Search clockwise for
        // entries that can fill the gap.
        let mut gap_index = table_index;
        let mut search_index = table_index;
        loop {
            search_index = (search_index + 1) & self.table_mask;
            let slot = self.table[search_index];
            if slot == EMPTY {
                break;
            }
            let desired_index = self.home_slot(&self.elements[(slot - 1) as usize]);

            // Would this entry be closer to its home slot if moved to the gap?
            let distance_from_gap = search_index.wrapping_sub(gap_index) & self.table_mask;
            let distance_from_home = search_index.wrapping_sub(desired_index) & self.table_mask;
            if distance_from_gap <= distance_from_home {
                self.table[gap_index] = self.table[search_index];
                gap_index = search_index;
            }
        }
        self.table[gap_index] = EMPTY;

        // Swap the final element into the removed element's dense slot and
        // patch its table entry. The entry is located before the swap so the
        // final element is still at its recorded index while probing.
        let last_index = self.elements.len() - 1;
        if element_index < last_index {
            let mut slot = self.home_slot(&self.elements[last_index]);
            while self.table[slot] != (last_index + 1) as u32 {
                slot = (slot + 1) & self.table_mask;
            }
            self.table[slot] = (element_index + 1) as u32;
        }
        self.elements.swap_remove(element_index);
    }

    /// Clears all elements from the set, keeping the backing storage.
    pub fn clear(&mut self) {
        self.table.fill(EMPTY);
        self.elements.clear();
    }

    /// Returns an iterator over the set elements in dense-storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// The comparer governing this set's membership.
    pub fn comparer(&self) -> &C {
        &self.comparer
    }
}

impl<T, C> std::ops::Index<usize> for HashedSet<T, C> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<'a, T, C> IntoIterator for &'a HashedSet<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Hash set keyed by reference identity.
pub type IdentitySet<E> = HashedSet<E, ReferenceComparer<E>>;

impl<E: IdentityPtr> HashedSet<E, ReferenceComparer<E>> {
    /// Creates an empty identity-keyed set.
    pub fn by_identity() -> Self {
        Self::new(ReferenceComparer::new())
    }

    /// Creates an identity-keyed set with room for `capacity` elements.
    pub fn by_identity_with_capacity(capacity: usize) -> Self {
        Self::with_capacity(capacity, ReferenceComparer::new())
    }
}
