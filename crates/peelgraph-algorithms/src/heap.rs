//! Indexed binary min-heap
//!
//! A min-heap whose entries carry a unique value identity alongside their key.
//! A reverse index (value -> slot) is kept next to the slot array so that
//! `decrease_key` can locate an entry in O(1) and repair the heap in O(log n).
//!
//! Every mutation that moves entries goes through [`IndexedMinHeap::swap_slots`],
//! which updates the slot array and the reverse index together.

use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;
use thiserror::Error;

/// Errors raised by heap operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    #[error("Heap is empty")]
    Empty,

    #[error("Value not found in heap")]
    NotFound,

    #[error("Value already present in heap")]
    DuplicateValue,

    #[error("Invalid key: new key is greater than the current key")]
    InvalidKey,
}

pub type HeapResult<T> = Result<T, HeapError>;

/// A `(key, value)` pair stored in the heap
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeapEntry<K, V> {
    pub key: K,
    pub value: V,
}

/// Binary min-heap with O(1) value lookup and O(log n) decrease-key.
///
/// Children of slot `i` live at `2i + 1` and `2i + 2`.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K, V>
where
    V: Eq + Hash,
{
    /// Slot -> entry
    entries: Vec<HeapEntry<K, V>>,
    /// Value -> slot
    positions: FxHashMap<V, usize>,
}

impl<K, V> Default for IndexedMinHeap<K, V>
where
    K: Ord,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IndexedMinHeap<K, V>
where
    K: Ord,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    /// Pre-allocate for a known number of entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.positions.contains_key(value)
    }

    /// Current key of `value`, if present.
    pub fn key_of(&self, value: &V) -> Option<&K> {
        self.positions.get(value).map(|&slot| &self.entries[slot].key)
    }

    /// Insert a new entry. Fails with `DuplicateValue` if `value` is already queued.
    pub fn add(&mut self, key: K, value: V) -> HeapResult<()> {
        if self.positions.contains_key(&value) {
            return Err(HeapError::DuplicateValue);
        }

        let slot = self.entries.len();
        self.positions.insert(value.clone(), slot);
        self.entries.push(HeapEntry { key, value });
        self.sift_up(slot);
        Ok(())
    }

    /// Lower the key of an existing entry.
    ///
    /// Decrease-only: a `new_key` strictly greater than the current key is
    /// rejected with `InvalidKey`. An equal key is accepted and changes nothing.
    pub fn decrease_key(&mut self, value: &V, new_key: K) -> HeapResult<()> {
        let slot = *self.positions.get(value).ok_or(HeapError::NotFound)?;
        if new_key > self.entries[slot].key {
            return Err(HeapError::InvalidKey);
        }

        self.entries[slot].key = new_key;
        // A smaller key can only move toward the root.
        self.sift_up(slot);
        Ok(())
    }

    /// Root entry without removing it.
    pub fn peek(&self) -> HeapResult<&HeapEntry<K, V>> {
        self.entries.first().ok_or(HeapError::Empty)
    }

    /// Remove and return the entry with the smallest key.
    pub fn extract_min(&mut self) -> HeapResult<HeapEntry<K, V>> {
        if self.entries.is_empty() {
            return Err(HeapError::Empty);
        }

        // swap_remove moves the last slot into the root
        let min = self.entries.swap_remove(0);
        self.positions.remove(&min.value);

        if let Some(moved) = self.entries.first() {
            if let Some(slot) = self.positions.get_mut(&moved.value) {
                *slot = 0;
            }
            self.sift_down(0);
        }

        Ok(min)
    }

    /// All values currently queued.
    pub fn values(&self) -> FxHashSet<V> {
        self.entries.iter().map(|e| e.value.clone()).collect()
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot].key < self.entries[parent].key {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.entries[left].key < self.entries[smallest].key {
                smallest = left;
            }
            if right < len && self.entries[right].key < self.entries[smallest].key {
                smallest = right;
            }
            if smallest == slot {
                break;
            }

            self.swap_slots(slot, smallest);
            slot = smallest;
        }
    }

    /// The only primitive that moves entries: array and reverse index change together.
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        if let Some(slot) = self.positions.get_mut(&self.entries[a].value) {
            *slot = a;
        }
        if let Some(slot) = self.positions.get_mut(&self.entries[b].value) {
            *slot = b;
        }
    }

    /// Check heap order and index consistency. Used by tests.
    #[cfg(test)]
    fn assert_invariants(&self) {
        for slot in 1..self.entries.len() {
            let parent = (slot - 1) / 2;
            assert!(
                self.entries[slot].key >= self.entries[parent].key,
                "heap order violated at slot {}",
                slot
            );
        }
        assert_eq!(self.positions.len(), self.entries.len());
        for (value, &slot) in &self.positions {
            assert!(self.entries[slot].value == *value, "reverse index stale at slot {}", slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_extraction_order() {
        let mut heap = IndexedMinHeap::new();
        heap.add(5, "a").unwrap();
        heap.add(1, "b").unwrap();
        heap.add(3, "c").unwrap();

        let order: Vec<&str> = std::iter::from_fn(|| heap.extract_min().ok())
            .map(|e| e.value)
            .collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let mut heap = IndexedMinHeap::new();
        heap.add(1, 7usize).unwrap();
        assert_eq!(heap.add(0, 7usize), Err(HeapError::DuplicateValue));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.key_of(&7), Some(&1));
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = IndexedMinHeap::new();
        heap.add(10, 'x').unwrap();
        heap.add(20, 'y').unwrap();
        heap.add(30, 'z').unwrap();

        heap.decrease_key(&'z', 5).unwrap();
        assert_eq!(heap.peek().unwrap().value, 'z');
        assert_eq!(heap.peek().unwrap().key, 5);
        heap.assert_invariants();
    }

    #[test]
    fn test_decrease_key_rejects_larger_key() {
        let mut heap = IndexedMinHeap::new();
        heap.add(10, 'x').unwrap();
        assert_eq!(heap.decrease_key(&'x', 11), Err(HeapError::InvalidKey));
        assert_eq!(heap.key_of(&'x'), Some(&10));

        // equal key is a no-op
        assert_eq!(heap.decrease_key(&'x', 10), Ok(()));
    }

    #[test]
    fn test_decrease_key_missing_value() {
        let mut heap: IndexedMinHeap<i32, char> = IndexedMinHeap::new();
        assert_eq!(heap.decrease_key(&'q', 1), Err(HeapError::NotFound));
    }

    #[test]
    fn test_empty_heap() {
        let mut heap: IndexedMinHeap<i32, u32> = IndexedMinHeap::new();
        assert_eq!(heap.peek(), Err(HeapError::Empty));
        assert_eq!(heap.extract_min(), Err(HeapError::Empty));
    }

    #[test]
    fn test_single_entry_extract_clears_index() {
        let mut heap = IndexedMinHeap::new();
        heap.add(3, 42u32).unwrap();
        let entry = heap.extract_min().unwrap();
        assert_eq!(entry, HeapEntry { key: 3, value: 42 });
        assert!(!heap.contains_value(&42));
        // value can be queued again once extracted
        heap.add(1, 42u32).unwrap();
        assert!(heap.contains_value(&42));
    }

    #[test]
    fn test_values() {
        let mut heap = IndexedMinHeap::new();
        for v in 0..5u32 {
            heap.add(10 - v, v).unwrap();
        }
        let values = heap.values();
        assert_eq!(values.len(), 5);
        assert!((0..5).all(|v| values.contains(&v)));
    }

    #[test]
    fn test_random_operations_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut heap: IndexedMinHeap<u32, u32> = IndexedMinHeap::new();

        for _ in 0..2_000 {
            match rng.gen_range(0..3) {
                0 => {
                    let value = rng.gen_range(0..200);
                    let key = rng.gen_range(0..1_000);
                    let expected = !heap.contains_value(&value);
                    assert_eq!(heap.add(key, value).is_ok(), expected);
                }
                1 => {
                    let value = rng.gen_range(0..200);
                    if let Some(&current) = heap.key_of(&value) {
                        let new_key = rng.gen_range(0..=current);
                        heap.decrease_key(&value, new_key).unwrap();
                    }
                }
                _ => {
                    if let Ok(entry) = heap.extract_min() {
                        assert!(!heap.contains_value(&entry.value));
                        if let Ok(next) = heap.peek() {
                            assert!(next.key >= entry.key);
                        }
                    }
                }
            }
            heap.assert_invariants();
        }

        // draining yields non-decreasing keys
        let mut previous = None;
        while let Ok(entry) = heap.extract_min() {
            if let Some(p) = previous {
                assert!(entry.key >= p);
            }
            previous = Some(entry.key);
        }
    }
}
