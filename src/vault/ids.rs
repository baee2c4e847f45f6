//! Record id allocation with recycling.
//!
//! Ids are issued from a pool of free ids before the maximum is extended,
//! so add/delete churn does not grow ids without bound.  The allocator is
//! derived from the ids present in storage and is never persisted itself.
//!
//! Free ids at or below the highest issued id are kept as inclusive runs,
//! so a sparse table costs one entry per gap rather than one per id.  Ids
//! above the highest issued id are free implicitly: the next fresh id is
//! always `max_id + 1`.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

/// Pool handed out when the store holds no records yet.
pub const BOOTSTRAP_POOL: RangeInclusive<i64> = 1..=10;

/// Headroom added past the highest stored id when building the pool.
///
/// The pool covers `1 .. max_id + HEADROOM` (exclusive), so ids `{1, 3}`
/// give the pool `{2, 4, 5, 6, 7}`.
pub const HEADROOM: i64 = 5;

/// Tracks the highest issued id and the set of ids free for reuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    max_id: i64,
    /// Free runs below `max_id`, keyed by first id, value is the last id.
    gaps: BTreeMap<i64, i64>,
    /// Exclusive end of the fresh ids reported as pooled headroom.
    headroom_end: i64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            max_id: 0,
            gaps: BTreeMap::new(),
            headroom_end: BOOTSTRAP_POOL.end() + 1,
        }
    }
}

impl IdAllocator {
    /// Build the allocator from the ids currently in storage.
    ///
    /// Runs in time proportional to the number of stored ids, whatever
    /// their values.  Non-positive ids are ignored.
    pub fn initialize<I>(used_ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let used: BTreeSet<i64> = used_ids.into_iter().filter(|&id| id > 0).collect();
        let Some(&max_id) = used.last() else {
            return Self::default();
        };

        let mut gaps = BTreeMap::new();
        let mut next = 1;
        for &id in &used {
            if id > next {
                gaps.insert(next, id - 1);
            }
            next = id.saturating_add(1);
        }

        Self {
            max_id,
            gaps,
            headroom_end: max_id.saturating_add(HEADROOM),
        }
    }

    /// Issue an id.  Never fails.
    ///
    /// Takes the lowest free id if there is one, otherwise extends past
    /// the highest id seen so far.  At `i64::MAX` with no gaps left the
    /// same id comes back again and the store rejects it as a duplicate.
    pub fn allocate(&mut self) -> i64 {
        if let Some((start, end)) = self.gaps.pop_first() {
            if start < end {
                self.gaps.insert(start + 1, end);
            }
            return start;
        }

        let id = self.max_id.saturating_add(1);
        self.max_id = id;
        id
    }

    /// Return `id` to the free pool.
    ///
    /// Releasing an id that is already free is a no-op.  Non-positive
    /// ids are never valid and are ignored, as are ids above `max_id`,
    /// which are free already.
    pub fn release(&mut self, id: i64) {
        if id <= 0 || id > self.max_id || self.is_free(id) {
            return;
        }

        let mut start = id;
        let mut end = id;
        if let Some((&prev_start, &prev_end)) = self.gaps.range(..id).next_back() {
            if prev_end == id - 1 {
                start = prev_start;
            }
        }
        if let Some(next_end) = id.checked_add(1).and_then(|next| self.gaps.remove(&next)) {
            end = next_end;
        }
        self.gaps.insert(start, end);
    }

    /// Highest id observed or issued.
    pub fn max_id(&self) -> i64 {
        self.max_id
    }

    /// Ids currently eligible for reuse, in ascending order.
    pub fn free_pool(&self) -> impl Iterator<Item = i64> + '_ {
        self.gaps
            .iter()
            .flat_map(|(&start, &end)| start..=end)
            .chain(self.max_id.saturating_add(1)..self.headroom_end)
    }

    /// Number of ids in `free_pool`, counted without walking it.
    pub fn free_count(&self) -> u64 {
        let gaps: u64 = self
            .gaps
            .iter()
            .map(|(&start, &end)| (end - start) as u64 + 1)
            .sum();
        let headroom = (self.headroom_end - self.max_id.saturating_add(1)).max(0) as u64;
        gaps + headroom
    }

    /// Whether `id` would be handed out from the pool.
    pub fn is_free(&self, id: i64) -> bool {
        if id > self.max_id {
            return id < self.headroom_end;
        }
        self.gaps
            .range(..=id)
            .next_back()
            .is_some_and(|(_, &end)| id <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(alloc: &IdAllocator) -> Vec<i64> {
        alloc.free_pool().collect()
    }

    #[test]
    fn empty_store_gets_bootstrap_pool() {
        let alloc = IdAllocator::initialize(Vec::new());
        assert_eq!(alloc.max_id(), 0);
        assert_eq!(pool(&alloc), (1..=10).collect::<Vec<_>>());
        assert_eq!(alloc.free_count(), 10);
    }

    #[test]
    fn pool_fills_gaps_plus_headroom() {
        let alloc = IdAllocator::initialize([1, 3]);
        assert_eq!(alloc.max_id(), 3);
        assert_eq!(pool(&alloc), vec![2, 4, 5, 6, 7]);
        assert_eq!(alloc.free_count(), 5);
    }

    #[test]
    fn pool_excludes_every_used_id() {
        let used = [2, 5, 9, 12];
        let alloc = IdAllocator::initialize(used);
        for id in used {
            assert!(!alloc.is_free(id));
        }
        assert_eq!(alloc.max_id(), 12);
        assert!(alloc.is_free(1));
        assert!(alloc.is_free(16));
        assert!(!alloc.is_free(17));
    }

    #[test]
    fn allocate_drains_pool_then_extends() {
        let mut alloc = IdAllocator::initialize([1]);
        // Pool is {2, 3, 4, 5}.
        let issued: Vec<i64> = (0..6).map(|_| alloc.allocate()).collect();
        assert_eq!(issued, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(alloc.max_id(), 7);
    }

    #[test]
    fn allocate_tracks_max_from_bootstrap_pool() {
        let mut alloc = IdAllocator::initialize(Vec::new());
        assert_eq!(alloc.allocate(), 1);
        assert_eq!(alloc.max_id(), 1);
    }

    #[test]
    fn allocate_prefers_gaps_below_max() {
        let mut alloc = IdAllocator::initialize([1, 4, 8]);
        let issued: Vec<i64> = (0..6).map(|_| alloc.allocate()).collect();
        assert_eq!(issued, vec![2, 3, 5, 6, 7, 9]);
        assert_eq!(alloc.max_id(), 9);
    }

    #[test]
    fn released_id_is_reissued() {
        let mut alloc = IdAllocator::initialize([1, 2, 3]);
        let first = alloc.allocate();
        alloc.release(first);
        assert_eq!(alloc.allocate(), first);
    }

    #[test]
    fn release_merges_neighbouring_runs() {
        let mut alloc = IdAllocator::initialize([1, 2, 3, 4, 5]);
        alloc.release(2);
        alloc.release(4);
        alloc.release(3);
        assert_eq!(alloc.gaps.len(), 1);
        assert_eq!(pool(&alloc), vec![2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn release_is_idempotent() {
        let mut alloc = IdAllocator::initialize([1, 2]);
        alloc.release(1);
        let before = alloc.clone();
        alloc.release(1);
        assert_eq!(alloc, before);
    }

    #[test]
    fn release_ignores_non_positive_ids() {
        let mut alloc = IdAllocator::initialize([1]);
        let before = alloc.clone();
        alloc.release(0);
        alloc.release(-4);
        assert_eq!(alloc, before);
    }

    #[test]
    fn release_above_max_changes_nothing() {
        let mut alloc = IdAllocator::initialize([1]);
        let before = alloc.clone();
        alloc.release(3);
        alloc.release(500);
        assert_eq!(alloc, before);
        assert_eq!(alloc.allocate(), 2);
    }

    #[test]
    fn largest_possible_id_does_not_overflow() {
        let mut alloc = IdAllocator::initialize([1, i64::MAX]);
        assert_eq!(alloc.max_id(), i64::MAX);
        assert!(!alloc.is_free(i64::MAX));
        assert!(alloc.is_free(i64::MAX - 1));
        assert_eq!(alloc.free_count(), (i64::MAX - 2) as u64);
        assert_eq!(alloc.allocate(), 2);
        assert_eq!(alloc.allocate(), 3);
    }

    #[test]
    fn exhausted_ids_saturate_at_max() {
        let mut alloc = IdAllocator::initialize([i64::MAX - 1, i64::MAX]);
        // Skip the low gap so the fresh path is taken.
        alloc.gaps.clear();
        assert_eq!(alloc.allocate(), i64::MAX);
        assert_eq!(alloc.max_id(), i64::MAX);
        alloc.release(i64::MAX);
        assert!(alloc.is_free(i64::MAX));
        assert_eq!(alloc.allocate(), i64::MAX);
    }

    #[test]
    fn sparse_large_id_keeps_a_single_gap() {
        let mut alloc = IdAllocator::initialize([5_000_000]);
        assert_eq!(alloc.gaps.len(), 1);
        assert_eq!(alloc.free_count(), 4_999_999 + 4);
        assert_eq!(alloc.free_pool().take(3).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(alloc.allocate(), 1);
        assert!(!alloc.is_free(1));
        assert!(alloc.is_free(2));
    }

    #[test]
    fn issued_ids_are_unique_under_churn() {
        let mut alloc = IdAllocator::initialize(Vec::new());
        let mut live = BTreeSet::new();

        for round in 0..200 {
            let id = alloc.allocate();
            assert!(live.insert(id), "id {id} issued twice");
            if round % 3 == 0 {
                let victim = *live.iter().next().unwrap();
                live.remove(&victim);
                alloc.release(victim);
            }
        }
    }
}
