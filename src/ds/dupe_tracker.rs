//! Duplicate tracking over a code sequence with O(1) frequency buckets.
//!
//! Consumes a stream of `(code, step)` pairs in increasing step order and
//! maintains running duplicate statistics: how often each code value has
//! appeared, when it last appeared, which values share the same occurrence
//! count, and the step gaps between repeats of the same value.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                         DupeTracker Layout                         │
//! │                                                                    │
//! │  ┌──────────────────────────┐  ┌───────────────────────────────┐  │
//! │  │ counts: FxHashMap        │  │ last_seen: FxHashMap          │  │
//! │  │   code → occurrences     │  │   code → last step index      │  │
//! │  │  ┌────────┬───────────┐  │  │  ┌────────┬────────────────┐  │  │
//! │  │  │ 101532 │     3     │  │  │  │ 101532 │       3        │  │  │
//! │  │  │ 770041 │     1     │  │  │  │ 770041 │       1        │  │  │
//! │  │  └────────┴───────────┘  │  │  └────────┴────────────────┘  │  │
//! │  └──────────────────────────┘  └───────────────────────────────┘  │
//! │                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │ buckets: FxHashMap<u64, FxHashSet<u32>>  (count ≥ 2 only)    │  │
//! │  │                                                              │  │
//! │  │   count=2: {}            ← emptied by promotion, retained    │  │
//! │  │   count=3: {101532}                                          │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! │                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │ gaps: Vec<u64>   one entry per repeat, in step units         │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────────┘
//!
//! Observe Flow (one sequence step)
//! ────────────────────────────────
//!
//!   observe(code, step):
//!     1. If code was seen before → append (step - last step) to gaps
//!     2. last_seen[code] = step
//!     3. counts[code] += 1, let k = new count
//!     4. k == 2 → insert code into bucket 2 (first duplicate)
//!     5. k  > 2 → remove code from bucket k-1, insert into bucket k
//! ```
//!
//! ## Operations
//!
//! | Operation          | Time | Notes                                   |
//! |--------------------|------|-----------------------------------------|
//! | `observe`          | O(1) | amortized; bounded map/set operations   |
//! | `count`            | O(1) | 0 for values never observed             |
//! | `last_seen`        | O(1) | `None` for values never observed        |
//! | `duplicate_total`  | O(b) | b = number of distinct counts           |
//! | `summary`          | O(n log n) | sorts bucket contents for reporting |
//!
//! ## Invariants
//!
//! - A value with count k ≥ 2 is a member of bucket k and of no other
//!   bucket; values with count < 2 appear in no bucket. Removal from the
//!   old bucket happens before insertion into the new one, never deferred.
//! - `gaps.len()` equals the sum over all values of `max(count - 1, 0)`.
//! - Gaps are recorded only between consecutive occurrences of the *same*
//!   value, never between different values that collide in time.
//!
//! A bucket emptied by promoting its last value is kept as an empty set so
//! reports show the full promotion history (`{2: [], 3: [v]}`).
//!
//! ## Example Usage
//!
//! ```
//! use otpwalk::ds::DupeTracker;
//!
//! let mut tracker = DupeTracker::new();
//! for (step, code) in [3u32, 7, 3, 3, 9].into_iter().enumerate() {
//!     tracker.observe(code, step as u64);
//! }
//!
//! assert_eq!(tracker.count(3), 3);
//! assert_eq!(tracker.gaps(), &[2, 1]);
//! assert_eq!(tracker.duplicate_total(), 2);
//! assert_eq!(tracker.average_gap(), 1);
//! ```

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::InvariantError;

/// Incremental duplicate statistics over a code stream.
///
/// Histogram, last-seen and bucket tables are sparse, keyed only by values
/// actually observed, so memory is proportional to distinct values seen
/// rather than the full code space.
///
/// # Example
///
/// ```
/// use otpwalk::ds::DupeTracker;
///
/// let mut tracker = DupeTracker::new();
/// tracker.observe(42, 0);
/// tracker.observe(42, 5);
///
/// assert_eq!(tracker.count(42), 2);
/// assert_eq!(tracker.last_seen(42), Some(5));
/// assert!(tracker.bucket(2).unwrap().contains(&42));
/// assert_eq!(tracker.gaps(), &[5]);
/// ```
#[derive(Debug, Default)]
pub struct DupeTracker {
    counts: FxHashMap<u32, u64>,
    last_seen: FxHashMap<u32, u64>,
    buckets: FxHashMap<u64, FxHashSet<u32>>,
    gaps: Vec<u64>,
}

/// Read-only rollup of a completed walk's duplicate statistics.
///
/// Buckets are re-keyed into a sorted map with sorted contents so two runs
/// over the same sequence render identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DupeSummary {
    /// Total extra occurrences: a value seen k times contributes k - 1.
    pub duplicate_total: u64,
    /// Occurrence count → sorted values currently at that count (≥ 2).
    pub buckets: BTreeMap<u64, Vec<u32>>,
    /// Gap log in step units, in observation order.
    pub gaps: Vec<u64>,
    /// Floor of `sum(gaps) / len(gaps)`; 0 when the gap log is empty.
    pub average_gap: u64,
}

impl DupeTracker {
    /// Creates an empty tracker.
    ///
    /// # Example
    ///
    /// ```
    /// use otpwalk::ds::DupeTracker;
    ///
    /// let tracker = DupeTracker::new();
    /// assert!(tracker.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tracker with capacity reserved for `capacity`
    /// distinct code values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            last_seen: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            gaps: Vec::new(),
        }
    }

    /// Number of distinct code values observed so far.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrence count for `code`; 0 if never observed.
    ///
    /// # Example
    ///
    /// ```
    /// use otpwalk::ds::DupeTracker;
    ///
    /// let mut tracker = DupeTracker::new();
    /// tracker.observe(7, 0);
    ///
    /// assert_eq!(tracker.count(7), 1);
    /// assert_eq!(tracker.count(8), 0);
    /// ```
    #[inline]
    pub fn count(&self, code: u32) -> u64 {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Step index at which `code` last occurred, if ever.
    #[inline]
    pub fn last_seen(&self, code: u32) -> Option<u64> {
        self.last_seen.get(&code).copied()
    }

    /// Gap log so far, in step units, in observation order.
    #[inline]
    pub fn gaps(&self) -> &[u64] {
        &self.gaps
    }

    /// Set of values currently at occurrence count `count` (≥ 2).
    ///
    /// Returns `None` for counts no value has ever reached; a `Some` of an
    /// empty set means every value at that count has since been promoted.
    #[inline]
    pub fn bucket(&self, count: u64) -> Option<&FxHashSet<u32>> {
        self.buckets.get(&count)
    }

    /// Iterates `(count, values)` over all buckets, in arbitrary order.
    pub fn iter_buckets(&self) -> impl Iterator<Item = (u64, &FxHashSet<u32>)> {
        self.buckets.iter().map(|(count, values)| (*count, values))
    }

    /// Records one sequence step.
    ///
    /// Must be called in increasing `step` order. Total over the code
    /// space; never fails. A value's second occurrence enters bucket 2;
    /// each further occurrence moves it from bucket k-1 to bucket k, with
    /// removal preceding insertion so no bucket retains a stale entry.
    ///
    /// # Example
    ///
    /// ```
    /// use otpwalk::ds::DupeTracker;
    ///
    /// let mut tracker = DupeTracker::new();
    /// tracker.observe(5, 0);
    /// tracker.observe(5, 3);
    /// tracker.observe(5, 4);
    ///
    /// // 5 moved out of bucket 2 into bucket 3
    /// assert!(tracker.bucket(2).unwrap().is_empty());
    /// assert!(tracker.bucket(3).unwrap().contains(&5));
    /// assert_eq!(tracker.gaps(), &[3, 1]);
    /// ```
    #[inline]
    pub fn observe(&mut self, code: u32, step: u64) {
        if let Some(prev) = self.last_seen.insert(code, step) {
            self.gaps.push(step - prev);
        }

        let entry = self.counts.entry(code).or_insert(0);
        *entry += 1;
        let count = *entry;

        if count >= 2 {
            if count > 2 {
                if let Some(old) = self.buckets.get_mut(&(count - 1)) {
                    old.remove(&code);
                }
            }
            self.buckets.entry(count).or_default().insert(code);
        }
    }

    /// Total duplicate occurrences: Σ over counts k ≥ 2 of (k-1)·|bucket k|.
    ///
    /// # Example
    ///
    /// ```
    /// use otpwalk::ds::DupeTracker;
    ///
    /// let mut tracker = DupeTracker::new();
    /// for (step, code) in [1u32, 1, 2, 2, 2].into_iter().enumerate() {
    ///     tracker.observe(code, step as u64);
    /// }
    ///
    /// // value 1 seen twice (1 extra), value 2 seen thrice (2 extra)
    /// assert_eq!(tracker.duplicate_total(), 3);
    /// ```
    pub fn duplicate_total(&self) -> u64 {
        self.buckets
            .iter()
            .map(|(count, values)| (count - 1) * values.len() as u64)
            .sum()
    }

    /// Floor of the mean gap; 0 when the gap log is empty.
    pub fn average_gap(&self) -> u64 {
        self.gaps.iter().sum::<u64>() / (self.gaps.len() as u64).max(1)
    }

    /// Read-only rollup for reporting. Does not mutate tracker state.
    ///
    /// # Example
    ///
    /// ```
    /// use otpwalk::ds::DupeTracker;
    ///
    /// let mut tracker = DupeTracker::new();
    /// for (step, code) in [3u32, 7, 3, 3, 9].into_iter().enumerate() {
    ///     tracker.observe(code, step as u64);
    /// }
    ///
    /// let summary = tracker.summary();
    /// assert_eq!(summary.duplicate_total, 2);
    /// assert_eq!(summary.buckets[&3], vec![3]);
    /// assert_eq!(summary.average_gap, 1);
    /// ```
    pub fn summary(&self) -> DupeSummary {
        let buckets = self
            .buckets
            .iter()
            .map(|(count, values)| {
                let mut values: Vec<u32> = values.iter().copied().collect();
                values.sort_unstable();
                (*count, values)
            })
            .collect();

        DupeSummary {
            duplicate_total: self.duplicate_total(),
            buckets,
            gaps: self.gaps.clone(),
            average_gap: self.average_gap(),
        }
    }

    /// Verifies internal consistency; any error is a programming defect.
    ///
    /// Checked: bucket membership matches the histogram exactly (count
    /// k ≥ 2 ⇔ member of bucket k only), sub-duplicate values appear in no
    /// bucket, the gap log length matches the histogram, and last-seen
    /// covers exactly the observed values.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (&code, &count) in &self.counts {
            if count == 0 {
                return Err(InvariantError::new(format!(
                    "code {code} has zero count but is present in histogram"
                )));
            }
            for (&bucket_count, values) in &self.buckets {
                let expected = count >= 2 && bucket_count == count;
                if values.contains(&code) != expected {
                    return Err(InvariantError::new(format!(
                        "code {code} with count {count}: bucket {bucket_count} \
                         membership should be {expected}"
                    )));
                }
            }
            if !self.last_seen.contains_key(&code) {
                return Err(InvariantError::new(format!(
                    "code {code} observed but missing from last-seen"
                )));
            }
        }

        for (&bucket_count, values) in &self.buckets {
            if bucket_count < 2 {
                return Err(InvariantError::new(format!(
                    "bucket key {bucket_count} below duplicate threshold"
                )));
            }
            for &code in values {
                if self.count(code) != bucket_count {
                    return Err(InvariantError::new(format!(
                        "stale bucket entry: code {code} in bucket {bucket_count} \
                         but count is {}",
                        self.count(code)
                    )));
                }
            }
        }

        if self.last_seen.len() != self.counts.len() {
            return Err(InvariantError::new(format!(
                "last-seen tracks {} values but histogram tracks {}",
                self.last_seen.len(),
                self.counts.len()
            )));
        }

        let expected_gaps: u64 = self.counts.values().map(|&c| c.saturating_sub(1)).sum();
        if self.gaps.len() as u64 != expected_gaps {
            return Err(InvariantError::new(format!(
                "gap log has {} entries, histogram implies {expected_gaps}",
                self.gaps.len()
            )));
        }

        Ok(())
    }

    /// Panicking wrapper around [`check_invariants`](Self::check_invariants)
    /// for tests and debug assertions.
    #[track_caller]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("DupeTracker invariant violated: {err}");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
