//! Sorted slot sets and the linear merge-scan algebra used for selection bookkeeping.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raised when building a [`SlotSet`] from a sequence that is not strictly increasing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("slot sequence is not strictly increasing: {0:?}")]
pub struct UnsortedSlots(pub Vec<usize>);

/// A set of element slots, stored as a strictly increasing vector.
///
/// Equality is structural. All set operations are single two-cursor scans over the
/// sorted inputs and produce sorted, duplicate-free output.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct SlotSet(Vec<usize>);

impl SlotSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A set holding one slot
    pub fn single(slot: usize) -> Self {
        Self(vec![slot])
    }

    /// Every slot in `0..count`
    pub fn all(count: usize) -> Self {
        Self((0..count).collect())
    }

    /// Wrap an already sorted vector.
    ///
    /// # Panics
    /// If `slots` is not strictly increasing.
    pub fn from_sorted(slots: Vec<usize>) -> Self {
        match Self::try_from(slots) {
            Ok(set) => set,
            Err(err) => panic!("{err}"),
        }
    }

    /// Build a set from slots in any order, dropping duplicates
    pub fn from_unsorted(slots: impl IntoIterator<Item = usize>) -> Self {
        let mut slots: Vec<usize> = slots.into_iter().collect();
        slots.sort_unstable();
        slots.dedup();
        Self(slots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.0.iter().copied()
    }

    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.0.binary_search(&slot).is_ok()
    }

    /// Slots present in either set
    pub fn union(&self, other: &SlotSet) -> SlotSet {
        let (a, b) = (&self.0, &other.0);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            if a[i] < b[j] {
                out.push(a[i]);
                i += 1;
            } else if b[j] < a[i] {
                out.push(b[j]);
                j += 1;
            } else {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        SlotSet(out)
    }

    /// Slots present in both sets
    pub fn intersection(&self, other: &SlotSet) -> SlotSet {
        let (a, b) = (&self.0, &other.0);
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let (s1, s2) = (a[i], b[j]);
            if s1 == s2 {
                out.push(s1);
            }
            if s1 <= s2 {
                i += 1;
            }
            if s2 <= s1 {
                j += 1;
            }
        }
        SlotSet(out)
    }

    /// Slots of `self` that are not in `other`
    pub fn minus(&self, other: &SlotSet) -> SlotSet {
        let (a, b) = (&self.0, &other.0);
        let mut out = Vec::with_capacity(a.len());
        let mut j = 0;
        for &slot in a {
            while j < b.len() && b[j] < slot {
                j += 1;
            }
            if j < b.len() && b[j] == slot {
                continue;
            }
            out.push(slot);
        }
        SlotSet(out)
    }

    /// Slots in `0..domain_size` that are not in `self`.
    ///
    /// # Panics
    /// If `self` holds a slot outside the domain; that means a stale selection.
    pub fn complement(&self, domain_size: usize) -> SlotSet {
        let mut out = Vec::with_capacity(domain_size.saturating_sub(self.len()));
        let mut cursor = 0;
        for slot in 0..domain_size {
            if cursor < self.0.len() && self.0[cursor] == slot {
                cursor += 1;
            } else {
                out.push(slot);
            }
        }
        if cursor != self.0.len() {
            panic!(
                "slot set {:?} has slots outside the domain of size {}",
                self, domain_size
            );
        }
        SlotSet(out)
    }
}

impl TryFrom<Vec<usize>> for SlotSet {
    type Error = UnsortedSlots;

    fn try_from(slots: Vec<usize>) -> Result<Self, Self::Error> {
        if slots.windows(2).any(|w| w[0] >= w[1]) {
            return Err(UnsortedSlots(slots));
        }
        Ok(SlotSet(slots))
    }
}

impl From<SlotSet> for Vec<usize> {
    fn from(set: SlotSet) -> Self {
        set.0
    }
}

impl FromIterator<usize> for SlotSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_unsorted(iter)
    }
}

impl<'a> IntoIterator for &'a SlotSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for SlotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}
