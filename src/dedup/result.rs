//! The kept → discarded mapping produced by duplicate resolution.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

/// Maps each kept index to the indices it caused to be discarded.
///
/// Every input index appears exactly once: either as a key (possibly with
/// an empty discard set) or inside exactly one key's discard set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionResult {
    groups: BTreeMap<usize, BTreeSet<usize>>,
}

impl ResolutionResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records `index` as a representative, without touching its discards.
    pub(crate) fn keep(&mut self, index: usize) {
        self.groups.entry(index).or_default();
    }

    /// Records `loser` as discarded under `winner`.
    ///
    /// A loser that was itself a representative hands its discards over to
    /// `winner`.
    pub(crate) fn discard(&mut self, winner: usize, loser: usize) {
        let inherited = self.groups.remove(&loser).unwrap_or_default();
        let set = self.groups.entry(winner).or_default();
        set.extend(inherited);
        set.insert(loser);
    }

    /// Discard set of a kept index, `None` if `kept` is not a representative.
    pub fn get(&self, kept: usize) -> Option<&BTreeSet<usize>> {
        self.groups.get(&kept)
    }

    /// True when `index` is a representative.
    pub fn is_kept(&self, index: usize) -> bool {
        self.groups.contains_key(&index)
    }

    /// Kept indices in ascending order.
    pub fn kept_indices(&self) -> Vec<usize> {
        self.groups.keys().copied().collect()
    }

    /// Every discarded index, across all groups.
    pub fn discarded_indices(&self) -> BTreeSet<usize> {
        self.groups.values().flatten().copied().collect()
    }

    /// Number of representatives.
    pub fn kept_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of discarded indices.
    pub fn discarded_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    /// Number of indices covered, kept plus discarded.
    pub fn len(&self) -> usize {
        self.kept_count() + self.discarded_count()
    }

    /// True when no index is covered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The kept index that stands for `index` (itself, if it was kept).
    pub fn representative_of(&self, index: usize) -> Option<usize> {
        if self.is_kept(index) {
            return Some(index);
        }
        self.groups
            .iter()
            .find(|(_, discarded)| discarded.contains(&index))
            .map(|(kept, _)| *kept)
    }

    /// True when the result covers `0..n` with every index exactly once.
    pub fn is_partition_of(&self, n: usize) -> bool {
        let mut seen = vec![false; n];
        let all = self
            .groups
            .iter()
            .flat_map(|(kept, discarded)| std::iter::once(kept).chain(discarded.iter()));

        for &idx in all {
            let Some(slot) = seen.get_mut(idx) else {
                return false;
            };
            if *slot {
                return false;
            }
            *slot = true;
        }
        seen.into_iter().all(|s| s)
    }

    /// Iterates groups in ascending order of their kept index.
    pub fn iter(&self) -> btree_map::Iter<'_, usize, BTreeSet<usize>> {
        self.groups.iter()
    }

    /// Consumes the result, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<usize, BTreeSet<usize>> {
        self.groups
    }
}

impl<'a> IntoIterator for &'a ResolutionResult {
    type Item = (&'a usize, &'a BTreeSet<usize>);
    type IntoIter = btree_map::Iter<'a, usize, BTreeSet<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders as `{1: {0}, 2: {}}`.
impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (n, (kept, discarded)) in self.groups.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            let members: Vec<String> = discarded.iter().map(usize::to_string).collect();
            write!(f, "{}: {{{}}}", kept, members.join(", "))?;
        }
        write!(f, "}}")
    }
}
