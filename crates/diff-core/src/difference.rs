//! The difference value: a validated, ordered collection of changes.
//!
//! A [`Difference`] is a portable boundary value. It can be persisted,
//! transmitted, inspected, and applied to any sequence whose current state is
//! the base it was computed against; it stays valid after both source
//! sequences are gone.

use std::collections::HashMap;
use std::hash::Hash;
use std::iter::{Chain, Rev};
use std::slice;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::counted::Counted;
use crate::myers;
use crate::path::{DiffPath, PathSegment};
use crate::sequence::OrderedSequence;

/// A single insertion or removal at a known offset.
///
/// For a `Remove`, `offset` is the element's position in the *base* state.
/// For an `Insert`, `offset` is the element's position in the *final* state,
/// after the whole difference has been applied.
///
/// `associated_with`, when present, names the offset of a complementary
/// change of the opposite kind holding an equivalent element: a logical
/// "move". Associations are metadata only and never affect the state
/// transition a difference encodes.
///
/// The serialized form is a tagged record:
/// `{"kind": "remove"|"insert", "offset": …, "element": …, "associated_with": …?}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Change<E> {
    /// Removal of `element` at `offset` in the base state.
    Remove {
        /// Position of the element in the base state.
        offset: usize,
        /// The removed element.
        element: E,
        /// Final-state offset of the insertion this removal moves to, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        associated_with: Option<usize>,
    },
    /// Insertion of `element` at `offset` in the final state.
    Insert {
        /// Position of the element in the final state.
        offset: usize,
        /// The inserted element.
        element: E,
        /// Base-state offset of the removal this insertion moves from, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        associated_with: Option<usize>,
    },
}

impl<E> Change<E> {
    /// The change's offset (base-state for removals, final-state for
    /// insertions).
    pub fn offset(&self) -> usize {
        match self {
            Change::Remove { offset, .. } | Change::Insert { offset, .. } => *offset,
        }
    }

    /// The element being removed or inserted.
    pub fn element(&self) -> &E {
        match self {
            Change::Remove { element, .. } | Change::Insert { element, .. } => element,
        }
    }

    /// The offset of the complementary change, when this one is half of a
    /// move.
    pub fn associated_with(&self) -> Option<usize> {
        match self {
            Change::Remove {
                associated_with, ..
            }
            | Change::Insert {
                associated_with, ..
            } => *associated_with,
        }
    }

    /// Returns `true` for a `Remove`.
    pub fn is_remove(&self) -> bool {
        matches!(self, Change::Remove { .. })
    }

    /// Returns `true` for an `Insert`.
    pub fn is_insert(&self) -> bool {
        matches!(self, Change::Insert { .. })
    }

    fn set_associated_with(&mut self, value: Option<usize>) {
        match self {
            Change::Remove {
                associated_with, ..
            }
            | Change::Insert {
                associated_with, ..
            } => *associated_with = value,
        }
    }
}

/// A change collection that violates the difference invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedDifference {
    /// Two removals share a base-state offset.
    #[error("duplicate remove offset {0}")]
    DuplicateRemoveOffset(usize),
    /// Two insertions share a final-state offset.
    #[error("duplicate insert offset {0}")]
    DuplicateInsertOffset(usize),
    /// A change names an association that is absent or does not point back.
    #[error("change at offset {offset} associates with offset {associated_with}, which does not associate back")]
    AsymmetricAssociation {
        /// Offset of the change carrying the dangling association.
        offset: usize,
        /// The offset it claims as its counterpart.
        associated_with: usize,
    },
}

/// A validated set of insert/remove changes representing the state
/// transition between two ordered sequences.
///
/// Invariants (enforced by every constructor):
///
/// 1. Removal offsets are pairwise distinct.
/// 2. Insertion offsets are pairwise distinct.
/// 3. Associations are symmetric: a removal associated with final offset `i`
///    requires exactly one insertion at `i` associated back with the
///    removal's offset, and vice versa.
///
/// A difference is immutable once constructed. Two differences are equal iff
/// they contain the same changes, associations included; because the solver
/// is deterministic and minimal, solver-produced differences compare equal
/// exactly when they encode the same state transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Difference<E> {
    /// Removals, ascending by base-state offset.
    removals: Vec<Change<E>>,
    /// Insertions, ascending by final-state offset.
    insertions: Vec<Change<E>>,
}

impl<E> Difference<E> {
    /// The empty difference: applying it is the identity.
    pub fn empty() -> Self {
        Self {
            removals: Vec::new(),
            insertions: Vec::new(),
        }
    }

    /// Expand a solver path into changes. The path guarantees the invariants
    /// by construction: segment ranges ascend and never overlap.
    pub(crate) fn from_path(path: &DiffPath, base: &Counted<'_, E>, target: &Counted<'_, E>) -> Self
    where
        E: Clone,
    {
        let mut removals = Vec::new();
        let mut insertions = Vec::new();
        for segment in path.segments() {
            match segment {
                PathSegment::Removed(range) => {
                    for (offset, element) in base.run(range) {
                        removals.push(Change::Remove {
                            offset,
                            element: element.clone(),
                            associated_with: None,
                        });
                    }
                }
                PathSegment::Inserted(range) => {
                    for (offset, element) in target.run(range) {
                        insertions.push(Change::Insert {
                            offset,
                            element: element.clone(),
                            associated_with: None,
                        });
                    }
                }
                PathSegment::Matched(..) => {}
            }
        }
        Self {
            removals,
            insertions,
        }
    }

    /// Rebuild a difference from an arbitrary change collection, validating
    /// the invariants in O(k log k).
    ///
    /// The input order is irrelevant; the result is canonical. Fails with
    /// [`MalformedDifference`] when offsets collide within a kind or an
    /// association is one-sided.
    pub fn from_changes<I>(changes: I) -> Result<Self, MalformedDifference>
    where
        I: IntoIterator<Item = Change<E>>,
    {
        let mut removals = Vec::new();
        let mut insertions = Vec::new();
        for change in changes {
            if change.is_remove() {
                removals.push(change);
            } else {
                insertions.push(change);
            }
        }
        removals.sort_by_key(Change::offset);
        insertions.sort_by_key(Change::offset);

        for pair in removals.windows(2) {
            if pair[0].offset() == pair[1].offset() {
                return Err(MalformedDifference::DuplicateRemoveOffset(pair[0].offset()));
            }
        }
        for pair in insertions.windows(2) {
            if pair[0].offset() == pair[1].offset() {
                return Err(MalformedDifference::DuplicateInsertOffset(pair[0].offset()));
            }
        }

        for remove in &removals {
            if let Some(target) = remove.associated_with() {
                let counterpart = insertions
                    .binary_search_by_key(&target, Change::offset)
                    .ok()
                    .map(|index| &insertions[index]);
                if counterpart.and_then(Change::associated_with) != Some(remove.offset()) {
                    return Err(MalformedDifference::AsymmetricAssociation {
                        offset: remove.offset(),
                        associated_with: target,
                    });
                }
            }
        }
        for insert in &insertions {
            if let Some(target) = insert.associated_with() {
                let counterpart = removals
                    .binary_search_by_key(&target, Change::offset)
                    .ok()
                    .map(|index| &removals[index]);
                if counterpart.and_then(Change::associated_with) != Some(insert.offset()) {
                    return Err(MalformedDifference::AsymmetricAssociation {
                        offset: insert.offset(),
                        associated_with: target,
                    });
                }
            }
        }

        Ok(Self {
            removals,
            insertions,
        })
    }

    /// The removals, ascending by base-state offset.
    pub fn removals(&self) -> &[Change<E>] {
        &self.removals
    }

    /// The insertions, ascending by final-state offset.
    pub fn insertions(&self) -> &[Change<E>] {
        &self.insertions
    }

    /// Total number of changes.
    pub fn len(&self) -> usize {
        self.removals.len() + self.insertions.len()
    }

    /// Returns `true` when the difference carries no changes.
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.insertions.is_empty()
    }

    /// Iterate every change in application order: removals by *descending*
    /// base offset, then insertions by *ascending* final offset.
    ///
    /// Applied one at a time to a compatible base via point mutations, this
    /// order leaves every not-yet-consumed change's offset valid.
    pub fn iter(&self) -> Changes<'_, E> {
        Changes {
            inner: self.removals.iter().rev().chain(self.insertions.iter()),
        }
    }
}

impl<E: Eq + Hash> Difference<E> {
    /// Associate removals with insertions that carry the same element value,
    /// producing a new difference whose changes differ only in their
    /// `associated_with` fields.
    ///
    /// An element value is paired iff it appears exactly once among the
    /// removals and exactly once among the insertions; values occurring more
    /// than once on either side are left unassociated. Prior associations are
    /// discarded: the result carries exactly the inferred pairs.
    pub fn infer_moves(mut self) -> Self {
        let pairs: Vec<(usize, usize)> = {
            let mut removed: HashMap<&E, (usize, usize)> = HashMap::new();
            for (index, change) in self.removals.iter().enumerate() {
                let entry = removed.entry(change.element()).or_insert((0, index));
                entry.0 += 1;
                entry.1 = index;
            }
            let mut inserted: HashMap<&E, (usize, usize)> = HashMap::new();
            for (index, change) in self.insertions.iter().enumerate() {
                let entry = inserted.entry(change.element()).or_insert((0, index));
                entry.0 += 1;
                entry.1 = index;
            }
            removed
                .iter()
                .filter(|(_, (count, _))| *count == 1)
                .filter_map(|(element, (_, remove_index))| {
                    match inserted.get(element) {
                        Some((1, insert_index)) => Some((*remove_index, *insert_index)),
                        _ => None,
                    }
                })
                .collect()
        };

        for change in self.removals.iter_mut().chain(self.insertions.iter_mut()) {
            change.set_associated_with(None);
        }
        for (remove_index, insert_index) in pairs {
            let remove_offset = self.removals[remove_index].offset();
            let insert_offset = self.insertions[insert_index].offset();
            self.removals[remove_index].set_associated_with(Some(insert_offset));
            self.insertions[insert_index].set_associated_with(Some(remove_offset));
        }
        self
    }
}

/// Iterator over a difference's changes in application order.
///
/// Yields removals by descending base offset, then insertions by ascending
/// final offset. See [`Difference::iter`].
pub struct Changes<'a, E> {
    inner: Chain<Rev<slice::Iter<'a, Change<E>>>, slice::Iter<'a, Change<E>>>,
}

impl<'a, E> Iterator for Changes<'a, E> {
    type Item = &'a Change<E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, E> IntoIterator for &'a Difference<E> {
    type Item = &'a Change<E>;
    type IntoIter = Changes<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Serialize> Serialize for Difference<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.removals.iter().chain(self.insertions.iter()))
    }
}

impl<'de, E: Deserialize<'de>> Deserialize<'de> for Difference<E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let changes = Vec::<Change<E>>::deserialize(deserializer)?;
        Self::from_changes(changes).map_err(serde::de::Error::custom)
    }
}

/// Compute the minimal difference that transforms `base` into `target`,
/// comparing elements with `==`.
pub fn difference<B, T>(base: &B, target: &T) -> Difference<T::Element>
where
    B: OrderedSequence + ?Sized,
    T: OrderedSequence<Element = B::Element> + ?Sized,
    T::Element: PartialEq + Clone,
{
    difference_by(base, target, |a, b| a == b)
}

/// Compute the minimal difference that transforms `base` into `target` under
/// a caller-supplied equivalence predicate.
///
/// Always succeeds; identical inputs yield the empty difference. The number
/// of changes equals the edit distance between the inputs, and the script is
/// canonical: equal inputs produce bit-equal differences across runs and
/// input representations.
///
/// `eq` must be pure. Time is O((n + m)·D) and frontier space O(D²), where D
/// is the edit distance.
pub fn difference_by<B, T, F>(base: &B, target: &T, mut eq: F) -> Difference<T::Element>
where
    B: OrderedSequence + ?Sized,
    T: OrderedSequence<Element = B::Element> + ?Sized,
    T::Element: Clone,
    F: FnMut(&T::Element, &T::Element) -> bool,
{
    let base_view = Counted::from_sequence(base);
    let target_view = Counted::from_sequence(target);
    let path = myers::shortest_path(&base_view, &target_view, &mut eq);
    Difference::from_path(&path, &base_view, &target_view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remove(offset: usize, element: char) -> Change<char> {
        Change::Remove {
            offset,
            element,
            associated_with: None,
        }
    }

    fn insert(offset: usize, element: char) -> Change<char> {
        Change::Insert {
            offset,
            element,
            associated_with: None,
        }
    }

    #[test]
    fn test_from_changes_sorts_each_kind() {
        let diff = Difference::from_changes(vec![
            insert(3, 'x'),
            remove(2, 'b'),
            insert(0, 'y'),
            remove(1, 'a'),
        ])
        .unwrap();

        let removal_offsets: Vec<usize> = diff.removals().iter().map(Change::offset).collect();
        let insertion_offsets: Vec<usize> = diff.insertions().iter().map(Change::offset).collect();
        assert_eq!(removal_offsets, vec![1, 2]);
        assert_eq!(insertion_offsets, vec![0, 3]);
    }

    #[test]
    fn test_duplicate_offsets_rejected_per_kind() {
        assert_eq!(
            Difference::from_changes(vec![remove(1, 'a'), remove(1, 'b')]),
            Err(MalformedDifference::DuplicateRemoveOffset(1))
        );
        assert_eq!(
            Difference::from_changes(vec![insert(0, 'a'), insert(0, 'b')]),
            Err(MalformedDifference::DuplicateInsertOffset(0))
        );
        // The same offset on opposite kinds is fine.
        assert!(Difference::from_changes(vec![remove(0, 'a'), insert(0, 'b')]).is_ok());
    }

    #[test]
    fn test_one_sided_association_rejected() {
        let dangling = Change::Remove {
            offset: 2,
            element: 'a',
            associated_with: Some(0),
        };
        assert_eq!(
            Difference::from_changes(vec![dangling.clone()]),
            Err(MalformedDifference::AsymmetricAssociation {
                offset: 2,
                associated_with: 0,
            })
        );

        // Counterpart exists but does not point back.
        assert_eq!(
            Difference::from_changes(vec![dangling, insert(0, 'a')]),
            Err(MalformedDifference::AsymmetricAssociation {
                offset: 2,
                associated_with: 0,
            })
        );
    }

    #[test]
    fn test_symmetric_association_accepted() {
        let diff = Difference::from_changes(vec![
            Change::Remove {
                offset: 2,
                element: 'a',
                associated_with: Some(0),
            },
            Change::Insert {
                offset: 0,
                element: 'a',
                associated_with: Some(2),
            },
        ])
        .unwrap();
        assert_eq!(diff.len(), 2);
    }

    #[test]
    fn test_iteration_order_removals_descending_then_insertions_ascending() {
        let diff = Difference::from_changes(vec![
            remove(0, 'a'),
            remove(4, 'b'),
            insert(1, 'c'),
            insert(3, 'd'),
        ])
        .unwrap();

        let order: Vec<(bool, usize)> = diff.iter().map(|c| (c.is_remove(), c.offset())).collect();
        assert_eq!(
            order,
            vec![(true, 4), (true, 0), (false, 1), (false, 3)]
        );
    }

    #[test]
    fn test_equality_is_change_multiset_equality() {
        let a = Difference::from_changes(vec![remove(1, 'a'), insert(0, 'b')]).unwrap();
        let b = Difference::from_changes(vec![insert(0, 'b'), remove(1, 'a')]).unwrap();
        let c = Difference::from_changes(vec![insert(0, 'b')]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_infer_moves_pairs_unique_elements() {
        let diff = Difference::from_changes(vec![remove(2, 'z'), insert(0, 'z')])
            .unwrap()
            .infer_moves();

        assert_eq!(diff.removals()[0].associated_with(), Some(0));
        assert_eq!(diff.insertions()[0].associated_with(), Some(2));
    }

    #[test]
    fn test_infer_moves_skips_duplicated_elements() {
        let diff = Difference::from_changes(vec![
            remove(0, 'z'),
            remove(5, 'z'),
            insert(1, 'z'),
            insert(4, 'q'),
        ])
        .unwrap()
        .infer_moves();

        assert!(diff.iter().all(|c| c.associated_with().is_none()));
    }

    #[test]
    fn test_infer_moves_discards_stale_associations() {
        let diff = Difference::from_changes(vec![
            Change::Remove {
                offset: 0,
                element: 'z',
                associated_with: Some(1),
            },
            Change::Remove {
                offset: 5,
                element: 'z',
                associated_with: None,
            },
            Change::Insert {
                offset: 1,
                element: 'z',
                associated_with: Some(0),
            },
        ])
        .unwrap()
        .infer_moves();

        assert!(diff.iter().all(|c| c.associated_with().is_none()));
    }

    #[test]
    fn test_empty_difference() {
        let diff: Difference<char> = Difference::empty();
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
        assert_eq!(diff.iter().count(), 0);
    }

    #[test]
    fn test_difference_between_sequences() {
        let base = vec!['X', 'A', 'B', 'C', 'D'];
        let target = vec!['X', 'Y', 'C', 'D'];
        let diff = difference(&base, &target);

        let removals: Vec<(usize, char)> = diff
            .removals()
            .iter()
            .map(|c| (c.offset(), *c.element()))
            .collect();
        let insertions: Vec<(usize, char)> = diff
            .insertions()
            .iter()
            .map(|c| (c.offset(), *c.element()))
            .collect();
        assert_eq!(removals, vec![(1, 'A'), (2, 'B')]);
        assert_eq!(insertions, vec![(1, 'Y')]);
    }

    #[test]
    fn test_difference_owns_its_elements() {
        let diff = {
            let base = vec![String::from("a"), String::from("b")];
            let target = vec![String::from("b")];
            difference(&base, &target)
        };
        // Both sources are dropped; the difference remains usable.
        assert_eq!(diff.removals()[0].element(), "a");
    }
}
