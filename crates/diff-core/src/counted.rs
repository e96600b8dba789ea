//! Offset-carrying view over an ordered sequence.
//!
//! The solver and the change expansion address elements by zero-based
//! offsets. [`Counted`] snapshots a sequence's elements (by reference, no
//! element is copied) so that stepping through it yields each element next to
//! its offset. The end position carries no offset: iteration stops at the
//! last element, and [`Counted::offset_at`] is absent for `position == len`.

use std::ops::Range;

use crate::sequence::OrderedSequence;

/// A borrowed positional snapshot of a sequence.
pub(crate) struct Counted<'a, E> {
    items: Vec<&'a E>,
}

impl<'a, E> Counted<'a, E> {
    pub(crate) fn from_sequence<S>(sequence: &'a S) -> Self
    where
        S: OrderedSequence<Element = E> + ?Sized,
    {
        Self {
            items: sequence.iter().collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// The element at `offset`. Panics past the end; the solver's guards
    /// keep every access in bounds.
    pub(crate) fn element(&self, offset: usize) -> &'a E {
        self.items[offset]
    }

    /// The offset carried by `position`, or `None` for the end position.
    pub(crate) fn offset_at(&self, position: usize) -> Option<usize> {
        (position < self.items.len()).then_some(position)
    }

    /// `(offset, element)` pairs for the given offset range, ascending.
    pub(crate) fn run(&self, range: Range<usize>) -> impl Iterator<Item = (usize, &'a E)> + '_ {
        range.map(|offset| (offset, self.items[offset]))
    }
}
