//! The ordered-sequence capability.
//!
//! A container participates in diffing by exposing forward iteration and a
//! length; random access is not required. The diffing and patching entry
//! points themselves live behind [`SequenceDiff`], whose blanket
//! implementation keeps the algorithm surface closed: a concrete sequence
//! type cannot substitute its own (possibly non-minimal, non-canonical)
//! solver, which would break difference equality and move inference.

use crate::apply::{apply, IncompatibleBase};
use crate::difference::{difference, difference_by, Difference};

/// A finite, positionally indexed collection whose equality and diffing
/// semantics depend on element order.
pub trait OrderedSequence {
    /// The element type stored by the sequence.
    type Element;

    /// Borrowing iterator over the elements, front to back.
    type Iter<'s>: Iterator<Item = &'s Self::Element>
    where
        Self: 's;

    /// Iterate the elements in order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Number of elements in the sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Equality as ordered collections: same length and pairwise equivalence
    /// under `eq`.
    fn sequence_eq<O, F>(&self, other: &O, mut eq: F) -> bool
    where
        O: OrderedSequence<Element = Self::Element> + ?Sized,
        F: FnMut(&Self::Element, &Self::Element) -> bool,
    {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| eq(a, b))
    }
}

impl<E> OrderedSequence for [E] {
    type Element = E;
    type Iter<'s>
        = std::slice::Iter<'s, E>
    where
        Self: 's;

    fn iter(&self) -> Self::Iter<'_> {
        <[E]>::iter(self)
    }

    fn len(&self) -> usize {
        <[E]>::len(self)
    }
}

impl<E> OrderedSequence for Vec<E> {
    type Element = E;
    type Iter<'s>
        = std::slice::Iter<'s, E>
    where
        Self: 's;

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }
}

impl<E, const N: usize> OrderedSequence for [E; N] {
    type Element = E;
    type Iter<'s>
        = std::slice::Iter<'s, E>
    where
        Self: 's;

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }

    fn len(&self) -> usize {
        N
    }
}

/// Diffing and patching entry points for every [`OrderedSequence`].
///
/// Implemented once, for all sequences; the provided bodies delegate to the
/// canonical solver and applier and cannot be overridden per container type.
pub trait SequenceDiff: OrderedSequence {
    /// The minimal difference that transforms `base` into `self`.
    fn difference_from<B>(&self, base: &B) -> Difference<Self::Element>
    where
        B: OrderedSequence<Element = Self::Element> + ?Sized,
        Self::Element: PartialEq + Clone,
    {
        difference(base, self)
    }

    /// Like [`SequenceDiff::difference_from`], with a caller-supplied
    /// equivalence predicate.
    ///
    /// `eq` must be pure: reflexive, symmetric, transitive, and free of side
    /// effects. An impure predicate yields an unspecified (but memory-safe)
    /// difference.
    fn difference_from_by<B, F>(&self, base: &B, eq: F) -> Difference<Self::Element>
    where
        B: OrderedSequence<Element = Self::Element> + ?Sized,
        F: FnMut(&Self::Element, &Self::Element) -> bool,
        Self::Element: Clone,
    {
        difference_by(base, self, eq)
    }

    /// Apply `diff` to `self` as the base state, materializing the target
    /// sequence.
    fn applying(
        &self,
        diff: &Difference<Self::Element>,
    ) -> Result<Vec<Self::Element>, IncompatibleBase>
    where
        Self::Element: Clone,
    {
        apply(self, diff)
    }
}

impl<S: OrderedSequence + ?Sized> SequenceDiff for S {}
