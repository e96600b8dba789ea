//! Applying a difference to a base sequence.
//!
//! The applier streams the base exactly once, left to right, interleaving
//! removals and insertions in a merged order derived from the difference.
//! Compatibility with the base is positional: offsets must line up, but the
//! elements recorded in removals are not compared against the base. Callers
//! wanting patch-style element verification layer it on top.

use thiserror::Error;

use crate::difference::Difference;
use crate::sequence::OrderedSequence;

/// The difference's offsets do not line up with the supplied base sequence.
///
/// Deliberately coarse: a caller that needs to know *why* a patch failed is
/// expected to diff again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("difference is incompatible with the supplied base sequence")]
pub struct IncompatibleBase;

/// Materialize the target sequence from `base` and `diff` in one forward
/// pass, in O(|base| + k).
///
/// Walks removals and insertions with separate cursors and picks the next
/// change by comparing enumeration-adjusted offsets
/// (`removals[er].offset - er` against `insertions[ei].offset - ei`, removal
/// on ties). That order visits changes in ascending base-anchored position,
/// which is what permits the single pass.
pub fn apply<S>(base: &S, diff: &Difference<S::Element>) -> Result<Vec<S::Element>, IncompatibleBase>
where
    S: OrderedSequence + ?Sized,
    S::Element: Clone,
{
    let base_len = base.len();
    let removals = diff.removals();
    let insertions = diff.insertions();

    // Removal offsets address the base; the largest one bounds them all.
    if let Some(last) = removals.last() {
        if last.offset() >= base_len {
            return Err(IncompatibleBase);
        }
    }
    // Distinct removal offsets within [0, base_len) imply at most base_len
    // removals, so the projected length cannot underflow.
    let projected_len = base_len + insertions.len() - removals.len();

    let mut result: Vec<S::Element> = Vec::with_capacity(projected_len);
    let mut source = base.iter();
    let mut consumed = 0usize;
    // `er` and `ei` double as the enumerated remove/insert counts.
    let mut er = 0usize;
    let mut ei = 0usize;

    while er < removals.len() || ei < insertions.len() {
        let take_removal = if er < removals.len() && ei < insertions.len() {
            removals[er].offset() - er <= insertions[ei].offset() - ei
        } else {
            er < removals.len()
        };

        if take_removal {
            let offset = removals[er].offset();
            let span = offset.checked_sub(consumed).ok_or(IncompatibleBase)?;
            for _ in 0..span {
                result.push(source.next().ok_or(IncompatibleBase)?.clone());
            }
            // Discard the removed element itself.
            if source.next().is_none() {
                return Err(IncompatibleBase);
            }
            consumed += span + 1;
            er += 1;
        } else {
            let change = &insertions[ei];
            // Translate the final-state offset back into a base position by
            // accounting for the removes and inserts already enumerated.
            let anchor = (change.offset() + er)
                .checked_sub(ei)
                .ok_or(IncompatibleBase)?;
            let span = anchor.checked_sub(consumed).ok_or(IncompatibleBase)?;
            for _ in 0..span {
                result.push(source.next().ok_or(IncompatibleBase)?.clone());
            }
            result.push(change.element().clone());
            consumed += span;
            ei += 1;
        }
    }

    for element in source {
        result.push(element.clone());
        consumed += 1;
    }

    if consumed != base_len || result.len() != projected_len {
        return Err(IncompatibleBase);
    }
    Ok(result)
}
