#![warn(missing_docs)]
//! diff-core - Minimal Edit-Script Diffing for Ordered Sequences
//!
//! # Overview
//!
//! `diff-core` computes a compact [`Difference`] between a *base* and a
//! *target* sequence and applies it back: `apply(base, &difference(base,
//! target))` reconstructs the target. A difference is a boundary value: it
//! owns its elements, can be persisted and transmitted (serde), inspected,
//! and applied to any sequence whose current state is the original base.
//!
//! # Core Pieces
//!
//! - **Solver**: Myers' greedy O(ND) algorithm with a canonical tie-break,
//!   so equal state transitions always produce bit-equal differences
//! - **Difference value**: validated insert/remove changes with offsets,
//!   dual iteration orders, and post-hoc move inference
//! - **Applier**: single forward pass over the base, O(|base| + changes)
//!
//! # Quick Start
//!
//! ```rust
//! use diff_core::{apply, difference};
//!
//! let base: Vec<char> = "XABCD".chars().collect();
//! let target: Vec<char> = "XYCD".chars().collect();
//!
//! let diff = difference(&base, &target);
//! assert_eq!(diff.len(), 3);
//! assert_eq!(apply(&base, &diff).unwrap(), target);
//! ```
//!
//! Sequences participate through the [`OrderedSequence`] trait (implemented
//! for slices, arrays, and `Vec`); [`SequenceDiff`] adds method-style entry
//! points:
//!
//! ```rust
//! use diff_core::SequenceDiff;
//!
//! let base = vec![1, 2, 3];
//! let target = vec![3, 1, 2];
//!
//! let diff = target.difference_from(&base).infer_moves();
//! assert_eq!(base.applying(&diff).unwrap(), target);
//! ```
//!
//! # Module Description
//!
//! - [`difference`] / [`difference_by`] - compute a minimal difference
//! - [`apply`] - materialize a target from base + difference
//! - [`Difference::from_changes`] - rebuild (and validate) a persisted
//!   difference
//! - [`Difference::infer_moves`] - associate remove/insert pairs that move
//!   an element
//!
//! # Guarantees
//!
//! The engine is purely in-memory and synchronous: no I/O, no locks, no
//! global state. A constructed [`Difference`] is immutable and freely
//! shareable across threads. Caller-supplied equivalence predicates must be
//! pure; an impure predicate yields an unspecified but memory-safe result.

mod apply;
mod counted;
mod difference;
mod myers;
mod path;
mod prefix;
mod sequence;
mod triangle;

pub use apply::{apply, IncompatibleBase};
pub use difference::{difference, difference_by, Change, Changes, Difference, MalformedDifference};
pub use sequence::{OrderedSequence, SequenceDiff};
