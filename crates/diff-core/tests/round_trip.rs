//! Randomized consistency validation.
//!
//! Validation criteria:
//! 1. Round-trip: for random sequence pairs, applying the computed
//!    difference to the base reconstructs the target exactly.
//! 2. Minimality: on small inputs, the change count equals the edit
//!    distance computed by a brute-force LCS reference.
//! 3. Stability: inference and rebuild-through-validation never change what
//!    a difference does.

use diff_core::{apply, difference, Difference};
use rand::Rng;

/// Random sequence over a deliberately small alphabet, so matches and
/// repeated elements are common.
fn random_sequence(rng: &mut impl Rng, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| rng.gen_range(b'a'..=b'f')).collect()
}

/// Derive a target by randomly editing the base, biased toward small edits.
fn random_edit(rng: &mut impl Rng, base: &[u8]) -> Vec<u8> {
    let mut out = base.to_vec();
    let edits = rng.gen_range(0..=8);
    for _ in 0..edits {
        if out.is_empty() || rng.gen_bool(0.5) {
            let offset = rng.gen_range(0..=out.len());
            out.insert(offset, rng.gen_range(b'a'..=b'f'));
        } else {
            let offset = rng.gen_range(0..out.len());
            out.remove(offset);
        }
    }
    out
}

fn reference_edit_distance(a: &[u8], b: &[u8]) -> usize {
    let mut lcs = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }
    a.len() + b.len() - 2 * lcs[0][0]
}

#[test]
fn test_round_trip_random_pairs() {
    let mut rng = rand::thread_rng();

    for _ in 0..300 {
        let base = random_sequence(&mut rng, 40);
        let target = random_sequence(&mut rng, 40);

        let diff = difference(&base, &target);
        assert_eq!(
            apply(&base, &diff),
            Ok(target.clone()),
            "round-trip failed for {:?} -> {:?}",
            base,
            target
        );
    }
}

#[test]
fn test_round_trip_random_edits_of_base() {
    let mut rng = rand::thread_rng();

    for _ in 0..300 {
        let base = random_sequence(&mut rng, 60);
        let target = random_edit(&mut rng, &base);

        let diff = difference(&base, &target);
        assert_eq!(apply(&base, &diff), Ok(target));
    }
}

#[test]
fn test_minimality_random_small_inputs() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let base = random_sequence(&mut rng, 12);
        let target = random_sequence(&mut rng, 12);

        let diff = difference(&base, &target);
        assert_eq!(
            diff.len(),
            reference_edit_distance(&base, &target),
            "non-minimal script for {:?} -> {:?}",
            base,
            target
        );
    }
}

#[test]
fn test_inference_and_rebuild_preserve_the_transition() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let base = random_sequence(&mut rng, 30);
        let target = random_edit(&mut rng, &base);

        let moved = difference(&base, &target).infer_moves();
        assert_eq!(apply(&base, &moved), Ok(target.clone()));

        let rebuilt = Difference::from_changes(moved.iter().cloned()).unwrap();
        assert_eq!(rebuilt, moved);
        assert_eq!(apply(&base, &rebuilt), Ok(target));
    }
}

#[test]
fn test_apply_rejects_mismatched_random_bases() {
    let mut rng = rand::thread_rng();
    let mut rejected = 0;

    for _ in 0..200 {
        let base = random_sequence(&mut rng, 20);
        let target = random_sequence(&mut rng, 20);
        let diff = difference(&base, &target);

        // A shorter base cannot satisfy a removal at the old last offset.
        if let Some(last) = diff.removals().last() {
            let truncated = &base[..last.offset()];
            if apply(truncated, &diff).is_err() {
                rejected += 1;
            }
        }
    }

    // Most iterations produce at least one removal; the check must have run.
    assert!(rejected > 0);
}
