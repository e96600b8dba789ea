//! Myers O(ND) edit-path solver.
//!
//! A faithful variation of Myers' greedy shortest-edit-script algorithm
//! (1986). The search frontier `V[d][k]` (the furthest `(x, y)` reachable on
//! diagonal `k` with a script of length `d`) lives in a [`TriangleBuffer`],
//! one row appended per outer iteration. Reconstruction walks the stored rows
//! backward, re-applying the expansion tie-break, and the frontier's backing
//! storage is donated to hold the finished waypoint path.
//!
//! The tie-break is canonical: on diagonal `k` at depth `d`, the step is a
//! down-step (an insertion) iff `k == -d`, or `k != d` and
//! `V[d-1][k-1].x < V[d-1][k+1].x`. Fixing this rule fixes one minimal script
//! per input pair, which is what lets difference equality stand in for
//! state-transition equivalence.

use crate::counted::Counted;
use crate::path::DiffPath;
use crate::prefix::common_run;
use crate::triangle::TriangleBuffer;

/// Column of diagonal `k` within frontier row `row`.
///
/// Row `r` holds diagonals `-r, -r + 2, …, r`, so `k + r` is even and the
/// column is `(k + r) / 2`.
fn cell(row: usize, k: isize) -> usize {
    ((row as isize + k) / 2) as usize
}

/// The canonical expansion tie-break, shared by search and reconstruction.
fn step_is_down(frontier: &TriangleBuffer<(usize, usize)>, depth: usize, k: isize) -> bool {
    let d = depth as isize;
    if k == -d {
        return true;
    }
    if k == d {
        return false;
    }
    let previous = frontier.row(depth - 1);
    previous[cell(depth - 1, k - 1)].0 < previous[cell(depth - 1, k + 1)].0
}

/// Push the next (earlier) waypoint onto the reversed path, merging runs that
/// continue along the same axis into a single segment.
fn push_coalesced(reversed: &mut Vec<(usize, usize)>, point: (usize, usize)) {
    if reversed.len() >= 2 {
        let last = reversed[reversed.len() - 1];
        let prior = reversed[reversed.len() - 2];
        if direction(point, last) == direction(last, prior) {
            reversed.pop();
        }
    }
    reversed.push(point);
}

fn direction(from: (usize, usize), to: (usize, usize)) -> (bool, bool) {
    (to.0 > from.0, to.1 > from.1)
}

/// Compute the canonical minimal difference path from `base` to `target`.
pub(crate) fn shortest_path<E, F>(
    base: &Counted<'_, E>,
    target: &Counted<'_, E>,
    eq: &mut F,
) -> DiffPath
where
    F: FnMut(&E, &E) -> bool,
{
    let n = base.len();
    let m = target.len();

    // Seed with the longest common prefix. If it exhausts either side the
    // remainder is a single insert or remove run.
    let (seed, _) = common_run(base, 0, target, 0, eq);
    let prefix = seed.end;
    if prefix == n || prefix == m {
        let mut points = vec![(0, 0)];
        if prefix > 0 {
            points.push((prefix, prefix));
        }
        if prefix < n || prefix < m {
            points.push((n, m));
        }
        return DiffPath::from_points(points);
    }

    let mut frontier: TriangleBuffer<(usize, usize)> = TriangleBuffer::new();
    frontier.append_row((prefix, prefix));

    let mut depth = 0usize;
    let mut terminal_k = 0isize;

    'search: loop {
        depth += 1;
        debug_assert!(depth <= n + m, "script length exceeded total input length");
        frontier.append_row((0, 0));
        debug_assert_eq!(frontier.row_count(), depth + 1);

        let mut k = -(depth as isize);
        while k <= depth as isize {
            let down = step_is_down(&frontier, depth, k);
            let from = if down { k + 1 } else { k - 1 };
            let &(px, py) = frontier.get(depth - 1, cell(depth - 1, from));
            let (x, y) = if down { (px, py + 1) } else { (px + 1, py) };

            let (run_a, run_b) = common_run(base, x, target, y, eq);
            let reached = (run_a.end, run_b.end);
            frontier.set(depth, cell(depth, k), reached);

            if reached.0 >= n && reached.1 >= m {
                terminal_k = k;
                break 'search;
            }
            k += 2;
        }
    }

    // Walk the frontier backward from the terminal diagonal, emitting a
    // waypoint per edit edge plus one per diagonal gap.
    let mut reversed: Vec<(usize, usize)> = Vec::with_capacity(2 * depth + 2);
    let &(terminal_x, terminal_y) = frontier.get(depth, cell(depth, terminal_k));
    reversed.push((terminal_x, terminal_y));

    let mut x = terminal_x;
    let mut k = terminal_k;
    for d in (1..=depth).rev() {
        let down = step_is_down(&frontier, d, k);
        let from = if down { k + 1 } else { k - 1 };
        let &(px, py) = frontier.get(d - 1, cell(d - 1, from));
        let (ex, ey) = if down { (px, py + 1) } else { (px + 1, py) };

        if x > ex {
            push_coalesced(&mut reversed, (ex, ey));
        }
        push_coalesced(&mut reversed, (px, py));
        x = px;
        k = from;
    }
    debug_assert_eq!(x, prefix, "reconstruction must end at the seed cell");
    if x > 0 {
        push_coalesced(&mut reversed, (0, 0));
    }

    let mut points = frontier.into_raw();
    points.clear();
    points.extend(reversed.into_iter().rev());
    DiffPath::from_points(points)
}
