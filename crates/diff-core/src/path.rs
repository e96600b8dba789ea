//! Change-list view over a difference path.
//!
//! The solver emits a path through the edit grid as ascending `(x, y)`
//! waypoints; `x` indexes the base, `y` the target. Each consecutive waypoint
//! pair advances along exactly one axis (a remove or insert run) or both in
//! lock-step (a match run). [`DiffPath`] interprets those pairs as a
//! random-access sequence of typed range segments.

use std::ops::Range;

/// One segment of a difference path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathSegment {
    /// A run of base elements absent from the target, as a base range.
    Removed(Range<usize>),
    /// A run of target elements absent from the base, as a target range.
    Inserted(Range<usize>),
    /// A run present on both sides: base range and target range, equal length.
    Matched(Range<usize>, Range<usize>),
}

/// An ascending waypoint path from `(0, 0)` to `(base.len, target.len)`.
pub(crate) struct DiffPath {
    points: Vec<(usize, usize)>,
}

impl DiffPath {
    /// Build a path from waypoints, dropping consecutive duplicates.
    pub(crate) fn from_points(points: Vec<(usize, usize)>) -> Self {
        let mut points = points;
        points.dedup();
        Self { points }
    }

    pub(crate) fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// The segment between waypoints `index` and `index + 1`.
    pub(crate) fn segment(&self, index: usize) -> PathSegment {
        let (x0, y0) = self.points[index];
        let (x1, y1) = self.points[index + 1];
        match (x1 > x0, y1 > y0) {
            (true, true) => {
                debug_assert_eq!(x1 - x0, y1 - y0, "match run must advance both axes equally");
                PathSegment::Matched(x0..x1, y0..y1)
            }
            (true, false) => PathSegment::Removed(x0..x1),
            (false, true) => PathSegment::Inserted(y0..y1),
            (false, false) => unreachable!("waypoints are strictly ascending"),
        }
    }

    pub(crate) fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
        (0..self.segment_count()).map(|index| self.segment(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_kinds() {
        // Remove base[1..3], insert target[1..2], match around them.
        let path = DiffPath::from_points(vec![(0, 0), (1, 1), (3, 1), (3, 2), (5, 4)]);

        assert_eq!(path.segment_count(), 4);
        assert_eq!(path.segment(0), PathSegment::Matched(0..1, 0..1));
        assert_eq!(path.segment(1), PathSegment::Removed(1..3));
        assert_eq!(path.segment(2), PathSegment::Inserted(1..2));
        assert_eq!(path.segment(3), PathSegment::Matched(3..5, 2..4));
    }

    #[test]
    fn test_single_waypoint_has_no_segments() {
        let path = DiffPath::from_points(vec![(0, 0)]);
        assert_eq!(path.segment_count(), 0);
        assert_eq!(path.segments().count(), 0);
    }

    #[test]
    fn test_duplicate_waypoints_dropped() {
        let path = DiffPath::from_points(vec![(0, 0), (0, 0), (2, 2)]);
        assert_eq!(path.segment_count(), 1);
        assert_eq!(path.segment(0), PathSegment::Matched(0..2, 0..2));
    }
}
