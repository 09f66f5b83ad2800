/// Integer weight carried by an edge. May be negative.
pub type Weight = i64;

/// Weight as stored in graph files. Widened to [`Weight`] on load, so sums
/// along any simple path stay far below [`INF`].
pub type FileWeight = i32;

/// Tentative or final path length. `INF` marks a vertex with no known path.
pub type Distance = i64;

/// Sentinel for "unreached". Large enough that any real path sum stays below it,
/// small enough that adding two finite values never wraps.
pub const INF: Distance = 1_000_000_000_000_000_000;

/// Type alias for a single edge: (from, to, weight)
pub type Edge = (usize, usize, Weight);

/// One distance per vertex, indexed by vertex id.
pub type DistanceVector = Vec<Distance>;

/// Returns the relaxation candidate `dist + weight`, or `None` when `dist` is unreached.
///
/// The sum saturates instead of wrapping, so repeated passes around a negative
/// cycle cannot overflow.
#[inline]
pub fn path_candidate(dist: Distance, weight: Weight) -> Option<Distance> {
    if dist == INF {
        None
    } else {
        Some(dist.saturating_add(weight))
    }
}

/// Returns true if the distance has been reached.
#[inline]
pub fn is_reached(dist: Distance) -> bool {
    dist < INF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_for_unreached_is_none() {
        assert_eq!(path_candidate(INF, -5), None);
    }

    #[test]
    fn candidate_adds_weight() {
        assert_eq!(path_candidate(3, 4), Some(7));
        assert_eq!(path_candidate(3, -4), Some(-1));
    }

    #[test]
    fn candidate_saturates_instead_of_wrapping() {
        assert_eq!(path_candidate(i64::MIN + 1, -10), Some(i64::MIN));
    }

    #[test]
    fn reached_excludes_sentinel() {
        assert!(is_reached(0));
        assert!(is_reached(-12));
        assert!(!is_reached(INF));
    }
}
