/// Indices picked when reducing `len` points to `desired`.
///
/// Index `i` of the output is `floor(i * len / desired)`, computed exactly in
/// integer arithmetic. When no reduction is needed every index is returned.
pub fn stride_indices(len: usize, desired: usize) -> Vec<usize> {
    if desired == 0 || len <= desired {
        return (0..len).collect();
    }
    // The product is widened so it cannot overflow; the quotient is below `len`.
    let (len, k) = (len as u128, desired as u128);
    (0..k).map(|i| (i * len / k) as usize).collect()
}

/// Reduces an ordered point sequence to at most `desired` points by fixed-stride
/// selection. No interpolation, no averaging.
///
/// `points` must already be sorted by timestamp; this function does not re-sort.
/// A `desired` of `0`, or a sequence that is already short enough, is returned
/// unchanged.
pub fn downsample<T>(points: Vec<T>, desired: usize) -> Vec<T> {
    let len = points.len();
    if desired == 0 || len <= desired {
        return points;
    }

    // len > desired, so the stride is above one and the indices strictly increase.
    let mut wanted = stride_indices(len, desired).into_iter().peekable();
    points
        .into_iter()
        .enumerate()
        .filter_map(|(idx, point)| {
            if wanted.peek() == Some(&idx) {
                wanted.next();
                Some(point)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_every_third_of_ten() {
        let points: Vec<usize> = (0..10).collect();
        assert_eq!(downsample(points, 3), vec![0, 3, 6]);
        assert_eq!(stride_indices(10, 3), vec![0, 3, 6]);
    }

    #[test]
    fn short_sequences_and_zero_are_identity() {
        let points = vec!['a', 'b', 'c'];
        assert_eq!(downsample(points.clone(), 3), points);
        assert_eq!(downsample(points.clone(), 8), points);
        assert_eq!(downsample(points.clone(), 0), points);
        assert!(downsample(Vec::<u8>::new(), 4).is_empty());
    }

    #[test]
    fn reapplying_with_the_same_count_changes_nothing() {
        let points: Vec<u32> = (0..100).collect();
        let once = downsample(points, 7);
        assert_eq!(once.len(), 7);
        let twice = downsample(once.clone(), 7);
        assert_eq!(once, twice);
    }

    #[test]
    fn selection_is_deterministic_and_ordered() {
        let points: Vec<u32> = (0..57).map(|i| i * 3).collect();
        let first = downsample(points.clone(), 8);
        let second = downsample(points, 8);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(first[0], 0);
    }

    #[test]
    fn indices_match_floor_of_stride() {
        // 11 points into 4: floor(0), floor(2.75), floor(5.5), floor(8.25)
        assert_eq!(stride_indices(11, 4), vec![0, 2, 5, 8]);
        // Just one point over the limit.
        assert_eq!(stride_indices(9, 8), vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn huge_lengths_do_not_overflow_the_product() {
        let indices = stride_indices(usize::MAX, 4);
        assert_eq!(indices.len(), 4);
        assert_eq!(indices[0], 0);
        assert_eq!(indices[2], usize::MAX / 2);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}
