//! Body chain: the segments trailing the head
//!
//! Index 0 is the segment nearest the head. Every frame each segment takes the
//! position its predecessor held before the frame, so the body lags the head
//! by one frame per segment.

use glam::Vec3;

/// Append `count` copies of the head position to the tail.
///
/// New segments start stacked on the head and get pulled into line over the
/// following frames.
pub fn grow(chain: &[Vec3], head: Vec3, count: usize) -> Vec<Vec3> {
    let mut next = Vec::with_capacity(chain.len() + count);
    next.extend_from_slice(chain);
    next.extend(std::iter::repeat_n(head, count));
    next
}

/// Shift every segment one step toward the head.
///
/// Built from the untouched prior chain, so no segment ever reads a value
/// already written this frame.
pub fn advance(chain: &[Vec3], head: Vec3) -> Vec<Vec3> {
    if chain.is_empty() {
        return Vec::new();
    }
    let mut next = Vec::with_capacity(chain.len());
    next.push(head);
    next.extend_from_slice(&chain[..chain.len() - 1]);
    next
}

/// In-place variant of [`advance`]; walks tail to head so each read sees the
/// pre-frame value.
pub fn advance_in_place(chain: &mut [Vec3], head: Vec3) {
    for i in (1..chain.len()).rev() {
        chain[i] = chain[i - 1];
    }
    if let Some(first) = chain.first_mut() {
        *first = head;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(x: f32) -> Vec3 {
        Vec3::new(x, 0.0, 0.0)
    }

    #[test]
    fn test_grow_appends_head_copies() {
        let chain = vec![v(1.0), v(2.0)];
        let grown = grow(&chain, v(9.0), 3);
        assert_eq!(grown, vec![v(1.0), v(2.0), v(9.0), v(9.0), v(9.0)]);
        // Original untouched
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_grow_from_empty() {
        assert_eq!(grow(&[], v(4.0), 3), vec![v(4.0); 3]);
        assert!(grow(&[], v(4.0), 0).is_empty());
    }

    #[test]
    fn test_advance_empty_is_noop() {
        assert!(advance(&[], v(1.0)).is_empty());
        let mut empty: Vec<Vec3> = Vec::new();
        advance_in_place(&mut empty, v(1.0));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_advance_shifts_by_one() {
        let chain = vec![v(1.0), v(2.0), v(3.0)];
        assert_eq!(advance(&chain, v(0.0)), vec![v(0.0), v(1.0), v(2.0)]);
    }

    #[test]
    fn test_stacked_segments_unfold() {
        // Freshly grown segments spread out one step per frame
        let mut chain = grow(&[], v(0.0), 3);
        for x in 1..=3 {
            chain = advance(&chain, v(x as f32 * 5.0));
        }
        assert_eq!(chain, vec![v(15.0), v(10.0), v(5.0)]);
    }

    proptest! {
        #[test]
        fn prop_advance_keeps_length_and_lags(
            xs in proptest::collection::vec(-500.0f32..500.0, 0..32),
            head in -500.0f32..500.0,
        ) {
            let chain: Vec<Vec3> = xs.iter().map(|&x| v(x)).collect();
            let next = advance(&chain, v(head));
            prop_assert_eq!(next.len(), chain.len());
            if !chain.is_empty() {
                prop_assert_eq!(next[0], v(head));
            }
            if chain.len() >= 2 {
                prop_assert_eq!(next[1], chain[0]);
            }
        }

        #[test]
        fn prop_in_place_matches_snapshot(
            xs in proptest::collection::vec(-500.0f32..500.0, 0..32),
            head in -500.0f32..500.0,
        ) {
            let chain: Vec<Vec3> = xs.iter().map(|&x| v(x)).collect();
            let mut in_place = chain.clone();
            advance_in_place(&mut in_place, v(head));
            prop_assert_eq!(in_place, advance(&chain, v(head)));
        }

        #[test]
        fn prop_grow_adds_exactly_k(
            len in 0usize..20,
            k in 0usize..10,
            head in -500.0f32..500.0,
        ) {
            let chain = vec![v(1.0); len];
            let grown = grow(&chain, v(head), k);
            prop_assert_eq!(grown.len(), len + k);
            prop_assert!(grown[len..].iter().all(|&p| p == v(head)));
        }
    }
}
