//! Boundary and fruit collision tests
//!
//! Both checks tolerate a head that has not been mounted yet: they report
//! "no hit" and "nothing collected" instead of failing.

use glam::Vec3;

use super::state::Fruit;

/// Result of a boundary check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCheck {
    /// Head position pinned inside the playfield
    pub pos: Vec3,
    /// Whether any axis had to be pinned
    pub hit: bool,
}

impl BoundaryCheck {
    pub fn miss() -> Self {
        Self {
            pos: Vec3::ZERO,
            hit: false,
        }
    }
}

/// Clamp the two horizontal axes (x, z) of `head` to `origin ± half_extent`.
///
/// The vertical axis is never touched. `hit` uses exact comparison: clamping
/// only changes a component that was actually out of range, so calling this
/// again on the returned position always reports no hit.
pub fn boundary_clamp(head: Option<Vec3>, half_extent: f32, origin: Vec3) -> BoundaryCheck {
    let Some(pos) = head else {
        return BoundaryCheck::miss();
    };

    let clamped = Vec3::new(
        pos.x.clamp(origin.x - half_extent, origin.x + half_extent),
        pos.y,
        pos.z.clamp(origin.z - half_extent, origin.z + half_extent),
    );

    BoundaryCheck {
        pos: clamped,
        hit: clamped != pos,
    }
}

/// Fruits whose center lies strictly closer than `threshold` to the head.
///
/// The hitbox is a sphere with the cube edge as radius, deliberately generous.
/// Every fruit in range is returned; the result is sorted by fruit id so it
/// does not depend on the order of `fruits`. The input is not modified.
pub fn collect_fruits(fruits: &[Fruit], head: Option<Vec3>, threshold: f32) -> Vec<Fruit> {
    let Some(head) = head else {
        return Vec::new();
    };

    let mut collected: Vec<Fruit> = fruits
        .iter()
        .filter(|fruit| fruit.pos.distance(head) < threshold)
        .copied()
        .collect();
    collected.sort_by_key(|f| f.id);
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fruit(id: u32, x: f32, z: f32) -> Fruit {
        Fruit {
            id,
            pos: Vec3::new(x, 0.0, z),
        }
    }

    #[test]
    fn test_inside_is_untouched() {
        let head = Vec3::new(120.0, 0.0, -499.0);
        let result = boundary_clamp(Some(head), 500.0, Vec3::ZERO);
        assert!(!result.hit);
        assert_eq!(result.pos, head);
    }

    #[test]
    fn test_edge_is_not_a_hit() {
        let head = Vec3::new(500.0, 0.0, -500.0);
        let result = boundary_clamp(Some(head), 500.0, Vec3::ZERO);
        assert!(!result.hit);
    }

    #[test]
    fn test_overshoot_pins_axis() {
        let result = boundary_clamp(Some(Vec3::new(600.0, 0.0, 0.0)), 500.0, Vec3::ZERO);
        assert!(result.hit);
        assert_eq!(result.pos, Vec3::new(500.0, 0.0, 0.0));
    }

    #[test]
    fn test_offset_origin() {
        let origin = Vec3::new(0.0, 0.0, -200.0);
        let result = boundary_clamp(Some(Vec3::new(0.0, 0.0, -750.0)), 500.0, origin);
        assert!(result.hit);
        assert_eq!(result.pos.z, -700.0);

        let result = boundary_clamp(Some(Vec3::new(0.0, 0.0, 250.0)), 500.0, origin);
        assert!(!result.hit);
    }

    #[test]
    fn test_vertical_axis_ignored() {
        let head = Vec3::new(0.0, 10_000.0, 0.0);
        let result = boundary_clamp(Some(head), 500.0, Vec3::ZERO);
        assert!(!result.hit);
        assert_eq!(result.pos.y, 10_000.0);
    }

    #[test]
    fn test_missing_head_is_noop() {
        assert_eq!(boundary_clamp(None, 500.0, Vec3::ZERO), BoundaryCheck::miss());
        let fruits = [fruit(1, 0.0, 0.0)];
        assert!(collect_fruits(&fruits, None, 20.0).is_empty());
    }

    #[test]
    fn test_collect_by_distance() {
        let head = Some(Vec3::ZERO);
        let near = [fruit(1, 5.0, 0.0)];
        assert_eq!(collect_fruits(&near, head, 20.0), near.to_vec());

        let far = [fruit(1, 25.0, 0.0)];
        assert!(collect_fruits(&far, head, 20.0).is_empty());

        // Exactly at the threshold is not collected
        let edge = [fruit(1, 20.0, 0.0)];
        assert!(collect_fruits(&edge, head, 20.0).is_empty());
    }

    #[test]
    fn test_collect_multiple_in_one_frame() {
        let fruits = [fruit(3, 1.0, 1.0), fruit(1, 300.0, 0.0), fruit(2, -4.0, 3.0)];
        let collected = collect_fruits(&fruits, Some(Vec3::ZERO), 20.0);
        let ids: Vec<u32> = collected.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 3]);
        // Input untouched
        assert_eq!(fruits.len(), 3);
    }

    #[test]
    fn test_duplicate_positions_both_collected() {
        let fruits = [fruit(1, 3.0, 3.0), fruit(2, 3.0, 3.0)];
        assert_eq!(collect_fruits(&fruits, Some(Vec3::ZERO), 20.0).len(), 2);
    }

    proptest! {
        #[test]
        fn prop_inside_never_hits(x in -499.9f32..499.9, z in -499.9f32..499.9) {
            let head = Vec3::new(x, 0.0, z);
            let result = boundary_clamp(Some(head), 500.0, Vec3::ZERO);
            prop_assert!(!result.hit);
            prop_assert_eq!(result.pos, head);
        }

        #[test]
        fn prop_outside_pins_only_that_axis(over in 0.01f32..1000.0, z in -499.0f32..499.0, neg in any::<bool>()) {
            let x = if neg { -500.0 - over } else { 500.0 + over };
            let result = boundary_clamp(Some(Vec3::new(x, 0.0, z)), 500.0, Vec3::ZERO);
            prop_assert!(result.hit);
            prop_assert_eq!(result.pos.x, if neg { -500.0 } else { 500.0 });
            prop_assert_eq!(result.pos.z, z);
        }

        #[test]
        fn prop_clamp_is_idempotent(x in -2000.0f32..2000.0, z in -2000.0f32..2000.0) {
            let first = boundary_clamp(Some(Vec3::new(x, 0.0, z)), 500.0, Vec3::ZERO);
            let second = boundary_clamp(Some(first.pos), 500.0, Vec3::ZERO);
            prop_assert!(!second.hit);
            prop_assert_eq!(second.pos, first.pos);
        }

        #[test]
        fn prop_collection_order_independent(
            coords in proptest::collection::vec((-60.0f32..60.0, -60.0f32..60.0), 0..12),
        ) {
            let fruits: Vec<Fruit> = coords
                .iter()
                .enumerate()
                .map(|(i, &(x, z))| fruit(i as u32, x, z))
                .collect();
            let mut reversed = fruits.clone();
            reversed.reverse();

            let head = Some(Vec3::new(4.0, 0.0, -7.0));
            prop_assert_eq!(
                collect_fruits(&fruits, head, 20.0),
                collect_fruits(&reversed, head, 20.0)
            );
        }
    }
}
