//! Property-based invariant tests for `Rect`.
//!
//! 1. Intersection is commutative.
//! 2. Intersection result fits within both inputs.
//! 3. Contains agrees with intersection.
//! 4. `split_right` partitions the width exactly.
//! 5. No panics on extreme u16 values.

use datefield_core::geometry::Rect;
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (any::<u16>(), any::<u16>(), any::<u16>(), any::<u16>())
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=500, 0u16..=500, 0u16..=500, 0u16..=500).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn intersection_commutative(a in small_rect_strategy(), b in small_rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_within_both(a in small_rect_strategy(), b in small_rect_strategy()) {
        if let Some(i) = a.intersection_opt(&b) {
            prop_assert!(i.x >= a.x && i.x >= b.x);
            prop_assert!(i.right() <= a.right() && i.right() <= b.right());
            prop_assert!(i.bottom() <= a.bottom() && i.bottom() <= b.bottom());
        }
    }

    #[test]
    fn contains_agrees_with_intersection(
        a in small_rect_strategy(),
        b in small_rect_strategy(),
        px in 0u16..=1000,
        py in 0u16..=1000,
    ) {
        let both = a.contains(px, py) && b.contains(px, py);
        prop_assert_eq!(both, a.intersection(&b).contains(px, py));
    }

    #[test]
    fn split_right_partitions_width(r in small_rect_strategy(), w in 0u16..=600) {
        let (rest, right) = r.split_right(w);
        prop_assert_eq!(rest.width + right.width, r.width);
        prop_assert_eq!(rest.right(), right.x);
        prop_assert_eq!(right.right(), r.right());
    }

    #[test]
    fn extreme_values_do_not_panic(r in rect_strategy(), px in any::<u16>(), py in any::<u16>()) {
        let _ = r.contains(px, py);
        let _ = r.area();
        let _ = r.intersection(&r);
        let _ = r.row(py);
    }
}
