//! Angle arithmetic used by the rotation engine.
//!
//! All angles are in degrees. Pointer angles are measured clockwise on a
//! y-down screen, with 0 pointing straight up from the pivot.

/// Wrap an angle into `[0, 360)`.
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Round to two decimal places, half away from zero.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Signed shortest-arc difference `new - old`, in `[-180, 180]`.
///
/// Crossing the 0/360 seam yields the short way round, e.g.
/// `shortest_arc(1.0, 359.0) == 2.0`.
pub fn shortest_arc(new: f64, old: f64) -> f64 {
    let delta = (new - old).to_radians();
    let radians = delta.sin().atan2(delta.cos());
    round_to_hundredths(radians.to_degrees())
}

/// Signed difference `new - old` taken the short way round, unrounded.
pub fn wrapped_delta(new: f64, old: f64) -> f64 {
    let delta = (new - old).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Round up to the nearest multiple of `step`.
pub fn quantize_ceil(angle: f64, step: f64) -> f64 {
    // + 0.0 folds -0.0 into 0.0
    (angle / step).ceil() * step + 0.0
}

/// Angle of the point `(x, y)` around the pivot `(cx, cy)`.
pub fn pointer_angle(x: f64, y: f64, cx: f64, cy: f64) -> f64 {
    let x_diff = x - cx;
    let y_diff = y - cy;
    x_diff.atan2(y_diff).to_degrees() * -1.0 + 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== NORMALIZE TESTS ====================

    #[test]
    fn test_normalize_in_range_is_unchanged() {
        assert!(approx_eq(normalize(0.0), 0.0));
        assert!(approx_eq(normalize(45.5), 45.5));
        assert!(approx_eq(normalize(359.99), 359.99));
    }

    #[test]
    fn test_normalize_wraps_full_turns() {
        assert!(approx_eq(normalize(360.0), 0.0));
        assert!(approx_eq(normalize(725.0), 5.0));
        assert!(approx_eq(normalize(-90.0), 270.0));
        assert!(approx_eq(normalize(-720.0), 0.0));
    }

    #[test]
    fn test_normalize_tiny_negative_stays_below_360() {
        let n = normalize(-1e-17);
        assert!((0.0..360.0).contains(&n));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut a = -1000.0;
        while a < 1000.0 {
            let once = normalize(a);
            assert!((0.0..360.0).contains(&once), "{a} -> {once}");
            assert_eq!(normalize(once), once, "normalize not idempotent for {a}");
            a += 7.3;
        }
    }

    // ==================== SHORTEST ARC TESTS ====================

    #[test]
    fn test_shortest_arc_simple() {
        assert!(approx_eq(shortest_arc(30.0, 10.0), 20.0));
        assert!(approx_eq(shortest_arc(10.0, 30.0), -20.0));
    }

    #[test]
    fn test_shortest_arc_crosses_seam() {
        assert!(approx_eq(shortest_arc(1.0, 359.0), 2.0));
        assert!(approx_eq(shortest_arc(359.0, 1.0), -2.0));
        assert!(approx_eq(shortest_arc(10.0, 730.0), 0.0));
    }

    #[test]
    fn test_shortest_arc_rounds_to_hundredths() {
        assert!(approx_eq(shortest_arc(10.1234, 0.0), 10.12));
        assert!(approx_eq(shortest_arc(0.004, 0.0), 0.0));
    }

    #[test]
    fn test_shortest_arc_antisymmetric_and_bounded() {
        let samples = [-725.0, -180.0, -90.5, 0.0, 12.34, 179.99, 180.0, 270.0, 359.9, 1000.0];
        for &a in &samples {
            for &b in &samples {
                let ab = shortest_arc(a, b);
                let ba = shortest_arc(b, a);
                assert_eq!(ab, -ba, "diff({a},{b})={ab} diff({b},{a})={ba}");
                assert!(ab.abs() <= 180.0);
            }
        }
    }

    #[test]
    fn test_wrapped_delta_keeps_precision_across_seam() {
        assert!(approx_eq(wrapped_delta(0.02, 359.95), 0.07));
        assert!(approx_eq(wrapped_delta(359.95, 0.02), -0.07));
        assert!(approx_eq(wrapped_delta(0.123, 0.0), 0.123));
        assert!(approx_eq(wrapped_delta(90.0, 90.0), 0.0));
    }

    // ==================== QUANTIZE TESTS ====================

    #[test]
    fn test_quantize_ceil_rounds_up() {
        assert!(approx_eq(quantize_ceil(10.0, 15.0), 15.0));
        assert!(approx_eq(quantize_ceil(15.0, 15.0), 15.0));
        assert!(approx_eq(quantize_ceil(15.01, 15.0), 30.0));
    }

    #[test]
    fn test_quantize_ceil_negative_goes_toward_zero() {
        let q = quantize_ceil(-5.0, 15.0);
        assert_eq!(q, 0.0);
        assert!(q.is_sign_positive());
        assert!(approx_eq(quantize_ceil(-20.0, 15.0), -15.0));
    }

    // ==================== POINTER ANGLE TESTS ====================

    #[test]
    fn test_pointer_angle_cardinal_directions() {
        // y grows downward: "up" is negative y
        assert!(approx_eq(pointer_angle(0.0, -10.0, 0.0, 0.0), 0.0));
        assert!(approx_eq(pointer_angle(10.0, 0.0, 0.0, 0.0), 90.0));
        assert!(approx_eq(pointer_angle(0.0, 10.0, 0.0, 0.0), 180.0));
        assert!(approx_eq(pointer_angle(-10.0, 0.0, 0.0, 0.0), 270.0));
    }

    #[test]
    fn test_pointer_angle_respects_pivot() {
        assert!(approx_eq(pointer_angle(110.0, 50.0, 100.0, 50.0), 90.0));
    }
}
