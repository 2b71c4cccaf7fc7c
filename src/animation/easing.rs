//! Easing curves over normalized progress

/// Cubic ease-out, `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`
pub fn ease_out_cubic(t: f64) -> f64 {
    let remaining = 1.0 - t.clamp(0.0, 1.0);
    remaining.mul_add(-(remaining * remaining), 1.0)
}

/// Position of `value` within `[start, end)` as a fraction in `[0, 1]`
///
/// Returns 1 for an empty or inverted range.
pub fn normalize(value: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span <= 0.0 {
        return 1.0;
    }
    ((value - start) / span).clamp(0.0, 1.0)
}
