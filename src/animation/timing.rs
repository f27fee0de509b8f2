//! Pure timing curves used by templates to animate opacity and position.
//!
//! All inputs are seconds (or a normalized progress in `[0, 1]`); nothing here
//! allocates or touches global state.

/// Linear blend from `a` to `b`. `t` is clamped to `[0, 1]`, so the result never
/// leaves the `[a, b]` interval.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * clamp01(t)
}

/// `1 - (1 - t)^3`: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    1.0 - (1.0 - t).powi(3)
}

/// 0 before `start`, ramps linearly to 1 over `duration` seconds, then holds at 1.
///
/// A non-positive `duration` is a hard cut at `start`.
pub fn fade_in(t: f64, start: f64, duration: f64) -> f64 {
    if t < start {
        return 0.0;
    }
    if duration <= 0.0 {
        return 1.0;
    }
    clamp01((t - start) / duration)
}

/// 1 before `start`, ramps linearly to 0 over `duration` seconds, then holds at 0.
///
/// A non-positive `duration` is a hard cut at `start`.
pub fn fade_out(t: f64, start: f64, duration: f64) -> f64 {
    if t < start {
        return 1.0;
    }
    if duration <= 0.0 {
        return 0.0;
    }
    clamp01(1.0 - (t - start) / duration)
}

/// Product of two envelopes, each clamped to `[0, 1]` first.
pub fn combine(a: f64, b: f64) -> f64 {
    clamp01(a) * clamp01(b)
}

// NaN collapses to 0 so a bad input hides an element instead of poisoning markup.
fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
