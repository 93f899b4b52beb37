use crate::histogram::SmoothedHistogram;

///
/// Area under the smoothed histogram, by the trapezoidal rule with unit spacing.
///
/// Only the part of the curve above zero is counted: where filter ringing dips
/// below the axis the linear interpolant is clipped at zero. A single-point
/// histogram has zero area.
///
pub fn area_under_curve(smoothed: &SmoothedHistogram) -> f64 {
    smoothed
        .amplitudes()
        .windows(2)
        .map(|pair| positive_trapezoid(pair[0], pair[1]))
        .fold(0.0, |acc, area| acc + area)
}

/// Area above zero of the segment from `(0, a)` to `(1, b)`.
fn positive_trapezoid(a: f64, b: f64) -> f64 {
    match (a >= 0.0, b >= 0.0) {
        (true, true) => (a + b) / 2.0,
        (false, false) => 0.0,
        (true, false) => a * a / (2.0 * (a - b)),
        (false, true) => b * b / (2.0 * (b - a)),
    }
}
