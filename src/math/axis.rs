//! X-axis generation.
//!
//! The axis is the half-open range `[start, start + count * step)`. Points are
//! generated by index (`start + i * step`), never by accumulating `step`, so
//! rounding can neither add nor drop a final element.

use crate::domain::AxisSpec;

/// Build the sample axis. The result always has exactly `spec.count` points.
pub fn build_axis(spec: &AxisSpec) -> Vec<f64> {
    (0..spec.count)
        .map(|i| spec.start + i as f64 * spec.step)
        .collect()
}

/// Insert `per_interval - 1` evenly spaced points inside every axis interval.
///
/// The original knots are kept exactly; `per_interval <= 1` returns the axis unchanged.
pub fn refine(axis: &[f64], per_interval: usize) -> Vec<f64> {
    if per_interval <= 1 || axis.len() < 2 {
        return axis.to_vec();
    }

    let mut out = Vec::with_capacity((axis.len() - 1) * per_interval + 1);
    for w in axis.windows(2) {
        let (x0, x1) = (w[0], w[1]);
        out.push(x0);
        for s in 1..per_interval {
            let u = s as f64 / per_interval as f64;
            out.push(x0 + u * (x1 - x0));
        }
    }
    if let Some(&last) = axis.last() {
        out.push(last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_axis_has_count_points() {
        let axis = build_axis(&AxisSpec { start: 0.0, step: 0.5, count: 4 });
        assert_eq!(axis, vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn tenth_steps_do_not_gain_a_point() {
        let spec = AxisSpec { start: 0.1, step: 0.1, count: 250 };
        let axis = build_axis(&spec);
        assert_eq!(axis.len(), 250);
        assert!(axis.last().copied().unwrap() < spec.end());
        assert!((axis[249] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(build_axis(&AxisSpec { start: 1.0, step: 1.0, count: 0 }).is_empty());
    }

    #[test]
    fn refine_keeps_knots() {
        let axis = [0.0, 1.0, 2.0];
        let fine = refine(&axis, 4);
        assert_eq!(fine, vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0]);
        assert_eq!(refine(&axis, 1), axis.to_vec());
    }
}
