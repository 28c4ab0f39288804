//! Quadratic interpolating B-splines.
//!
//! Given strictly increasing knots `x_0 < ... < x_{n-1}` and values `y_i`, we
//! build the degree-2 spline `s(x) = Σ c_i B_i(x)` with `s(x_i) = y_i`.
//!
//! Knot vector (length `n + 3`):
//!
//! ```text
//! [x_0, x_0, x_0, m_1, ..., m_{n-3}, x_{n-1}, x_{n-1}, x_{n-1}]
//! m_i = (x_i + x_{i+1}) / 2
//! ```
//!
//! The first and last midpoints are left out (the quadratic analogue of
//! "not-a-knot"), which leaves exactly `n` basis functions. With this
//! placement `x_j` always falls in the support of `B_{j-1}, B_j, B_{j+1}`
//! only, so the collocation matrix is tridiagonal and the fit is linear in `n`.
//!
//! Every quadratic polynomial lies in the spline space, so data sampled from
//! one is reproduced exactly (up to rounding), not just at the knots.

use crate::error::{AppError, ErrorKind};
use crate::math::axis::refine;

const DEGREE: usize = 2;

/// Smallest pivot accepted by the tridiagonal solve. Basis values lie in
/// `[0, 1]`, so an absolute threshold is meaningful.
const PIVOT_EPS: f64 = 1e-14;

/// A fitted quadratic spline.
#[derive(Debug, Clone)]
pub struct QuadraticSpline {
    knots: Vec<f64>,
    coeffs: Vec<f64>,
}

impl QuadraticSpline {
    /// Fit the interpolating spline through `(xs[i], ys[i])`.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, AppError> {
        if xs.len() != ys.len() {
            return Err(AppError::new(
                ErrorKind::InterpolationError,
                format!("Cannot interpolate: {} x values but {} y values.", xs.len(), ys.len()),
            ));
        }
        let n = xs.len();
        if n <= DEGREE {
            return Err(AppError::new(
                ErrorKind::InterpolationError,
                format!("Quadratic interpolation needs at least 3 points, got {n}."),
            ));
        }
        if let Some(i) = xs.iter().position(|x| !x.is_finite()) {
            return Err(AppError::new(
                ErrorKind::InterpolationError,
                format!("Axis value #{i} is not finite ({}).", xs[i]),
            ));
        }
        if let Some(i) = ys.iter().position(|y| !y.is_finite()) {
            return Err(AppError::new(
                ErrorKind::InterpolationError,
                format!("Sample #{i} is not finite ({}).", ys[i]),
            ));
        }
        if let Some(i) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AppError::new(
                ErrorKind::InterpolationError,
                format!(
                    "Axis values must be strictly increasing: x[{i}]={} and x[{}]={}.",
                    xs[i],
                    i + 1,
                    xs[i + 1]
                ),
            ));
        }

        let knots = knot_vector(xs);

        // Tridiagonal collocation system: row j holds B_{j-1}, B_j, B_{j+1} at x_j.
        let mut lower = vec![0.0; n];
        let mut diag = vec![0.0; n];
        let mut upper = vec![0.0; n];
        for (j, &x) in xs.iter().enumerate() {
            let span = find_span(&knots, n, x);
            let basis = basis_funcs(&knots, span, x);
            for (r, &value) in basis.iter().enumerate() {
                let col = span + r - DEGREE;
                if col + 1 == j {
                    lower[j] = value;
                } else if col == j {
                    diag[j] = value;
                } else if col == j + 1 {
                    upper[j] = value;
                } else if value != 0.0 {
                    return Err(AppError::new(
                        ErrorKind::InterpolationError,
                        format!("Knot placement left x[{j}]={x} outside its basis band."),
                    ));
                }
            }
        }

        let coeffs = solve_tridiagonal(&lower, &diag, &upper, ys).ok_or_else(|| {
            AppError::new(
                ErrorKind::InterpolationError,
                "Interpolation system is singular for this axis.",
            )
        })?;

        Ok(Self { knots, coeffs })
    }

    /// Evaluate the spline at `x`.
    ///
    /// Outside `[x_0, x_{n-1}]` the end pieces are extrapolated.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.coeffs.len();
        let span = find_span(&self.knots, n, x);
        let basis = basis_funcs(&self.knots, span, x);
        basis
            .iter()
            .enumerate()
            .map(|(r, b)| b * self.coeffs[span + r - DEGREE])
            .sum()
    }

    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Output of smoothing one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedSeries {
    /// Interpolant at the axis knots.
    pub at_knots: Vec<f64>,
    /// Polyline for drawing.
    pub display: Vec<(f64, f64)>,
}

/// Turns `(axis, samples)` into a smoothed series.
pub trait Interpolator {
    fn smooth(&self, axis: &[f64], samples: &[f64]) -> Result<SmoothedSeries, AppError>;
}

/// Quadratic spline smoothing, evaluated at the knots and at
/// `resolution` points per axis interval for display.
#[derive(Debug, Clone, Copy)]
pub struct QuadraticInterpolator {
    pub resolution: usize,
}

impl Interpolator for QuadraticInterpolator {
    fn smooth(&self, axis: &[f64], samples: &[f64]) -> Result<SmoothedSeries, AppError> {
        let spline = QuadraticSpline::fit(axis, samples)?;
        let at_knots = spline.evaluate_many(axis);

        let display = if self.resolution <= 1 {
            axis.iter().copied().zip(at_knots.iter().copied()).collect()
        } else {
            refine(axis, self.resolution)
                .into_iter()
                .map(|x| (x, spline.evaluate(x)))
                .collect()
        };

        Ok(SmoothedSeries { at_knots, display })
    }
}

fn knot_vector(xs: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let first = xs[0];
    let last = xs[n - 1];

    let mut knots = Vec::with_capacity(n + DEGREE + 1);
    knots.extend([first; DEGREE + 1]);
    for i in 1..n - DEGREE {
        knots.push(0.5 * (xs[i] + xs[i + 1]));
    }
    knots.extend([last; DEGREE + 1]);
    knots
}

/// Index `l` of the knot interval `[t_l, t_{l+1})` containing `x`, clamped to
/// `[DEGREE, n - 1]` so the right end point maps to the last piece.
fn find_span(knots: &[f64], n: usize, x: f64) -> usize {
    if x >= knots[n] {
        return n - 1;
    }
    DEGREE + knots[DEGREE + 1..n].partition_point(|&t| t <= x)
}

/// The `DEGREE + 1` basis functions that are non-zero on span `span`,
/// `B_{span-2}, B_{span-1}, B_span` (Cox-de Boor, triangular form).
fn basis_funcs(knots: &[f64], span: usize, x: f64) -> [f64; DEGREE + 1] {
    let mut out = [0.0; DEGREE + 1];
    let mut left = [0.0; DEGREE + 1];
    let mut right = [0.0; DEGREE + 1];
    out[0] = 1.0;

    for j in 1..=DEGREE {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = out[r] / (right[r + 1] + left[j - r]);
            out[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        out[j] = saved;
    }
    out
}

/// Thomas algorithm. `lower[0]` and `upper[n-1]` are ignored.
///
/// Returns `None` on a vanishing pivot.
fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Option<Vec<f64>> {
    let n = diag.len();
    if n == 0 {
        return Some(Vec::new());
    }

    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    let pivot = diag[0];
    if !pivot.is_finite() || pivot.abs() < PIVOT_EPS {
        return None;
    }
    c[0] = upper[0] / pivot;
    d[0] = rhs[0] / pivot;

    for i in 1..n {
        let pivot = diag[i] - lower[i] * c[i - 1];
        if !pivot.is_finite() || pivot.abs() < PIVOT_EPS {
            return None;
        }
        c[i] = if i + 1 < n { upper[i] / pivot } else { 0.0 };
        d[i] = (rhs[i] - lower[i] * d[i - 1]) / pivot;
    }

    for i in (0..n - 1).rev() {
        d[i] -= c[i] * d[i + 1];
    }
    Some(d)
}
