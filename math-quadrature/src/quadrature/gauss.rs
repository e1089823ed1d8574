//! Gauss-Legendre points and weights on [-1, 1]
//!
//! Roots of the Legendre polynomial Pₙ are found by Newton iteration from the
//! asymptotic guess `cos(π (i + 3/4) / (n + 1/2))`, and the weights follow from
//! the derivative at each root:
//!
//! ```text
//! wᵢ = 2 / ((1 - xᵢ²) Pₙ'(xᵢ)²)
//! ```
//!
//! Only the negative half of the roots is iterated. The positive half is
//! mirrored so the rule is symmetric to the last bit.

use crate::error::{QuadratureError, Result};
use std::f64::consts::PI;

/// Newton iteration settings for the Gauss-Legendre generator
#[derive(Debug, Clone)]
pub struct GaussLegendreConfig {
    /// Relative step size at which a root counts as converged
    pub tolerance: f64,
    /// Maximum Newton steps per root
    pub max_iterations: usize,
}

impl Default for GaussLegendreConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-15,
            max_iterations: 100,
        }
    }
}

/// A single quadrature point with weight
///
/// Coordinates past the rule's parametric dimension are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraturePoint {
    /// Reference coordinates (xi, eta, zeta)
    pub coords: [f64; 3],
    /// Integration weight
    pub weight: f64,
}

impl QuadraturePoint {
    /// Build a point from 1 to 3 reference coordinates
    pub fn new(coords: &[f64], weight: f64) -> Self {
        let mut padded = [0.0; 3];
        for (dst, &src) in padded.iter_mut().zip(coords) {
            *dst = src;
        }
        Self {
            coords: padded,
            weight,
        }
    }

    #[inline]
    pub fn xi(&self) -> f64 {
        self.coords[0]
    }

    #[inline]
    pub fn eta(&self) -> f64 {
        self.coords[1]
    }

    #[inline]
    pub fn zeta(&self) -> f64 {
        self.coords[2]
    }
}

/// Largest point count the Gauss-Legendre generator accepts
pub const MAX_GAUSS_POINTS: usize = 1024;

/// Number of Gauss-Legendre points needed to integrate degree `order` exactly
///
/// An n-point rule is exact up to degree 2n - 1, so n = ⌈(order + 1) / 2⌉.
pub fn bar_point_count(order: usize) -> usize {
    order / 2 + 1
}

/// n-point Gauss-Legendre rule on [-1, 1] with default settings
///
/// Returns (points, weights) with points in ascending order.
pub fn gauss_legendre(n: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    gauss_legendre_with_config(n, &GaussLegendreConfig::default())
}

/// n-point Gauss-Legendre rule on [-1, 1]
pub fn gauss_legendre_with_config(
    n: usize,
    config: &GaussLegendreConfig,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if n == 0 || n > MAX_GAUSS_POINTS {
        return Err(QuadratureError::InvalidPointCount {
            points: n,
            max: MAX_GAUSS_POINTS,
        });
    }

    let mut points = vec![0.0; n];
    let mut weights = vec![0.0; n];
    let n_f64 = n as f64;

    for i in 0..n.div_ceil(2) {
        let mut z = (PI * (i as f64 + 0.75) / (n_f64 + 0.5)).cos();
        let mut converged = false;

        for _ in 0..config.max_iterations {
            let (p, dp) = legendre_with_derivative(n, z);
            let dz = p / dp;
            z -= dz;
            if dz.abs() <= config.tolerance * z.abs().max(1.0) {
                converged = true;
                break;
            }
        }

        if !converged {
            log::error!(
                "Gauss-Legendre: root {} of {} did not converge in {} iterations",
                i,
                n,
                config.max_iterations
            );
            return Err(QuadratureError::NumericalConvergence {
                points: n,
                root: i,
                iterations: config.max_iterations,
            });
        }

        let (_, dp) = legendre_with_derivative(n, z);
        let w = 2.0 / ((1.0 - z * z) * dp * dp);

        points[i] = -z;
        points[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    if n % 2 == 1 {
        points[n / 2] = 0.0;
    }

    Ok((points, weights))
}

/// Evaluate Pₙ(x) and Pₙ'(x) by the three-term recurrence
///
/// ```text
/// j Pⱼ(x) = (2j - 1) x Pⱼ₋₁(x) - (j - 1) Pⱼ₋₂(x)
/// (x² - 1) Pₙ'(x) = n (x Pₙ(x) - Pₙ₋₁(x))
/// ```
///
/// Only valid for |x| < 1, which holds for every Newton iterate here.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p = 1.0;
    let mut p_prev = 0.0;
    for j in 1..=n {
        let j_f64 = j as f64;
        let p_prev2 = p_prev;
        p_prev = p;
        p = ((2.0 * j_f64 - 1.0) * x * p_prev - (j_f64 - 1.0) * p_prev2) / j_f64;
    }
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauss_1d_integrates_polynomials() {
        // 2-point rule should exactly integrate up to degree 3
        let (x, w) = gauss_legendre(2).unwrap();

        // Integrate x^2 from -1 to 1 = 2/3
        let integral: f64 = x.iter().zip(&w).map(|(x, w)| x.powi(2) * w).sum();
        assert!((integral - 2.0 / 3.0).abs() < 1e-14);

        // Integrate x^3 from -1 to 1 = 0
        let integral: f64 = x.iter().zip(&w).map(|(x, w)| x.powi(3) * w).sum();
        assert!(integral.abs() < 1e-14);
    }

    #[test]
    fn test_exactness_to_degree_2n_minus_1() {
        for n in 1..=20 {
            let (x, w) = gauss_legendre(n).unwrap();
            for k in 0..2 * n {
                let exact = if k % 2 == 0 { 2.0 / (k as f64 + 1.0) } else { 0.0 };
                let integral: f64 = x.iter().zip(&w).map(|(x, w)| x.powi(k as i32) * w).sum();
                assert!(
                    (integral - exact).abs() < 1e-12,
                    "n = {}, degree {}: {} vs {}",
                    n,
                    k,
                    integral,
                    exact
                );
            }
        }
    }

    #[test]
    fn test_known_values() {
        let (x, w) = gauss_legendre(3).unwrap();
        let a = (3.0 / 5.0_f64).sqrt();
        assert!((x[0] + a).abs() < 1e-15);
        assert_eq!(x[1], 0.0);
        assert!((x[2] - a).abs() < 1e-15);
        assert!((w[0] - 5.0 / 9.0).abs() < 1e-14);
        assert!((w[1] - 8.0 / 9.0).abs() < 1e-14);
    }

    #[test]
    fn test_symmetry_and_weight_sum() {
        for n in 1..=64 {
            let (x, w) = gauss_legendre(n).unwrap();
            let sum: f64 = w.iter().sum();
            assert!((sum - 2.0).abs() < 1e-12, "n = {}: sum = {}", n, sum);

            for i in 0..n {
                assert_eq!(x[i], -x[n - 1 - i]);
                assert_eq!(w[i], w[n - 1 - i]);
                assert!(x[i] > -1.0 && x[i] < 1.0);
            }
            for pair in x.windows(2) {
                assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let first = gauss_legendre(17).unwrap();
        let second = gauss_legendre(17).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_points_rejected() {
        assert_eq!(
            gauss_legendre(0),
            Err(QuadratureError::InvalidPointCount {
                points: 0,
                max: MAX_GAUSS_POINTS
            })
        );
    }

    #[test]
    fn test_point_count_upper_bound() {
        let (x, w) = gauss_legendre(MAX_GAUSS_POINTS).unwrap();
        assert_eq!(x.len(), MAX_GAUSS_POINTS);
        assert!((w.iter().sum::<f64>() - 2.0).abs() < 1e-10);

        for n in [MAX_GAUSS_POINTS + 1, usize::MAX / 2 + 1, usize::MAX] {
            let err = gauss_legendre(n).unwrap_err();
            assert_eq!(
                err,
                QuadratureError::InvalidPointCount {
                    points: n,
                    max: MAX_GAUSS_POINTS
                }
            );
            assert!(err.is_input_error());
        }
    }

    #[test]
    fn test_iteration_bound_reported() {
        let config = GaussLegendreConfig {
            tolerance: 0.0,
            max_iterations: 1,
        };
        let err = gauss_legendre_with_config(8, &config).unwrap_err();
        assert!(matches!(
            err,
            QuadratureError::NumericalConvergence { points: 8, root: 0, .. }
        ));
    }

    #[test]
    fn test_bar_point_count() {
        assert_eq!(bar_point_count(0), 1);
        assert_eq!(bar_point_count(1), 1);
        assert_eq!(bar_point_count(2), 2);
        assert_eq!(bar_point_count(3), 2);
        assert_eq!(bar_point_count(4), 3);
    }
}
