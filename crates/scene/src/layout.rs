//! Closed-form quasi-uniform placement of markers on a sphere.
//!
//! Index `i` of `n` gets inclination `phi = acos(-1 + 2i/n)` and azimuth
//! `theta = phi * sqrt(n * pi)`. The result depends only on `(i, n, radius)`.

use std::f64::consts::PI;

use foundation::math::Vec3;

/// Position of marker `index` out of `total` on a sphere of `radius`.
///
/// Returns `None` when `index >= total`.
pub fn fibonacci_sphere_point(index: usize, total: usize, radius: f64) -> Option<Vec3> {
    if index >= total {
        return None;
    }
    let n = total as f64;
    let phi = (-1.0 + (2.0 * index as f64) / n).acos();
    let theta = (n * PI).sqrt() * phi;

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Some(Vec3::new(
        radius * cos_theta * sin_phi,
        radius * sin_theta * sin_phi,
        radius * cos_phi,
    ))
}

/// Positions for all `total` markers, in index order.
pub fn fibonacci_sphere_points(total: usize, radius: f64) -> Vec<Vec3> {
    (0..total)
        .filter_map(|i| fibonacci_sphere_point(i, total, radius))
        .collect()
}
