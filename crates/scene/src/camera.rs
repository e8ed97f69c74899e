use foundation::math::{Vec2, Vec3};

use crate::config::RadiantConfig;
use crate::picking::Ray;

/// Perspective camera, right-handed, +Y up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
    /// Viewport width / height.
    pub aspect: f64,
}

impl Camera {
    pub fn look_at(position: Vec3, target: Vec3, fov_y_rad: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_y_rad,
            near,
            far,
            aspect: 1.0,
        }
    }

    /// Camera on +Z looking at the sphere center.
    pub fn from_config(config: &RadiantConfig, width: f64, height: f64) -> Self {
        let mut camera = Self::look_at(
            Vec3::new(0.0, 0.0, config.camera_distance),
            Vec3::ZERO,
            config.fov_y_rad(),
            config.near,
            config.far,
        );
        camera.set_viewport(width, height);
        camera
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.aspect = if height <= 0.0 || width <= 0.0 {
            1.0
        } else {
            (width / height).max(1e-6)
        };
    }

    /// Orthonormal `(forward, right, up)` basis.
    pub fn basis(&self) -> Option<(Vec3, Vec3, Vec3)> {
        let forward = (self.target - self.position).normalize()?;
        let right = forward.cross(self.up).normalize()?;
        let up = right.cross(forward);
        Some((forward, right, up))
    }

    /// Ray from the eye through a point of the `[-1, 1]²` device plane.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let (forward, right, up) = self.basis()?;
        let tan = (0.5 * self.fov_y_rad).tan();
        let dir = forward + right * (ndc.x * tan * self.aspect) + up * (ndc.y * tan);
        Some(Ray::new(self.position, dir.normalize()?))
    }
}

/// Bounding rectangle of the host element, in client pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Pointer client coordinates to normalized device coordinates (+Y up).
///
/// `None` for an empty rect.
pub fn client_to_ndc(x: f64, y: f64, rect: ClientRect) -> Option<Vec2> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        ((x - rect.left) / rect.width) * 2.0 - 1.0,
        -((y - rect.top) / rect.height) * 2.0 + 1.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::{Camera, ClientRect, client_to_ndc};
    use crate::config::RadiantConfig;
    use foundation::math::{Vec2, Vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn ndc_corners_and_center() {
        let rect = ClientRect::new(100.0, 50.0, 400.0, 200.0);
        assert_eq!(client_to_ndc(100.0, 50.0, rect), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(client_to_ndc(500.0, 250.0, rect), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(client_to_ndc(300.0, 150.0, rect), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn empty_rect_has_no_ndc() {
        assert!(client_to_ndc(0.0, 0.0, ClientRect::new(0.0, 0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = Camera::from_config(&RadiantConfig::default(), 800.0, 600.0);
        let ray = camera.ray_through_ndc(Vec2::new(0.0, 0.0)).expect("ray");
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 15.0));
        assert_close(ray.dir.x, 0.0, 1e-12);
        assert_close(ray.dir.y, 0.0, 1e-12);
        assert_close(ray.dir.z, -1.0, 1e-12);
    }

    #[test]
    fn top_edge_ray_matches_half_fov() {
        let cfg = RadiantConfig::default();
        let camera = Camera::from_config(&cfg, 600.0, 600.0);
        let ray = camera.ray_through_ndc(Vec2::new(0.0, 1.0)).expect("ray");
        let angle = ray.dir.y.atan2(-ray.dir.z);
        assert_close(angle, 0.5 * cfg.fov_y_rad(), 1e-12);
    }

    #[test]
    fn aspect_widens_horizontal_rays() {
        let cfg = RadiantConfig::default();
        let square = Camera::from_config(&cfg, 600.0, 600.0);
        let wide = Camera::from_config(&cfg, 1200.0, 600.0);
        let a = square.ray_through_ndc(Vec2::new(1.0, 0.0)).expect("ray");
        let b = wide.ray_through_ndc(Vec2::new(1.0, 0.0)).expect("ray");
        assert!(b.dir.x > a.dir.x);
    }
}
