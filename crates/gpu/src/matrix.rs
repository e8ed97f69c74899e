//! Column-major (WGSL layout) 4×4 matrices for the camera.

use foundation::math::Vec3;
use scene::camera::Camera;

pub type Mat4 = [[f32; 4]; 4];

pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// `c = a * b`.
pub fn mat4_mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

/// Right-handed perspective with depth in `[0, 1]`.
pub fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    // [ m00,  0,   0,   0 ]
    // [  0,  m11,  0,   0 ]
    // [  0,   0,  m22, m23 ]
    // [  0,   0,  -1,   0 ]
    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

pub fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalize().unwrap_or(Vec3::new(0.0, 0.0, -1.0));
    let s = f.cross(up).normalize().unwrap_or(Vec3::new(1.0, 0.0, 0.0));
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
        [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
        [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

pub fn camera_view_proj(camera: &Camera) -> Mat4 {
    let view = mat4_look_at_rh(camera.position, camera.target, camera.up);
    let proj = mat4_perspective_rh_z0(camera.fov_y_rad, camera.aspect, camera.near, camera.far);
    mat4_mul(proj, view)
}

/// Applies `m` to `p` and divides by `w`. `None` behind the eye.
pub fn project_point(m: Mat4, p: Vec3) -> Option<[f32; 3]> {
    let (x, y, z) = (p.x as f32, p.y as f32, p.z as f32);
    let mut out = [0.0f32; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = m[0][row] * x + m[1][row] * y + m[2][row] * z + m[3][row];
    }
    if out[3] <= 0.0 {
        return None;
    }
    Some([out[0] / out[3], out[1] / out[3], out[2] / out[3]])
}

#[cfg(test)]
mod tests {
    use super::{MAT4_IDENTITY, camera_view_proj, mat4_look_at_rh, mat4_mul, project_point};
    use foundation::math::{Vec2, Vec3};
    use scene::camera::Camera;
    use scene::config::RadiantConfig;

    fn assert_close(a: f32, b: f32, eps: f32) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn identity_is_neutral() {
        let view = mat4_look_at_rh(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(mat4_mul(MAT4_IDENTITY, view), view);
        assert_eq!(mat4_mul(view, MAT4_IDENTITY), view);
    }

    #[test]
    fn look_at_puts_target_on_negative_z() {
        let view = mat4_look_at_rh(
            Vec3::new(0.0, 0.0, 15.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        );
        let p = [
            view[3][0],
            view[3][1],
            view[3][2],
        ];
        assert_close(p[0], 0.0, 1e-6);
        assert_close(p[1], 0.0, 1e-6);
        assert_close(p[2], -15.0, 1e-5);
    }

    #[test]
    fn projection_agrees_with_picking_rays() {
        let camera = Camera::from_config(&RadiantConfig::default(), 800.0, 600.0);
        let view_proj = camera_view_proj(&camera);

        let ndc = Vec2::new(0.4, -0.25);
        let ray = camera.ray_through_ndc(ndc).expect("ray");
        let p = project_point(view_proj, ray.at(12.0)).expect("in front");
        assert_close(p[0], 0.4, 1e-4);
        assert_close(p[1], -0.25, 1e-4);
        assert!((0.0..=1.0).contains(&p[2]));
    }

    #[test]
    fn points_behind_the_eye_do_not_project() {
        let camera = Camera::from_config(&RadiantConfig::default(), 800.0, 600.0);
        assert!(project_point(camera_view_proj(&camera), Vec3::new(0.0, 0.0, 20.0)).is_none());
    }
}
