use std::f64::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use foundation::math::Vec3;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Line-list segments of a latitude/longitude wireframe sphere.
///
/// `width_segments` meridians and `height_segments - 1` parallels, each sampled
/// at the same resolution as the grid.
pub fn wire_sphere_segments(
    radius: f64,
    width_segments: u32,
    height_segments: u32,
) -> Vec<(Vec3, Vec3)> {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let point = |lat: u32, lon: u32| {
        let phi = PI * lat as f64 / h as f64;
        let theta = TAU * lon as f64 / w as f64;
        Vec3::new(
            -radius * theta.cos() * phi.sin(),
            radius * phi.cos(),
            radius * theta.sin() * phi.sin(),
        )
    };

    let mut out = Vec::with_capacity((w * h * 2) as usize);
    // Meridians, pole to pole.
    for lon in 0..w {
        for lat in 0..h {
            out.push((point(lat, lon), point(lat + 1, lon)));
        }
    }
    // Parallels, skipping the degenerate poles.
    for lat in 1..h {
        for lon in 0..w {
            out.push((point(lat, lon), point(lat, (lon + 1) % w)));
        }
    }
    out
}

/// Line-list segments of a circle in the XZ plane.
pub fn ring_segments(radius: f64, segments: u32) -> Vec<(Vec3, Vec3)> {
    let n = segments.max(3);
    let point = |i: u32| {
        let a = TAU * (i % n) as f64 / n as f64;
        Vec3::new(radius * a.cos(), 0.0, radius * a.sin())
    };
    (0..n).map(|i| (point(i), point(i + 1))).collect()
}

pub fn segments_to_vertices(segments: &[(Vec3, Vec3)], color: [f32; 4]) -> Vec<LineVertex> {
    let mut out = Vec::with_capacity(segments.len() * 2);
    for (a, b) in segments {
        for p in [a, b] {
            out.push(LineVertex {
                position: p.to_f32_array(),
                _pad: 0.0,
                color,
            });
        }
    }
    out
}

/// Indexed unit sphere, instanced once per marker and halo.
pub fn unit_sphere_mesh(lat_segments: u32, lon_segments: u32) -> (Vec<MeshVertex>, Vec<u16>) {
    let lat_segments = lat_segments.max(3);
    let lon_segments = lon_segments.max(3);

    let mut vertices = Vec::with_capacity(((lat_segments + 1) * (lon_segments + 1)) as usize);
    for lat in 0..=lat_segments {
        let v = lat as f32 / lat_segments as f32;
        let theta = v * std::f32::consts::PI;
        let (sin_t, cos_t) = theta.sin_cos();

        for lon in 0..=lon_segments {
            let u = lon as f32 / lon_segments as f32;
            let phi = u * std::f32::consts::TAU;
            let (sin_p, cos_p) = phi.sin_cos();

            let p = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(MeshVertex {
                position: p,
                normal: p,
            });
        }
    }

    let stride = lon_segments + 1;
    let mut indices = Vec::with_capacity((lat_segments * lon_segments * 6) as usize);
    for lat in 0..lat_segments {
        for lon in 0..lon_segments {
            let i0 = lat * stride + lon;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            indices.extend([i0, i2, i1, i1, i2, i3].map(|i| i as u16));
        }
    }

    (vertices, indices)
}
