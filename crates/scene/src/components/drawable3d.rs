use crate::components::Rgb;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    /// Latitude/longitude wireframe sphere centered at the origin.
    WireSphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    /// Circle in the XZ plane centered at the origin.
    Ring { radius: f64, segments: u32 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub color: Rgb,
    pub opacity: f64,
    /// Whether the world rotation applies to this drawable.
    pub spins: bool,
}

impl Drawable3D {
    pub fn wire_sphere(radius: f64, width_segments: u32, height_segments: u32) -> Self {
        Self {
            shape: Shape3D::WireSphere {
                radius,
                width_segments: width_segments.max(3),
                height_segments: height_segments.max(2),
            },
            color: Rgb::WHITE,
            opacity: 1.0,
            spins: true,
        }
    }

    pub fn ring(radius: f64, segments: u32) -> Self {
        Self {
            shape: Shape3D::Ring {
                radius,
                segments: segments.max(3),
            },
            color: Rgb::WHITE,
            opacity: 1.0,
            spins: false,
        }
    }

    pub fn with_style(mut self, color: Rgb, opacity: f64) -> Self {
        self.color = color;
        self.opacity = opacity;
        self
    }
}
