use foundation::math::Vec3;

/// Rigid transform restricted to what the radiant needs: a spin about +Y,
/// a uniform scale, then a translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation_y: f64,
    pub scale: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn spin(rotation_y: f64) -> Self {
        Self {
            rotation_y,
            ..Self::identity()
        }
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        point.rotate_y(self.rotation_y).scale(self.scale) + self.position
    }
}
