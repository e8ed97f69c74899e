use serde::{Deserialize, Serialize};

/// 24-bit `0xRRGGBB` color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);

    pub fn channels(self) -> [u8; 3] {
        [
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        ]
    }

    /// Linear-ish `[r, g, b, a]` in `0..=1`, as the GPU vertex formats expect.
    pub fn to_rgba_f32(self, opacity: f64) -> [f32; 4] {
        let [r, g, b] = self.channels();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            opacity.clamp(0.0, 1.0) as f32,
        ]
    }
}

/// Per-marker visual state mutated by hover and click.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerVisual {
    pub scale: f64,
    pub opacity: f64,
    pub color: Rgb,
}

impl MarkerVisual {
    pub fn baseline(color: Rgb, opacity: f64) -> Self {
        Self {
            scale: 1.0,
            opacity,
            color,
        }
    }
}
