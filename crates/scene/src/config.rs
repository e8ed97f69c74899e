use serde::{Deserialize, Serialize};

use crate::components::Rgb;

/// Tunables for layout, interaction, animation, camera and DOM wiring.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiantConfig {
    // ── Sphere ───────────────────────────────────────────────
    pub sphere_radius: f64,
    pub wire_width_segments: u32,
    pub wire_height_segments: u32,
    pub wire_color: Rgb,
    pub wire_opacity: f64,

    // ── Orbital rings ────────────────────────────────────────
    pub ring_count: u32,
    /// Radius of the innermost ring; ring `k` has `ring_base_radius + k * ring_spacing`.
    pub ring_base_radius: f64,
    pub ring_spacing: f64,
    pub ring_segments: u32,
    pub ring_color: Rgb,
    pub ring_opacity: f64,

    // ── Markers ──────────────────────────────────────────────
    pub marker_radius: f64,
    pub halo_radius: f64,
    pub halo_opacity: f64,
    pub baseline_opacity: f64,
    pub highlight_scale: f64,
    pub highlight_opacity: f64,
    pub flash_color: Rgb,
    pub flash_duration_ms: f64,

    // ── Animation ────────────────────────────────────────────
    /// Radians added to the rotation accumulator per frame.
    pub rotation_speed: f64,
    pub rotation_enabled: bool,
    /// Radians added to each marker's pulse phase per frame.
    pub pulse_step: f64,
    pub pulse_amplitude: f64,
    pub halo_pulse_factor: f64,

    // ── Camera ───────────────────────────────────────────────
    pub camera_distance: f64,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,

    // ── Host page ────────────────────────────────────────────
    pub data_url: String,
    pub container_id: String,
    pub tooltip_id: String,
    pub count_id: String,
    pub tooltip_offset_px: f64,
}

impl Default for RadiantConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 5.0,
            wire_width_segments: 32,
            wire_height_segments: 32,
            wire_color: Rgb(0x00f3ff),
            wire_opacity: 0.2,

            ring_count: 3,
            ring_base_radius: 5.5,
            ring_spacing: 0.5,
            ring_segments: 64,
            ring_color: Rgb(0x00f3ff),
            ring_opacity: 0.1,

            marker_radius: 0.15,
            halo_radius: 0.25,
            halo_opacity: 0.3,
            baseline_opacity: 0.8,
            highlight_scale: 1.5,
            highlight_opacity: 1.0,
            flash_color: Rgb::WHITE,
            flash_duration_ms: 200.0,

            rotation_speed: 0.001,
            rotation_enabled: true,
            pulse_step: 0.05,
            pulse_amplitude: 0.2,
            halo_pulse_factor: 1.2,

            camera_distance: 15.0,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,

            data_url: "data/history_full_v3.json".to_string(),
            container_id: "prime-radiant-sphere".to_string(),
            tooltip_id: "event-tooltip".to_string(),
            count_id: "event-count".to_string(),
            tooltip_offset_px: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    UnknownKey(String),
    InvalidValue { key: String, value: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "invalid radiant config: {msg}"),
            ConfigError::UnknownKey(key) => write!(f, "unknown config key: {key}"),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value {value} for config key {key}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl RadiantConfig {
    /// Parses a config object; missing keys take defaults.
    ///
    /// Only a JSON object is accepted, and the result must pass [`Self::validate`].
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let fields: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config: Self = serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn ring_radius(&self, ring: u32) -> f64 {
        self.ring_base_radius + ring as f64 * self.ring_spacing
    }

    pub fn flash_duration_s(&self) -> f64 {
        self.flash_duration_ms / 1000.0
    }

    pub fn fov_y_rad(&self) -> f64 {
        self.fov_y_deg.to_radians()
    }

    /// Checks the invariants layout, picking and projection rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("sphere_radius", self.sphere_radius),
            ("ring_base_radius", self.ring_base_radius),
            ("marker_radius", self.marker_radius),
            ("halo_radius", self.halo_radius),
            ("highlight_scale", self.highlight_scale),
            ("halo_pulse_factor", self.halo_pulse_factor),
            ("camera_distance", self.camera_distance),
            ("near", self.near),
            ("far", self.far),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(key, value));
            }
        }
        if self.far <= self.near {
            return Err(invalid("far", self.far));
        }

        let non_negative = [
            ("ring_spacing", self.ring_spacing),
            ("flash_duration_ms", self.flash_duration_ms),
            ("pulse_amplitude", self.pulse_amplitude),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(key, value));
            }
        }

        let unit = [
            ("wire_opacity", self.wire_opacity),
            ("ring_opacity", self.ring_opacity),
            ("halo_opacity", self.halo_opacity),
            ("baseline_opacity", self.baseline_opacity),
            ("highlight_opacity", self.highlight_opacity),
        ];
        for (key, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(key, value));
            }
        }

        if !(1.0..=179.0).contains(&self.fov_y_deg) {
            return Err(invalid("fov_y_deg", self.fov_y_deg));
        }
        for (key, value) in [
            ("rotation_speed", self.rotation_speed),
            ("pulse_step", self.pulse_step),
            ("tooltip_offset_px", self.tooltip_offset_px),
        ] {
            if !value.is_finite() {
                return Err(invalid(key, value));
            }
        }

        let segments = [
            ("wire_width_segments", self.wire_width_segments, 3),
            ("wire_height_segments", self.wire_height_segments, 2),
            ("ring_segments", self.ring_segments, 3),
        ];
        for (key, value, min) in segments {
            if value < min {
                return Err(invalid(key, value as f64));
            }
        }
        for (key, rgb) in [
            ("wire_color", self.wire_color),
            ("ring_color", self.ring_color),
            ("flash_color", self.flash_color),
        ] {
            if rgb.0 > 0xff_ffff {
                return Err(invalid(key, rgb.0 as f64));
            }
        }
        Ok(())
    }

    /// Update a single numeric field by key.
    ///
    /// Booleans take `value > 0.5`; colors take the value as `0xRRGGBB`. The
    /// config is left unchanged when the result would not validate.
    pub fn set_value(&mut self, key: &str, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(invalid(key, value));
        }
        let mut next = self.clone();
        match key {
            "sphere_radius" => next.sphere_radius = value,
            "wire_width_segments" => next.wire_width_segments = value.clamp(3.0, 256.0) as u32,
            "wire_height_segments" => next.wire_height_segments = value.clamp(2.0, 256.0) as u32,
            "wire_color" => next.wire_color = color(value),
            "wire_opacity" => next.wire_opacity = value.clamp(0.0, 1.0),
            "ring_count" => next.ring_count = value.clamp(0.0, 16.0) as u32,
            "ring_base_radius" => next.ring_base_radius = value,
            "ring_spacing" => next.ring_spacing = value.max(0.0),
            "ring_segments" => next.ring_segments = value.clamp(3.0, 1024.0) as u32,
            "ring_color" => next.ring_color = color(value),
            "ring_opacity" => next.ring_opacity = value.clamp(0.0, 1.0),
            "marker_radius" => next.marker_radius = value,
            "halo_radius" => next.halo_radius = value,
            "halo_opacity" => next.halo_opacity = value.clamp(0.0, 1.0),
            "baseline_opacity" => next.baseline_opacity = value.clamp(0.0, 1.0),
            "highlight_scale" => next.highlight_scale = value,
            "highlight_opacity" => next.highlight_opacity = value.clamp(0.0, 1.0),
            "flash_color" => next.flash_color = color(value),
            "flash_duration_ms" => next.flash_duration_ms = value.max(0.0),
            "rotation_speed" => next.rotation_speed = value,
            "rotation_enabled" => next.rotation_enabled = value > 0.5,
            "pulse_step" => next.pulse_step = value,
            "pulse_amplitude" => next.pulse_amplitude = value.max(0.0),
            "halo_pulse_factor" => next.halo_pulse_factor = value,
            "camera_distance" => next.camera_distance = value,
            "fov_y_deg" => next.fov_y_deg = value.clamp(1.0, 179.0),
            "near" => next.near = value,
            "far" => next.far = value,
            "tooltip_offset_px" => next.tooltip_offset_px = value,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn invalid(key: &str, value: f64) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    }
}

fn color(value: f64) -> Rgb {
    Rgb(value.clamp(0.0, 16_777_215.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RadiantConfig};
    use crate::components::Rgb;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_widget() {
        let cfg = RadiantConfig::default();
        assert_eq!(cfg.sphere_radius, 5.0);
        assert_eq!(cfg.baseline_opacity, 0.8);
        assert_eq!(cfg.highlight_scale, 1.5);
        assert_eq!(cfg.flash_duration_ms, 200.0);
        assert_eq!(cfg.ring_radius(0), 5.5);
        assert_eq!(cfg.ring_radius(2), 6.5);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = RadiantConfig::from_json_str(r#"{"sphere_radius": 3.0, "flash_color": 255}"#)
            .expect("parse");
        assert_eq!(cfg.sphere_radius, 3.0);
        assert_eq!(cfg.flash_color, Rgb(0x0000ff));
        assert_eq!(cfg.ring_count, 3);
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut cfg = RadiantConfig::default();
        cfg.ring_count = 1;
        cfg.rotation_enabled = false;
        let back = RadiantConfig::from_json_str(&cfg.to_json_string()).expect("parse");
        assert_eq!(back.ring_count, 1);
        assert!(!back.rotation_enabled);
        assert_eq!(back.data_url, cfg.data_url);
        assert_eq!(back.wire_color, Rgb(0x00f3ff));
    }

    #[test]
    fn rejects_garbage() {
        for text in ["[1, 2]", "[]", "3", "null", "\"radius\"", "{"] {
            assert!(
                matches!(RadiantConfig::from_json_str(text), Err(ConfigError::Parse(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn parsed_config_is_validated() {
        assert_eq!(
            RadiantConfig::from_json_str(r#"{"near": 0, "marker_radius": -1}"#),
            Err(ConfigError::InvalidValue {
                key: "marker_radius".to_string(),
                value: -1.0
            })
        );
        assert!(matches!(
            RadiantConfig::from_json_str(r#"{"near": 0}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            RadiantConfig::from_json_str(r#"{"near": 10, "far": 5}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            RadiantConfig::from_json_str(r#"{"ring_segments": 2}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            RadiantConfig::from_json_str(r#"{"baseline_opacity": 1.5}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(RadiantConfig::default().validate().is_ok());
    }

    #[test]
    fn rejected_set_value_leaves_config_unchanged() {
        let mut cfg = RadiantConfig::default();
        assert!(cfg.set_value("near", 5000.0).is_err());
        assert_eq!(cfg, RadiantConfig::default());
        cfg.set_value("far", 20.0).expect("set");
        assert_eq!(cfg.far, 20.0);
    }

    #[test]
    fn set_value_by_key() {
        let mut cfg = RadiantConfig::default();
        cfg.set_value("rotation_enabled", 0.0).expect("set");
        assert!(!cfg.rotation_enabled);
        cfg.set_value("baseline_opacity", 3.0).expect("set");
        assert_eq!(cfg.baseline_opacity, 1.0);
        assert_eq!(
            cfg.set_value("nope", 1.0),
            Err(ConfigError::UnknownKey("nope".to_string()))
        );
        assert!(matches!(
            cfg.set_value("sphere_radius", -1.0),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.set_value("marker_radius", f64::NAN).is_err());
    }
}
