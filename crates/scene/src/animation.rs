//! Centralized per-frame animation.
//!
//! A single `Animator::step` per display refresh advances the sphere spin,
//! every marker's pulse, and the pending click flashes. Nothing is scheduled
//! per marker, so dropping the animator (or the world) stops everything.

use std::f64::consts::TAU;

use foundation::time::{Time, TimeSpan};

use crate::World;
use crate::config::RadiantConfig;
use crate::entity::MarkerId;
use crate::world::Marker;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Flash {
    marker: MarkerId,
    span: TimeSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    rotation_enabled: bool,
    flashes: Vec<Flash>,
}

impl Animator {
    pub fn new(rotation_enabled: bool) -> Self {
        Self {
            rotation_enabled,
            flashes: Vec::new(),
        }
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.rotation_enabled = enabled;
    }

    /// Advances one frame. Returns the markers whose flash ended this step.
    pub fn step(&mut self, world: &mut World, config: &RadiantConfig, now: Time) -> Vec<MarkerId> {
        if self.rotation_enabled {
            world.rotate_by(config.rotation_speed);
        }

        for marker in world.markers_mut() {
            marker.pulse_phase = (marker.pulse_phase + config.pulse_step).rem_euclid(TAU);
        }

        let mut ended = Vec::new();
        self.flashes.retain(|flash| {
            if flash.span.has_elapsed(now) {
                ended.push(flash.marker);
                false
            } else {
                true
            }
        });
        for id in &ended {
            if let Some(marker) = world.marker_mut(*id) {
                marker.visual.color = marker.base_color;
            }
        }
        ended
    }

    /// Paints `marker` with the flash color until `now + flash_duration`.
    ///
    /// Flashing an already-flashing marker restarts its window; the color it
    /// returns to is always the marker's base color.
    pub fn start_flash(
        &mut self,
        world: &mut World,
        config: &RadiantConfig,
        marker: MarkerId,
        now: Time,
    ) -> bool {
        let Some(m) = world.marker_mut(marker) else {
            return false;
        };
        m.visual.color = config.flash_color;

        let span = TimeSpan::starting_at(now, config.flash_duration_s());
        match self.flashes.iter_mut().find(|f| f.marker == marker) {
            Some(existing) => existing.span = span,
            None => self.flashes.push(Flash { marker, span }),
        }
        true
    }

    /// Drops pending flashes and restores base colors.
    pub fn cancel_flashes(&mut self, world: &mut World) {
        for flash in self.flashes.drain(..) {
            if let Some(m) = world.marker_mut(flash.marker) {
                m.visual.color = m.base_color;
            }
        }
    }
}

/// Deterministic initial pulse phase in `[0, 2π)` for marker `index`.
pub fn initial_pulse_phase(index: u32) -> f64 {
    // 32-bit integer mix, then map to the unit interval.
    let mut x = index ^ 0x9e37_79b9;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    (x as f64 / (u32::MAX as f64 + 1.0)) * TAU
}

/// Scale the marker is drawn at this frame: visual scale plus pulse offset.
pub fn rendered_scale(marker: &Marker, config: &RadiantConfig) -> f64 {
    marker.visual.scale + marker.pulse_phase.sin() * config.pulse_amplitude
}

/// Scale the marker's halo is drawn at this frame.
pub fn rendered_halo_scale(marker: &Marker, config: &RadiantConfig) -> f64 {
    rendered_scale(marker, config) * config.halo_pulse_factor
}
