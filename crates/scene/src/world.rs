use foundation::math::Vec3;

use crate::components::{Drawable3D, EventData, MarkerVisual, Rgb, Transform};
use crate::entity::MarkerId;
use crate::severity::Severity;

/// One rendered point (plus halo) standing for one historical event.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub data: EventData,
    pub severity: Severity,
    /// Position on the sphere before the world rotation is applied.
    pub local: Transform,
    pub visual: MarkerVisual,
    /// Color the marker returns to after a flash.
    pub base_color: Rgb,
    /// Pulse phase in radians.
    pub pulse_phase: f64,
}

/// Scene graph for one radiant: static decorations, markers, and the spin.
#[derive(Debug, Default)]
pub struct World {
    drawables: Vec<Drawable3D>,
    markers: Vec<Marker>,
    rotation_y: f64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_drawable(&mut self, drawable: Drawable3D) {
        self.drawables.push(drawable);
    }

    pub fn drawables(&self) -> &[Drawable3D] {
        &self.drawables
    }

    pub fn clear_drawables(&mut self) {
        self.drawables.clear();
    }

    pub fn spawn_marker(
        &mut self,
        data: EventData,
        severity: Severity,
        position: Vec3,
        visual: MarkerVisual,
        pulse_phase: f64,
    ) -> MarkerId {
        let id = MarkerId(self.markers.len() as u32);
        self.markers.push(Marker {
            id,
            data,
            severity,
            local: Transform::translate(position),
            visual,
            base_color: visual.color,
            pulse_phase,
        });
        id
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut [Marker] {
        &mut self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.index() as usize)
    }

    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.get_mut(id.index() as usize)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    pub fn rotate_by(&mut self, delta_rad: f64) {
        self.rotation_y += delta_rad;
    }

    /// Transform shared by the sphere and every marker.
    pub fn root_transform(&self) -> Transform {
        Transform::spin(self.rotation_y)
    }

    /// World-space centers of all markers, in id order.
    pub fn marker_world_positions(&self) -> Vec<(MarkerId, Vec3)> {
        let root = self.root_transform();
        self.markers
            .iter()
            .map(|m| (m.id, root.apply(m.local.position)))
            .collect()
    }
}
