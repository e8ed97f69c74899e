use foundation::math::Vec2;

use crate::World;
use crate::camera::Camera;
use crate::components::EventData;
use crate::config::RadiantConfig;
use crate::entity::MarkerId;
use crate::picking::{PickHit, PickOptions, pick_ndc};

/// Text shown next to the pointer while a marker is hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub year: String,
    pub score_label: String,
    pub description: String,
}

impl TooltipContent {
    pub fn from_event(data: &EventData) -> Self {
        Self {
            year: data.year.clone(),
            score_label: data.score_label(),
            description: data.description.clone(),
        }
    }

    /// Tooltip body as three lines: year, score, description.
    pub fn lines(&self) -> [&str; 3] {
        [&self.year, &self.score_label, &self.description]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Hover {
    Nothing,
    Marker { id: MarkerId, tooltip: TooltipContent },
}

impl Hover {
    pub fn marker(&self) -> Option<MarkerId> {
        match self {
            Hover::Nothing => None,
            Hover::Marker { id, .. } => Some(*id),
        }
    }
}

/// Pointer state: which marker (if any) is under the cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    hovered: Option<MarkerId>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    /// Picks under `ndc`, resets every marker to baseline, then highlights the hit.
    ///
    /// Colors are left alone so an in-flight flash survives hovering.
    pub fn pointer_move(
        &mut self,
        world: &mut World,
        camera: &Camera,
        config: &RadiantConfig,
        ndc: Vec2,
    ) -> Hover {
        let hit = pick_ndc(world, camera, ndc, pick_options(config));

        reset_to_baseline(world, config);

        let Some(hit) = hit else {
            self.hovered = None;
            return Hover::Nothing;
        };
        highlight(world, config, hit.marker);
        self.hovered = Some(hit.marker);

        match world.marker(hit.marker) {
            Some(marker) => Hover::Marker {
                id: hit.marker,
                tooltip: TooltipContent::from_event(&marker.data),
            },
            None => Hover::Nothing,
        }
    }

    /// Resolves a click to the marker under `ndc`, without touching visuals.
    pub fn click(
        &self,
        world: &World,
        camera: &Camera,
        config: &RadiantConfig,
        ndc: Vec2,
    ) -> Option<PickHit> {
        pick_ndc(world, camera, ndc, pick_options(config))
    }

    /// Forgets the hovered marker (e.g. after markers were replaced).
    pub fn clear(&mut self) {
        self.hovered = None;
    }
}

pub fn pick_options(config: &RadiantConfig) -> PickOptions {
    PickOptions {
        marker_radius: config.marker_radius,
        ..PickOptions::default()
    }
}

pub fn reset_to_baseline(world: &mut World, config: &RadiantConfig) {
    for marker in world.markers_mut() {
        marker.visual.scale = 1.0;
        marker.visual.opacity = config.baseline_opacity;
    }
}

pub fn highlight(world: &mut World, config: &RadiantConfig, id: MarkerId) {
    if let Some(marker) = world.marker_mut(id) {
        marker.visual.scale = config.highlight_scale;
        marker.visual.opacity = config.highlight_opacity;
    }
}
