//! The radiant context: one value owning everything a running widget needs.
//!
//! Hosts (the web viewer, the CLI, tests) create a `Radiant`, feed it frames
//! and pointer positions, and drain its event log. Dropping it is teardown.

use foundation::math::Vec2;
use foundation::time::Time;
use runtime::event_bus::{Event, EventBus, EventKind};
use runtime::frame::Frame;
use tracing::{debug, info, warn};

use crate::World;
use crate::animation::Animator;
use crate::camera::Camera;
use crate::components::EventData;
use crate::config::RadiantConfig;
use crate::entity::MarkerId;
use crate::interaction::{Hover, Interaction};
use crate::prefabs::{populate_markers, spawn_radiant};

#[derive(Debug)]
pub struct Radiant {
    config: RadiantConfig,
    world: World,
    camera: Camera,
    animator: Animator,
    interaction: Interaction,
    frame: Frame,
    events: EventBus,
}

impl Radiant {
    /// Builds the sphere and rings for a `width × height` viewport. No markers yet.
    pub fn new(config: RadiantConfig, width: f64, height: f64) -> Self {
        let mut world = World::new();
        spawn_radiant(&mut world, &config);
        let camera = Camera::from_config(&config, width, height);
        let animator = Animator::new(config.rotation_enabled);
        Self {
            config,
            world,
            camera,
            animator,
            interaction: Interaction::new(),
            frame: Frame::first(),
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &RadiantConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.interaction.hovered()
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    /// Number of markers, which equals the number of qualifying events loaded.
    pub fn event_count(&self) -> usize {
        self.world.marker_count()
    }

    /// Replaces the markers with one per event. Returns the marker count.
    pub fn load_events(&mut self, events: &[EventData]) -> usize {
        self.animator.cancel_flashes(&mut self.world);
        self.interaction.clear();
        let count = populate_markers(&mut self.world, events, &self.config).len();
        self.events
            .emit(self.frame, EventKind::Loaded, format!("{count} events"));
        info!(count, "radiant events loaded");
        count
    }

    /// Records a failed load. The sphere keeps spinning with no markers.
    pub fn load_failed(&mut self, reason: &str) {
        self.animator.cancel_flashes(&mut self.world);
        self.interaction.clear();
        self.world.clear_markers();
        self.events
            .emit(self.frame, EventKind::LoadFailed, reason.to_string());
        warn!(reason, "radiant history load failed");
    }

    /// One display refresh: spin, pulse, expire flashes.
    pub fn advance_frame(&mut self, now: Time) {
        let ended = self.animator.step(&mut self.world, &self.config, now);
        for id in ended {
            self.events
                .emit(self.frame, EventKind::FlashEnded, id.index().to_string());
        }
        self.frame = self.frame.next();
    }

    /// Hover at a normalized device coordinate.
    ///
    /// Hover events are only logged when the hovered marker changes.
    pub fn pointer_move(&mut self, ndc: Vec2) -> Hover {
        let previous = self.interaction.hovered();
        let hover = self
            .interaction
            .pointer_move(&mut self.world, &self.camera, &self.config, ndc);

        if hover.marker() != previous {
            match &hover {
                Hover::Marker { tooltip, .. } => {
                    self.events
                        .emit(self.frame, EventKind::Hover, tooltip.year.clone());
                }
                Hover::Nothing => {
                    self.events.emit(self.frame, EventKind::HoverCleared, "");
                }
            }
        }
        hover
    }

    /// Click at a normalized device coordinate; flashes and returns the hit marker.
    pub fn click(&mut self, ndc: Vec2, now: Time) -> Option<MarkerId> {
        let hit = self
            .interaction
            .click(&self.world, &self.camera, &self.config, ndc)?;
        let id = hit.marker;
        self.animator
            .start_flash(&mut self.world, &self.config, id, now);

        let message = self
            .world
            .marker(id)
            .map(|m| format!("{} - {}", m.data.year, m.data.description))
            .unwrap_or_default();
        info!(marker = id.index(), "{message}");
        self.events.emit(self.frame, EventKind::Selected, message);
        Some(id)
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.animator.set_rotation_enabled(enabled);
        self.config.rotation_enabled = enabled;
    }

    /// Swaps in a new config, rebuilding decorations, camera and marker layout.
    ///
    /// Markers keep their events and order; the current rotation is preserved.
    pub fn apply_config(&mut self, config: RadiantConfig) {
        let aspect = self.camera.aspect;
        self.config = config;

        spawn_radiant(&mut self.world, &self.config);
        self.camera = Camera::from_config(&self.config, 1.0, 1.0);
        self.camera.aspect = aspect;
        self.set_rotation_enabled(self.config.rotation_enabled);

        let data: Vec<EventData> = self
            .world
            .markers()
            .iter()
            .map(|m| m.data.clone())
            .collect();
        self.animator.cancel_flashes(&mut self.world);
        self.interaction.clear();
        populate_markers(&mut self.world, &data, &self.config);
        debug!(markers = data.len(), "radiant config applied");
    }
}

#[cfg(test)]
mod tests {
    use super::Radiant;
    use crate::components::{EventData, Rgb};
    use crate::config::RadiantConfig;
    use crate::interaction::Hover;
    use crate::severity::Severity;
    use foundation::math::Vec2;
    use foundation::time::Time;
    use runtime::event_bus::EventKind;

    fn two_events() -> Vec<EventData> {
        vec![
            EventData::new("-50", 70.0, "A"),
            EventData::new("1900", 45.0, "B"),
        ]
    }

    /// NDC of marker `index` as seen through the radiant's camera.
    fn ndc_of(radiant: &Radiant, index: usize) -> Vec2 {
        let p = radiant.world().marker_world_positions()[index].1;
        let cam = radiant.camera();
        let (forward, right, up) = cam.basis().expect("basis");
        let rel = p - cam.position;
        let depth = rel.dot(forward);
        let tan = (0.5 * cam.fov_y_rad).tan();
        Vec2::new(
            rel.dot(right) / (depth * tan * cam.aspect),
            rel.dot(up) / (depth * tan),
        )
    }

    #[test]
    fn load_creates_one_marker_per_event() {
        let mut radiant = Radiant::new(RadiantConfig::default(), 800.0, 600.0);
        assert_eq!(radiant.load_events(&two_events()), 2);
        assert_eq!(radiant.event_count(), 2);
        let severities: Vec<Severity> =
            radiant.world().markers().iter().map(|m| m.severity).collect();
        assert_eq!(severities, vec![Severity::High, Severity::Medium]);
        assert_eq!(
            radiant.events().last().map(|e| e.kind),
            Some(EventKind::Loaded)
        );
    }

    #[test]
    fn failed_load_leaves_bare_sphere() {
        let mut radiant = Radiant::new(RadiantConfig::default(), 800.0, 600.0);
        radiant.load_failed("HTTP 404");
        assert_eq!(radiant.event_count(), 0);
        assert_eq!(radiant.world().drawables().len(), 4);

        radiant.advance_frame(Time(0.0));
        assert!(radiant.world().rotation_y() > 0.0);
        let ev = radiant.drain_events();
        assert_eq!(ev[0].kind, EventKind::LoadFailed);
        assert_eq!(ev[0].message, "HTTP 404");
    }

    #[test]
    fn click_flashes_then_restores_after_duration() {
        let mut radiant = Radiant::new(RadiantConfig::default(), 800.0, 600.0);
        radiant.set_rotation_enabled(false);
        radiant.load_events(&two_events());
        radiant.drain_events();

        let ndc = ndc_of(&radiant, 0);
        let id = radiant.click(ndc, Time(1.0)).expect("hit");
        assert_eq!(id.index(), 0);
        assert_eq!(radiant.world().markers()[0].visual.color, Rgb::WHITE);

        let selected = radiant.events().last().expect("event");
        assert_eq!(selected.kind, EventKind::Selected);
        assert_eq!(selected.message, "-50 - A");

        radiant.advance_frame(Time(1.1));
        assert_eq!(radiant.world().markers()[0].visual.color, Rgb::WHITE);
        radiant.advance_frame(Time(1.25));
        assert_eq!(
            radiant.world().markers()[0].visual.color,
            Severity::High.color()
        );
        assert_eq!(
            radiant.events().last().map(|e| e.kind),
            Some(EventKind::FlashEnded)
        );
    }

    #[test]
    fn hover_logs_only_on_change() {
        let mut radiant = Radiant::new(RadiantConfig::default(), 800.0, 600.0);
        radiant.set_rotation_enabled(false);
        radiant.load_events(&two_events());
        radiant.drain_events();

        let ndc = ndc_of(&radiant, 1);
        let hover = radiant.pointer_move(ndc);
        assert!(matches!(hover, Hover::Marker { .. }));
        radiant.pointer_move(ndc);
        radiant.pointer_move(Vec2::new(0.99, -0.99));

        let kinds: Vec<EventKind> = radiant.drain_events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Hover, EventKind::HoverCleared]);
        assert_eq!(radiant.hovered(), None);
    }

    #[test]
    fn rotation_toggle_stops_spin() {
        let mut radiant = Radiant::new(RadiantConfig::default(), 800.0, 600.0);
        radiant.set_rotation_enabled(false);
        radiant.advance_frame(Time(0.0));
        assert_eq!(radiant.world().rotation_y(), 0.0);
        assert_eq!(radiant.frame().index, 1);
    }

    #[test]
    fn apply_config_relays_markers_on_new_radius() {
        let mut radiant = Radiant::new(RadiantConfig::default(), 800.0, 600.0);
        radiant.load_events(&two_events());
        let config = RadiantConfig {
            sphere_radius: 3.0,
            ring_count: 1,
            ..RadiantConfig::default()
        };
        radiant.apply_config(config);
        assert_eq!(radiant.event_count(), 2);
        assert_eq!(radiant.world().drawables().len(), 2);
        for m in radiant.world().markers() {
            assert!((m.local.position.length() - 3.0).abs() < 1e-9);
        }
        assert!((radiant.camera().aspect - 800.0 / 600.0).abs() < 1e-12);
    }
}
