use tracing::debug;

use crate::World;
use crate::animation::initial_pulse_phase;
use crate::components::{Drawable3D, EventData, MarkerVisual};
use crate::config::RadiantConfig;
use crate::entity::MarkerId;
use crate::layout::fibonacci_sphere_point;
use crate::severity::Severity;

/// Adds the wireframe sphere and the orbital rings, replacing any previous ones.
pub fn spawn_radiant(world: &mut World, config: &RadiantConfig) {
    world.clear_drawables();
    world.add_drawable(
        Drawable3D::wire_sphere(
            config.sphere_radius,
            config.wire_width_segments,
            config.wire_height_segments,
        )
        .with_style(config.wire_color, config.wire_opacity),
    );
    for k in 0..config.ring_count {
        world.add_drawable(
            Drawable3D::ring(config.ring_radius(k), config.ring_segments)
                .with_style(config.ring_color, config.ring_opacity),
        );
    }
}

/// Replaces the markers with one per event, laid out over the sphere.
///
/// Marker `i` stands for `events[i]`.
pub fn populate_markers(
    world: &mut World,
    events: &[EventData],
    config: &RadiantConfig,
) -> Vec<MarkerId> {
    world.clear_markers();
    let total = events.len();
    let mut ids = Vec::with_capacity(total);
    for (i, data) in events.iter().enumerate() {
        let Some(position) = fibonacci_sphere_point(i, total, config.sphere_radius) else {
            continue;
        };
        let severity = Severity::classify(data.score);
        let visual = MarkerVisual::baseline(severity.color(), config.baseline_opacity);
        ids.push(world.spawn_marker(
            data.clone(),
            severity,
            position,
            visual,
            initial_pulse_phase(i as u32),
        ));
    }
    debug!(markers = ids.len(), "populated radiant markers");
    ids
}

#[cfg(test)]
mod tests {
    use super::{populate_markers, spawn_radiant};
    use crate::World;
    use crate::components::{EventData, Rgb, Shape3D};
    use crate::config::RadiantConfig;
    use crate::severity::Severity;

    #[test]
    fn spawns_sphere_then_rings() {
        let cfg = RadiantConfig::default();
        let mut world = World::new();
        spawn_radiant(&mut world, &cfg);

        let drawables = world.drawables();
        assert_eq!(drawables.len(), 4);
        assert!(matches!(
            drawables[0].shape,
            Shape3D::WireSphere {
                width_segments: 32,
                height_segments: 32,
                ..
            }
        ));
        let radii: Vec<f64> = drawables[1..]
            .iter()
            .filter_map(|d| match d.shape {
                Shape3D::Ring { radius, .. } => Some(radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![5.5, 6.0, 6.5]);
        assert_eq!(drawables[1].color, Rgb(0x00f3ff));
        assert_eq!(drawables[1].opacity, 0.1);

        spawn_radiant(&mut world, &cfg);
        assert_eq!(world.drawables().len(), 4);
    }

    #[test]
    fn markers_match_events_one_to_one() {
        let cfg = RadiantConfig::default();
        let mut world = World::new();
        let events = vec![
            EventData::new("1945", 10.0, "End of WWII"),
            EventData::new("1969", 75.0, "Moon landing"),
            EventData::new("2008", 45.0, "Financial crisis"),
        ];
        let ids = populate_markers(&mut world, &events, &cfg);
        assert_eq!(ids.len(), 3);
        assert_eq!(world.marker_count(), 3);

        for (id, event) in ids.iter().zip(&events) {
            let m = world.marker(*id).expect("marker");
            assert_eq!(&m.data, event);
            assert!((m.local.position.length() - 5.0).abs() < 1e-9);
            assert_eq!(m.visual.opacity, 0.8);
            assert_eq!(m.visual.color, m.severity.color());
        }
        let severities: Vec<Severity> = world.markers().iter().map(|m| m.severity).collect();
        assert_eq!(severities, vec![Severity::Low, Severity::High, Severity::Medium]);
    }

    #[test]
    fn repopulating_replaces_markers() {
        let cfg = RadiantConfig::default();
        let mut world = World::new();
        populate_markers(&mut world, &[EventData::new("1", 1.0, "a")], &cfg);
        populate_markers(&mut world, &[], &cfg);
        assert_eq!(world.marker_count(), 0);
    }
}
