use foundation::math::precision::stable_total_cmp_f64;
use foundation::math::{Vec2, Vec3};

use crate::World;
use crate::camera::Camera;
use crate::entity::MarkerId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub marker: MarkerId,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
    /// Unscaled marker radius; the marker's visual scale multiplies it.
    pub marker_radius: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
            marker_radius: 0.15,
        }
    }
}

/// Deterministic ray picking against markers.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - If multiple markers are hit at the same distance, the lower `MarkerId::index()` wins.
///
/// Notes:
/// - Each marker is a sphere of radius `marker_radius * visual.scale` at its
///   current world position.
/// - Halos and decorations are never hit.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalize()?;
    let root = world.root_transform();

    let mut best: Option<(f64, MarkerId)> = None;
    for marker in world.markers() {
        let center = root.apply(marker.local.position);
        let radius = opts.marker_radius * marker.visual.scale;
        let Some(t) = ray_sphere_hit_t(ray.origin, dir, center, radius, 0.0, opts.max_distance)
        else {
            continue;
        };

        best = match best {
            None => Some((t, marker.id)),
            Some((bt, bm)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| marker.id.cmp(&bm));
                if ord.is_lt() {
                    Some((t, marker.id))
                } else {
                    Some((bt, bm))
                }
            }
        };
    }

    let (t, marker) = best?;
    Some(PickHit {
        marker,
        distance: t,
        point: Ray::new(ray.origin, dir).at(t),
    })
}

/// Screen picking wrapper.
///
/// The caller supplies the NDC -> ray mapping via `make_ray`.
pub fn pick_screen<F>(
    world: &World,
    ndc: Vec2,
    mut make_ray: F,
    opts: PickOptions,
) -> Option<PickHit>
where
    F: FnMut(Vec2) -> Option<Ray>,
{
    let ray = make_ray(ndc)?;
    pick_ray(world, ray, opts)
}

/// Picks through `camera` at a normalized device coordinate.
pub fn pick_ndc(world: &World, camera: &Camera, ndc: Vec2, opts: PickOptions) -> Option<PickHit> {
    pick_screen(world, ndc, |p| camera.ray_through_ndc(p), opts)
}

/// Entry distance of a unit-direction ray into a sphere, within `[t_min, t_max]`.
///
/// An origin inside the sphere reports the exit distance.
fn ray_sphere_hit_t(
    origin: Vec3,
    dir: Vec3,
    center: Vec3,
    radius: f64,
    t_min: f64,
    t_max: f64,
) -> Option<f64> {
    if radius <= 0.0 {
        return None;
    }
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let s = disc.sqrt();
    let t0 = -b - s;
    let t1 = -b + s;
    if (t_min..=t_max).contains(&t0) {
        Some(t0)
    } else if (t_min..=t_max).contains(&t1) {
        Some(t1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{PickOptions, Ray, pick_ndc, pick_ray, ray_sphere_hit_t};
    use crate::World;
    use crate::camera::Camera;
    use crate::components::{EventData, MarkerVisual};
    use crate::config::RadiantConfig;
    use crate::severity::Severity;
    use foundation::math::{Vec2, Vec3};

    fn spawn(world: &mut World, position: Vec3) -> crate::entity::MarkerId {
        world.spawn_marker(
            EventData::new("2001", 50.0, "Dot-com"),
            Severity::Medium,
            position,
            MarkerVisual::baseline(Severity::Medium.color(), 0.8),
            0.0,
        )
    }

    #[test]
    fn ray_picks_nearest_hit() {
        let mut world = World::new();
        let far = spawn(&mut world, Vec3::new(10.0, 0.0, 0.0));
        let near = spawn(&mut world, Vec3::new(5.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.marker, near);
        assert_ne!(hit.marker, far);
        assert!((hit.distance - 4.85).abs() < 1e-9);
        assert!((hit.point.x - 4.85).abs() < 1e-9);
    }

    #[test]
    fn tie_breaks_by_marker_index() {
        let mut world = World::new();
        let first = spawn(&mut world, Vec3::new(5.0, 0.0, 0.0));
        let _second = spawn(&mut world, Vec3::new(5.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.marker, first);
    }

    #[test]
    fn misses_and_behind_origin() {
        let mut world = World::new();
        spawn(&mut world, Vec3::new(-5.0, 0.0, 0.0));
        spawn(&mut world, Vec3::new(5.0, 1.0, 0.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());
    }

    #[test]
    fn highlight_scale_grows_the_hit_radius() {
        let mut world = World::new();
        let id = spawn(&mut world, Vec3::new(5.0, 0.2, 0.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());

        if let Some(m) = world.marker_mut(id) {
            m.visual.scale = 1.5;
        }
        assert!(pick_ray(&world, ray, PickOptions::default()).is_some());
    }

    #[test]
    fn picking_follows_world_rotation() {
        let mut world = World::new();
        let id = spawn(&mut world, Vec3::new(0.0, 0.0, 5.0));
        let ray = Ray::new(Vec3::new(15.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());

        world.rotate_by(std::f64::consts::FRAC_PI_2);
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.marker, id);
    }

    #[test]
    fn camera_center_hits_marker_on_the_view_axis() {
        let cfg = RadiantConfig::default();
        let camera = Camera::from_config(&cfg, 800.0, 600.0);
        let mut world = World::new();
        let back = spawn(&mut world, Vec3::new(0.0, 0.0, -5.0));
        let front = spawn(&mut world, Vec3::new(0.0, 0.0, 5.0));

        let hit = pick_ndc(&world, &camera, Vec2::new(0.0, 0.0), PickOptions::default())
            .expect("hit");
        assert_eq!(hit.marker, front);
        assert_ne!(hit.marker, back);
    }

    #[test]
    fn sphere_hit_from_inside_reports_exit() {
        let t = ray_sphere_hit_t(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::ZERO,
            2.0,
            0.0,
            100.0,
        );
        assert_eq!(t, Some(2.0));
        assert!(
            ray_sphere_hit_t(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 0.0, 0.0, 1.0)
                .is_none()
        );
    }
}
