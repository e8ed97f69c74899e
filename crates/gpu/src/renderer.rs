use std::cmp::Reverse;

use bytemuck::{Pod, Zeroable};
use foundation::math::{StableF64, Vec3};
use scene::animation::{rendered_halo_scale, rendered_scale};
use scene::components::Shape3D;
use scene::entity::MarkerId;
use scene::radiant::Radiant;

use crate::geometry::{LineVertex, ring_segments, segments_to_vertices, wire_sphere_segments};
use crate::matrix::{Mat4, camera_view_proj};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderCommand {
    WireSphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
        rotation_y: f64,
        rgba: [f32; 4],
    },
    Ring {
        radius: f64,
        segments: u32,
        rgba: [f32; 4],
    },
    Halo {
        marker: MarkerId,
        center: Vec3,
        radius: f64,
        rgba: [f32; 4],
    },
    Marker {
        marker: MarkerId,
        center: Vec3,
        radius: f64,
        rgba: [f32; 4],
    },
}

/// Per-instance data for the marker and halo sphere pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

#[derive(Debug)]
pub struct RenderFrame {
    pub view_proj: Mat4,
    pub commands: Vec<RenderCommand>,
}

impl RenderFrame {
    /// Wireframe and ring commands flattened into one colored line list.
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let mut out = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                RenderCommand::WireSphere {
                    radius,
                    width_segments,
                    height_segments,
                    rotation_y,
                    rgba,
                } => {
                    let segs: Vec<(Vec3, Vec3)> =
                        wire_sphere_segments(radius, width_segments, height_segments)
                            .into_iter()
                            .map(|(a, b)| (a.rotate_y(rotation_y), b.rotate_y(rotation_y)))
                            .collect();
                    out.extend(segments_to_vertices(&segs, rgba));
                }
                RenderCommand::Ring {
                    radius,
                    segments,
                    rgba,
                } => out.extend(segments_to_vertices(&ring_segments(radius, segments), rgba)),
                _ => {}
            }
        }
        out
    }

    /// Halos first, then markers, so markers blend over their own halo.
    pub fn sphere_instances(&self) -> Vec<SphereInstance> {
        let mut halos = Vec::new();
        let mut markers = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                RenderCommand::Halo {
                    center,
                    radius,
                    rgba,
                    ..
                } => halos.push(instance(center, radius, rgba)),
                RenderCommand::Marker {
                    center,
                    radius,
                    rgba,
                    ..
                } => markers.push(instance(center, radius, rgba)),
                _ => {}
            }
        }
        halos.extend(markers);
        halos
    }
}

fn instance(center: Vec3, radius: f64, rgba: [f32; 4]) -> SphereInstance {
    SphereInstance {
        center: center.to_f32_array(),
        radius: radius as f32,
        color: rgba,
    }
}

pub struct Renderer;

impl Renderer {
    /// Snapshot of everything to draw this frame.
    ///
    /// Markers are emitted far to near so alpha blending needs no depth buffer.
    pub fn collect(radiant: &Radiant) -> RenderFrame {
        let world = radiant.world();
        let config = radiant.config();
        let mut commands = Vec::with_capacity(world.drawables().len() + 2 * world.marker_count());

        for drawable in world.drawables() {
            let rgba = drawable.color.to_rgba_f32(drawable.opacity);
            let rotation_y = if drawable.spins { world.rotation_y() } else { 0.0 };
            commands.push(match drawable.shape {
                Shape3D::WireSphere {
                    radius,
                    width_segments,
                    height_segments,
                } => RenderCommand::WireSphere {
                    radius,
                    width_segments,
                    height_segments,
                    rotation_y,
                    rgba,
                },
                Shape3D::Ring { radius, segments } => RenderCommand::Ring {
                    radius,
                    segments,
                    rgba,
                },
            });
        }

        let eye = radiant.camera().position;
        let mut positions = world.marker_world_positions();
        positions.sort_by_key(|(id, center)| (Reverse(StableF64((*center - eye).length())), *id));

        for (id, center) in positions {
            let Some(marker) = world.marker(id) else {
                continue;
            };
            commands.push(RenderCommand::Halo {
                marker: id,
                center,
                radius: config.halo_radius * rendered_halo_scale(marker, config),
                rgba: marker.base_color.to_rgba_f32(config.halo_opacity),
            });
            commands.push(RenderCommand::Marker {
                marker: id,
                center,
                radius: config.marker_radius * rendered_scale(marker, config),
                rgba: marker.visual.color.to_rgba_f32(marker.visual.opacity),
            });
        }

        RenderFrame {
            view_proj: camera_view_proj(radiant.camera()),
            commands,
        }
    }
}
