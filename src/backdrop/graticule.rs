use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

/// Wire lines of a UV sphere: one meridian per width segment, running pole to pole,
/// and one closed ring per interior latitude band edge.
///
/// Y is up, matching the globe after its container rotation.
pub fn graticule_lines(radius: f32, width_segments: u32, height_segments: u32) -> Vec<Vec<Vec3>> {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let vertex = |u: u32, v: u32| {
        let phi = u as f32 / width_segments as f32 * TAU;
        let theta = v as f32 / height_segments as f32 * PI;
        Vec3::new(
            -radius * phi.cos() * theta.sin(),
            radius * theta.cos(),
            radius * phi.sin() * theta.sin(),
        )
    };

    let meridians = (0..width_segments).map(|u| (0..=height_segments).map(|v| vertex(u, v)).collect());
    let rings = (1..height_segments).map(|v| (0..=width_segments).map(|u| vertex(u, v)).collect());

    meridians.chain(rings).collect()
}
