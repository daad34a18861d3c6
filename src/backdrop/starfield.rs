use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

/// Hue shared by every star, as a fraction of the color wheel.
pub const STAR_HUE: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub color: Color,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
    pub size: f32,
}

/// Scatters `count` stars uniformly over directions, at distances in `[min_radius, max_radius)`.
pub fn generate_starfield<R: Rng + ?Sized>(
    count: usize,
    min_radius: f32,
    max_radius: f32,
    rng: &mut R,
) -> Vec<Star> {
    let (min_radius, max_radius) = if min_radius <= max_radius {
        (min_radius, max_radius)
    } else {
        (max_radius, min_radius)
    };

    (0..count)
        .map(|_| {
            let radius = min_radius + rng.r#gen::<f32>() * (max_radius - min_radius);
            let z: f32 = rng.gen_range(-1.0..=1.0);
            let theta = rng.r#gen::<f32>() * TAU;
            let ring = (1.0 - z * z).max(0.0).sqrt();
            let direction = Vec3::new(ring * theta.cos(), ring * theta.sin(), z);

            Star {
                position: direction * radius,
                color: Color::hsl(STAR_HUE * 360.0, 0.2, rng.r#gen::<f32>()),
            }
        })
        .collect()
}
