use std::f32::consts::FRAC_PI_2;

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};

use crate::settings::{CameraSettings, GlobeSettings};

// Stops the orbit just short of the poles so `looking_at` keeps a usable up vector.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.017;

pub struct CameraSystemPlugin;

impl Plugin for CameraSystemPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, orbit_camera);
    }
}

/// Orbit state around the globe centre. Drag input feeds `velocity`, which decays every frame.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub velocity: Vec2,
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        // Looking down -Z from +Z, like an untouched perspective camera pushed back from the origin.
        Self {
            yaw: FRAC_PI_2,
            pitch: 0.0,
            distance,
            velocity: Vec2::ZERO,
        }
    }

    pub fn eye(&self) -> Vec3 {
        orbit_eye(self.yaw, self.pitch, self.distance)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(Vec3::ZERO, Vec3::Y)
    }

    /// One frame of orbiting: adds the drag, moves by the velocity, then damps it.
    pub fn step(&mut self, drag: Vec2, scroll: f32, settings: &CameraSettings) {
        self.velocity += drag * settings.rotate_speed;
        self.yaw += self.velocity.x;
        self.pitch = (self.pitch + self.velocity.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.velocity *= 1.0 - settings.damping.clamp(0.0, 1.0);

        self.distance = zoom_distance(self.distance, scroll, settings);
    }
}

pub fn orbit_eye(yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    Vec3::new(
        distance * yaw.cos() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.sin() * pitch.cos(),
    )
}

/// Scrolling up moves in, scaled by the current distance so zoom feels even at every range.
pub fn zoom_distance(distance: f32, scroll: f32, settings: &CameraSettings) -> f32 {
    let zoomed = distance * (-scroll * settings.zoom_speed).exp();
    zoomed.clamp(settings.min_distance, settings.max_distance)
}

fn setup_camera(mut commands: Commands, settings: Res<GlobeSettings>) {
    let camera = &settings.camera;
    let orbit = OrbitCamera::new(camera.distance.clamp(camera.min_distance, camera.max_distance));

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        orbit.transform(),
        orbit,
    ));
}

fn orbit_camera(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    settings: Res<GlobeSettings>,
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let drag = if buttons.pressed(MouseButton::Left) {
        Vec2::new(-motion.delta.x, motion.delta.y)
    } else {
        Vec2::ZERO
    };

    for (mut orbit, mut transform) in &mut query {
        orbit.step(drag, scroll.delta.y, &settings.camera);
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_on_positive_z() {
        let orbit = OrbitCamera::new(4.0);
        let eye = orbit.eye();
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.z, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn zoom_is_clamped() {
        let settings = CameraSettings::default();
        assert_eq!(zoom_distance(4.0, 1000.0, &settings), settings.min_distance);
        assert_eq!(zoom_distance(4.0, -1000.0, &settings), settings.max_distance);
        assert!(zoom_distance(10.0, 1.0, &settings) < 10.0);
        assert_eq!(zoom_distance(10.0, 0.0, &settings), 10.0);
    }

    #[test]
    fn velocity_decays_after_release() {
        let settings = CameraSettings::default();
        let mut orbit = OrbitCamera::new(4.0);
        orbit.step(Vec2::new(100.0, 0.0), 0.0, &settings);
        let yaw_after_drag = orbit.yaw;
        let speed = orbit.velocity.length();
        assert!(speed > 0.0);

        orbit.step(Vec2::ZERO, 0.0, &settings);
        assert!(orbit.yaw > yaw_after_drag);
        assert!(orbit.velocity.length() < speed);

        for _ in 0..1000 {
            orbit.step(Vec2::ZERO, 0.0, &settings);
        }
        assert!(orbit.velocity.length() < 1e-6);
    }

    #[test]
    fn pitch_stops_short_of_the_poles() {
        let settings = CameraSettings::default();
        let mut orbit = OrbitCamera::new(4.0);
        for _ in 0..100 {
            orbit.step(Vec2::new(0.0, 500.0), 0.0, &settings);
        }
        assert!(orbit.pitch <= PITCH_LIMIT);
        assert_relative_eq!(orbit.eye().length(), 4.0, epsilon = 1e-4);
    }
}
