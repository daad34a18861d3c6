use bevy::{math::Isometry3d, prelude::*};
use rand::thread_rng;

use crate::settings::GlobeSettings;

use super::{Starfield, generate_starfield, graticule_lines};

/// Everything drawn behind the outlines.
pub struct BackdropPlugin;

impl Plugin for BackdropPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Starfield>()
            .init_resource::<Graticule>()
            .add_systems(Startup, (setup_shell, setup_starfield, setup_graticule))
            .add_systems(Update, (draw_graticule, draw_starfield));
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Graticule {
    pub lines: Vec<Vec<Vec3>>,
    pub color: Color,
}

/// Opaque black sphere just inside the outlines, hiding whatever is on the far side.
fn setup_shell(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<GlobeSettings>,
) {
    commands.spawn((
        Name::new("Shell"),
        Mesh3d(meshes.add(Sphere::new(settings.shell_radius).mesh().uv(64, 64))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::BLACK,
            unlit: true,
            ..default()
        })),
        Transform::default(),
    ));
}

fn setup_starfield(mut starfield: ResMut<Starfield>, settings: Res<GlobeSettings>) {
    let config = &settings.starfield;
    starfield.stars = generate_starfield(config.count, config.min_radius, config.max_radius, &mut thread_rng());
    starfield.size = config.size;
    debug!("Generated {} stars", starfield.stars.len());
}

fn setup_graticule(mut graticule: ResMut<Graticule>, settings: Res<GlobeSettings>) {
    let wireframe = &settings.wireframe;
    let color = Srgba::hex(&wireframe.color).map(Color::from).unwrap_or_else(|e| {
        warn!("Bad wireframe color {:?}: {e}", wireframe.color);
        Color::WHITE
    });

    graticule.lines = graticule_lines(
        settings.radius as f32,
        wireframe.width_segments,
        wireframe.height_segments,
    );
    graticule.color = color.with_alpha(wireframe.opacity);
}

fn draw_graticule(mut gizmos: Gizmos, graticule: Res<Graticule>) {
    for line in &graticule.lines {
        gizmos.linestrip(line.iter().copied(), graticule.color);
    }
}

fn draw_starfield(mut gizmos: Gizmos, starfield: Res<Starfield>) {
    for star in &starfield.stars {
        gizmos.sphere(Isometry3d::from_translation(star.position), starfield.size, star.color);
    }
}
