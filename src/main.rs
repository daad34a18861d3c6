use std::path::PathBuf;

use backdrop::BackdropPlugin;
use bevy::prelude::*;
use camera::CameraSystemPlugin;
use geojson::GeoJsonPlugin;
use settings::SettingsPlugin;

pub mod backdrop;
pub mod camera;
pub mod error;
pub mod geojson;
pub mod settings;
pub mod types;

fn main() {
    // Optional first argument: path to a settings file.
    let settings_path = std::env::args().nth(1).map(PathBuf::from);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Globe Viewer".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(SettingsPlugin {
            path: settings_path,
        })
        .add_plugins((CameraSystemPlugin, BackdropPlugin, GeoJsonPlugin))
        .run();
}
