use std::path::{Path, PathBuf};

use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{
    error::{GlobeError, GlobeResult},
    types::MaterialOptions,
};

pub struct SettingsPlugin {
    /// Explicit settings file; falls back to the per-user config dir, then to defaults.
    pub path: Option<PathBuf>,
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = match GlobeSettings::load(self.path.as_deref()) {
            Ok(settings) => settings,
            Err(e) => {
                error!("{e}, using default settings");
                GlobeSettings::default()
            }
        };
        app.insert_resource(ClearColor(Color::BLACK))
            .insert_resource(settings);
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeSettings {
    /// Radius the outlines are projected onto.
    pub radius: f64,
    /// Opaque inner sphere hiding the far side. Kept just under `radius` to avoid z-fighting.
    pub shell_radius: f32,
    pub datasets: Vec<DatasetSettings>,
    pub camera: CameraSettings,
    pub wireframe: WireframeSettings,
    pub starfield: StarfieldSettings,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        GlobeSettings {
            radius: 2.0,
            shell_radius: 1.99,
            datasets: vec![
                DatasetSettings::new("assets/geojson/countries.json"),
                DatasetSettings::new("assets/geojson/ne_110m_land.json"),
            ],
            camera: CameraSettings::default(),
            wireframe: WireframeSettings::default(),
            starfield: StarfieldSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSettings {
    /// File path or http(s) URL.
    pub source: String,
    #[serde(default)]
    pub material: MaterialOptions,
}

impl DatasetSettings {
    pub fn new(source: &str) -> Self {
        DatasetSettings {
            source: source.to_string(),
            material: MaterialOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of the remaining orbit velocity shed per frame.
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            distance: 4.0,
            min_distance: 3.0,
            max_distance: 20.0,
            fov_degrees: 75.0,
            near: 1.0,
            far: 100.0,
            damping: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireframeSettings {
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: String,
    pub opacity: f32,
}

impl Default for WireframeSettings {
    fn default() -> Self {
        WireframeSettings {
            width_segments: 32,
            height_segments: 16,
            color: "#ffffff".to_string(),
            opacity: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub size: f32,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        StarfieldSettings {
            count: 1000,
            min_radius: 25.0,
            max_radius: 50.0,
            size: 0.1,
        }
    }
}

impl GlobeSettings {
    /// Loads settings from `path`, or from `settings.json` in the user config dir.
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load(path: Option<&Path>) -> GlobeResult<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                info!("No settings file found, using defaults");
                Ok(GlobeSettings::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> GlobeResult<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| GlobeError::Settings(format!("{}: {e}", path.display())))?;
        let settings = Self::from_json(&data)
            .map_err(|e| GlobeError::Settings(format!("{}: {e}", path.display())))?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(data: &str) -> GlobeResult<Self> {
        let settings: GlobeSettings = serde_json::from_str(data)?;
        if settings.radius.is_nan() || settings.radius <= 0.0 {
            return Err(GlobeError::Settings(format!(
                "radius must be positive, got {}",
                settings.radius
            )));
        }
        Ok(settings)
    }
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "globe-rs", "globe-rs").map(|dirs| dirs.config_dir().join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_defaults() {
        assert_eq!(GlobeSettings::from_json("{}").unwrap(), GlobeSettings::default());
    }

    #[test]
    fn partial_settings() {
        let settings = GlobeSettings::from_json(
            r##"{
                "radius": 5,
                "datasets": [
                    { "source": "https://example.org/rivers.json", "material": { "color": "#0000ff", "dashed": false } }
                ],
                "camera": { "max_distance": 40 }
            }"##,
        )
        .unwrap();
        assert_eq!(settings.radius, 5.0);
        assert_eq!(settings.datasets.len(), 1);
        assert!(!settings.datasets[0].material.dashed);
        assert_eq!(settings.datasets[0].material.line_width, 1.0);
        assert_eq!(settings.camera.max_distance, 40.0);
        assert_eq!(settings.camera.min_distance, 3.0);
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(matches!(
            GlobeSettings::from_json(r#"{ "radius": 0 }"#),
            Err(GlobeError::Settings(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(GlobeSettings::load(Some(Path::new("/no/such/settings.json"))).is_err());
    }

    #[test]
    fn defaults_describe_stock_scene() {
        let settings = GlobeSettings::default();
        assert_eq!(settings.radius, 2.0);
        assert_eq!(settings.datasets.len(), 2);
        assert_eq!(settings.starfield.count, 1000);
        assert_eq!((settings.camera.min_distance, settings.camera.max_distance), (3.0, 20.0));
    }
}
