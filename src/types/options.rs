use bevy::color::{Color, Srgba};
use serde::{Deserialize, Serialize};

/// Style forwarded to the point and line primitives.
///
/// Colors are written as CSS hex strings (`"#80ff80"`) in settings files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialOptions {
    pub color: String,
    pub point_size: f32,
    pub line_width: f32,
    pub dashed: bool,
    pub dash_size: f32,
    pub gap_size: f32,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        MaterialOptions {
            color: "#80ff80".to_string(),
            point_size: 0.02,
            line_width: 1.0,
            dashed: true,
            dash_size: 0.06,
            gap_size: 0.03,
        }
    }
}

impl MaterialOptions {
    /// Parsed `color`, falling back to the default green on a bad hex string.
    pub fn color(&self) -> Color {
        Srgba::hex(&self.color)
            .map(Color::from)
            .unwrap_or(Color::srgb_u8(0x80, 0xff, 0x80))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    pub radius: f64,
    pub material: MaterialOptions,
}

impl Default for DrawOptions {
    fn default() -> Self {
        DrawOptions {
            radius: 2.0,
            material: MaterialOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_fill_defaults() {
        let options: DrawOptions =
            serde_json::from_str(r##"{ "radius": 3.5, "material": { "color": "#ff0000" } }"##)
                .unwrap();
        assert_eq!(options.radius, 3.5);
        assert_eq!(options.material.color(), Color::srgb_u8(0xff, 0, 0));
        assert!(options.material.dashed);
        assert_eq!(options.material.line_width, 1.0);
    }

    #[test]
    fn bad_color_falls_back() {
        let material = MaterialOptions {
            color: "not a color".to_string(),
            ..Default::default()
        };
        assert_eq!(material.color(), Color::srgb_u8(0x80, 0xff, 0x80));
    }
}
