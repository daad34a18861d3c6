use bevy::prelude::*;
use geojson::{GeoJson, Geometry, Position, Value};
use rand::Rng;

use crate::{
    error::{GlobeError, GlobeResult},
    types::{DrawOptions, GeoContainer, LineStrip, LonLat, PointPrimitive, Primitive},
};

use super::{flatten, interpolate, kind_name};

/// Hue band for outlines, as fractions of the color wheel (green to cyan).
pub const LINE_HUE_MIN: f32 = 0.33;
pub const LINE_HUE_SPAN: f32 = 0.2;
/// Upper bound (exclusive) of the per-line dash offset rate, per millisecond.
pub const MAX_DASH_RATE: f64 = 0.0002;

/// Converts a GeoJSON document into sphere-space primitives grouped under one container.
///
/// Any unsupported document or geometry type aborts the whole conversion.
pub fn draw_three_geo(document: GeoJson, options: &DrawOptions) -> GlobeResult<GeoContainer> {
    draw_three_geo_with_rng(document, options, &mut rand::thread_rng())
}

pub fn draw_three_geo_with_rng<R: Rng + ?Sized>(
    document: GeoJson,
    options: &DrawOptions,
    rng: &mut R,
) -> GlobeResult<GeoContainer> {
    let mut container = GeoContainer::new();

    for geometry in flatten(document)? {
        for primitive in emit_geometry(&geometry, options, rng)? {
            container.add(primitive);
        }
    }

    Ok(container)
}

/// Primitives for a single geometry, in coordinate order.
pub fn emit_geometry<R: Rng + ?Sized>(
    geometry: &Geometry,
    options: &DrawOptions,
    rng: &mut R,
) -> GlobeResult<Vec<Primitive>> {
    let radius = options.radius;
    let primitives = match &geometry.value {
        Value::Point(position) => vec![point(position, options)],
        Value::MultiPoint(positions) => positions.iter().map(|p| point(p, options)).collect(),
        Value::LineString(line) => vec![line_strip(line, options, rng)],
        Value::Polygon(rings) | Value::MultiLineString(rings) => rings
            .iter()
            .map(|ring| line_strip(ring, options, rng))
            .collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .map(|ring| line_strip(ring, options, rng))
            .collect(),
        other => return Err(GlobeError::InvalidGeometryType(kind_name(other).to_string())),
    };
    debug!(
        "{} at radius {radius} -> {} primitives",
        kind_name(&geometry.value),
        primitives.len()
    );
    Ok(primitives)
}

/// Sphere-space vertices of one line or ring, densified so it follows the surface.
pub fn sphere_points(positions: &[Position], radius: f64) -> Vec<Vec3> {
    let coordinates: Vec<LonLat> = positions.iter().map(|p| LonLat::from_position(p)).collect();
    interpolate(&coordinates)
        .iter()
        .map(|c| c.to_sphere(radius).as_vec3())
        .collect()
}

fn point(position: &Position, options: &DrawOptions) -> Primitive {
    Primitive::Point(PointPrimitive {
        position: LonLat::from_position(position)
            .to_sphere(options.radius)
            .as_vec3(),
        color: options.material.color(),
        size: options.material.point_size,
    })
}

fn line_strip<R: Rng + ?Sized>(positions: &[Position], options: &DrawOptions, rng: &mut R) -> Primitive {
    let hue = LINE_HUE_MIN + rng.r#gen::<f32>() * LINE_HUE_SPAN;
    let rate = rng.r#gen::<f64>() * MAX_DASH_RATE;

    Primitive::Line(LineStrip::new(
        sphere_points(positions, options.radius),
        Color::hsl(hue * 360.0, 1.0, 0.5),
        options.material.line_width,
        rate,
    ))
}
