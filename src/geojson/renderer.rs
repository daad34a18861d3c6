use bevy::{math::Isometry3d, prelude::*};

use crate::types::{AnimatablePrimitive, GeoContainer, LineStrip, MaterialOptions};

/// Gizmo group for dataset outlines, so their width is set apart from the backdrop's.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct OutlineGizmos;

/// Dash pattern a container's outlines are drawn with.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DashStyle {
    pub dashed: bool,
    pub dash_size: f32,
    pub gap_size: f32,
}

impl From<&MaterialOptions> for DashStyle {
    fn from(material: &MaterialOptions) -> Self {
        DashStyle {
            dashed: material.dashed,
            dash_size: material.dash_size,
            gap_size: material.gap_size,
        }
    }
}

/// Per-frame tick: hands elapsed milliseconds to every container, which forwards it to its lines.
pub fn advance_geo_containers(time: Res<Time>, mut containers: Query<&mut GeoContainer>) {
    let elapsed = time.elapsed_secs_f64() * 1000.0;
    for mut container in &mut containers {
        container.advance(elapsed);
    }
}

/// Width the outline gizmos are drawn with: the widest strip wins, since a gizmo group has one width per frame.
pub fn outline_width<'a>(containers: impl IntoIterator<Item = &'a GeoContainer>) -> Option<f32> {
    containers
        .into_iter()
        .flat_map(|container| container.lines())
        .map(|line| line.width)
        .filter(|width| width.is_finite() && *width > 0.0)
        .reduce(f32::max)
}

pub fn apply_outline_width(mut store: ResMut<GizmoConfigStore>, containers: Query<&GeoContainer>) {
    let Some(width) = outline_width(&containers) else {
        return;
    };
    let (config, _) = store.config_mut::<OutlineGizmos>();
    if config.line.width != width {
        debug!("Outline width set to {width}");
        config.line.width = width;
    }
}

pub fn draw_geo_containers(
    mut gizmos: Gizmos<OutlineGizmos>,
    containers: Query<(&GeoContainer, &GlobalTransform, Option<&DashStyle>)>,
) {
    for (container, transform, dash) in &containers {
        let affine = transform.affine();

        for line in container.lines() {
            let points: Vec<Vec3> = line
                .points
                .iter()
                .map(|p| affine.transform_point3(*p))
                .collect();

            match dash {
                Some(style) if style.dashed => {
                    let offset = dash_phase(line, style);
                    for (start, end) in dash_segments(&points, style.dash_size, style.gap_size, offset) {
                        gizmos.line(start, end, line.color);
                    }
                }
                _ => gizmos.linestrip(points, line.color),
            }
        }

        for point in container.points() {
            gizmos.sphere(
                Isometry3d::from_translation(affine.transform_point3(point.position)),
                point.size,
                point.color,
            );
        }
    }
}

// Offsets are unbounded; wrap them into one pattern period before going to f32.
fn dash_phase(line: &LineStrip, style: &DashStyle) -> f32 {
    let period = (style.dash_size + style.gap_size) as f64;
    if period > 0.0 {
        line.dash_offset.rem_euclid(period) as f32
    } else {
        0.0
    }
}

/// Strips that would need more dashes than this are drawn solid instead.
pub const MAX_DASHES_PER_STRIP: f64 = 20_000.0;

/// Splits a polyline into the visible pieces of a dash pattern.
///
/// The pattern starts `offset` units in, so raising the offset makes the dashes
/// march backwards along the line. Pieces never cross a gap.
pub fn dash_segments(points: &[Vec3], dash_size: f32, gap_size: f32, offset: f32) -> Vec<(Vec3, Vec3)> {
    let solid = || points.windows(2).map(|w| (w[0], w[1])).collect();

    let (dash, gap) = (dash_size as f64, gap_size as f64);
    let period = dash + gap;
    if dash <= 0.0 || gap <= 0.0 || !period.is_finite() {
        return solid();
    }

    let total: f64 = points
        .windows(2)
        .map(|w| w[0].as_dvec3().distance(w[1].as_dvec3()))
        .sum();
    if !total.is_finite() || total / period > MAX_DASHES_PER_STRIP {
        return solid();
    }

    let offset = (offset as f64).rem_euclid(period);
    let mut segments = Vec::new();
    // Pattern coordinate of the current segment's start.
    let mut from = offset;

    for pair in points.windows(2) {
        let (start, end) = (pair[0].as_dvec3(), pair[1].as_dvec3());
        let length = start.distance(end);
        if length <= 0.0 {
            continue;
        }
        let direction = (end - start) / length;
        let to = from + length;

        // Dash k covers [k * period, k * period + dash] in pattern coordinates.
        let mut k = (from / period).floor();
        while k * period < to {
            let dash_start = (k * period).max(from);
            let dash_end = (k * period + dash).min(to);
            if dash_end > dash_start {
                segments.push((
                    (start + direction * (dash_start - from)).as_vec3(),
                    (start + direction * (dash_end - from)).as_vec3(),
                ));
            }
            k += 1.0;
        }

        from = to;
    }

    segments
}
