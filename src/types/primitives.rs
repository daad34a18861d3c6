use bevy::prelude::*;

/// Anything that moves with the frame clock. `elapsed` is in milliseconds.
pub trait AnimatablePrimitive {
    fn advance(&mut self, elapsed: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointPrimitive {
    pub position: Vec3,
    pub color: Color,
    pub size: f32,
}

impl AnimatablePrimitive for PointPrimitive {
    fn advance(&mut self, _elapsed: f64) {}
}

/// An ordered run of sphere points drawn as connected segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    pub points: Vec<Vec3>,
    pub color: Color,
    pub width: f32,
    /// Dash offset gained per elapsed millisecond.
    pub rate: f64,
    pub dash_offset: f64,
}

impl LineStrip {
    pub fn new(points: Vec<Vec3>, color: Color, width: f32, rate: f64) -> Self {
        Self {
            points,
            color,
            width,
            rate,
            dash_offset: 0.0,
        }
    }
}

impl AnimatablePrimitive for LineStrip {
    fn advance(&mut self, elapsed: f64) {
        self.dash_offset = elapsed * self.rate;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Point(PointPrimitive),
    Line(LineStrip),
}

impl AnimatablePrimitive for Primitive {
    fn advance(&mut self, elapsed: f64) {
        match self {
            Primitive::Point(point) => point.advance(elapsed),
            Primitive::Line(line) => line.advance(elapsed),
        }
    }
}

/// Everything one dataset produced, plus the orientation fix for the whole group.
#[derive(Component, Debug, Clone)]
pub struct GeoContainer {
    primitives: Vec<Primitive>,
    rotation: Quat,
}

impl Default for GeoContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoContainer {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        }
    }

    pub fn add(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn transform(&self) -> Transform {
        Transform::from_rotation(self.rotation)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineStrip> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            Primitive::Point(_) => None,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = &PointPrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Point(point) => Some(point),
            Primitive::Line(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl AnimatablePrimitive for GeoContainer {
    fn advance(&mut self, elapsed: f64) {
        for primitive in &mut self.primitives {
            primitive.advance(elapsed);
        }
    }
}
