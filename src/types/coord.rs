use bevy::math::DVec3;
use serde::{Deserialize, Serialize};
use std::{
    f64::consts::PI,
    ops::{Add, Sub},
};

/// A longitude/latitude pair in degrees, in GeoJSON axis order.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Copy)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Reads a GeoJSON position. Missing axes read as NaN and are carried through unchecked.
    pub fn from_position(position: &[f64]) -> Self {
        Self {
            lon: position.first().copied().unwrap_or(f64::NAN),
            lat: position.get(1).copied().unwrap_or(f64::NAN),
        }
    }

    pub fn to_tuple(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }

    /// Arithmetic midpoint in degree space, not the great-circle midpoint.
    pub fn midpoint(&self, other: &LonLat) -> LonLat {
        LonLat {
            lon: (self.lon + other.lon) / 2.0,
            lat: (self.lat + other.lat) / 2.0,
        }
    }

    /// True when the two points are more than `threshold` degrees apart on either axis.
    pub fn exceeds_gap(&self, other: &LonLat, threshold: f64) -> bool {
        let delta = *self - *other;
        delta.lon.abs() > threshold || delta.lat.abs() > threshold
    }

    /// Position on a sphere of `radius` around the origin.
    ///
    /// Latitude runs along +z here. The drawn container is rotated -90° about x
    /// so that +z ends up on the engine's +y, which puts the north pole on top.
    /// Changing this mapping without the rotation (or vice versa) flips the globe.
    pub fn to_sphere(&self, radius: f64) -> DVec3 {
        let lon = self.lon * PI / 180.0;
        let lat = self.lat * PI / 180.0;

        DVec3::new(
            lat.cos() * lon.cos() * radius,
            lat.cos() * lon.sin() * radius,
            lat.sin() * radius,
        )
    }
}

impl Add for LonLat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        LonLat {
            lon: self.lon + rhs.lon,
            lat: self.lat + rhs.lat,
        }
    }
}

impl Sub for LonLat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        LonLat {
            lon: self.lon - rhs.lon,
            lat: self.lat - rhs.lat,
        }
    }
}
