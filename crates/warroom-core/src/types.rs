//! Fundamental geographic and simulation types.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Geographic position: latitude and longitude in degrees, altitude in meters.
///
/// On the wire a position is a plain `[lat, lon, alt]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl GeoPosition {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    /// Horizontal (lat, lon) component.
    pub fn horizontal(&self) -> DVec2 {
        DVec2::new(self.lat, self.lon)
    }

    /// Horizontal displacement from `self` to `other`, in degrees (dLat, dLon).
    pub fn horizontal_delta_to(&self, other: &GeoPosition) -> DVec2 {
        other.horizontal() - self.horizontal()
    }

    /// Position shifted by a (dLat, dLon, dAlt) delta.
    pub fn translated(&self, delta: DVec3) -> Self {
        Self {
            lat: self.lat + delta.x,
            lon: self.lon + delta.y,
            alt: self.alt + delta.z,
        }
    }
}

impl From<[f64; 3]> for GeoPosition {
    fn from([lat, lon, alt]: [f64; 3]) -> Self {
        Self { lat, lon, alt }
    }
}

impl From<GeoPosition> for [f64; 3] {
    fn from(pos: GeoPosition) -> Self {
        [pos.lat, pos.lon, pos.alt]
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
