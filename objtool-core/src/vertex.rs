//! Vertex types and proximity comparison

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// Per-axis tolerance under which two coordinates are the same (DAZ Studio precision)
pub const EPSILON: f64 = 1e-3;

/// Check if two coordinates are within [`EPSILON`] of each other
#[inline]
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Parsed position of a `v` record together with the text it was parsed from.
///
/// The text is what gets written back on save, so an untouched vertex is
/// reproduced byte for byte whatever the float formatting would have been.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    position: Point3d,
    text: String,
}

impl Coordinates {
    /// Parse the content of a `v` line.
    ///
    /// The first three whitespace separated fields must be numbers; anything
    /// after them (vertex colors, weights) is ignored but kept in the text.
    pub fn parse(text: &str) -> Option<Self> {
        let mut fields = text.split_whitespace().map(str::parse::<f64>);
        let x = fields.next()?.ok()?;
        let y = fields.next()?.ok()?;
        let z = fields.next()?.ok()?;

        Some(Self {
            position: Point3d::new(x, y, z),
            text: text.to_string(),
        })
    }

    /// Create coordinates for a vertex that has no source line
    pub fn from_position(position: Point3d) -> Self {
        Self {
            text: format!("{} {} {}", position.x, position.y, position.z),
            position,
        }
    }

    pub fn position(&self) -> &Point3d {
        &self.position
    }

    /// Text written after `v ` when saving
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Per-axis comparison, not a Euclidean distance
    pub fn is_close(&self, other: &Coordinates) -> bool {
        self.position
            .iter()
            .zip(other.position.iter())
            .all(|(a, b)| is_close(*a, *b))
    }
}

/// A mesh vertex with the object it was declared under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub coordinates: Coordinates,
    /// Name of the last `o` record before this vertex, empty if none
    pub object: String,
}

impl Vertex {
    pub fn new(coordinates: Coordinates, object: impl Into<String>) -> Self {
        Self {
            coordinates,
            object: object.into(),
        }
    }

    /// Create a vertex at a position, outside of any object
    pub fn from_position(position: Point3d) -> Self {
        Self::new(Coordinates::from_position(position), String::new())
    }

    pub fn position(&self) -> &Point3d {
        self.coordinates.position()
    }

    pub fn is_close(&self, other: &Vertex) -> bool {
        self.coordinates.is_close(&other.coordinates)
    }
}
