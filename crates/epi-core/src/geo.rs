//! Planar coordinate type and plane utilities.
//!
//! Agents live on a square plane `[0, plane_size] × [0, plane_size]`.
//! Coordinates are `f64`: the kernel compares distances against radii that
//! may be tiny, and the pairwise pass is dominated by the RNG, not by
//! coordinate arithmetic.

/// A point on the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Displace by `length` along `heading` (radians, counter-clockwise from +x).
    #[inline]
    pub fn offset_polar(self, length: f64, heading: f64) -> Position {
        Position {
            x: self.x + length * heading.cos(),
            y: self.y + length * heading.sin(),
        }
    }

    /// Clamp each axis independently to `[0, plane_size]`.
    ///
    /// Out-of-range coordinates land exactly on the boundary; nothing wraps
    /// or reflects.
    #[inline]
    pub fn clamp_to_plane(self, plane_size: f64) -> Position {
        Position {
            x: clamp_axis(self.x, plane_size),
            y: clamp_axis(self.y, plane_size),
        }
    }

    /// `true` if both coordinates are inside `[0, plane_size]`.
    #[inline]
    pub fn within_plane(self, plane_size: f64) -> bool {
        (0.0..=plane_size).contains(&self.x) && (0.0..=plane_size).contains(&self.y)
    }

    /// `[x, y]` array form, the point type used by the R-tree contact index.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

#[inline]
fn clamp_axis(v: f64, plane_size: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > plane_size {
        plane_size
    } else {
        v
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
