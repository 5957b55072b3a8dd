//! Per-agent motion state.

use epi_core::Position;

/// Mutable motion state for a single agent.
///
/// Only [`PeriodicOrbit`][crate::PeriodicOrbit] uses it: `heading` is the
/// current orbit angle and `orbit_center` is fixed at creation.  Static and
/// random-walk agents keep the default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionState {
    /// Current angle in radians.  Drifts without reset.
    pub heading: f64,

    /// Orbit center, `initial_position − R·(cos θ0, sin θ0)`.
    pub orbit_center: Position,
}

impl MotionState {
    /// State for an orbit that passes through `position` at angle `heading`.
    #[inline]
    pub fn orbit_through(position: Position, radius: f64, heading: f64) -> Self {
        Self {
            heading,
            orbit_center: Position::new(
                position.x - radius * heading.cos(),
                position.y - radius * heading.sin(),
            ),
        }
    }

    /// Point on the orbit at the current heading, before clamping.
    #[inline]
    pub fn orbit_point(&self, radius: f64) -> Position {
        self.orbit_center.offset_polar(radius, self.heading)
    }
}
