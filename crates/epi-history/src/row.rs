//! Plain data row types written by output backends.

/// One transmission edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmissionRow {
    pub day:      u32,
    pub infector: u32,
    pub infectee: u32,
}

/// One state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChangeRow {
    pub agent_id:    u32,
    pub day:         u32,
    pub compartment: String,
}

/// One agent's position on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRow {
    pub day:      u32,
    pub agent_id: u32,
    pub x:        f64,
    pub y:        f64,
}
