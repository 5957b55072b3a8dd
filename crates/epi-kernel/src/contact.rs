//! R-tree index over the start-of-day susceptibles.
//!
//! The pairwise pass asks, per infector, for every susceptible inside the
//! kernel's reach.  Susceptibles outside it would get probability 0 and no
//! draw, so restricting candidates changes nothing but the cost.
//!
//! Results come back in ascending `AgentId` order so the caller keeps the
//! susceptible-minor iteration order of a full scan.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use epi_core::{AgentId, Position};

/// Relative slack on the squared query radius.  The R-tree and
/// `Position::distance` round differently; extra candidates at the rim
/// evaluate to 0 and cost no randomness.
const QUERY_SLACK: f64 = 1e-9;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct ContactEntry {
    point: [f64; 2],
    id:    AgentId,
}

impl RTreeObject for ContactEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ContactEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ContactIndex ──────────────────────────────────────────────────────────────

/// Immutable spatial index, rebuilt once per day.
pub struct ContactIndex {
    tree: RTree<ContactEntry>,
}

impl ContactIndex {
    /// Bulk-load an index over `(id, position)` pairs.
    pub fn build(agents: impl IntoIterator<Item = (AgentId, Position)>) -> Self {
        let entries: Vec<ContactEntry> = agents
            .into_iter()
            .map(|(id, pos)| ContactEntry { point: pos.to_array(), id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Ids within `radius` of `center`, ascending.
    ///
    /// A negative or non-finite radius matches nothing.
    pub fn within(&self, center: Position, radius: f64) -> Vec<AgentId> {
        if !(radius >= 0.0) || !radius.is_finite() {
            return Vec::new();
        }
        let r2 = radius * radius * (1.0 + QUERY_SLACK);
        let mut ids: Vec<AgentId> = self
            .tree
            .locate_within_distance(center.to_array(), r2)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
