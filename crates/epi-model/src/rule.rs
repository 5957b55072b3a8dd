//! Transition rules.
//!
//! A rule moves agents from one compartment to another.  Two kinds exist:
//!
//! - **Pairwise**: a susceptible-side source is exposed to every agent of the
//!   listed infectious compartments; each pair's probability comes from the
//!   spatial kernel.
//! - **Bernoulli**: one independent trial per source member at a fixed
//!   probability.
//!
//! # Evaluation order
//!
//! Pairwise rules run first, then Bernoulli rules.  Within each group rules
//! run by ascending `rank`, ties broken by declaration order.  A Bernoulli
//! rule sees its source minus every agent already selected this day, so
//! `source → A` at `p` followed by `source → B` at `q` gives
//! `P(→B) = q · (1 − p)`.

use epi_core::{validate, CompartmentId, Day, EpiError, EpiResult};

/// How a rule's per-agent probability is obtained.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    /// Kernel-derived, against every member of `infectious` (in list order).
    Pairwise { infectious: Vec<CompartmentId> },
    /// Fixed probability per source member.
    Bernoulli { probability: f64 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionRule {
    pub source:      CompartmentId,
    pub destination: CompartmentId,
    pub kind:        RuleKind,
    /// Lower ranks run first within their group.
    pub rank:        u32,
    /// The rule is inert while `day <= delay`.
    pub activation_delay: Option<u32>,
}

impl TransitionRule {
    pub fn pairwise(source: CompartmentId, destination: CompartmentId, infectious: Vec<CompartmentId>, rank: u32) -> Self {
        Self {
            source,
            destination,
            kind: RuleKind::Pairwise { infectious },
            rank,
            activation_delay: None,
        }
    }

    pub fn bernoulli(source: CompartmentId, destination: CompartmentId, probability: f64, rank: u32) -> Self {
        Self {
            source,
            destination,
            kind: RuleKind::Bernoulli { probability },
            rank,
            activation_delay: None,
        }
    }

    pub fn with_delay(mut self, days: u32) -> Self {
        self.activation_delay = Some(days);
        self
    }

    #[inline]
    pub fn is_pairwise(&self) -> bool {
        matches!(self.kind, RuleKind::Pairwise { .. })
    }

    /// `true` if the rule fires on `day`.
    #[inline]
    pub fn is_active(&self, day: Day) -> bool {
        self.activation_delay.is_none_or(|delay| day.0 > delay)
    }

    /// Structural and numeric checks against a variant with
    /// `compartment_count` compartments.
    pub fn validate(&self, compartment_count: usize) -> EpiResult<()> {
        let in_range = |c: CompartmentId| c.index() < compartment_count;
        if !in_range(self.source) || !in_range(self.destination) {
            return Err(EpiError::Config(format!(
                "rule {} -> {} refers to a compartment outside 0..{compartment_count}",
                self.source.0, self.destination.0
            )));
        }
        if self.source == self.destination {
            return Err(EpiError::Config(format!(
                "rule source and destination are both compartment {}",
                self.source.0
            )));
        }
        match &self.kind {
            RuleKind::Bernoulli { probability } => validate::probability("rule probability", *probability),
            RuleKind::Pairwise { infectious } => {
                if infectious.is_empty() {
                    return Err(EpiError::Config("pairwise rule lists no infectious compartments".into()));
                }
                if let Some(bad) = infectious.iter().find(|&&c| !in_range(c)) {
                    return Err(EpiError::Config(format!("infectious compartment {} does not exist", bad.0)));
                }
                if infectious.contains(&self.source) {
                    return Err(EpiError::Config(format!(
                        "pairwise source compartment {} is also listed as infectious",
                        self.source.0
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Indices into `rules` in evaluation order.
pub fn evaluation_order(rules: &[TransitionRule]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    // Stable: equal keys keep declaration order.
    order.sort_by_key(|&i| (!rules[i].is_pairwise(), rules[i].rank));
    order
}
