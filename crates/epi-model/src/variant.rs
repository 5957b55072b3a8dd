//! Model variants: a compartment list plus an ordered rule list.
//!
//! A variant is plain data.  SIR, SEIRSDV and the rest differ only in which
//! compartments and rules they declare; see [`crate::presets`].
//!
//! ```rust
//! use epi_model::ModelVariant;
//!
//! let sir = ModelVariant::builder("SIR")
//!     .compartments(["S", "I", "R"])
//!     .pairwise("S", "I", &["I"], 0)
//!     .bernoulli("I", "R", 0.1, 1)
//!     .build()
//!     .unwrap();
//! assert_eq!(sir.labels().len(), 3);
//! ```

use std::collections::HashSet;

use epi_core::{CompartmentId, EpiError, EpiResult};

use crate::rule::{evaluation_order, RuleKind, TransitionRule};

// ── ModelVariant ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelVariant {
    name:   String,
    labels: Vec<String>,
    rules:  Vec<TransitionRule>,
}

impl ModelVariant {
    pub fn builder(name: impl Into<String>) -> ModelVariantBuilder {
        ModelVariantBuilder {
            name:   name.into(),
            labels: Vec::new(),
            rules:  Vec::new(),
        }
    }

    /// Validate an already-resolved compartment list and rule list.
    pub fn new(name: impl Into<String>, labels: Vec<String>, rules: Vec<TransitionRule>) -> EpiResult<Self> {
        let variant = Self { name: name.into(), labels, rules };
        variant.validate()?;
        Ok(variant)
    }

    pub fn validate(&self) -> EpiResult<()> {
        if self.labels.len() < 2 {
            return Err(EpiError::Config(format!(
                "variant {} needs at least two compartments, has {}",
                self.name,
                self.labels.len()
            )));
        }
        if CompartmentId::try_from(self.labels.len()).is_err() {
            return Err(EpiError::Config(format!("variant {} has too many compartments", self.name)));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.labels.iter().find(|l| !seen.insert(l.as_str())) {
            return Err(EpiError::Config(format!("duplicate compartment label {dup:?}")));
        }
        for rule in &self.rules {
            rule.validate(self.labels.len())?;
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    /// Rules in evaluation order.
    pub fn ordered_rules(&self) -> Vec<TransitionRule> {
        evaluation_order(&self.rules).into_iter().map(|i| self.rules[i].clone()).collect()
    }

    /// Position of `label` in the compartment list.
    pub fn compartment(&self, label: &str) -> Option<CompartmentId> {
        self.labels.iter().position(|l| l == label).map(|i| CompartmentId(i as u16))
    }

    /// `true` if no rule leaves `c`.
    pub fn is_terminal(&self, c: CompartmentId) -> bool {
        !self.rules.iter().any(|r| r.source == c)
    }

    /// Compartments that act as infectors in at least one pairwise rule.
    pub fn infectious_compartments(&self) -> Vec<CompartmentId> {
        let mut out: Vec<CompartmentId> = Vec::new();
        for rule in &self.rules {
            if let RuleKind::Pairwise { infectious } = &rule.kind {
                for &c in infectious {
                    if !out.contains(&c) {
                        out.push(c);
                    }
                }
            }
        }
        out
    }
}

// ── ModelVariantBuilder ───────────────────────────────────────────────────────

enum PendingKind {
    Pairwise(Vec<String>),
    Bernoulli(f64),
}

struct PendingRule {
    source:      String,
    destination: String,
    kind:        PendingKind,
    rank:        u32,
    delay:       Option<u32>,
}

/// Label-keyed builder; labels resolve to ids in [`build`](Self::build).
pub struct ModelVariantBuilder {
    name:   String,
    labels: Vec<String>,
    rules:  Vec<PendingRule>,
}

impl ModelVariantBuilder {
    pub fn compartments<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    pub fn pairwise(mut self, source: &str, destination: &str, infectious: &[&str], rank: u32) -> Self {
        self.rules.push(PendingRule {
            source:      source.into(),
            destination: destination.into(),
            kind:        PendingKind::Pairwise(infectious.iter().map(|&s| s.into()).collect()),
            rank,
            delay:       None,
        });
        self
    }

    pub fn bernoulli(mut self, source: &str, destination: &str, probability: f64, rank: u32) -> Self {
        self.rules.push(PendingRule {
            source:      source.into(),
            destination: destination.into(),
            kind:        PendingKind::Bernoulli(probability),
            rank,
            delay:       None,
        });
        self
    }

    /// A Bernoulli rule that stays inert while `day <= delay`.
    pub fn bernoulli_delayed(self, source: &str, destination: &str, probability: f64, rank: u32, delay: Option<u32>) -> Self {
        let mut b = self.bernoulli(source, destination, probability, rank);
        if let Some(last) = b.rules.last_mut() {
            last.delay = delay;
        }
        b
    }

    pub fn build(self) -> EpiResult<ModelVariant> {
        let lookup = |label: &str| -> EpiResult<CompartmentId> {
            self.labels
                .iter()
                .position(|l| l == label)
                .map(|i| CompartmentId(i as u16))
                .ok_or_else(|| EpiError::Config(format!("unknown compartment label {label:?}")))
        };
        let mut rules = Vec::with_capacity(self.rules.len());
        for p in &self.rules {
            let source = lookup(&p.source)?;
            let destination = lookup(&p.destination)?;
            let mut rule = match &p.kind {
                PendingKind::Pairwise(inf) => {
                    let infectious = inf.iter().map(|l| lookup(l)).collect::<EpiResult<Vec<_>>>()?;
                    TransitionRule::pairwise(source, destination, infectious, p.rank)
                }
                PendingKind::Bernoulli(prob) => TransitionRule::bernoulli(source, destination, *prob, p.rank),
            };
            rule.activation_delay = p.delay;
            rules.push(rule);
        }
        ModelVariant::new(self.name, self.labels, rules)
    }
}
