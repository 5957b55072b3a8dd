//! Per-day compartment size series.
//!
//! Sizes are derived from the previous day plus and minus each rule's
//! transfer set, never recounted from membership flags.  Comparing a series
//! against [`CompartmentRegistry::counts`][epi_model::CompartmentRegistry::counts]
//! therefore checks the engine's bookkeeping independently.

use epi_core::{Day, EpiError, EpiResult};

#[derive(Clone, Debug, PartialEq)]
pub struct CompartmentSeries {
    labels: Vec<String>,
    /// `[compartment][day]`.
    sizes:  Vec<Vec<usize>>,
}

impl CompartmentSeries {
    /// Series starting from the day-0 sizes.
    pub fn new(labels: Vec<String>, initial: &[usize], horizon: Day) -> Self {
        let sizes = initial
            .iter()
            .map(|&n| {
                let mut v = Vec::with_capacity(horizon.index() + 1);
                v.push(n);
                v
            })
            .collect();
        Self { labels, sizes }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of recorded days, including day 0.
    pub fn days(&self) -> usize {
        self.sizes.first().map_or(0, Vec::len)
    }

    /// The last recorded day.
    pub fn last_day(&self) -> Day {
        Day(self.days().saturating_sub(1) as u32)
    }

    /// Sizes on the last recorded day, in declaration order.
    pub fn latest(&self) -> Vec<usize> {
        self.sizes.iter().map(|s| s.last().copied().unwrap_or(0)).collect()
    }

    /// Append one day of sizes in declaration order.
    pub fn push_day(&mut self, sizes: &[usize]) {
        debug_assert_eq!(sizes.len(), self.sizes.len());
        for (series, &n) in self.sizes.iter_mut().zip(sizes) {
            series.push(n);
        }
    }

    /// Series for `label`, day 0 first.
    pub fn get(&self, label: &str) -> Option<&[usize]> {
        self.labels.iter().position(|l| l == label).map(|i| self.sizes[i].as_slice())
    }

    /// Sizes of every compartment on `day`.
    pub fn on_day(&self, day: Day) -> EpiResult<Vec<usize>> {
        if day.index() >= self.days() {
            return Err(EpiError::DayOutOfRange { day, horizon: self.last_day() });
        }
        Ok(self.sizes.iter().map(|s| s[day.index()]).collect())
    }

    /// Day-wise sum over several compartments, e.g. `["I", "L"]` for total
    /// infectious in ICU-V.
    pub fn combined(&self, labels: &[&str]) -> EpiResult<Vec<usize>> {
        let mut total = vec![0usize; self.days()];
        for &label in labels {
            let series = self
                .get(label)
                .ok_or_else(|| EpiError::Config(format!("unknown compartment label {label:?}")))?;
            for (t, &n) in total.iter_mut().zip(series) {
                *t += n;
            }
        }
        Ok(total)
    }

    /// Sum of all compartments on `day`.
    pub fn total_on(&self, day: Day) -> EpiResult<usize> {
        Ok(self.on_day(day)?.iter().sum())
    }
}
