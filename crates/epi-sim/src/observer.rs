//! Simulation observer trait for progress reporting and data collection.

use epi_core::Day;

use crate::CompartmentSeries;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at day boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u32 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_day_end(&mut self, day: Day, counts: &[usize]) {
///         if day.0 % self.interval == 0 {
///             println!("{day}: {counts:?}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the pairwise pass of `day`.
    fn on_day_start(&mut self, _day: Day) {}

    /// Called after aggregation.  `counts` holds the day's compartment sizes
    /// in declaration order.
    fn on_day_end(&mut self, _day: Day, _counts: &[usize]) {}

    /// Called once after the final day completes.
    fn on_sim_end(&mut self, _final_day: Day, _series: &CompartmentSeries) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
