//! Eager parameter checks shared by every configuration type.
//!
//! Each helper names the offending parameter so the resulting [`EpiError`]
//! says which value broke which constraint.  Nothing is coerced: a bad value
//! is an error, never silently clamped.

use crate::{EpiError, EpiResult};

/// Reject NaN and ±∞.
#[inline]
pub fn finite(name: &'static str, value: f64) -> EpiResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EpiError::NotFinite { name, value })
    }
}

/// Finite and `>= 0`.
#[inline]
pub fn non_negative(name: &'static str, value: f64) -> EpiResult<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(EpiError::Negative { name, value });
    }
    Ok(())
}

/// Finite and inside `[0, 1]`.
#[inline]
pub fn probability(name: &'static str, value: f64) -> EpiResult<()> {
    finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(EpiError::Probability { name, value });
    }
    Ok(())
}
