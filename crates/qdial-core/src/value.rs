#![forbid(unsafe_code)]

//! Bounded real-number value with step quantization.
//!
//! [`BoundedValue`] holds the committed picker value together with its
//! bounds and step. It offers two commit paths:
//!
//! - [`set_quantized`](BoundedValue::set_quantized): clamp, then round
//!   to the nearest multiple of `step` from the lower bound. Used by
//!   the scrub gesture and programmatic assignment.
//! - [`set_clamped`](BoundedValue::set_clamped): clamp only. Used by
//!   keyboard entry (direct precision is the point of that modality)
//!   and by pill increments (pill amounts are already meaningful).
//!
//! # Invariants
//! 1. `lower <= current <= upper` after every commit.
//! 2. After a quantized commit, `current` is a multiple of `step`
//!    offset from `lower` within floating tolerance.
//! 3. `step > 0` and `lower <= upper`, enforced at construction.

use crate::error::ConfigError;

/// Relative tolerance (in step units) for deciding whether a rounded
/// candidate genuinely overshot the upper bound or merely drifted.
pub(crate) const BOUNDARY_TOLERANCE: f64 = 1e-6;

/// A bounded real number stepped from its lower bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedValue {
    current: f64,
    lower: f64,
    upper: f64,
    step: f64,
}

impl BoundedValue {
    /// Create a value with the given bounds and step.
    ///
    /// The initial value is clamped and quantized. Fails if `step` is
    /// not strictly positive or `lower > upper` (non-finite inputs
    /// fail the same checks).
    pub fn new(initial: f64, lower: f64, upper: f64, step: f64) -> Result<Self, ConfigError> {
        if !(step > 0.0) || !step.is_finite() {
            return Err(ConfigError::NonPositiveStep { step });
        }
        if !(lower <= upper) || !lower.is_finite() || !upper.is_finite() {
            return Err(ConfigError::InvertedBounds { lower, upper });
        }
        let mut value = Self {
            current: lower,
            lower,
            upper,
            step,
        };
        value.set_quantized(initial);
        Ok(value)
    }

    /// The committed value.
    #[inline]
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Lower bound.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Step size.
    #[inline]
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Full range extent (`upper - lower`).
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Clamp a candidate into `[lower, upper]`.
    #[must_use]
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.lower, self.upper)
    }

    /// Clamp, then round to the nearest multiple of `step` from the
    /// lower bound. When rounding overshoots an upper bound that is
    /// not itself step-aligned, the result snaps down to the last
    /// boundary instead of the bound, preserving step alignment.
    #[must_use]
    pub fn quantize(&self, v: f64) -> f64 {
        let clamped = self.clamp(v);
        let steps = ((clamped - self.lower) / self.step).round();
        let mut quantized = self.lower + steps * self.step;
        if quantized - self.upper > self.step * BOUNDARY_TOLERANCE {
            quantized -= self.step;
        }
        self.clamp(quantized)
    }

    /// Commit a candidate through the quantized path. Returns the
    /// committed value.
    pub fn set_quantized(&mut self, v: f64) -> f64 {
        self.current = self.quantize(v);
        self.current
    }

    /// Commit a candidate through the clamp-only path. Returns the
    /// committed value.
    pub fn set_clamped(&mut self, v: f64) -> f64 {
        self.current = self.clamp(v);
        self.current
    }
}
