#![forbid(unsafe_code)]

//! Quantized scroll track: a discrete item strip with nearest-item
//! settling and per-item magnification weights.
//!
//! [`QuantizedScrollTrack`] owns the ordered candidate values generated
//! from bounds/step and translates a continuous scroll offset into a
//! settled index. It is deliberately renderer-agnostic: the host reads
//! [`magnification_weight`](QuantizedScrollTrack::magnification_weight)
//! per item and draws whatever that implies.
//!
//! # Invariants
//! 1. `items` is strictly ascending with no duplicates; its first
//!    element equals the lower bound and its last is `<= upper` and
//!    within one step of it.
//! 2. `settled_index`, when set, is always a valid index.
//! 3. [`align_to_value`](QuantizedScrollTrack::align_to_value) is
//!    idempotent and never reports a settle change; only
//!    [`update_offset`](QuantizedScrollTrack::update_offset) does.
//!
//! # Failure Modes
//! - Invalid bounds/step/pitch fail construction with [`ConfigError`];
//!   there is no way to observe an empty item sequence.

use crate::error::ConfigError;
use crate::value::BOUNDARY_TOLERANCE;

/// Default magnification radius, in multiples of the item pitch.
const DEFAULT_MAGNIFY_RADIUS_ITEMS: f32 = 2.5;

/// A discrete, evenly-stepped item strip with a focal scroll offset.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedScrollTrack {
    items: Vec<f64>,
    lower: f64,
    step: f64,
    item_pitch: f32,
    magnify_radius: f32,
    settled_index: Option<usize>,
    focal_offset: f32,
}

impl QuantizedScrollTrack {
    /// Build a track from bounds, step, and item pitch (the spacing of
    /// adjacent items in the host's scroll unit).
    ///
    /// Items run `lower, lower + step, …`, including `upper` when it
    /// lands on a step boundary within floating tolerance. Even
    /// `lower == upper` yields one item.
    pub fn new(lower: f64, upper: f64, step: f64, item_pitch: f32) -> Result<Self, ConfigError> {
        if !(item_pitch > 0.0) || !item_pitch.is_finite() {
            return Err(ConfigError::InvalidPitch { pitch: item_pitch });
        }
        let items = build_items(lower, upper, step)?;
        Ok(Self {
            items,
            lower,
            step,
            item_pitch,
            magnify_radius: item_pitch * DEFAULT_MAGNIFY_RADIUS_ITEMS,
            settled_index: None,
            focal_offset: 0.0,
        })
    }

    /// Set the magnification radius (builder). Non-positive or
    /// non-finite radii are ignored.
    #[must_use]
    pub fn with_magnify_radius(mut self, radius: f32) -> Self {
        if radius > 0.0 && radius.is_finite() {
            self.magnify_radius = radius;
        }
        self
    }

    /// The candidate values, ascending.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[f64] {
        &self.items
    }

    /// Number of items (always at least 1).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The settled item index, if the track has settled at least once.
    #[inline]
    #[must_use]
    pub fn settled_index(&self) -> Option<usize> {
        self.settled_index
    }

    /// The value of the settled item, if any.
    #[must_use]
    pub fn settled_value(&self) -> Option<f64> {
        self.settled_index.map(|i| self.items[i])
    }

    /// Current focal scroll offset.
    #[inline]
    #[must_use]
    pub fn focal_offset(&self) -> f32 {
        self.focal_offset
    }

    /// Spacing between adjacent item centers.
    #[inline]
    #[must_use]
    pub fn item_pitch(&self) -> f32 {
        self.item_pitch
    }

    /// The continuous offset at which `value` would sit centered.
    /// The inverse of the offset → value mapping; values outside the
    /// item range map to the track edges.
    #[must_use]
    pub fn offset_for_value(&self, value: f64) -> f32 {
        let steps = (value - self.lower) / self.step;
        let max = (self.items.len() - 1) as f64;
        (steps.clamp(0.0, max) as f32) * self.item_pitch
    }

    /// Record a new scroll offset and settle on the nearest item.
    ///
    /// Returns whether the settled index changed. Redundant offsets
    /// (same nearest item) update the focal offset but report no
    /// change, so callers can notify without deduplicating.
    pub fn update_offset(&mut self, new_offset: f32) -> bool {
        self.focal_offset = new_offset;
        let nearest = self.nearest_index_for_offset(new_offset);
        if self.settled_index == Some(nearest) {
            return false;
        }
        self.settled_index = Some(nearest);
        #[cfg(feature = "tracing")]
        tracing::trace!(index = nearest, offset = new_offset, "track settled");
        true
    }

    /// Visual emphasis for one item: 1.0 when its center sits at the
    /// focal offset, decaying linearly to 0.0 at the magnify radius.
    #[must_use]
    pub fn magnification_weight(&self, index: usize) -> f32 {
        let center = index as f32 * self.item_pitch;
        let distance = (center - self.focal_offset).abs();
        (1.0 - distance / self.magnify_radius).max(0.0)
    }

    /// Align the track to an externally assigned value: settle on the
    /// matching (or nearest) item and move the focal offset to its
    /// center. Emits nothing — programmatic realignment must stay
    /// distinguishable from user-driven settling.
    pub fn align_to_value(&mut self, value: f64) {
        let index = self.nearest_index_for_value(value);
        self.settled_index = Some(index);
        self.focal_offset = index as f32 * self.item_pitch;
    }

    /// Recompute items for new bounds/step, keeping pitch and radius.
    /// A previously settled track realigns to the nearest surviving
    /// value; an unsettled track stays unsettled.
    pub fn rebuild(&mut self, lower: f64, upper: f64, step: f64) -> Result<(), ConfigError> {
        let items = build_items(lower, upper, step)?;
        let previous = self.settled_value();
        self.items = items;
        self.lower = lower;
        self.step = step;
        match previous {
            Some(value) => self.align_to_value(value),
            None => {
                self.settled_index = None;
                self.focal_offset = 0.0;
            }
        }
        Ok(())
    }

    fn nearest_index_for_offset(&self, offset: f32) -> usize {
        let raw = (offset / self.item_pitch).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.items.len() - 1)
        }
    }

    fn nearest_index_for_value(&self, value: f64) -> usize {
        let raw = ((value - self.lower) / self.step).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.items.len() - 1)
        }
    }
}

/// Generate `lower, lower + step, …`, including `upper` when it lands
/// on a step boundary within floating tolerance.
fn build_items(lower: f64, upper: f64, step: f64) -> Result<Vec<f64>, ConfigError> {
    if !(step > 0.0) || !step.is_finite() {
        return Err(ConfigError::NonPositiveStep { step });
    }
    if !(lower <= upper) || !lower.is_finite() || !upper.is_finite() {
        return Err(ConfigError::InvertedBounds { lower, upper });
    }
    let span = upper - lower;
    // Nearest boundary catches exact-fit spans that drifted a hair
    // below a whole step count; genuine overshoot steps back down.
    let mut count = (span / step).round() as i64;
    if lower + count as f64 * step - upper > step * BOUNDARY_TOLERANCE {
        count -= 1;
    }
    let count = count.max(0) as usize;
    Ok((0..=count).map(|i| lower + i as f64 * step).collect())
}
