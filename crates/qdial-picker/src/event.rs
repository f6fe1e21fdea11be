#![forbid(unsafe_code)]

//! Input positions and outbound notifications.
//!
//! [`PickerNotification`] values represent committed outcomes rather
//! than raw input: the controller translates pointer/keyboard/pill
//! events into these, and the host reacts (update labels, fire a
//! haptic pulse) without re-deriving state.
//!
//! # Invariants
//! 1. Every committed change of the value is accompanied by exactly
//!    one `ValueChanged` carrying the new value.
//! 2. `ValueAdded` / `ValueSubtracted` carry the configured pill
//!    amount, not the clamped delta.
//! 3. `HapticPulse` fires once per settle-index change, never for
//!    programmatic realignment.

/// A pointer position in the host's coordinate space.
///
/// Only `x` participates in drag-distance mapping; `y` is carried so
/// hosts can hit-test or hand positions back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPoint {
    pub x: f32,
    pub y: f32,
}

impl PointerPoint {
    /// Create a new pointer position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for PointerPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Direction of a pill activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillDirection {
    Add,
    Subtract,
}

/// Discrete outcomes produced by the controller for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerNotification {
    /// A pill added `amount` (possibly clamped at the bounds).
    ValueAdded { amount: f64 },
    /// A pill subtracted `amount` (possibly clamped at the bounds).
    ValueSubtracted { amount: f64 },
    /// The value was assigned directly (keyboard commit or external
    /// assignment).
    ValueSet { value: f64 },
    /// The committed value changed, by any modality.
    ValueChanged { value: f64 },
    /// Request a tactile pulse; fire-and-forget, host decides how.
    HapticPulse,
}
