#![forbid(unsafe_code)]

//! Construction-time configuration errors.
//!
//! These are fatal at construction: a picker or track built from an
//! invalid bounds/step/pitch combination cannot produce a meaningful
//! item sequence. Runtime input problems (unparsable keyboard text,
//! events arriving in the wrong mode, stale timers) are never errors;
//! they are recovered locally as no-ops by the controller.

/// Errors raised when validating bounds, step, or track geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `step` must be strictly positive and finite.
    NonPositiveStep { step: f64 },
    /// `lower` must not exceed `upper` (both finite).
    InvertedBounds { lower: f64, upper: f64 },
    /// Item pitch must be strictly positive and finite.
    InvalidPitch { pitch: f32 },
    /// Drag reference width must be strictly positive and finite.
    InvalidReferenceWidth { width: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveStep { step } => {
                write!(f, "step must be > 0, got {step}")
            }
            Self::InvertedBounds { lower, upper } => {
                write!(f, "lower bound {lower} exceeds upper bound {upper}")
            }
            Self::InvalidPitch { pitch } => {
                write!(f, "item pitch must be > 0 and finite, got {pitch}")
            }
            Self::InvalidReferenceWidth { width } => {
                write!(f, "reference width must be > 0 and finite, got {width}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
