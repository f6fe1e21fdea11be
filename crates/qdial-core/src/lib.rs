#![forbid(unsafe_code)]

//! Core: bounded quantized value model and discrete scroll track.
//!
//! # Role in QDial
//! `qdial-core` is the foundation layer. It owns the numeric model (a
//! bounded real number stepped from its lower bound) and the quantized
//! scroll track (a discrete item strip with nearest-item settling and
//! per-item magnification weights).
//!
//! # Primary responsibilities
//! - **BoundedValue**: clamping and step quantization with two commit
//!   paths (quantized vs. clamped-only).
//! - **QuantizedScrollTrack**: item generation from bounds/step,
//!   offset → settled-index snapping, programmatic realignment.
//! - **ConfigError**: construction-time validation failures.
//!
//! # How it fits in the system
//! The controller crate (`qdial-picker`) consumes these types through
//! their public interface only. This crate knows nothing about input
//! events, modes, or timers, so the track can be reused by any host
//! that needs a quantized strip.

pub mod error;
pub mod track;
pub mod value;

pub use error::ConfigError;
pub use track::QuantizedScrollTrack;
pub use value::BoundedValue;
