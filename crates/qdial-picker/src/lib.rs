#![forbid(unsafe_code)]

//! Picker: interaction state machine and value reconciliation.
//!
//! # Role in QDial
//! `qdial-picker` is the controller layer. [`ValuePicker`] owns the
//! committed value and the active [`InteractionMode`], consumes raw
//! pointer events, double-taps, keyboard text, and pill activations,
//! and produces [`PickerNotification`]s plus the `(value, mode)` pair
//! the host renders.
//!
//! # Primary responsibilities
//! - **Mode dispatch**: `Idle` / `PendingLongPress` / `ScrollActive` /
//!   `KeyboardActive`, every transition passing through `Idle`.
//! - **Value reconciliation**: continuous drag distance, discrete
//!   track settling, keyboard text, and pill deltas all converge on
//!   one committed value with single-writer ownership.
//! - **Timers**: the long-press and dismiss-grace deadlines, polled
//!   with an explicit `now` and guarded against stale firing.
//!
//! # How it fits in the system
//! The host delivers events serially and calls
//! [`ValuePicker::poll`] on its tick. Track state for rendering
//! (items, magnification weights) is read through
//! [`ValuePicker::track`]; the controller is the only writer of the
//! value and the mode.

pub mod event;
pub mod format;
pub mod int;
pub mod picker;

pub use event::{PickerNotification, PillDirection, PointerPoint};
pub use format::{DecimalFormat, ValueFormat};
pub use int::IntValuePicker;
pub use picker::{InteractionMode, PickerConfig, ValuePicker};

pub use qdial_core::{BoundedValue, ConfigError, QuantizedScrollTrack};
