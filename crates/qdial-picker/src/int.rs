#![forbid(unsafe_code)]

//! Integer convenience adapter.
//!
//! [`IntValuePicker`] wraps [`ValuePicker`] with `step = 1` and an
//! `i64` surface for deployments whose values are whole numbers. The
//! state machine underneath is the real-valued one; this adapter only
//! coerces at the boundary.

use web_time::Instant;

use qdial_core::ConfigError;

use crate::event::{PickerNotification, PillDirection, PointerPoint};
use crate::picker::{InteractionMode, PickerConfig, ValuePicker};

/// A whole-number picker over the real-valued core.
#[derive(Debug)]
pub struct IntValuePicker {
    inner: ValuePicker,
}

impl IntValuePicker {
    /// Create an integer picker with default configuration.
    pub fn new(initial: i64, lower: i64, upper: i64) -> Result<Self, ConfigError> {
        Self::with_config(initial, lower, upper, PickerConfig::default())
    }

    /// Create an integer picker with an explicit configuration.
    pub fn with_config(
        initial: i64,
        lower: i64,
        upper: i64,
        config: PickerConfig,
    ) -> Result<Self, ConfigError> {
        let inner =
            ValuePicker::with_config(initial as f64, lower as f64, upper as f64, 1.0, config)?;
        Ok(Self { inner })
    }

    /// The committed value as a whole number.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.inner.value().round() as i64
    }

    /// The active interaction mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.inner.mode()
    }

    /// The wrapped real-valued picker, for track access and the
    /// keyboard buffer.
    #[inline]
    #[must_use]
    pub fn as_picker(&self) -> &ValuePicker {
        &self.inner
    }

    /// See [`ValuePicker::handle_pointer_down`].
    pub fn handle_pointer_down(
        &mut self,
        pos: PointerPoint,
        now: Instant,
    ) -> Vec<PickerNotification> {
        self.inner.handle_pointer_down(pos, now)
    }

    /// See [`ValuePicker::handle_pointer_move`].
    pub fn handle_pointer_move(
        &mut self,
        pos: PointerPoint,
        now: Instant,
    ) -> Vec<PickerNotification> {
        self.inner.handle_pointer_move(pos, now)
    }

    /// See [`ValuePicker::handle_pointer_up`].
    pub fn handle_pointer_up(&mut self, now: Instant) -> Vec<PickerNotification> {
        self.inner.handle_pointer_up(now)
    }

    /// See [`ValuePicker::poll`].
    pub fn poll(&mut self, now: Instant) -> bool {
        self.inner.poll(now)
    }

    /// See [`ValuePicker::handle_double_tap`].
    pub fn handle_double_tap(&mut self, now: Instant) -> Vec<PickerNotification> {
        self.inner.handle_double_tap(now)
    }

    /// Commit keyboard text; fractional entries round to the nearest
    /// whole number before clamping.
    pub fn handle_keyboard_commit(&mut self, text: &str) -> Vec<PickerNotification> {
        let out = self.inner.handle_keyboard_commit(text);
        if out.is_empty() {
            return out;
        }
        let committed = self.inner.value();
        let rounded = committed.round();
        if rounded == committed {
            out
        } else {
            // Coerce the exact keyboard value onto the integer grid.
            self.inner.set_external_value(rounded)
        }
    }

    /// See [`ValuePicker::handle_keyboard_cancel`].
    pub fn handle_keyboard_cancel(&mut self) -> Vec<PickerNotification> {
        self.inner.handle_keyboard_cancel()
    }

    /// See [`ValuePicker::apply_pill_delta`].
    pub fn apply_pill_delta(
        &mut self,
        amount: i64,
        direction: PillDirection,
    ) -> Vec<PickerNotification> {
        self.inner.apply_pill_delta(amount as f64, direction)
    }

    /// See [`ValuePicker::set_external_value`].
    pub fn set_external_value(&mut self, new_value: i64) -> Vec<PickerNotification> {
        self.inner.set_external_value(new_value as f64)
    }
}
