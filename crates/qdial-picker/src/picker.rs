#![forbid(unsafe_code)]

//! The picker controller: mode dispatch, value mutation, timers.
//!
//! [`ValuePicker`] converts raw input events into committed value
//! changes. It is the sole writer of the value and the mode; the
//! scroll track and the host only read them or request changes through
//! the methods here.
//!
//! # State Machine
//!
//! ```text
//! Idle -[pointer down]-> PendingLongPress -[deadline]-> ScrollActive
//! PendingLongPress -[pointer up before deadline]-> Idle        (tap)
//! ScrollActive -[pointer up + grace deadline]-> Idle
//! Idle -[double tap]-> KeyboardActive -[commit | cancel]-> Idle
//! ```
//!
//! No transition skips `Idle`; drag updates while `ScrollActive`
//! never change the mode.
//!
//! # Invariants
//!
//! 1. Exactly one mode is active at a time.
//! 2. The committed value always lies in `[lower, upper]`; outside the
//!    keyboard and pill paths it is step-aligned.
//! 3. Bidirectional track sync uses two one-way channels: settling
//!    flows track → value (with notifications), external alignment
//!    flows value → track (silently). Never a shared mutable cell.
//! 4. A deadline firing after its mode has already changed is
//!    discarded (stale-timer guard).
//!
//! # Failure Modes
//!
//! - Unparsable keyboard text: buffer and mode retained, no mutation.
//! - Pointer events while `KeyboardActive`: ignored (modal
//!   precedence).
//! - Redundant transition requests (double-tap outside `Idle`, pill
//!   outside `Idle`): ignored.

use std::time::Duration;

use web_time::Instant;

use qdial_core::{BoundedValue, ConfigError, QuantizedScrollTrack};

use crate::event::{PickerNotification, PillDirection, PointerPoint};
use crate::format::{DecimalFormat, ValueFormat};

// ---------------------------------------------------------------------------
// Mode and configuration
// ---------------------------------------------------------------------------

/// Exclusive interaction state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// No interaction in progress.
    #[default]
    Idle,
    /// Pointer is down, long-press deadline armed, nothing visible yet.
    PendingLongPress,
    /// The quantized track is visible and receiving drag input.
    ScrollActive,
    /// The raw text buffer is editable.
    KeyboardActive,
}

/// Durations, geometry, and pill amounts for the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    /// Hold duration before a press becomes a scrub (default: 500ms).
    pub long_press_duration: Duration,
    /// Grace delay between pointer-up and dismissal, leaving room for
    /// the final snap animation (default: 300ms).
    pub dismiss_grace: Duration,
    /// Horizontal distance that maps a drag across the full value
    /// range, typically the viewport width (default: 320).
    pub reference_width: f32,
    /// Spacing of adjacent track items in the host's scroll unit
    /// (default: 40).
    pub item_pitch: f32,
    /// Distance at which an item's magnification weight reaches zero
    /// (default: 100).
    pub magnify_radius: f32,
    /// Advisory pill amounts for the host to render. Empty means the
    /// deployment shows no pills.
    pub pill_amounts: Vec<f64>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            long_press_duration: Duration::from_millis(500),
            dismiss_grace: Duration::from_millis(300),
            reference_width: 320.0,
            item_pitch: 40.0,
            magnify_radius: 100.0,
            pill_amounts: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// ValuePicker
// ---------------------------------------------------------------------------

/// Drag-origin snapshot taken at pointer-down.
#[derive(Debug, Clone, Copy)]
struct DragOrigin {
    x: f32,
    value: f64,
}

/// The picker controller.
///
/// All timestamped entry points first deliver any timer deadline that
/// `now` has passed, so a later event always observes the mode
/// produced by every earlier event — including timer firings the host
/// has not polled yet. Call [`poll`](ValuePicker::poll) on the host
/// tick to fire deadlines between input events.
pub struct ValuePicker {
    config: PickerConfig,
    format: Box<dyn ValueFormat>,
    value: BoundedValue,
    track: QuantizedScrollTrack,
    mode: InteractionMode,
    drag_origin: Option<DragOrigin>,
    long_press_deadline: Option<Instant>,
    dismiss_deadline: Option<Instant>,
    buffer: String,
}

impl std::fmt::Debug for ValuePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuePicker")
            .field("value", &self.value.current())
            .field("mode", &self.mode)
            .field("buffer", &self.buffer)
            .finish()
    }
}

impl ValuePicker {
    /// Create a picker with default configuration and format.
    pub fn new(initial: f64, lower: f64, upper: f64, step: f64) -> Result<Self, ConfigError> {
        Self::with_config(initial, lower, upper, step, PickerConfig::default())
    }

    /// Create a picker with an explicit configuration.
    pub fn with_config(
        initial: f64,
        lower: f64,
        upper: f64,
        step: f64,
        config: PickerConfig,
    ) -> Result<Self, ConfigError> {
        if !(config.reference_width > 0.0) || !config.reference_width.is_finite() {
            return Err(ConfigError::InvalidReferenceWidth {
                width: config.reference_width,
            });
        }
        let value = BoundedValue::new(initial, lower, upper, step)?;
        let track = QuantizedScrollTrack::new(lower, upper, step, config.item_pitch)?
            .with_magnify_radius(config.magnify_radius);
        Ok(Self {
            config,
            format: Box::new(DecimalFormat),
            value,
            track,
            mode: InteractionMode::Idle,
            drag_origin: None,
            long_press_deadline: None,
            dismiss_deadline: None,
            buffer: String::new(),
        })
    }

    /// Install a value ↔ text policy (builder).
    #[must_use]
    pub fn with_format(mut self, format: Box<dyn ValueFormat>) -> Self {
        self.format = format;
        self
    }

    // --- Read accessors ---

    /// The committed value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value.current()
    }

    /// The active interaction mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// The `(value, mode)` pair the host renders.
    #[must_use]
    pub fn snapshot(&self) -> (f64, InteractionMode) {
        (self.value.current(), self.mode)
    }

    /// The raw keyboard buffer. Empty outside `KeyboardActive`.
    #[inline]
    #[must_use]
    pub fn buffer_text(&self) -> &str {
        &self.buffer
    }

    /// Track state for rendering (items, magnification weights).
    #[inline]
    #[must_use]
    pub fn track(&self) -> &QuantizedScrollTrack {
        &self.track
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    // --- Timers ---

    /// Fire any timer deadline that `now` has passed. Returns whether
    /// the mode changed.
    ///
    /// Both timers are one-shot: the deadline is cleared before the
    /// mode guard runs, so a deadline whose mode has already moved on
    /// is discarded silently.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(deadline) = self.long_press_deadline
            && now >= deadline
        {
            self.long_press_deadline = None;
            if self.mode == InteractionMode::PendingLongPress {
                self.set_mode(InteractionMode::ScrollActive);
                self.track.align_to_value(self.value.current());
                changed = true;
            }
        }
        if let Some(deadline) = self.dismiss_deadline
            && now >= deadline
        {
            self.dismiss_deadline = None;
            if self.mode == InteractionMode::ScrollActive {
                self.track.align_to_value(self.value.current());
                self.set_mode(InteractionMode::Idle);
                changed = true;
            }
        }
        changed
    }

    // --- Pointer events ---

    /// Pointer contact. From `Idle`: arm the long-press deadline and
    /// snapshot the drag origin. No-op in every other mode.
    pub fn handle_pointer_down(
        &mut self,
        pos: PointerPoint,
        now: Instant,
    ) -> Vec<PickerNotification> {
        self.poll(now);
        if self.mode != InteractionMode::Idle {
            return Vec::new();
        }
        self.long_press_deadline = Some(now + self.config.long_press_duration);
        self.dismiss_deadline = None;
        self.drag_origin = Some(DragOrigin {
            x: pos.x,
            value: self.value.current(),
        });
        self.set_mode(InteractionMode::PendingLongPress);
        Vec::new()
    }

    /// Pointer movement. While `PendingLongPress` the value never
    /// changes (the deadline is still pending); while `ScrollActive`
    /// horizontal displacement since the origin scrubs the value.
    pub fn handle_pointer_move(
        &mut self,
        pos: PointerPoint,
        now: Instant,
    ) -> Vec<PickerNotification> {
        self.poll(now);
        match self.mode {
            InteractionMode::ScrollActive => self.scrub_to(pos.x),
            _ => Vec::new(),
        }
    }

    /// Pointer lift. A lift while `PendingLongPress` is a tap: cancel
    /// the deadline and return to `Idle`. A lift while `ScrollActive`
    /// arms the dismiss-grace deadline; the mode returns to `Idle`
    /// when it fires.
    pub fn handle_pointer_up(&mut self, now: Instant) -> Vec<PickerNotification> {
        self.poll(now);
        match self.mode {
            InteractionMode::PendingLongPress => {
                self.long_press_deadline = None;
                self.drag_origin = None;
                self.set_mode(InteractionMode::Idle);
            }
            InteractionMode::ScrollActive => {
                self.dismiss_deadline = Some(now + self.config.dismiss_grace);
                self.drag_origin = None;
            }
            _ => {}
        }
        Vec::new()
    }

    /// A raw track offset from the host (the user scrolling the
    /// magnified wheel directly). Valid while `ScrollActive` only;
    /// a settle change flows back into the committed value.
    pub fn handle_track_scroll(&mut self, offset: f32, now: Instant) -> Vec<PickerNotification> {
        self.poll(now);
        if self.mode != InteractionMode::ScrollActive {
            return Vec::new();
        }
        self.settle_from_track(offset)
    }

    // --- Keyboard events ---

    /// Double-tap: enter `KeyboardActive` from `Idle`, initializing
    /// the buffer from the formatted current value. Rejected in any
    /// other mode.
    pub fn handle_double_tap(&mut self, now: Instant) -> Vec<PickerNotification> {
        self.poll(now);
        if self.mode != InteractionMode::Idle {
            return Vec::new();
        }
        self.buffer = self.format.format(self.value.current());
        self.set_mode(InteractionMode::KeyboardActive);
        Vec::new()
    }

    /// Replace the raw buffer while `KeyboardActive` (the host text
    /// field echoes edits back). Ignored in other modes.
    pub fn set_buffer_text(&mut self, text: impl Into<String>) {
        if self.mode == InteractionMode::KeyboardActive {
            self.buffer = text.into();
        }
    }

    /// Commit keyboard text. Parse failure keeps the buffer and the
    /// mode and mutates nothing. Success clamps — deliberately without
    /// re-quantization, direct precision is the point of this modality
    /// — commits, and returns to `Idle`.
    pub fn handle_keyboard_commit(&mut self, text: &str) -> Vec<PickerNotification> {
        if self.mode != InteractionMode::KeyboardActive {
            return Vec::new();
        }
        let Some(parsed) = self.format.parse(text) else {
            self.buffer = text.to_string();
            return Vec::new();
        };
        let before = self.value.current();
        let committed = self.value.set_clamped(parsed);
        self.buffer.clear();
        self.set_mode(InteractionMode::Idle);
        let mut out = vec![PickerNotification::ValueSet { value: committed }];
        if committed != before {
            out.push(PickerNotification::ValueChanged { value: committed });
        }
        out
    }

    /// Discard the buffer and return to `Idle` with no value change.
    pub fn handle_keyboard_cancel(&mut self) -> Vec<PickerNotification> {
        if self.mode == InteractionMode::KeyboardActive {
            self.buffer.clear();
            self.set_mode(InteractionMode::Idle);
        }
        Vec::new()
    }

    // --- Pills and external assignment ---

    /// Apply a pre-established pill amount. Valid from `Idle` only.
    /// The result is clamped to the configured bounds and not
    /// re-quantized (pill amounts are already meaningful increments).
    pub fn apply_pill_delta(
        &mut self,
        amount: f64,
        direction: PillDirection,
    ) -> Vec<PickerNotification> {
        if self.mode != InteractionMode::Idle || !(amount > 0.0) || !amount.is_finite() {
            return Vec::new();
        }
        let signed = match direction {
            PillDirection::Add => amount,
            PillDirection::Subtract => -amount,
        };
        let before = self.value.current();
        let committed = self.value.set_clamped(before + signed);
        let mut out = vec![match direction {
            PillDirection::Add => PickerNotification::ValueAdded { amount },
            PillDirection::Subtract => PickerNotification::ValueSubtracted { amount },
        }];
        if committed != before {
            out.push(PickerNotification::ValueChanged { value: committed });
        }
        out
    }

    /// Programmatic assignment (e.g. reset). Callable in any mode
    /// except `KeyboardActive`, where it is rejected. Clamps and
    /// quantizes; while `ScrollActive` the track realigns silently.
    pub fn set_external_value(&mut self, new_value: f64) -> Vec<PickerNotification> {
        if self.mode == InteractionMode::KeyboardActive || !new_value.is_finite() {
            return Vec::new();
        }
        let before = self.value.current();
        let committed = self.value.set_quantized(new_value);
        if self.mode == InteractionMode::ScrollActive {
            self.track.align_to_value(committed);
        }
        let mut out = vec![PickerNotification::ValueSet { value: committed }];
        if committed != before {
            out.push(PickerNotification::ValueChanged { value: committed });
        }
        out
    }

    // --- Internal ---

    /// Continuous-drag path: map horizontal displacement since the
    /// origin onto the value range, push the (still continuous)
    /// offset through the track, and commit the settled item.
    fn scrub_to(&mut self, x: f32) -> Vec<PickerNotification> {
        let Some(origin) = self.drag_origin else {
            // Pointer already lifted; the track coasts on its own.
            return Vec::new();
        };
        let fraction = f64::from((x - origin.x) / self.config.reference_width);
        let target = self.value.clamp(origin.value + fraction * self.value.span());
        let offset = self.track.offset_for_value(target);
        self.settle_from_track(offset)
    }

    /// Track → value channel: one settle change produces exactly one
    /// `ValueChanged` and one haptic pulse request.
    fn settle_from_track(&mut self, offset: f32) -> Vec<PickerNotification> {
        if !self.track.update_offset(offset) {
            return Vec::new();
        }
        let Some(settled) = self.track.settled_value() else {
            return Vec::new();
        };
        let committed = self.value.set_quantized(settled);
        vec![
            PickerNotification::ValueChanged { value: committed },
            PickerNotification::HapticPulse,
        ]
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        #[cfg(feature = "tracing")]
        self.trace_transition(mode);
        self.mode = mode;
    }

    #[cfg(feature = "tracing")]
    fn trace_transition(&self, to: InteractionMode) {
        let _span = tracing::debug_span!(
            "picker.mode",
            from = ?self.mode,
            to = ?to,
            value = self.value.current()
        )
        .entered();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MS_1: Duration = Duration::from_millis(1);
    const MS_100: Duration = Duration::from_millis(100);
    const MS_299: Duration = Duration::from_millis(299);
    const MS_301: Duration = Duration::from_millis(301);
    const MS_499: Duration = Duration::from_millis(499);
    const MS_501: Duration = Duration::from_millis(501);
    const MS_600: Duration = Duration::from_millis(600);

    fn now() -> Instant {
        Instant::now()
    }

    fn at(x: f32) -> PointerPoint {
        PointerPoint::new(x, 0.0)
    }

    /// Bounds [0, 200], step 0.5, current 20, reference width 400.
    fn picker() -> ValuePicker {
        let config = PickerConfig {
            reference_width: 400.0,
            ..Default::default()
        };
        ValuePicker::with_config(20.0, 0.0, 200.0, 0.5, config).unwrap()
    }

    /// Drive a picker into `ScrollActive` with the press at `x`.
    fn scrubbing(p: &mut ValuePicker, x: f32, t: Instant) {
        p.handle_pointer_down(at(x), t);
        assert!(p.poll(t + MS_501));
        assert_eq!(p.mode(), InteractionMode::ScrollActive);
    }

    // --- Construction ---

    #[test]
    fn invalid_config_rejected() {
        assert!(matches!(
            ValuePicker::new(0.0, 0.0, 10.0, 0.0),
            Err(ConfigError::NonPositiveStep { .. })
        ));
        assert!(matches!(
            ValuePicker::new(0.0, 10.0, 0.0, 1.0),
            Err(ConfigError::InvertedBounds { .. })
        ));
        let config = PickerConfig {
            reference_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            ValuePicker::with_config(0.0, 0.0, 10.0, 1.0, config),
            Err(ConfigError::InvalidReferenceWidth { .. })
        ));
    }

    #[test]
    fn starts_idle_with_quantized_value() {
        let p = ValuePicker::new(20.3, 0.0, 200.0, 0.5).unwrap();
        assert_eq!(p.snapshot(), (20.5, InteractionMode::Idle));
    }

    // --- Tap vs. long press ---

    #[test]
    fn tap_returns_to_idle_without_value_change() {
        let mut p = picker();
        let t = now();
        p.handle_pointer_down(at(10.0), t);
        assert_eq!(p.mode(), InteractionMode::PendingLongPress);
        p.handle_pointer_up(t + MS_100);
        assert_eq!(p.mode(), InteractionMode::Idle);
        assert_eq!(p.value(), 20.0);
        // The cancelled deadline never fires.
        assert!(!p.poll(t + MS_600));
        assert_eq!(p.mode(), InteractionMode::Idle);
    }

    #[test]
    fn long_press_enters_scroll_active_and_aligns_track() {
        let mut p = picker();
        let t = now();
        p.handle_pointer_down(at(10.0), t);
        assert!(p.poll(t + MS_501));
        assert_eq!(p.mode(), InteractionMode::ScrollActive);
        assert_eq!(p.track().settled_value(), Some(20.0));
    }

    #[test]
    fn pointer_up_one_ms_before_deadline_cancels() {
        let mut p = picker();
        let t = now();
        p.handle_pointer_down(at(10.0), t);
        p.handle_pointer_up(t + MS_499);
        assert_eq!(p.mode(), InteractionMode::Idle);
        assert!(!p.poll(t + MS_501));
        assert_eq!(p.mode(), InteractionMode::Idle);
    }

    #[test]
    fn pointer_up_one_ms_after_deadline_is_not_a_tap() {
        let mut p = picker();
        let t = now();
        p.handle_pointer_down(at(10.0), t);
        // No poll in between: the up event itself delivers the due
        // deadline first, so the transition is not undone.
        p.handle_pointer_up(t + MS_501);
        assert_eq!(p.mode(), InteractionMode::ScrollActive);
    }

    #[test]
    fn pointer_down_ignored_outside_idle() {
        let mut p = picker();
        let t = now();
        p.handle_double_tap(t);
        assert_eq!(p.mode(), InteractionMode::KeyboardActive);
        p.handle_pointer_down(at(10.0), t + MS_1);
        assert_eq!(p.mode(), InteractionMode::KeyboardActive);
    }

    #[test]
    fn move_during_pending_long_press_keeps_value() {
        let mut p = picker();
        let t = now();
        p.handle_pointer_down(at(10.0), t);
        let out = p.handle_pointer_move(at(200.0), t + MS_100);
        assert!(out.is_empty());
        assert_eq!(p.value(), 20.0);
        assert_eq!(p.mode(), InteractionMode::PendingLongPress);
    }

    // --- Scrubbing ---

    #[test]
    fn drag_across_half_reference_width_moves_half_range() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        // 200 of 400 reference width → +100 over a range of 200.
        let out = p.handle_pointer_move(at(200.0), t + MS_600);
        assert_eq!(p.value(), 120.0);
        assert!(out.contains(&PickerNotification::ValueChanged { value: 120.0 }));
        assert!(out.contains(&PickerNotification::HapticPulse));
        assert_eq!(p.mode(), InteractionMode::ScrollActive);
    }

    #[test]
    fn drag_result_is_quantized_to_step() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        // 1.4 of 400 → +0.7 → nearest step from 20.0 is 20.5.
        p.handle_pointer_move(at(1.4), t + MS_600);
        assert_eq!(p.value(), 20.5);
    }

    #[test]
    fn drag_clamps_at_bounds() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        p.handle_pointer_move(at(5000.0), t + MS_600);
        assert_eq!(p.value(), 200.0);
        p.handle_pointer_move(at(-5000.0), t + MS_600);
        assert_eq!(p.value(), 0.0);
    }

    #[test]
    fn redundant_drag_settle_emits_once() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        let first = p.handle_pointer_move(at(200.0), t + MS_600);
        assert!(!first.is_empty());
        // Tiny wiggle, same nearest item: no repeat notifications.
        let second = p.handle_pointer_move(at(200.1), t + MS_600);
        assert!(second.is_empty());
    }

    #[test]
    fn track_follows_committed_value_during_drag() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        p.handle_pointer_move(at(200.0), t + MS_600);
        assert_eq!(p.track().settled_value(), Some(p.value()));
    }

    #[test]
    fn track_scroll_settles_back_into_value() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        let pitch = p.track().item_pitch();
        let out = p.handle_track_scroll(pitch * 60.0, t + MS_600);
        assert_eq!(p.value(), 30.0);
        assert!(out.contains(&PickerNotification::ValueChanged { value: 30.0 }));
        assert!(out.contains(&PickerNotification::HapticPulse));
    }

    #[test]
    fn track_scroll_ignored_outside_scroll_active() {
        let mut p = picker();
        let t = now();
        let out = p.handle_track_scroll(400.0, t);
        assert!(out.is_empty());
        assert_eq!(p.value(), 20.0);
    }

    // --- Dismissal ---

    #[test]
    fn dismissal_waits_for_grace_delay() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        let up = t + MS_600;
        p.handle_pointer_up(up);
        assert_eq!(p.mode(), InteractionMode::ScrollActive);
        assert!(!p.poll(up + MS_299));
        assert_eq!(p.mode(), InteractionMode::ScrollActive);
        assert!(p.poll(up + MS_301));
        assert_eq!(p.mode(), InteractionMode::Idle);
    }

    #[test]
    fn moves_after_lift_do_not_scrub() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        p.handle_pointer_up(t + MS_600);
        let out = p.handle_pointer_move(at(200.0), t + MS_600 + MS_1);
        assert!(out.is_empty());
        assert_eq!(p.value(), 20.0);
    }

    // --- Keyboard ---

    #[test]
    fn double_tap_initializes_buffer_from_formatted_value() {
        let mut p = picker();
        let t = now();
        p.set_external_value(25.0);
        p.handle_double_tap(t);
        assert_eq!(p.mode(), InteractionMode::KeyboardActive);
        assert_eq!(p.buffer_text(), "25");
    }

    #[test]
    fn double_tap_rejected_outside_idle() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        p.handle_double_tap(t + MS_600);
        assert_eq!(p.mode(), InteractionMode::ScrollActive);

        let mut p = picker();
        p.handle_double_tap(t);
        // Already KeyboardActive: redundant request ignored, buffer kept.
        p.set_buffer_text("3");
        p.handle_double_tap(t + MS_1);
        assert_eq!(p.buffer_text(), "3");
    }

    #[test]
    fn keyboard_commit_is_exact_no_quantization() {
        let mut p = picker();
        let t = now();
        p.set_external_value(25.0);
        p.handle_double_tap(t);
        let out = p.handle_keyboard_commit("33.25");
        assert_eq!(p.value(), 33.25);
        assert_eq!(p.mode(), InteractionMode::Idle);
        assert!(out.contains(&PickerNotification::ValueSet { value: 33.25 }));
        assert!(out.contains(&PickerNotification::ValueChanged { value: 33.25 }));
        assert_eq!(p.buffer_text(), "");
    }

    #[test]
    fn keyboard_commit_clamps_to_bounds() {
        let mut p = picker();
        let t = now();
        p.handle_double_tap(t);
        p.handle_keyboard_commit("999");
        assert_eq!(p.value(), 200.0);
    }

    #[test]
    fn unparsable_commit_keeps_mode_and_buffer() {
        let mut p = picker();
        let t = now();
        p.handle_double_tap(t);
        let out = p.handle_keyboard_commit("not a number");
        assert!(out.is_empty());
        assert_eq!(p.mode(), InteractionMode::KeyboardActive);
        assert_eq!(p.buffer_text(), "not a number");
        assert_eq!(p.value(), 20.0);
    }

    #[test]
    fn keyboard_cancel_discards_without_value_change() {
        let mut p = picker();
        let t = now();
        p.handle_double_tap(t);
        p.set_buffer_text("777");
        let out = p.handle_keyboard_cancel();
        assert!(out.is_empty());
        assert_eq!(p.mode(), InteractionMode::Idle);
        assert_eq!(p.value(), 20.0);
        assert_eq!(p.buffer_text(), "");
    }

    #[test]
    fn buffer_edits_ignored_outside_keyboard_mode() {
        let mut p = picker();
        p.set_buffer_text("42");
        assert_eq!(p.buffer_text(), "");
    }

    #[test]
    fn pointer_events_ignored_while_keyboard_active() {
        let mut p = picker();
        let t = now();
        p.handle_double_tap(t);
        p.handle_pointer_down(at(0.0), t + MS_1);
        p.handle_pointer_move(at(300.0), t + MS_100);
        p.handle_pointer_up(t + MS_100);
        assert_eq!(p.mode(), InteractionMode::KeyboardActive);
        assert_eq!(p.value(), 20.0);
    }

    // --- Pills ---

    #[test]
    fn pill_add_scenario() {
        let mut p = picker();
        let out = p.apply_pill_delta(5.0, PillDirection::Add);
        assert_eq!(p.value(), 25.0);
        assert_eq!(p.mode(), InteractionMode::Idle);
        let added = out
            .iter()
            .filter(|n| matches!(n, PickerNotification::ValueAdded { amount } if *amount == 5.0))
            .count();
        assert_eq!(added, 1);
    }

    #[test]
    fn pill_subtract_clamps_to_lower_bound() {
        let config = PickerConfig::default();
        let mut p = ValuePicker::with_config(12.0, 10.0, 200.0, 0.5, config).unwrap();
        let out = p.apply_pill_delta(5.0, PillDirection::Subtract);
        // Clamped to the configured lower bound, not to zero.
        assert_eq!(p.value(), 10.0);
        assert!(out.contains(&PickerNotification::ValueSubtracted { amount: 5.0 }));
    }

    #[test]
    fn pill_at_bound_still_reports_activation() {
        let mut p = picker();
        p.set_external_value(200.0);
        let out = p.apply_pill_delta(5.0, PillDirection::Add);
        assert_eq!(p.value(), 200.0);
        assert!(out.contains(&PickerNotification::ValueAdded { amount: 5.0 }));
        assert!(
            !out.iter()
                .any(|n| matches!(n, PickerNotification::ValueChanged { .. }))
        );
    }

    #[test]
    fn pill_rejected_outside_idle() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        let out = p.apply_pill_delta(5.0, PillDirection::Add);
        assert!(out.is_empty());
        assert_eq!(p.value(), 20.0);
    }

    #[test]
    fn pill_rejects_non_positive_amounts() {
        let mut p = picker();
        assert!(p.apply_pill_delta(0.0, PillDirection::Add).is_empty());
        assert!(p.apply_pill_delta(-3.0, PillDirection::Add).is_empty());
        assert!(p.apply_pill_delta(f64::NAN, PillDirection::Add).is_empty());
        assert_eq!(p.value(), 20.0);
    }

    // --- External assignment ---

    #[test]
    fn external_value_clamps_and_quantizes() {
        let mut p = picker();
        let out = p.set_external_value(33.3);
        assert_eq!(p.value(), 33.5);
        assert!(out.contains(&PickerNotification::ValueSet { value: 33.5 }));
        assert!(out.contains(&PickerNotification::ValueChanged { value: 33.5 }));
    }

    #[test]
    fn external_value_realigns_track_while_scrolling() {
        let mut p = picker();
        let t = now();
        scrubbing(&mut p, 0.0, t);
        p.set_external_value(50.0);
        assert_eq!(p.track().settled_value(), Some(50.0));
        // Realignment is silent: the next identical offset reports no
        // user change either.
        let offset = p.track().focal_offset();
        let out = p.handle_track_scroll(offset, t + MS_600);
        assert!(out.is_empty());
    }

    #[test]
    fn external_value_rejected_while_keyboard_active() {
        let mut p = picker();
        let t = now();
        p.handle_double_tap(t);
        let out = p.set_external_value(50.0);
        assert!(out.is_empty());
        assert_eq!(p.value(), 20.0);
    }

    #[test]
    fn external_value_rejects_non_finite() {
        let mut p = picker();
        assert!(p.set_external_value(f64::NAN).is_empty());
        assert!(p.set_external_value(f64::INFINITY).is_empty());
        assert_eq!(p.value(), 20.0);
    }

    // --- Misc ---

    #[test]
    fn debug_format() {
        let p = picker();
        let dbg = format!("{p:?}");
        assert!(dbg.contains("ValuePicker"));
        assert!(dbg.contains("Idle"));
    }

    #[test]
    fn default_config_values() {
        let config = PickerConfig::default();
        assert_eq!(config.long_press_duration, Duration::from_millis(500));
        assert_eq!(config.dismiss_grace, Duration::from_millis(300));
        assert!(config.pill_amounts.is_empty());
    }

    // --- Properties ---

    proptest! {
        #[test]
        fn prop_drag_sequences_stay_bounded_and_step_aligned(
            xs in prop::collection::vec(-2000.0f32..2000.0, 1..40),
        ) {
            let mut p = picker();
            let t = now();
            scrubbing(&mut p, 0.0, t);
            for (i, x) in xs.into_iter().enumerate() {
                p.handle_pointer_move(at(x), t + MS_600 + MS_1 * (i as u32 + 1));
                let v = p.value();
                prop_assert!((0.0..=200.0).contains(&v));
                let offset = v / 0.5;
                prop_assert!((offset - offset.round()).abs() < 1e-6);
            }
            prop_assert_eq!(p.mode(), InteractionMode::ScrollActive);
        }

        #[test]
        fn prop_notifications_match_committed_changes(
            deltas in prop::collection::vec(0.5f64..30.0, 1..20),
        ) {
            let mut p = picker();
            for (i, amount) in deltas.into_iter().enumerate() {
                let direction = if i % 2 == 0 {
                    PillDirection::Add
                } else {
                    PillDirection::Subtract
                };
                let before = p.value();
                let out = p.apply_pill_delta(amount, direction);
                let changed = out.iter().any(
                    |n| matches!(n, PickerNotification::ValueChanged { .. }),
                );
                prop_assert_eq!(changed, p.value() != before);
                prop_assert!((0.0..=200.0).contains(&p.value()));
            }
        }
    }
}
