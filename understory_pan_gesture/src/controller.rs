// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::session::DragSession;

/// Pan gesture policy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanConfig {
    /// Minimum Euclidean pointer displacement, in pixels, before a press
    /// turns into a drag.
    pub drag_threshold: f64,
    /// The `PointerEvent.button` value that may start a gesture.
    pub activation_button: i16,
}

impl PanConfig {
    /// Stock policy: 4px threshold, primary button.
    pub const DEFAULT: Self = Self {
        drag_threshold: 4.0,
        activation_button: 0,
    };

    /// Returns a copy with the threshold repaired.
    ///
    /// Negative thresholds clamp to `0`; a non-finite threshold falls back to
    /// the default.
    #[must_use]
    pub fn normalized(self) -> Self {
        let drag_threshold = if self.drag_threshold.is_finite() {
            self.drag_threshold.max(0.0)
        } else {
            Self::DEFAULT.drag_threshold
        };
        Self {
            drag_threshold,
            ..self
        }
    }

    /// Sets the drag threshold, normalizing it.
    #[must_use]
    pub fn with_drag_threshold(self, drag_threshold: f64) -> Self {
        Self {
            drag_threshold,
            ..self
        }
        .normalized()
    }

    /// Bit for the activation button in `PointerEvent.buttons`.
    ///
    /// The `button` and `buttons` encodings disagree on middle and
    /// secondary: button 1 is bit 4 and button 2 is bit 2.
    #[must_use]
    pub fn activation_mask(&self) -> u16 {
        match self.activation_button {
            0 => 1,
            1 => 4,
            2 => 2,
            n @ 3..=15 => 1 << n,
            _ => 0,
        }
    }

    fn reaches_threshold(&self, displacement: Vec2) -> bool {
        // Squared comparison keeps this free of sqrt.
        displacement.hypot2() >= self.drag_threshold * self.drag_threshold
    }
}

impl Default for PanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A pointer-down as seen by the pan controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDown {
    /// `PointerEvent.pointerId`.
    pub pointer_id: i32,
    /// Pointer position in client coordinates.
    pub position: Point,
    /// `PointerEvent.button`.
    pub button: i16,
    /// Whether another handler already called `preventDefault`.
    pub default_prevented: bool,
    /// Whether the press landed on interactive content; see
    /// [`crate::target::is_interactive_path`].
    pub interactive_target: bool,
}

impl PointerDown {
    /// A plain primary-button press on non-interactive content.
    #[must_use]
    pub fn primary(pointer_id: i32, position: Point) -> Self {
        Self {
            pointer_id,
            position,
            button: 0,
            default_prevented: false,
            interactive_target: false,
        }
    }
}

/// Pointer capture request for the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureCommand {
    /// Capture the pointer on the viewport.
    Acquire {
        /// Pointer to capture.
        pointer_id: i32,
    },
    /// Release the pointer if the viewport still holds it.
    Release {
        /// Pointer to release.
        pointer_id: i32,
    },
}

/// What the host should do in response to a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanOutcome {
    /// New scroll offset for the viewport.
    pub scroll_to: Option<Vec2>,
    /// Pointer capture change.
    pub capture: Option<CaptureCommand>,
    /// `Some(true)` to show the dragging indicator, `Some(false)` to clear it.
    pub dragging_indicator: Option<bool>,
    /// Whether the event's default handling must be prevented.
    pub prevent_default: bool,
}

impl PanOutcome {
    /// Returns `true` if the host has nothing to do.
    #[must_use]
    pub fn is_none(&self) -> bool {
        *self == Self::default()
    }
}

/// Drag-to-pan state machine for one viewport.
///
/// Holds at most one [`DragSession`] plus the one-shot click suppression
/// flag. Moves, releases and leaves from a pointer other than the
/// session's are ignored.
#[derive(Clone, Debug, Default)]
pub struct PanController {
    config: PanConfig,
    session: Option<DragSession>,
    suppress_click: bool,
}

impl PanController {
    /// Creates an idle controller. The config is normalized.
    #[must_use]
    pub fn new(config: PanConfig) -> Self {
        Self {
            config: config.normalized(),
            session: None,
            suppress_click: false,
        }
    }

    /// The gesture policy in effect.
    #[must_use]
    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Returns `true` while a session has crossed the drag threshold.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some_and(|s| s.dragging)
    }

    /// Handles pointer-down with the viewport's current scroll offset.
    ///
    /// Always clears pending click suppression. Returns `true` if a pending
    /// session was started. An accepted press replaces any earlier session,
    /// which may have been orphaned by a release outside the viewport; the
    /// browser has already dropped that pointer's capture.
    pub fn pointer_down(&mut self, down: PointerDown, scroll: Vec2) -> bool {
        self.suppress_click = false;
        if down.button != self.config.activation_button
            || down.default_prevented
            || down.interactive_target
        {
            return false;
        }
        if let Some(stale) = self.session
            && !stale.owns(down.pointer_id)
        {
            tracing::debug!(
                target: "understory_pan_gesture",
                stale = stale.pointer_id,
                pointer_id = down.pointer_id,
                "replacing orphaned pan session"
            );
        }
        tracing::trace!(
            target: "understory_pan_gesture",
            pointer_id = down.pointer_id,
            x = down.position.x,
            y = down.position.y,
            "pan session started"
        );
        self.session = Some(DragSession::new(down.pointer_id, down.position, scroll));
        true
    }

    /// Handles pointer-move.
    pub fn pointer_move(&mut self, pointer_id: i32, position: Point) -> PanOutcome {
        let Some(session) = self.session.as_mut() else {
            return PanOutcome::default();
        };
        if !session.owns(pointer_id) {
            return PanOutcome::default();
        }

        let mut outcome = PanOutcome::default();
        if !session.dragging {
            if !self.config.reaches_threshold(session.displacement(position)) {
                return outcome;
            }
            session.dragging = true;
            outcome.capture = Some(CaptureCommand::Acquire { pointer_id });
            outcome.dragging_indicator = Some(true);
            tracing::debug!(target: "understory_pan_gesture", pointer_id, "drag threshold crossed");
        }
        outcome.scroll_to = Some(session.scroll_for(position));
        outcome.prevent_default = true;
        outcome
    }

    /// Handles pointer-up.
    pub fn pointer_up(&mut self, pointer_id: i32) -> PanOutcome {
        self.end(pointer_id)
    }

    /// Handles pointer-cancel.
    pub fn pointer_cancel(&mut self, pointer_id: i32) -> PanOutcome {
        self.end(pointer_id)
    }

    /// Handles pointer-leave with the event's `buttons` bitmask.
    ///
    /// Captured pointers keep producing events after leaving the viewport,
    /// so the session only ends here once the activation button is up.
    pub fn pointer_leave(&mut self, pointer_id: i32, buttons: u16) -> PanOutcome {
        if buttons & self.config.activation_mask() != 0 {
            return PanOutcome::default();
        }
        self.end(pointer_id)
    }

    /// Consumes the click suppression flag, returning whether the click that
    /// triggered this call should be swallowed.
    pub fn take_click_suppression(&mut self) -> bool {
        core::mem::take(&mut self.suppress_click)
    }

    fn end(&mut self, pointer_id: i32) -> PanOutcome {
        let Some(session) = self.session else {
            return PanOutcome::default();
        };
        if !session.owns(pointer_id) {
            return PanOutcome::default();
        }
        self.session = None;
        if !session.dragging {
            return PanOutcome::default();
        }
        self.suppress_click = true;
        tracing::debug!(target: "understory_pan_gesture", pointer_id, "drag ended");
        PanOutcome {
            capture: Some(CaptureCommand::Release { pointer_id }),
            dragging_indicator: Some(false),
            ..PanOutcome::default()
        }
    }
}
