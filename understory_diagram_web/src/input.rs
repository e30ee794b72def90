// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input routing decisions that do not need a DOM.

use kurbo::Point;

/// Wheel events only zoom with Ctrl or Meta held; plain wheel keeps
/// scrolling the page.
#[must_use]
pub fn wheel_zooms(ctrl_key: bool, meta_key: bool) -> bool {
    ctrl_key || meta_key
}

/// Converts client coordinates to coordinates relative to the viewport's
/// top-left corner.
#[must_use]
pub fn viewport_anchor(client: Point, viewport_origin: Point) -> Point {
    (client - viewport_origin).to_point()
}

/// Whether a `KeyboardEvent.key` leaves focus mode.
#[must_use]
pub fn is_exit_key(key: &str) -> bool {
    key == "Escape"
}

/// Where a double-click landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoubleClickTarget {
    /// Inside a viewport that has interaction attached.
    AttachedViewport,
    /// Inside a viewport without attached interaction.
    UnattachedViewport,
    /// Anywhere else on the page.
    Elsewhere,
}

/// What the window-level double-click guard does with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoubleClickRoute {
    /// Swallow the event and toggle focus on the diagram.
    ToggleFocus,
    /// Swallow the event so the page does not select text or leave the
    /// preview's read mode.
    Swallow,
    /// Leave the event alone.
    PassThrough,
}

/// Routes a `dblclick` with `MouseEvent.button == button`.
#[must_use]
pub fn route_double_click(
    button: i16,
    target: DoubleClickTarget,
    focus_mode: bool,
) -> DoubleClickRoute {
    if button != 0 {
        return DoubleClickRoute::PassThrough;
    }
    match target {
        DoubleClickTarget::AttachedViewport if focus_mode => DoubleClickRoute::ToggleFocus,
        DoubleClickTarget::AttachedViewport | DoubleClickTarget::Elsewhere => {
            DoubleClickRoute::Swallow
        }
        DoubleClickTarget::UnattachedViewport => DoubleClickRoute::PassThrough,
    }
}
