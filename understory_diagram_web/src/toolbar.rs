// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toolbar vocabulary: controls, labels and the CSS class names shared with
//! the host stylesheet.

/// Toolbar container.
pub const TOOLBAR_CLASS: &str = "markdown-toolkit-mermaid-toolbar";
/// Every toolbar button.
pub const BUTTON_CLASS: &str = "markdown-toolkit-mermaid-button";
/// Extra class on the focus toggle.
pub const FOCUS_BUTTON_CLASS: &str = "markdown-toolkit-mermaid-focus-button";
/// Percentage label.
pub const SCALE_CLASS: &str = "markdown-toolkit-mermaid-scale";
/// Selector matching a diagram's scroll viewport.
pub const VIEWPORT_SELECTOR: &str = ".markdown-toolkit-mermaid-viewport";
/// Full-screen focus overlay.
pub const OVERLAY_CLASS: &str = "markdown-toolkit-mermaid-focus-overlay";
/// Hint inside the overlay.
pub const HINT_CLASS: &str = "markdown-toolkit-mermaid-focus-hint";
/// Set on `<body>` while focus mode is active.
pub const BODY_FOCUS_CLASS: &str = "markdown-toolkit-mermaid-focus-active";
/// Set on the focused wrapper.
pub const WRAPPER_FOCUS_CLASS: &str = "is-focus-mode";
/// Set on the viewport while a drag is in progress.
pub const DRAGGING_CLASS: &str = "is-dragging";

/// One toolbar item, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarControl {
    /// Zoom out one step around the viewport center.
    ZoomOut,
    /// Zoom in one step around the viewport center.
    ZoomIn,
    /// Read-only percentage label.
    ScaleLabel,
    /// Back to 100% and the top-left corner.
    Reset,
    /// Enter or leave focus mode.
    Focus,
}

impl ToolbarControl {
    /// Visible text, for controls whose text never changes.
    #[must_use]
    pub fn text(self) -> Option<&'static str> {
        match self {
            Self::ZoomOut => Some("-"),
            Self::ZoomIn => Some("+"),
            Self::Reset => Some("Reset"),
            Self::Focus => Some(focus_labels(false).0),
            Self::ScaleLabel => None,
        }
    }

    /// Tooltip text.
    #[must_use]
    pub fn title(self) -> Option<&'static str> {
        match self {
            Self::ZoomOut => Some("Zoom out"),
            Self::ZoomIn => Some("Zoom in"),
            Self::Reset => Some("Reset zoom and position"),
            Self::Focus => Some(focus_labels(false).1),
            Self::ScaleLabel => None,
        }
    }

    /// Whether this control is a button.
    #[must_use]
    pub fn is_button(self) -> bool {
        !matches!(self, Self::ScaleLabel)
    }
}

/// Controls to build, in order. The focus toggle is omitted when focus mode
/// is disabled.
pub fn controls(focus_mode: bool) -> impl Iterator<Item = ToolbarControl> {
    [
        ToolbarControl::ZoomOut,
        ToolbarControl::ZoomIn,
        ToolbarControl::ScaleLabel,
        ToolbarControl::Reset,
        ToolbarControl::Focus,
    ]
    .into_iter()
    .filter(move |c| focus_mode || *c != ToolbarControl::Focus)
}

/// Text and tooltip for the focus toggle.
#[must_use]
pub fn focus_labels(focused: bool) -> (&'static str, &'static str) {
    if focused {
        ("Exit Focus", "Exit focus mode (Esc)")
    } else {
        ("Focus", "Enter focus mode")
    }
}

#[cfg(test)]
mod tests {
    use super::{ToolbarControl, controls, focus_labels};

    #[test]
    fn full_toolbar_order() {
        let all: Vec<_> = controls(true).collect();
        assert_eq!(
            all,
            [
                ToolbarControl::ZoomOut,
                ToolbarControl::ZoomIn,
                ToolbarControl::ScaleLabel,
                ToolbarControl::Reset,
                ToolbarControl::Focus,
            ]
        );
        let texts: Vec<_> = all.iter().filter_map(|c| c.text()).collect();
        assert_eq!(texts, ["-", "+", "Reset", "Focus"]);
    }

    #[test]
    fn focus_toggle_is_optional() {
        assert_eq!(controls(false).count(), 4);
        assert!(controls(false).all(|c| c != ToolbarControl::Focus));
    }

    #[test]
    fn focus_labels_follow_state() {
        assert_eq!(focus_labels(true), ("Exit Focus", "Exit focus mode (Esc)"));
        assert_eq!(focus_labels(false), ("Focus", "Enter focus mode"));
        assert_eq!(ToolbarControl::Reset.title(), Some("Reset zoom and position"));
        assert!(!ToolbarControl::ScaleLabel.is_button());
    }
}
