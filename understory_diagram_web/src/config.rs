// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};
use understory_focus_overlay::DEFAULT_HINT;
use understory_pan_gesture::PanConfig;
use understory_scroll_view::ZoomConfig;

use crate::error::Result;

/// Everything a host can tune about diagram interaction.
///
/// Missing JSON fields keep their defaults, so `{}` is the stock behavior and
/// `{"zoom": {"max_scale": 8.0}}` changes only the zoom ceiling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Zoom limits, step, fit padding and sizing fallback.
    pub zoom: ZoomConfig,
    /// Drag threshold and activation button.
    pub pan: PanConfig,
    /// Whether diagrams get a focus control and double-click focus.
    pub focus_mode: bool,
    /// Text shown on the focus overlay.
    pub focus_hint: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            pan: PanConfig::default(),
            focus_mode: true,
            focus_hint: DEFAULT_HINT.to_owned(),
        }
    }
}

impl InteractionConfig {
    /// Parses a JSON config and normalizes it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Returns a copy with every section normalized.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            zoom: self.zoom.normalized(),
            pan: self.pan.normalized(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionConfig;
    use crate::error::Error;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(
            InteractionConfig::from_json("{}").unwrap(),
            InteractionConfig::default()
        );
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config =
            InteractionConfig::from_json(r#"{"zoom": {"max_scale": 8.0}, "focus_mode": false}"#)
                .unwrap();
        assert_eq!(config.zoom.max_scale, 8.0);
        assert_eq!(config.zoom.min_scale, 0.25);
        assert_eq!(config.pan.drag_threshold, 4.0);
        assert!(!config.focus_mode);
        assert_eq!(
            config.focus_hint,
            "Double-click or press Esc to exit focus mode"
        );
    }

    #[test]
    fn parsed_values_are_normalized() {
        let config = InteractionConfig::from_json(
            r#"{"zoom": {"min_scale": 5.0, "max_scale": 0.5}, "pan": {"drag_threshold": -1.0}}"#,
        )
        .unwrap();
        assert_eq!(config.zoom.min_scale, 0.5);
        assert_eq!(config.zoom.max_scale, 5.0);
        assert_eq!(config.pan.drag_threshold, 0.0);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = InteractionConfig::from_json("{zoom").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("invalid interaction config"));
    }
}
