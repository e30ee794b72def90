// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Zoom policy for a [`crate::ViewportState`].
///
/// None of these values are derived from an external constraint; they are
/// tuning knobs. [`ZoomConfig::default`] reproduces the stock behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomConfig {
    /// Smallest allowed scale factor.
    pub min_scale: f64,
    /// Largest allowed scale factor.
    pub max_scale: f64,
    /// Multiplier applied by one discrete zoom step (buttons, one wheel notch).
    pub zoom_step: f64,
    /// Padding in pixels kept free on each axis when fitting.
    pub fit_padding: f64,
    /// Intrinsic size used when no sizing hint is usable.
    pub fallback_size: Size,
}

impl ZoomConfig {
    /// Stock configuration: scale in `[0.25, 4.0]`, 1.2× steps, 24px fit
    /// padding, 800×400 fallback.
    pub const DEFAULT: Self = Self {
        min_scale: 0.25,
        max_scale: 4.0,
        zoom_step: 1.2,
        fit_padding: 24.0,
        fallback_size: Size::new(800.0, 400.0),
    };

    /// Returns a copy with every field brought into a usable range.
    ///
    /// - Scale limits are swapped if inverted; non-finite or non-positive
    ///   limits fall back to the defaults.
    /// - A step that is not finite or not greater than `1.0` falls back to
    ///   the default step.
    /// - Padding is clamped to be non-negative.
    /// - Non-positive fallback dimensions fall back to the defaults.
    #[must_use]
    pub fn normalized(self) -> Self {
        let positive_or = |v: f64, d: f64| if v.is_finite() && v > 0.0 { v } else { d };

        let min_scale = positive_or(self.min_scale, Self::DEFAULT.min_scale);
        let max_scale = positive_or(self.max_scale, Self::DEFAULT.max_scale);
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };

        let zoom_step = if self.zoom_step.is_finite() && self.zoom_step > 1.0 {
            self.zoom_step
        } else {
            Self::DEFAULT.zoom_step
        };

        let fit_padding = if self.fit_padding.is_finite() {
            self.fit_padding.max(0.0)
        } else {
            Self::DEFAULT.fit_padding
        };

        let fallback_size = Size::new(
            positive_or(self.fallback_size.width, Self::DEFAULT.fallback_size.width),
            positive_or(self.fallback_size.height, Self::DEFAULT.fallback_size.height),
        );

        Self {
            min_scale,
            max_scale,
            zoom_step,
            fit_padding,
            fallback_size,
        }
    }

    /// Clamps `scale` into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
