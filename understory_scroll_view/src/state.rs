// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

use kurbo::{Size, Vec2};

use crate::config::ZoomConfig;
use crate::sizing::{SizeHints, resolve_intrinsic_size};

/// The element side of a scroll viewport.
///
/// Implemented by whatever owns the actual scroll container and content
/// element (a DOM element pair, a test double, ...). All coordinates are in
/// CSS pixels relative to the container's padding box.
pub trait ScrollHost {
    /// Size of the visible client area of the scroll container.
    fn client_size(&self) -> Size;

    /// Current scroll offset of the container.
    fn scroll_offset(&self) -> Vec2;

    /// Sets the container's scroll offset.
    fn set_scroll_offset(&mut self, offset: Vec2);

    /// Resizes the content to `rendered` and refreshes the percentage label.
    fn apply_scale(&mut self, rendered: Size, label: &str);
}

/// Per-diagram viewing state: immutable intrinsic size plus a bounded scale.
///
/// Zoom, reset and fit operations live in this type's `impl` blocks; see
/// [`ViewportState::set_scale`] for the anchor-preserving core.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    intrinsic: Size,
    scale: f64,
    config: ZoomConfig,
}

impl ViewportState {
    /// Creates a state at scale `1.0` for content of the given intrinsic size.
    ///
    /// The config is normalized first. A non-finite or non-positive intrinsic
    /// dimension is replaced by the config's fallback.
    #[must_use]
    pub fn new(intrinsic: Size, config: ZoomConfig) -> Self {
        let config = config.normalized();
        let intrinsic = resolve_intrinsic_size(
            &SizeHints {
                measured: Some(intrinsic),
                ..SizeHints::default()
            },
            config.fallback_size,
        );
        Self {
            intrinsic,
            scale: 1.0,
            config,
        }
    }

    /// Creates a state whose intrinsic size is resolved from `hints`.
    #[must_use]
    pub fn from_hints(hints: &SizeHints, config: ZoomConfig) -> Self {
        let config = config.normalized();
        Self::new(resolve_intrinsic_size(hints, config.fallback_size), config)
    }

    /// Intrinsic (unscaled) content size.
    #[must_use]
    pub fn intrinsic_size(&self) -> Size {
        self.intrinsic
    }

    /// Current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The zoom policy in effect.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Content size at the current scale.
    #[must_use]
    pub fn rendered_size(&self) -> Size {
        self.intrinsic * self.scale
    }

    /// Percentage label for the current scale, for example `"144%"`.
    #[must_use]
    pub fn scale_label(&self) -> String {
        format!("{}%", round_percent(self.scale))
    }

    /// Pushes the current rendered size and label to `host`.
    pub fn apply<H: ScrollHost + ?Sized>(&self, host: &mut H) {
        let rendered = self.rendered_size();
        tracing::trace!(
            target: "understory_scroll_view",
            scale = self.scale,
            width = rendered.width,
            height = rendered.height,
            "applying scale"
        );
        host.apply_scale(rendered, &self.scale_label());
    }

    pub(crate) fn set_scale_unchecked(&mut self, scale: f64) {
        self.scale = scale;
    }
}

/// Rounds `scale * 100` half-up, the way the label has always been shown.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "scales are clamped to a small positive range before they reach the label"
)]
fn round_percent(scale: f64) -> u32 {
    (scale * 100.0 + 0.5) as u32
}
