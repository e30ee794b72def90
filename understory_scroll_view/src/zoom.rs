// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom, reset and fit operations on [`ViewportState`].

use kurbo::{Point, Size, Vec2};

use crate::config::ZoomConfig;
use crate::state::{ScrollHost, ViewportState};

impl ViewportState {
    /// Sets the scale to `target` (clamped), keeping `anchor` visually fixed.
    ///
    /// `anchor` is a point in viewport client coordinates. The content point
    /// under it before the change is under it again afterwards, modulo scroll
    /// clamping by the host.
    ///
    /// Returns `false` without touching the host when the clamped target
    /// equals the current scale, or when `target` is NaN.
    pub fn set_scale<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: f64,
        anchor: Point,
    ) -> bool {
        if target.is_nan() {
            return false;
        }
        let next = self.config().clamp_scale(target);
        if (next - self.scale()).abs() < f64::EPSILON {
            return false;
        }

        let fraction = anchor_fraction(host.scroll_offset(), anchor, self.rendered_size());
        self.set_scale_unchecked(next);
        self.apply(host);
        host.set_scroll_offset(anchored_scroll(fraction, self.rendered_size(), anchor));
        true
    }

    /// Zooms in by one step around the viewport center.
    pub fn zoom_in<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let target = self.scale() * self.config().zoom_step;
        let anchor = client_center(host.client_size());
        self.set_scale(host, target, anchor)
    }

    /// Zooms out by one step around the viewport center.
    pub fn zoom_out<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let target = self.scale() / self.config().zoom_step;
        let anchor = client_center(host.client_size());
        self.set_scale(host, target, anchor)
    }

    /// Applies one wheel notch around `anchor`.
    ///
    /// A negative `delta_y` (wheel away from the user) zooms in; anything
    /// else zooms out. Callers decide whether the wheel event should zoom at
    /// all (usually only with a modifier held).
    pub fn zoom_by_wheel<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        delta_y: f64,
        anchor: Point,
    ) -> bool {
        let step = self.config().zoom_step;
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        self.set_scale(host, self.scale() * factor, anchor)
    }

    /// Returns to scale `1.0` with the content scrolled to its origin.
    pub fn reset<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        self.set_scale_unchecked(1.0);
        self.apply(host);
        host.set_scroll_offset(Vec2::ZERO);
    }

    /// Scales the content to fit the viewport and centers it.
    ///
    /// Unlike [`ViewportState::set_scale`], this always re-applies the scale,
    /// since the viewport may have been resized since the last fit.
    pub fn fit<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        let client = host.client_size();
        let scale = fit_scale(self.intrinsic_size(), client, self.config());
        tracing::debug!(
            target: "understory_scroll_view",
            scale,
            client_width = client.width,
            client_height = client.height,
            "fitting content to viewport"
        );
        self.set_scale_unchecked(scale);
        self.apply(host);
        host.set_scroll_offset(centered_scroll(self.rendered_size(), client));
    }
}

fn client_center(client: Size) -> Point {
    Point::new(client.width / 2.0, client.height / 2.0)
}

/// Fractional position of `anchor` within content of size `content`.
///
/// `(scroll + anchor) / content` per axis.
#[must_use]
pub fn anchor_fraction(scroll: Vec2, anchor: Point, content: Size) -> Vec2 {
    Vec2::new(
        (scroll.x + anchor.x) / content.width,
        (scroll.y + anchor.y) / content.height,
    )
}

/// Scroll offset that puts `fraction` of `content` under `anchor`.
///
/// Inverse of [`anchor_fraction`]: `fraction * content - anchor` per axis.
#[must_use]
pub fn anchored_scroll(fraction: Vec2, content: Size, anchor: Point) -> Vec2 {
    Vec2::new(
        fraction.x * content.width - anchor.x,
        fraction.y * content.height - anchor.y,
    )
}

/// Largest allowed scale at which `intrinsic` fits inside `client`.
///
/// The available extent is the client size minus the configured padding on
/// each axis, but never less than one pixel. The smaller of the two axis
/// ratios is used so the content is never distorted, then clamped to the
/// configured scale range.
#[must_use]
pub fn fit_scale(intrinsic: Size, client: Size, config: &ZoomConfig) -> f64 {
    let available = Size::new(
        (client.width - config.fit_padding).max(1.0),
        (client.height - config.fit_padding).max(1.0),
    );
    let ratio = (available.width / intrinsic.width).min(available.height / intrinsic.height);
    config.clamp_scale(ratio)
}

/// Scroll offset that centers content of size `content` in `client`.
///
/// Content smaller than the viewport gets a zero offset on that axis; the
/// host is expected to center it through layout.
#[must_use]
pub fn centered_scroll(content: Size, client: Size) -> Vec2 {
    Vec2::new(
        ((content.width - client.width) / 2.0).max(0.0),
        ((content.height - client.height) / 2.0).max(0.0),
    )
}
