// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Scroll View: zoomable content inside a native scroll container.
//!
//! This crate models the viewing state of one piece of fixed-size content
//! (typically a rendered SVG diagram) shown inside a scrollable viewport
//! element. Unlike a camera transform, the pan position here *is* the
//! container's scroll offset, and zoom is expressed by resizing the content.
//! It focuses on:
//! - Resolving the content's intrinsic size from whatever hints are available.
//! - Bounded scale changes that keep a chosen anchor point visually fixed.
//! - Resetting and fitting the content to the viewport.
//!
//! It does **not** own any element. Callers implement [`ScrollHost`] for
//! their viewport and pass it to the operations on [`ViewportState`]; the
//! state never caches scroll offsets, so offsets changed by the user (scroll
//! bars, wheel without modifiers) are always respected.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_scroll_view::{ScrollHost, ViewportState, ZoomConfig};
//!
//! struct Host {
//!     client: Size,
//!     scroll: Vec2,
//!     label: String,
//! }
//!
//! impl ScrollHost for Host {
//!     fn client_size(&self) -> Size {
//!         self.client
//!     }
//!     fn scroll_offset(&self) -> Vec2 {
//!         self.scroll
//!     }
//!     fn set_scroll_offset(&mut self, offset: Vec2) {
//!         self.scroll = offset;
//!     }
//!     fn apply_scale(&mut self, _rendered: Size, label: &str) {
//!         self.label = label.into();
//!     }
//! }
//!
//! let mut host = Host {
//!     client: Size::new(400.0, 300.0),
//!     scroll: Vec2::ZERO,
//!     label: String::new(),
//! };
//! let mut state = ViewportState::new(Size::new(800.0, 400.0), ZoomConfig::default());
//! state.apply(&mut host);
//! assert_eq!(host.label, "100%");
//!
//! state.zoom_in(&mut host);
//! state.zoom_in(&mut host);
//! assert!((state.scale() - 1.44).abs() < 1e-9);
//!
//! state.fit(&mut host);
//! assert_eq!(host.label, "47%");
//! ```
//!
//! ## Sizing
//!
//! [`resolve_intrinsic_size`] picks, per axis, the first finite positive
//! value among the `viewBox`, the explicit `width`/`height` attributes, the
//! measured box, and finally [`ZoomConfig::fallback_size`]. A measured box
//! can be zero before layout settles, which is why it ranks below the
//! authored hints.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod sizing;
mod state;
mod zoom;

pub use config::ZoomConfig;
pub use sizing::{SizeHints, parse_length, parse_view_box, resolve_intrinsic_size};
pub use state::{ScrollHost, ViewportState};
pub use zoom::{anchor_fraction, anchored_scroll, centered_scroll, fit_scale};
