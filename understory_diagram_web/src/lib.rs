// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser bindings that make rendered SVG diagrams interactive.
//!
//! For every diagram handed to `attachInteraction`, this crate:
//!
//! - prepends a toolbar (zoom out, zoom in, percentage, reset, focus),
//! - zooms around the pointer on Ctrl/Meta + wheel,
//! - pans by dragging, without breaking clicks on links or buttons inside
//!   the diagram,
//! - offers a full-screen focus mode, entered from the toolbar or by
//!   double-clicking the diagram.
//!
//! The behavior lives in three headless crates:
//! [`understory_scroll_view`] (sizing, zoom, fit),
//! [`understory_pan_gesture`] (drag/click disambiguation) and
//! [`understory_focus_overlay`] (focus mode state machine). This crate
//! implements their host traits on `web-sys` and exports the entry points
//! with `wasm-bindgen`:
//!
//! | JavaScript | Effect |
//! |---|---|
//! | `attachInteraction(wrapper, viewport, svg)` | Make one diagram interactive. |
//! | `toggleFocusMode(wrapper)` | Toggle focus mode on an attached diagram. |
//! | `exitFocusMode()` | Leave focus mode, if active. |
//! | `installPreviewDoubleClickGuard()` | Route double-clicks (once per page). |
//! | `scheduleRender(callback)` | Coalesced render pass on the next frame. |
//! | `beginRenderPass()` | A fresh render pass is starting. |
//! | `configure(json)` | Replace the [`InteractionConfig`]. |
//!
//! The DOM code is only compiled for `wasm32`; the input routing, toolbar
//! vocabulary, config and render gating are plain Rust and tested natively.
//!
//! Logging goes through `tracing` under the `understory_diagram_web` target;
//! no subscriber is installed.

mod config;
mod error;
mod input;
mod schedule;
pub mod toolbar;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod diagram;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod focus;
#[cfg(target_arch = "wasm32")]
mod runtime;

pub use config::InteractionConfig;
pub use error::{Error, Result};
pub use input::{
    DoubleClickRoute, DoubleClickTarget, is_exit_key, route_double_click, viewport_anchor,
    wheel_zooms,
};
pub use schedule::RenderGate;

#[cfg(target_arch = "wasm32")]
pub use api::{
    attach_interaction, begin_render_pass, configure, exit_focus_mode,
    install_preview_double_click_guard, schedule_render, toggle_focus_mode,
};
