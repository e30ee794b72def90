// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Pan Gesture: drag-to-scroll state for a scroll viewport.
//!
//! This crate turns a pointer-down / pointer-move / pointer-up sequence into
//! scroll offsets for a scrollable viewport, while keeping ordinary clicks
//! working:
//!
//! - A gesture only becomes a drag once the pointer has moved at least
//!   [`PanConfig::drag_threshold`] pixels from where it went down. Jitter
//!   below that never scrolls and never swallows the click.
//! - Once dragging, the viewport scrolls by the inverse of the pointer
//!   displacement, measured from the scroll offset at pointer-down.
//! - Releasing a real drag arms a one-shot flag so the synthetic click that
//!   follows can be swallowed.
//! - Pointer-down on interactive content (links, buttons, form controls, ...)
//!   never starts a gesture; see [`target`].
//!
//! The controller is headless: it consumes plain values and returns a
//! [`PanOutcome`] describing what the host should do (scroll, acquire or
//! release pointer capture, toggle a dragging indicator, prevent default).
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_pan_gesture::{CaptureCommand, PanConfig, PanController, PointerDown};
//!
//! let mut pan = PanController::new(PanConfig::default());
//! let scroll = Vec2::new(50.0, 50.0);
//!
//! assert!(pan.pointer_down(PointerDown::primary(1, Point::new(100.0, 100.0)), scroll));
//!
//! // Small jitter: nothing happens.
//! assert!(pan.pointer_move(1, Point::new(102.0, 101.0)).is_none());
//!
//! // Past the threshold: capture, then scroll.
//! let out = pan.pointer_move(1, Point::new(110.0, 110.0));
//! assert_eq!(out.capture, Some(CaptureCommand::Acquire { pointer_id: 1 }));
//! assert_eq!(out.scroll_to, Some(Vec2::new(40.0, 40.0)));
//!
//! let out = pan.pointer_up(1);
//! assert_eq!(out.capture, Some(CaptureCommand::Release { pointer_id: 1 }));
//! assert!(pan.take_click_suppression());
//! assert!(!pan.take_click_suppression());
//! ```
//!
//! This crate is `no_std` compatible.

#![no_std]

mod controller;
mod session;
pub mod target;

pub use controller::{CaptureCommand, PanConfig, PanController, PanOutcome, PointerDown};
pub use session::DragSession;
