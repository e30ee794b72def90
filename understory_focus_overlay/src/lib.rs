// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus Overlay: show one element full-screen, then put it back.
//!
//! Focus mode lifts a single *wrapper* node out of the document flow into a
//! full-screen overlay so it can use the whole window, and on exit restores
//! it to exactly where it was.
//!
//! - [`FocusController`] is the state machine. It is meant to be a
//!   process-wide singleton: there is never more than one active session,
//!   one overlay, or one set of global listeners.
//! - [`FocusDocument`] is the host seam. It abstracts the handful of tree
//!   operations the controller needs, which keeps the controller testable
//!   without a browser.
//!
//! Transitions:
//!
//! | From | Request | To | Result |
//! |---|---|---|---|
//! | Inactive | `enter(W)` / `toggle(W)` | Active(W) | [`FocusTransition::Entered`] |
//! | Active(W) | `toggle(W)` / `exit` | Inactive | [`FocusTransition::Exited`] |
//! | Active(W) | `enter(W)` | Active(W) | [`FocusTransition::Unchanged`] |
//! | Active(W) | `enter(V)` / `toggle(V)` | Active(V) | [`FocusTransition::Switched`] |
//! | any | `enter(X)`, X detached | Inactive | [`FocusTransition::Declined`] |
//!
//! On exit the wrapper goes back before its recorded next sibling if that
//! sibling still belongs to the recorded parent, otherwise to the end of that
//! parent. If the parent itself has left the document, the wrapper is not
//! reattached.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod document;

pub use controller::{DEFAULT_HINT, DeclineReason, FocusController, FocusTransition};
pub use document::FocusDocument;
