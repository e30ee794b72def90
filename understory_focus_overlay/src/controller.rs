// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use crate::document::FocusDocument;

/// Hint shown on the overlay unless the caller supplies another.
pub const DEFAULT_HINT: &str = "Double-click or press Esc to exit focus mode";

/// Why an `enter` request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclineReason {
    /// The wrapper has no parent, so there is no position to restore later.
    NoParent,
    /// The document could not create an overlay.
    OverlayUnavailable,
}

/// Result of a focus request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTransition {
    /// Inactive → Active.
    Entered,
    /// Active on one target → Active on another; the old session was torn
    /// down first.
    Switched,
    /// Active → Inactive.
    Exited,
    /// Nothing to do.
    Unchanged,
    /// The request was refused. Any previous session has already ended.
    Declined(DeclineReason),
}

struct FocusSession<D: FocusDocument> {
    target: D::Target,
    wrapper: D::Node,
    overlay: D::Overlay,
    origin_parent: D::Node,
    origin_next: Option<D::Node>,
    listeners: D::Listeners,
}

/// Process-wide focus mode.
///
/// At most one session exists. Entering on a new target tears down the
/// previous session completely before the new one begins, so the document
/// never holds two overlays or two listener sets.
pub struct FocusController<D: FocusDocument> {
    hint: String,
    session: Option<FocusSession<D>>,
}

impl<D: FocusDocument> fmt::Debug for FocusController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusController")
            .field("hint", &self.hint)
            .field("active", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl<D: FocusDocument> Default for FocusController<D> {
    fn default() -> Self {
        Self::new(DEFAULT_HINT)
    }
}

impl<D: FocusDocument> FocusController<D> {
    /// Creates an inactive controller whose overlays show `hint`.
    #[must_use]
    pub fn new(hint: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            session: None,
        }
    }

    /// Overlay hint text.
    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Returns `true` if the active session is focused on `wrapper`.
    ///
    /// Deferred work (fit after layout, resize handling) checks this before
    /// touching a target, so callbacks outliving their session do nothing.
    #[must_use]
    pub fn is_focused(&self, wrapper: &D::Node) -> bool {
        self.session.as_ref().is_some_and(|s| s.wrapper == *wrapper)
    }

    /// The focused target, if any.
    #[must_use]
    pub fn focused_target(&self) -> Option<&D::Target> {
        self.session.as_ref().map(|s| &s.target)
    }

    /// Focuses `target`.
    ///
    /// Entering the already focused target does nothing. Entering another
    /// target ends the current session first.
    pub fn enter(&mut self, doc: &mut D, target: &D::Target) -> FocusTransition {
        let wrapper = doc.wrapper(target);
        if self.is_focused(&wrapper) {
            return FocusTransition::Unchanged;
        }
        let switched = self.teardown(doc);

        let Some(origin_parent) = doc.parent(&wrapper) else {
            tracing::debug!(
                target: "understory_focus_overlay",
                "focus declined: wrapper has no parent"
            );
            return FocusTransition::Declined(DeclineReason::NoParent);
        };
        let origin_next = doc.next_sibling(&wrapper);

        let Some(overlay) = doc.create_overlay(&self.hint) else {
            tracing::warn!(target: "understory_focus_overlay", "focus declined: no overlay");
            return FocusTransition::Declined(DeclineReason::OverlayUnavailable);
        };
        let listeners = doc.install_listeners(&overlay, target);
        doc.set_focus_marks(&wrapper, true);
        doc.set_control_state(target, true);
        doc.mount_overlay(&overlay, &wrapper);

        self.session = Some(FocusSession {
            target: target.clone(),
            wrapper,
            overlay,
            origin_parent,
            origin_next,
            listeners,
        });
        doc.schedule_fit(target);

        tracing::debug!(target: "understory_focus_overlay", switched, "focus mode entered");
        if switched {
            FocusTransition::Switched
        } else {
            FocusTransition::Entered
        }
    }

    /// Exits if `target` is focused, otherwise focuses it.
    pub fn toggle(&mut self, doc: &mut D, target: &D::Target) -> FocusTransition {
        if self.is_focused(&doc.wrapper(target)) {
            self.exit(doc)
        } else {
            self.enter(doc, target)
        }
    }

    /// Ends the active session, if any.
    pub fn exit(&mut self, doc: &mut D) -> FocusTransition {
        if self.teardown(doc) {
            FocusTransition::Exited
        } else {
            FocusTransition::Unchanged
        }
    }

    fn teardown(&mut self, doc: &mut D) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        let FocusSession {
            target,
            wrapper,
            overlay,
            origin_parent,
            origin_next,
            listeners,
        } = session;

        doc.release_listeners(listeners);
        doc.set_focus_marks(&wrapper, false);
        doc.set_control_state(&target, false);

        if doc.is_connected(&origin_parent) {
            match origin_next {
                Some(next) if doc.parent(&next).as_ref() == Some(&origin_parent) => {
                    doc.insert_before(&origin_parent, &wrapper, &next);
                }
                _ => doc.append_child(&origin_parent, &wrapper),
            }
        } else {
            tracing::debug!(
                target: "understory_focus_overlay",
                "original parent detached; wrapper not restored"
            );
        }

        doc.remove_overlay(overlay);
        tracing::debug!(target: "understory_focus_overlay", "focus mode exited");
        true
    }
}
