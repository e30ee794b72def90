// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The document side of focus mode.
///
/// A focus session moves one *wrapper* node out of its place in the document
/// into a full-screen overlay, and later puts it back. Implementations map
/// these steps onto a real tree (the DOM) or a test double.
///
/// `Target` is whatever the caller uses to identify a focusable unit (for
/// example a per-diagram handle). Each target resolves to exactly one wrapper
/// node via [`FocusDocument::wrapper`].
pub trait FocusDocument {
    /// Node handle. Equality must be identity.
    type Node: Clone + PartialEq;
    /// Focusable unit handle.
    type Target: Clone;
    /// Overlay handle created for one session.
    type Overlay;
    /// Listener guard set installed for one session.
    type Listeners;

    /// The wrapper node that represents `target` in the document.
    fn wrapper(&self, target: &Self::Target) -> Self::Node;

    /// Current parent of `node`.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Current next sibling of `node`.
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node` is attached to the live document.
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Creates a detached overlay that shows `hint`, or `None` if the
    /// document cannot create one.
    fn create_overlay(&mut self, hint: &str) -> Option<Self::Overlay>;

    /// Attaches `overlay` to the document and moves `wrapper` into it.
    fn mount_overlay(&mut self, overlay: &Self::Overlay, wrapper: &Self::Node);

    /// Removes `overlay` (and anything still inside it) from the document.
    fn remove_overlay(&mut self, overlay: Self::Overlay);

    /// Moves `node` into `parent` just before `reference`.
    fn insert_before(&mut self, parent: &Self::Node, node: &Self::Node, reference: &Self::Node);

    /// Moves `node` to the end of `parent`.
    fn append_child(&mut self, parent: &Self::Node, node: &Self::Node);

    /// Adds or removes the focus marks on the document body and `wrapper`.
    fn set_focus_marks(&mut self, wrapper: &Self::Node, focused: bool);

    /// Relabels the focus control belonging to `target`.
    fn set_control_state(&mut self, target: &Self::Target, focused: bool);

    /// Installs the session's listeners: exit on Escape, re-fit on resize,
    /// exit on a click that lands on the overlay background itself.
    fn install_listeners(
        &mut self,
        overlay: &Self::Overlay,
        target: &Self::Target,
    ) -> Self::Listeners;

    /// Removes listeners previously returned by
    /// [`FocusDocument::install_listeners`].
    fn release_listeners(&mut self, listeners: Self::Listeners);

    /// Arranges for `target` to be fitted to the viewport once layout has
    /// settled. The callback must re-check that `target` is still focused.
    fn schedule_fit(&mut self, target: &Self::Target);
}
