// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus mode against an in-memory node tree.

use proptest::prelude::*;
use understory_focus_overlay::{
    DEFAULT_HINT, DeclineReason, FocusController, FocusDocument, FocusTransition,
};

const ROOT: usize = 0;
const BODY: usize = 1;

#[derive(Debug, Default)]
struct Node {
    parent: Option<usize>,
    children: Vec<usize>,
    focus_mark: bool,
    text: String,
}

/// Arena document. Node 0 is the root, node 1 is `<body>`; targets are
/// wrapper node ids.
#[derive(Debug)]
struct MockDocument {
    nodes: Vec<Node>,
    body_mark: bool,
    control_focused: Vec<usize>,
    live_listener_sets: usize,
    listener_installs: usize,
    scheduled_fits: Vec<usize>,
    refuse_overlays: bool,
}

impl MockDocument {
    fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body_mark: false,
            control_focused: Vec::new(),
            live_listener_sets: 0,
            listener_installs: 0,
            scheduled_fits: Vec::new(),
            refuse_overlays: false,
        };
        doc.nodes.push(Node::default());
        let body = doc.alloc();
        doc.attach(ROOT, body);
        doc
    }

    fn alloc(&mut self) -> usize {
        self.nodes.push(Node::default());
        self.nodes.len() - 1
    }

    fn child_of(&mut self, parent: usize) -> usize {
        let id = self.alloc();
        self.attach(parent, id);
        id
    }

    fn detach(&mut self, node: usize) {
        if let Some(parent) = self.nodes[node].parent.take() {
            self.nodes[parent].children.retain(|c| *c != node);
        }
    }

    fn attach(&mut self, parent: usize, node: usize) {
        self.detach(node);
        self.nodes[parent].children.push(node);
        self.nodes[node].parent = Some(parent);
    }

    fn children(&self, node: usize) -> &[usize] {
        &self.nodes[node].children
    }

    fn overlays(&self) -> usize {
        self.children(BODY)
            .iter()
            .filter(|c| self.nodes[**c].text == DEFAULT_HINT)
            .count()
    }
}

impl FocusDocument for MockDocument {
    type Node = usize;
    type Target = usize;
    type Overlay = usize;
    type Listeners = usize;

    fn wrapper(&self, target: &usize) -> usize {
        *target
    }

    fn parent(&self, node: &usize) -> Option<usize> {
        self.nodes[*node].parent
    }

    fn next_sibling(&self, node: &usize) -> Option<usize> {
        let parent = self.nodes[*node].parent?;
        let siblings = &self.nodes[parent].children;
        let index = siblings.iter().position(|c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn is_connected(&self, node: &usize) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == ROOT {
                return true;
            }
            current = self.nodes[id].parent;
        }
        false
    }

    fn create_overlay(&mut self, hint: &str) -> Option<usize> {
        if self.refuse_overlays {
            return None;
        }
        let overlay = self.alloc();
        self.nodes[overlay].text = hint.to_owned();
        Some(overlay)
    }

    fn mount_overlay(&mut self, overlay: &usize, wrapper: &usize) {
        self.attach(BODY, *overlay);
        self.attach(*overlay, *wrapper);
    }

    fn remove_overlay(&mut self, overlay: usize) {
        self.detach(overlay);
    }

    fn insert_before(&mut self, parent: &usize, node: &usize, reference: &usize) {
        self.detach(*node);
        let children = &mut self.nodes[*parent].children;
        let index = children
            .iter()
            .position(|c| c == reference)
            .unwrap_or(children.len());
        children.insert(index, *node);
        self.nodes[*node].parent = Some(*parent);
    }

    fn append_child(&mut self, parent: &usize, node: &usize) {
        self.attach(*parent, *node);
    }

    fn set_focus_marks(&mut self, wrapper: &usize, focused: bool) {
        self.body_mark = focused;
        self.nodes[*wrapper].focus_mark = focused;
    }

    fn set_control_state(&mut self, target: &usize, focused: bool) {
        if focused {
            self.control_focused.push(*target);
        } else {
            self.control_focused.retain(|t| t != target);
        }
    }

    fn install_listeners(&mut self, _overlay: &usize, _target: &usize) -> usize {
        self.live_listener_sets += 1;
        self.listener_installs += 1;
        self.listener_installs
    }

    fn release_listeners(&mut self, _listeners: usize) {
        self.live_listener_sets -= 1;
    }

    fn schedule_fit(&mut self, target: &usize) {
        self.scheduled_fits.push(*target);
    }
}

/// `<body><section>[before, W1, after]</section><section>[W2]</section></body>`
fn fixture() -> (MockDocument, usize, usize, usize, usize) {
    let mut doc = MockDocument::new();
    let section = doc.child_of(BODY);
    let _before = doc.child_of(section);
    let w1 = doc.child_of(section);
    let after = doc.child_of(section);
    let other = doc.child_of(BODY);
    let w2 = doc.child_of(other);
    (doc, section, w1, after, w2)
}

#[test]
fn enter_moves_wrapper_into_overlay() {
    let (mut doc, section, w1, _, _) = fixture();
    let mut focus = FocusController::<MockDocument>::default();

    assert_eq!(focus.enter(&mut doc, &w1), FocusTransition::Entered);
    let overlay = doc.parent(&w1).unwrap();
    assert_eq!(doc.parent(&overlay), Some(BODY));
    assert_eq!(doc.nodes[overlay].text, DEFAULT_HINT);
    assert!(!doc.children(section).contains(&w1));
    assert!(doc.body_mark);
    assert!(doc.nodes[w1].focus_mark);
    assert_eq!(doc.control_focused, vec![w1]);
    assert_eq!(doc.live_listener_sets, 1);
    assert_eq!(doc.scheduled_fits, vec![w1]);
    assert!(focus.is_focused(&w1));
    assert_eq!(focus.focused_target(), Some(&w1));
}

#[test]
fn exit_restores_exact_position() {
    let (mut doc, section, w1, _, _) = fixture();
    let before = doc.children(section).to_vec();
    let mut focus = FocusController::<MockDocument>::default();

    focus.enter(&mut doc, &w1);
    assert_eq!(focus.exit(&mut doc), FocusTransition::Exited);

    assert_eq!(doc.children(section), before.as_slice());
    assert_eq!(doc.overlays(), 0);
    assert!(!doc.body_mark);
    assert!(!doc.nodes[w1].focus_mark);
    assert!(doc.control_focused.is_empty());
    assert_eq!(doc.live_listener_sets, 0);
    assert!(!focus.is_active());
    assert_eq!(focus.exit(&mut doc), FocusTransition::Unchanged);
}

#[test]
fn toggle_same_target_exits() {
    let (mut doc, _, w1, _, _) = fixture();
    let mut focus = FocusController::<MockDocument>::default();
    assert_eq!(focus.toggle(&mut doc, &w1), FocusTransition::Entered);
    assert_eq!(focus.enter(&mut doc, &w1), FocusTransition::Unchanged);
    assert_eq!(doc.live_listener_sets, 1);
    assert_eq!(focus.toggle(&mut doc, &w1), FocusTransition::Exited);
    assert!(!focus.is_active());
}

#[test]
fn switching_tears_down_previous_session() {
    let (mut doc, section, w1, _, w2) = fixture();
    let before = doc.children(section).to_vec();
    let mut focus = FocusController::<MockDocument>::default();

    focus.enter(&mut doc, &w1);
    assert_eq!(focus.toggle(&mut doc, &w2), FocusTransition::Switched);

    assert_eq!(doc.children(section), before.as_slice());
    assert_eq!(doc.overlays(), 1);
    assert_eq!(doc.live_listener_sets, 1);
    assert_eq!(doc.control_focused, vec![w2]);
    assert!(!doc.nodes[w1].focus_mark);
    assert!(focus.is_focused(&w2));
    assert!(!focus.is_focused(&w1));
}

#[test]
fn removed_sibling_appends_to_parent() {
    let (mut doc, section, w1, after, _) = fixture();
    let mut focus = FocusController::<MockDocument>::default();

    focus.enter(&mut doc, &w1);
    doc.detach(after);
    focus.exit(&mut doc);

    assert_eq!(doc.children(section).last(), Some(&w1));
}

#[test]
fn sibling_moved_elsewhere_appends_to_parent() {
    let (mut doc, section, w1, after, w2) = fixture();
    let mut focus = FocusController::<MockDocument>::default();

    focus.enter(&mut doc, &w1);
    let w2_parent = doc.parent(&w2).unwrap();
    doc.attach(w2_parent, after);
    focus.exit(&mut doc);

    assert_eq!(doc.children(section).last(), Some(&w1));
    assert_eq!(doc.parent(&after), Some(w2_parent));
}

#[test]
fn detached_parent_leaves_wrapper_undocked() {
    let (mut doc, section, w1, _, _) = fixture();
    let mut focus = FocusController::<MockDocument>::default();

    focus.enter(&mut doc, &w1);
    doc.detach(section);
    assert_eq!(focus.exit(&mut doc), FocusTransition::Exited);

    assert!(!doc.children(section).contains(&w1));
    assert!(!doc.is_connected(&w1));
    assert_eq!(doc.overlays(), 0);
    assert_eq!(doc.live_listener_sets, 0);
}

#[test]
fn parentless_wrapper_is_declined() {
    let (mut doc, _, w1, _, _) = fixture();
    let orphan = doc.alloc();
    let mut focus = FocusController::<MockDocument>::default();

    assert_eq!(
        focus.enter(&mut doc, &orphan),
        FocusTransition::Declined(DeclineReason::NoParent)
    );
    assert!(!focus.is_active());
    assert_eq!(doc.live_listener_sets, 0);

    // A competing request that is declined still ends the old session.
    focus.enter(&mut doc, &w1);
    assert_eq!(
        focus.toggle(&mut doc, &orphan),
        FocusTransition::Declined(DeclineReason::NoParent)
    );
    assert!(!focus.is_active());
    assert_eq!(doc.overlays(), 0);
}

#[test]
fn overlay_failure_is_declined_cleanly() {
    let (mut doc, section, w1, _, _) = fixture();
    let before = doc.children(section).to_vec();
    doc.refuse_overlays = true;
    let mut focus = FocusController::<MockDocument>::default();

    assert_eq!(
        focus.enter(&mut doc, &w1),
        FocusTransition::Declined(DeclineReason::OverlayUnavailable)
    );
    assert_eq!(doc.children(section), before.as_slice());
    assert_eq!(doc.live_listener_sets, 0);
    assert!(!doc.body_mark);
}

#[test]
fn custom_hint_is_shown() {
    let (mut doc, _, w1, _, _) = fixture();
    let mut focus = FocusController::<MockDocument>::new("Esc to leave");
    focus.enter(&mut doc, &w1);
    let overlay = doc.parent(&w1).unwrap();
    assert_eq!(doc.nodes[overlay].text, "Esc to leave");
    assert_eq!(focus.hint(), "Esc to leave");
}

proptest! {
    #[test]
    fn any_request_sequence_keeps_one_session(
        ops in prop::collection::vec((0_u8..3, 0_usize..4), 0..40),
    ) {
        let mut doc = MockDocument::new();
        let mut wrappers = Vec::new();
        let mut sections = Vec::new();
        for _ in 0..4 {
            let section = doc.child_of(BODY);
            doc.child_of(section);
            wrappers.push(doc.child_of(section));
            doc.child_of(section);
            sections.push(section);
        }
        let layout: Vec<Vec<usize>> = sections.iter().map(|s| doc.children(*s).to_vec()).collect();
        let mut focus = FocusController::<MockDocument>::default();

        for (op, index) in ops {
            let target = wrappers[index];
            match op {
                0 => { focus.enter(&mut doc, &target); }
                1 => { focus.toggle(&mut doc, &target); }
                _ => { focus.exit(&mut doc); }
            }
            let active = usize::from(focus.is_active());
            prop_assert_eq!(doc.overlays(), active);
            prop_assert_eq!(doc.live_listener_sets, active);
            prop_assert_eq!(doc.control_focused.len(), active);
            prop_assert_eq!(doc.body_mark, focus.is_active());
        }

        focus.exit(&mut doc);
        for (section, children) in sections.iter().zip(&layout) {
            prop_assert_eq!(doc.children(*section), children.as_slice());
        }
    }
}
