// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`FocusDocument`] over the live DOM.

use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{AnimationFrame, request_animation_frame};
use understory_focus_overlay::FocusDocument;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Node, Window};

use crate::diagram::Diagram;
use crate::dom;
use crate::error::{DomResultExt, Result};
use crate::input;
use crate::runtime;
use crate::toolbar::{BODY_FOCUS_CLASS, HINT_CLASS, OVERLAY_CLASS, WRAPPER_FOCUS_CLASS};

pub(crate) struct WebDocument {
    window: Window,
    document: Document,
    body: HtmlElement,
    fit_frame: Option<AnimationFrame>,
}

impl core::fmt::Debug for WebDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebDocument")
            .field("fit_pending", &self.fit_frame.is_some())
            .finish_non_exhaustive()
    }
}

impl WebDocument {
    pub(crate) fn new() -> Result<Self> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let body = dom::body(&document)?;
        Ok(Self {
            window,
            document,
            body,
            fit_frame: None,
        })
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    /// Drops the pending deferred fit, if any.
    pub(crate) fn clear_fit_frame(&mut self) {
        self.fit_frame = None;
    }

    fn build_overlay(&self, hint: &str) -> Result<HtmlElement> {
        let overlay = dom::create_html(&self.document, "div", OVERLAY_CLASS)?;
        let text = dom::create_html(&self.document, "div", HINT_CLASS)?;
        text.set_text_content(Some(hint));
        overlay.append_child(&text).dom("appendChild")?;
        Ok(overlay)
    }
}

fn log_dom(result: Result<Node>) {
    if let Err(err) = result {
        tracing::warn!(target: "understory_diagram_web", %err, "focus DOM update failed");
    }
}

impl FocusDocument for WebDocument {
    type Node = Node;
    type Target = Rc<Diagram>;
    type Overlay = HtmlElement;
    type Listeners = Vec<EventListener>;

    fn wrapper(&self, target: &Rc<Diagram>) -> Node {
        target.wrapper_node()
    }

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn next_sibling(&self, node: &Node) -> Option<Node> {
        node.next_sibling()
    }

    fn is_connected(&self, node: &Node) -> bool {
        node.is_connected()
    }

    fn create_overlay(&mut self, hint: &str) -> Option<HtmlElement> {
        self.build_overlay(hint)
            .inspect_err(|err| {
                tracing::warn!(
                    target: "understory_diagram_web",
                    %err,
                    "could not build focus overlay"
                );
            })
            .ok()
    }

    fn mount_overlay(&mut self, overlay: &HtmlElement, wrapper: &Node) {
        log_dom(self.body.append_child(overlay).dom("appendChild"));
        log_dom(overlay.append_child(wrapper).dom("appendChild"));
    }

    fn remove_overlay(&mut self, overlay: HtmlElement) {
        overlay.remove();
    }

    fn insert_before(&mut self, parent: &Node, node: &Node, reference: &Node) {
        log_dom(parent.insert_before(node, Some(reference)).dom("insertBefore"));
    }

    fn append_child(&mut self, parent: &Node, node: &Node) {
        log_dom(parent.append_child(node).dom("appendChild"));
    }

    fn set_focus_marks(&mut self, wrapper: &Node, focused: bool) {
        dom::set_class(&self.body, BODY_FOCUS_CLASS, focused);
        if let Some(wrapper) = wrapper.dyn_ref::<Element>() {
            dom::set_class(wrapper, WRAPPER_FOCUS_CLASS, focused);
        }
    }

    fn set_control_state(&mut self, target: &Rc<Diagram>, focused: bool) {
        target.set_focus_control(focused);
    }

    fn install_listeners(
        &mut self,
        overlay: &HtmlElement,
        target: &Rc<Diagram>,
    ) -> Vec<EventListener> {
        let keydown = EventListener::new_with_options(
            &self.window,
            "keydown",
            EventListenerOptions {
                phase: EventListenerPhase::Capture,
                passive: false,
            },
            |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if input::is_exit_key(&key.key()) {
                    event.prevent_default();
                    runtime::exit_focus();
                }
            },
        );

        let diagram = Rc::downgrade(target);
        let resize = EventListener::new(&self.window, "resize", move |_event| {
            if let Some(diagram) = diagram.upgrade() {
                runtime::fit_if_focused(&diagram);
            }
        });

        let background: JsValue = overlay.clone().into();
        let overlay_click = EventListener::new(overlay, "click", move |event| {
            let on_background = event
                .target()
                .is_some_and(|target| JsValue::from(target) == background);
            if on_background {
                runtime::exit_focus();
            }
        });

        vec![keydown, resize, overlay_click]
    }

    fn release_listeners(&mut self, listeners: Vec<EventListener>) {
        drop(listeners);
    }

    fn schedule_fit(&mut self, target: &Rc<Diagram>) {
        let diagram = Rc::downgrade(target);
        self.fit_frame = Some(request_animation_frame(move |_timestamp| {
            if let Some(diagram) = diagram.upgrade() {
                runtime::finish_deferred_fit(&diagram);
            }
        }));
    }
}
