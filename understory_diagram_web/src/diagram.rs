// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One interactive diagram: toolbar, zoom state, pan gesture and the
//! listeners that connect them to the DOM.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use kurbo::Point;
use understory_pan_gesture::{CaptureCommand, PanController, PanOutcome, PointerDown};
use understory_scroll_view::{ScrollHost, ViewportState};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node, PointerEvent, SvgElement, WheelEvent};

use crate::config::InteractionConfig;
use crate::dom::{self, WebView};
use crate::error::{DomResultExt, Result};
use crate::input;
use crate::runtime;
use crate::toolbar::{self, FOCUS_BUTTON_CLASS, ToolbarControl};

pub(crate) struct Diagram {
    wrapper: Element,
    viewport: HtmlElement,
    svg: SvgElement,
    label: HtmlElement,
    focus_button: Option<HtmlElement>,
    state: RefCell<ViewportState>,
    pan: RefCell<PanController>,
    listeners: RefCell<Vec<EventListener>>,
}

impl core::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Diagram")
            .field("state", &self.state)
            .field("pan", &self.pan)
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Diagram {
    /// Builds the toolbar, sizes the SVG and installs the per-diagram
    /// listeners.
    pub(crate) fn attach(
        document: &Document,
        wrapper: Element,
        viewport: HtmlElement,
        svg: SvgElement,
        config: &InteractionConfig,
    ) -> Result<Rc<Self>> {
        let state = ViewportState::from_hints(&dom::size_hints(&svg), config.zoom);

        let bar = dom::create_html(document, "div", toolbar::TOOLBAR_CLASS)?;
        let label = dom::create_html(document, "span", toolbar::SCALE_CLASS)?;
        let mut buttons = Vec::new();
        let mut focus_button = None;
        for control in toolbar::controls(config.focus_mode) {
            if !control.is_button() {
                bar.append_child(&label).dom("appendChild")?;
                continue;
            }
            let button = dom::create_html(document, "button", toolbar::BUTTON_CLASS)?;
            button.set_attribute("type", "button").dom("setAttribute")?;
            button.set_text_content(control.text());
            if let Some(title) = control.title() {
                button.set_title(title);
            }
            if control == ToolbarControl::Focus {
                button
                    .class_list()
                    .add_1(FOCUS_BUTTON_CLASS)
                    .dom("classList.add")?;
                focus_button = Some(button.clone());
            }
            bar.append_child(&button).dom("appendChild")?;
            buttons.push((control, button));
        }
        wrapper.prepend_with_node_1(&bar).dom("prepend")?;

        let diagram = Rc::new(Self {
            wrapper,
            viewport,
            svg,
            label,
            focus_button,
            state: RefCell::new(state),
            pan: RefCell::new(PanController::new(config.pan)),
            listeners: RefCell::new(Vec::new()),
        });
        diagram.state.borrow().apply(&mut diagram.view());
        diagram.install_listeners(buttons);

        tracing::debug!(
            target: "understory_diagram_web",
            width = diagram.state.borrow().intrinsic_size().width,
            height = diagram.state.borrow().intrinsic_size().height,
            "interaction attached"
        );
        Ok(diagram)
    }

    pub(crate) fn wrapper(&self) -> &Element {
        &self.wrapper
    }

    pub(crate) fn wrapper_node(&self) -> Node {
        self.wrapper.clone().into()
    }

    pub(crate) fn viewport(&self) -> &HtmlElement {
        &self.viewport
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.wrapper.is_connected()
    }

    fn view(&self) -> WebView<'_> {
        WebView {
            viewport: &self.viewport,
            svg: &self.svg,
            label: &self.label,
        }
    }

    pub(crate) fn zoom_in(&self) {
        self.state.borrow_mut().zoom_in(&mut self.view());
    }

    pub(crate) fn zoom_out(&self) {
        self.state.borrow_mut().zoom_out(&mut self.view());
    }

    pub(crate) fn reset(&self) {
        self.state.borrow_mut().reset(&mut self.view());
    }

    pub(crate) fn fit(&self) {
        self.state.borrow_mut().fit(&mut self.view());
    }

    /// Relabels the focus toggle, if this diagram has one.
    pub(crate) fn set_focus_control(&self, focused: bool) {
        if let Some(button) = &self.focus_button {
            let (text, title) = toolbar::focus_labels(focused);
            button.set_text_content(Some(text));
            button.set_title(title);
        }
    }

    fn apply_pan(&self, outcome: PanOutcome, event: &Event) {
        if let Some(on) = outcome.dragging_indicator {
            dom::set_class(&self.viewport, toolbar::DRAGGING_CLASS, on);
        }
        match outcome.capture {
            Some(CaptureCommand::Acquire { pointer_id }) => {
                if let Err(err) = self
                    .viewport
                    .set_pointer_capture(pointer_id)
                    .dom("setPointerCapture")
                {
                    tracing::debug!(
                        target: "understory_diagram_web",
                        pointer_id,
                        %err,
                        "pointer capture refused"
                    );
                }
            }
            Some(CaptureCommand::Release { pointer_id }) => {
                if self.viewport.has_pointer_capture(pointer_id)
                    && let Err(err) = self
                        .viewport
                        .release_pointer_capture(pointer_id)
                        .dom("releasePointerCapture")
                {
                    tracing::debug!(
                        target: "understory_diagram_web",
                        pointer_id,
                        %err,
                        "pointer release failed"
                    );
                }
            }
            None => {}
        }
        if outcome.prevent_default {
            event.prevent_default();
        }
        if let Some(scroll) = outcome.scroll_to {
            self.view().set_scroll_offset(scroll);
        }
    }

    fn install_listeners(self: &Rc<Self>, buttons: Vec<(ToolbarControl, HtmlElement)>) {
        let mut listeners = Vec::new();

        for (control, button) in buttons {
            let diagram = Rc::downgrade(self);
            listeners.push(EventListener::new(&button, "click", move |_event| {
                let Some(diagram) = diagram.upgrade() else {
                    return;
                };
                match control {
                    ToolbarControl::ZoomOut => diagram.zoom_out(),
                    ToolbarControl::ZoomIn => diagram.zoom_in(),
                    ToolbarControl::Reset => diagram.reset(),
                    ToolbarControl::Focus => runtime::toggle_focus(&diagram),
                    ToolbarControl::ScaleLabel => {}
                }
            }));
        }

        let prevent_default = EventListenerOptions::enable_prevent_default();
        let passive = EventListenerOptions::default();

        listeners.push(self.listen("wheel", prevent_default, |diagram, event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            if !input::wheel_zooms(event.ctrl_key(), event.meta_key()) {
                return;
            }
            event.prevent_default();
            let rect = diagram.viewport.get_bounding_client_rect();
            let origin = Point::new(rect.left(), rect.top());
            let anchor = input::viewport_anchor(dom::client_point(event), origin);
            diagram
                .state
                .borrow_mut()
                .zoom_by_wheel(&mut diagram.view(), event.delta_y(), anchor);
        }));

        listeners.push(self.listen("pointerdown", passive, |diagram, event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let down = PointerDown {
                pointer_id: event.pointer_id(),
                position: dom::client_point(event),
                button: event.button(),
                default_prevented: event.default_prevented(),
                interactive_target: dom::is_interactive_target(event.target(), &diagram.viewport),
            };
            let scroll = diagram.view().scroll_offset();
            if diagram.pan.borrow_mut().pointer_down(down, scroll) {
                // A replaced session may have left its indicator on.
                dom::set_class(&diagram.viewport, toolbar::DRAGGING_CLASS, false);
            }
        }));

        listeners.push(self.listen("pointermove", prevent_default, |diagram, event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let outcome = diagram
                .pan
                .borrow_mut()
                .pointer_move(pointer.pointer_id(), dom::client_point(pointer));
            diagram.apply_pan(outcome, event);
        }));

        listeners.push(self.listen("pointerup", passive, |diagram, event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let outcome = diagram.pan.borrow_mut().pointer_up(pointer.pointer_id());
            diagram.apply_pan(outcome, event);
        }));

        listeners.push(self.listen("pointercancel", passive, |diagram, event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let outcome = diagram.pan.borrow_mut().pointer_cancel(pointer.pointer_id());
            diagram.apply_pan(outcome, event);
        }));

        listeners.push(self.listen("pointerleave", passive, |diagram, event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let outcome = diagram
                .pan
                .borrow_mut()
                .pointer_leave(pointer.pointer_id(), pointer.buttons());
            diagram.apply_pan(outcome, event);
        }));

        let capture = EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: false,
        };
        listeners.push(self.listen("click", capture, |diagram, event| {
            if diagram.pan.borrow_mut().take_click_suppression() {
                event.prevent_default();
                event.stop_propagation();
            }
        }));

        *self.listeners.borrow_mut() = listeners;
    }

    /// Listens on the viewport. The handler only runs while the diagram is
    /// still alive.
    fn listen(
        self: &Rc<Self>,
        event_type: &'static str,
        options: EventListenerOptions,
        handler: impl Fn(&Self, &Event) + 'static,
    ) -> EventListener {
        let diagram: Weak<Self> = Rc::downgrade(self);
        EventListener::new_with_options(&self.viewport, event_type, options, move |event| {
            if let Some(diagram) = diagram.upgrade() {
                handler(&diagram, event);
            }
        })
    }
}
