// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide state: the diagram registry, focus mode, render gate and
//! the window-level double-click guard.
//!
//! Everything lives in one thread-local [`RefCell`]. Event handlers enter it
//! through [`with_runtime`], which fails with [`Error::Busy`] instead of
//! panicking if a handler is re-entered while the runtime is borrowed.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{AnimationFrame, request_animation_frame};
use understory_focus_overlay::{FocusController, FocusTransition};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, MouseEvent, SvgElement};

use crate::config::InteractionConfig;
use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::focus::WebDocument;
use crate::input::{DoubleClickRoute, DoubleClickTarget, route_double_click};
use crate::schedule::RenderGate;
use crate::toolbar::VIEWPORT_SELECTOR;

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Runs `f` against the runtime, creating it on first use.
pub(crate) fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> Result<R>) -> Result<R> {
    RUNTIME.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| Error::Busy)?;
        if slot.is_none() {
            *slot = Some(Runtime::new()?);
        }
        let Some(runtime) = slot.as_mut() else {
            return Err(Error::MissingWindow);
        };
        f(runtime)
    })
}

/// Logs a failed entry point; the caller degrades to a no-op.
pub(crate) fn log_failure<T>(op: &'static str, result: Result<T>) -> Option<T> {
    result
        .inspect_err(|err| {
            tracing::warn!(target: "understory_diagram_web", op, %err, "operation failed");
        })
        .ok()
}

pub(crate) fn toggle_focus(diagram: &Rc<Diagram>) {
    log_failure(
        "toggle focus",
        with_runtime(|rt| Ok(rt.toggle_focus(diagram))),
    );
}

pub(crate) fn exit_focus() {
    log_failure("exit focus", with_runtime(|rt| Ok(rt.exit_focus())));
}

pub(crate) fn fit_if_focused(diagram: &Rc<Diagram>) {
    log_failure(
        "fit focused diagram",
        with_runtime(|rt| {
            rt.fit_if_focused(diagram);
            Ok(())
        }),
    );
}

pub(crate) fn finish_deferred_fit(diagram: &Rc<Diagram>) {
    log_failure(
        "deferred fit",
        with_runtime(|rt| {
            rt.document.clear_fit_frame();
            rt.fit_if_focused(diagram);
            Ok(())
        }),
    );
}

fn run_render_pass(callback: &js_sys::Function) {
    log_failure(
        "start render pass",
        with_runtime(|rt| {
            rt.gate.begin_pass();
            rt.render_frame = None;
            Ok(())
        }),
    );
    if let Err(err) = callback.call0(&JsValue::NULL) {
        tracing::warn!(target: "understory_diagram_web", ?err, "render callback threw");
    }
}

pub(crate) struct Runtime {
    config: InteractionConfig,
    document: WebDocument,
    focus: FocusController<WebDocument>,
    diagrams: Vec<Rc<Diagram>>,
    gate: RenderGate,
    render_frame: Option<AnimationFrame>,
    double_click_guard: Option<EventListener>,
}

impl core::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("document", &self.document)
            .field("focus", &self.focus)
            .field("diagrams", &self.diagrams.len())
            .field("gate", &self.gate)
            .field("render_pending", &self.render_frame.is_some())
            .field("double_click_guard", &self.double_click_guard.is_some())
            .finish()
    }
}

impl Runtime {
    fn new() -> Result<Self> {
        let config = InteractionConfig::default();
        Ok(Self {
            focus: FocusController::new(config.focus_hint.clone()),
            config,
            document: WebDocument::new()?,
            diagrams: Vec::new(),
            gate: RenderGate::new(),
            render_frame: None,
            double_click_guard: None,
        })
    }

    /// Replaces the config. Diagrams attached earlier keep theirs.
    pub(crate) fn configure(&mut self, config: InteractionConfig) {
        self.exit_focus();
        self.focus = FocusController::new(config.focus_hint.clone());
        self.config = config;
        tracing::debug!(target: "understory_diagram_web", config = ?self.config, "config replaced");
    }

    pub(crate) fn attach(
        &mut self,
        wrapper: Element,
        viewport: Element,
        svg: Element,
    ) -> Result<()> {
        let viewport = viewport
            .dyn_into::<HtmlElement>()
            .map_err(|value| Error::dom("viewport is not an HTML element", &value.into()))?;
        let svg = svg
            .dyn_into::<SvgElement>()
            .map_err(|value| Error::dom("svg is not an SVG element", &value.into()))?;

        // Re-attaching a viewport replaces its old registration.
        let same_viewport: &Element = &viewport;
        self.diagrams.retain(|d| {
            let registered: &Element = d.viewport();
            registered != same_viewport
        });
        self.prune_detached();

        let diagram =
            Diagram::attach(self.document.document(), wrapper, viewport, svg, &self.config)?;
        self.diagrams.push(diagram);
        Ok(())
    }

    /// Releases diagrams whose wrapper has left the document.
    fn prune_detached(&mut self) -> usize {
        let before = self.diagrams.len();
        self.diagrams.retain(|d| d.is_connected());
        before - self.diagrams.len()
    }

    fn find_by_wrapper(&self, wrapper: &Element) -> Option<Rc<Diagram>> {
        self.diagrams
            .iter()
            .find(|d| d.wrapper() == wrapper)
            .cloned()
    }

    fn find_by_viewport(&self, viewport: &Element) -> Option<Rc<Diagram>> {
        self.diagrams
            .iter()
            .find(|d| {
                let registered: &Element = d.viewport();
                registered == viewport
            })
            .cloned()
    }

    pub(crate) fn toggle_focus(&mut self, diagram: &Rc<Diagram>) -> FocusTransition {
        self.focus.toggle(&mut self.document, diagram)
    }

    pub(crate) fn toggle_focus_for(&mut self, wrapper: &Element) -> Result<FocusTransition> {
        let diagram = self.find_by_wrapper(wrapper).ok_or(Error::NotAttached)?;
        Ok(self.toggle_focus(&diagram))
    }

    pub(crate) fn is_focus_active(&self) -> bool {
        self.focus.is_active()
    }

    pub(crate) fn exit_focus(&mut self) -> FocusTransition {
        self.focus.exit(&mut self.document)
    }

    fn fit_if_focused(&self, diagram: &Rc<Diagram>) {
        if self.focus.is_focused(&diagram.wrapper_node()) {
            diagram.fit();
        }
    }

    /// A fresh render pass is starting: leave focus mode and forget
    /// diagrams whose wrapper has left the document.
    pub(crate) fn begin_render_pass(&mut self) {
        self.exit_focus();
        let pruned = self.prune_detached();
        tracing::trace!(
            target: "understory_diagram_web",
            pruned,
            live = self.diagrams.len(),
            "render pass starting"
        );
    }

    /// Queues `callback` for the next animation frame unless a pass is
    /// already queued.
    pub(crate) fn schedule_render(&mut self, callback: js_sys::Function) -> bool {
        if !self.gate.try_queue() {
            return false;
        }
        self.begin_render_pass();
        self.render_frame = Some(request_animation_frame(move |_timestamp| {
            run_render_pass(&callback);
        }));
        true
    }

    pub(crate) fn install_double_click_guard(&mut self) {
        if self.double_click_guard.is_some() {
            return;
        }
        let options = EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: false,
        };
        let listener =
            EventListener::new_with_options(self.document.window(), "dblclick", options, |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let viewport = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|element| element.closest(VIEWPORT_SELECTOR).ok().flatten());
                log_failure(
                    "double-click",
                    with_runtime(|rt| {
                        let diagram = viewport.as_ref().and_then(|v| rt.find_by_viewport(v));
                        let hit = match (&viewport, &diagram) {
                            (None, _) => DoubleClickTarget::Elsewhere,
                            (Some(_), None) => DoubleClickTarget::UnattachedViewport,
                            (Some(_), Some(_)) => DoubleClickTarget::AttachedViewport,
                        };
                        let route = route_double_click(mouse.button(), hit, rt.config.focus_mode);
                        if route != DoubleClickRoute::PassThrough {
                            event.prevent_default();
                            event.stop_propagation();
                        }
                        if route == DoubleClickRoute::ToggleFocus
                            && let Some(diagram) = diagram
                        {
                            rt.toggle_focus(&diagram);
                        }
                        Ok(())
                    }),
                );
            });
        self.double_click_guard = Some(listener);
        tracing::debug!(target: "understory_diagram_web", "double-click guard installed");
    }
}
