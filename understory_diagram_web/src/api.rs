// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JavaScript entry points.

use understory_focus_overlay::FocusTransition;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::InteractionConfig;
use crate::runtime::{log_failure, with_runtime};

/// Makes one rendered diagram interactive.
///
/// `wrapper` receives the toolbar, `viewport` is the scroll container and
/// `svg` the rendered diagram inside it. Failures are logged and leave the
/// diagram static.
#[wasm_bindgen(js_name = attachInteraction)]
pub fn attach_interaction(wrapper: Element, viewport: Element, svg: Element) {
    log_failure(
        "attach interaction",
        with_runtime(|rt| rt.attach(wrapper, viewport, svg)),
    );
}

/// Toggles focus mode on the diagram whose wrapper is `wrapper`.
///
/// Returns whether focus mode is active afterwards.
#[wasm_bindgen(js_name = toggleFocusMode)]
pub fn toggle_focus_mode(wrapper: Element) -> bool {
    log_failure(
        "toggle focus mode",
        with_runtime(|rt| {
            let transition = rt.toggle_focus_for(&wrapper)?;
            tracing::trace!(target: "understory_diagram_web", ?transition, "focus toggled");
            Ok(rt.is_focus_active())
        }),
    )
    .unwrap_or(false)
}

/// Leaves focus mode. Returns `true` if a session was ended.
#[wasm_bindgen(js_name = exitFocusMode)]
pub fn exit_focus_mode() -> bool {
    log_failure(
        "exit focus mode",
        with_runtime(|rt| Ok(rt.exit_focus() == FocusTransition::Exited)),
    )
    .unwrap_or(false)
}

/// Routes double-clicks: on an attached diagram they toggle focus mode,
/// elsewhere they are swallowed. Installing twice is a no-op.
#[wasm_bindgen(js_name = installPreviewDoubleClickGuard)]
pub fn install_preview_double_click_guard() {
    log_failure(
        "install double-click guard",
        with_runtime(|rt| {
            rt.install_double_click_guard();
            Ok(())
        }),
    );
}

/// Runs `callback` on the next animation frame as a fresh render pass.
///
/// Returns `false` if a pass is already queued.
#[wasm_bindgen(js_name = scheduleRender)]
pub fn schedule_render(callback: js_sys::Function) -> bool {
    log_failure(
        "schedule render",
        with_runtime(|rt| Ok(rt.schedule_render(callback))),
    )
    .unwrap_or(false)
}

/// Notifies that a fresh render pass is starting: leaves focus mode and
/// releases diagrams that are no longer in the document.
#[wasm_bindgen(js_name = beginRenderPass)]
pub fn begin_render_pass() {
    log_failure(
        "begin render pass",
        with_runtime(|rt| {
            rt.begin_render_pass();
            Ok(())
        }),
    );
}

/// Replaces the interaction config from JSON. Applies to diagrams attached
/// afterwards.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = InteractionConfig::from_json(json)?;
    with_runtime(|rt| {
        rt.configure(config);
        Ok(())
    })?;
    Ok(())
}
