// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small `web-sys` helpers and the DOM-backed [`ScrollHost`].

use kurbo::{Point, Size, Vec2};
use understory_pan_gesture::target::{ElementInfo, is_interactive_path};
use understory_scroll_view::{ScrollHost, SizeHints};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, SvgElement, Window};

use crate::error::{DomResultExt, Error, Result};

pub(crate) fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::MissingWindow)
}

pub(crate) fn document(window: &Window) -> Result<Document> {
    window.document().ok_or(Error::MissingDocument)
}

pub(crate) fn body(document: &Document) -> Result<HtmlElement> {
    document.body().ok_or(Error::MissingBody)
}

/// Creates an HTML element with a class name.
pub(crate) fn create_html(document: &Document, tag: &str, class: &str) -> Result<HtmlElement> {
    let element = document
        .create_element(tag)
        .dom("createElement")?
        .dyn_into::<HtmlElement>()
        .map_err(|element| Error::dom("createElement", &element.into()))?;
    element.set_class_name(class);
    Ok(element)
}

/// Adds or removes `class`, logging failures.
pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on).dom("classList.toggle") {
        tracing::warn!(target: "understory_diagram_web", class, %err, "class update failed");
    }
}

pub(crate) fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// Collects everything the intrinsic-size resolver can use from an `<svg>`.
pub(crate) fn size_hints(svg: &SvgElement) -> SizeHints {
    let view_box = svg.get_attribute("viewBox");
    let width = svg.get_attribute("width");
    let height = svg.get_attribute("height");
    let rect = svg.get_bounding_client_rect();
    SizeHints::from_attributes(view_box.as_deref(), width.as_deref(), height.as_deref())
        .with_measured(Size::new(rect.width(), rect.height()))
}

struct ElementFacts {
    tag: String,
    role: Option<String>,
    has_href: bool,
    has_onclick: bool,
    has_clickable_class: bool,
}

impl ElementFacts {
    fn of(element: &Element) -> Self {
        Self {
            tag: element.local_name(),
            role: element.get_attribute("role"),
            has_href: element.has_attribute("href"),
            has_onclick: element.has_attribute("onclick"),
            has_clickable_class: element.class_list().contains("clickable"),
        }
    }

    fn info(&self) -> ElementInfo<'_> {
        ElementInfo {
            tag_name: &self.tag,
            role: self.role.as_deref(),
            has_href: self.has_href,
            has_onclick: self.has_onclick,
            has_clickable_class: self.has_clickable_class,
        }
    }
}

/// Whether a pointer-down on `target` landed on interactive content inside
/// `viewport`. Targets outside the viewport never count.
pub(crate) fn is_interactive_target(target: Option<EventTarget>, viewport: &Element) -> bool {
    let Some(mut current) = target.and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    let mut path = Vec::new();
    loop {
        path.push(ElementFacts::of(&current));
        if current == *viewport {
            break;
        }
        match current.parent_element() {
            Some(parent) => current = parent,
            None => return false,
        }
    }
    is_interactive_path(path.iter().map(ElementFacts::info))
}

/// Reads a scroll property as the double the DOM stores; the typed
/// `web-sys` getters round it to an integer.
fn scroll_coordinate(element: &Element, property: &str) -> Option<f64> {
    js_sys::Reflect::get(element, &JsValue::from_str(property))
        .ok()
        .and_then(|value| value.as_f64())
}

/// A diagram's viewport, content and label seen as a [`ScrollHost`].
#[derive(Debug)]
pub(crate) struct WebView<'a> {
    pub(crate) viewport: &'a HtmlElement,
    pub(crate) svg: &'a SvgElement,
    pub(crate) label: &'a HtmlElement,
}

impl ScrollHost for WebView<'_> {
    fn client_size(&self) -> Size {
        Size::new(
            f64::from(self.viewport.client_width()),
            f64::from(self.viewport.client_height()),
        )
    }

    fn scroll_offset(&self) -> Vec2 {
        Vec2::new(
            scroll_coordinate(self.viewport, "scrollLeft")
                .unwrap_or_else(|| f64::from(self.viewport.scroll_left())),
            scroll_coordinate(self.viewport, "scrollTop")
                .unwrap_or_else(|| f64::from(self.viewport.scroll_top())),
        )
    }

    fn set_scroll_offset(&mut self, offset: Vec2) {
        self.viewport.scroll_to_with_x_and_y(offset.x, offset.y);
    }

    fn apply_scale(&mut self, rendered: Size, label: &str) {
        let style = self.svg.style();
        let result = style
            .set_property("width", &format!("{}px", rendered.width))
            .and_then(|()| style.set_property("height", &format!("{}px", rendered.height)))
            .dom("style.setProperty");
        if let Err(err) = result {
            tracing::warn!(target: "understory_diagram_web", %err, "could not resize diagram");
        }
        self.label.set_text_content(Some(label));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;
    use understory_scroll_view::ScrollHost;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::{HtmlElement, SvgElement};

    use super::WebView;

    wasm_bindgen_test_configure!(run_in_browser);

    fn pin(element: &HtmlElement, property: &str, value: f64) {
        let descriptor = js_sys::Object::new();
        js_sys::Reflect::set(&descriptor, &"value".into(), &JsValue::from_f64(value)).unwrap();
        js_sys::Object::define_property(element.as_ref(), &property.into(), &descriptor);
    }

    #[wasm_bindgen_test]
    fn scroll_offset_keeps_fractions() {
        let document = web_sys::window().unwrap().document().unwrap();
        let viewport: HtmlElement = document.create_element("div").unwrap().unchecked_into();
        let label: HtmlElement = document.create_element("span").unwrap().unchecked_into();
        let svg: SvgElement = document
            .create_element_ns(Some("http://www.w3.org/2000/svg"), "svg")
            .unwrap()
            .unchecked_into();
        pin(&viewport, "scrollLeft", 12.75);
        pin(&viewport, "scrollTop", 3.5);

        let view = WebView {
            viewport: &viewport,
            svg: &svg,
            label: &label,
        };
        assert_eq!(view.scroll_offset(), Vec2::new(12.75, 3.5));
    }
}
