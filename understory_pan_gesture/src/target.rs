// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which pointer-down targets may start a pan gesture.
//!
//! Diagrams can contain live content (links, buttons, elements with click
//! handlers). Pressing on those must keep its normal meaning, so the pan
//! controller refuses to start a session when the press lands on, or inside,
//! an interactive element.
//!
//! The check is a closed set of roles over plain element facts, evaluated on
//! every element from the event target up to and including the viewport:
//!
//! | Role | Matches |
//! |---|---|
//! | [`InteractiveRole::Link`] | `<a>` |
//! | [`InteractiveRole::Button`] | `<button>` |
//! | [`InteractiveRole::Input`] | `<input>` |
//! | [`InteractiveRole::Select`] | `<select>` |
//! | [`InteractiveRole::TextArea`] | `<textarea>` |
//! | [`InteractiveRole::AriaButton`] | `role="button"` |
//! | [`InteractiveRole::AriaLink`] | `role="link"` |
//! | [`InteractiveRole::Clickable`] | class `clickable` |
//! | [`InteractiveRole::InlineHandler`] | an `onclick` attribute |
//! | [`InteractiveRole::Href`] | an `href` attribute (including SVG links) |
//!
//! Tag names and roles compare ASCII case-insensitively. Ancestors above the
//! viewport are never consulted; callers stop the path there.
//!
//! ```rust
//! use understory_pan_gesture::target::{ElementInfo, is_interactive_path};
//!
//! let text = ElementInfo::tag("tspan");
//! let link = ElementInfo { has_href: true, ..ElementInfo::tag("a") };
//! let viewport = ElementInfo::tag("div");
//!
//! assert!(is_interactive_path([text, link, viewport]));
//! assert!(!is_interactive_path([text, viewport]));
//! ```

/// Why an element counts as interactive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractiveRole {
    /// An `<a>` element.
    Link,
    /// A `<button>` element.
    Button,
    /// An `<input>` element.
    Input,
    /// A `<select>` element.
    Select,
    /// A `<textarea>` element.
    TextArea,
    /// Any element with `role="button"`.
    AriaButton,
    /// Any element with `role="link"`.
    AriaLink,
    /// Any element carrying the `clickable` class.
    Clickable,
    /// Any element with an inline `onclick` attribute.
    InlineHandler,
    /// Any element with an `href` attribute.
    Href,
}

/// Facts about one element on the target path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementInfo<'a> {
    /// Local tag name, any case.
    pub tag_name: &'a str,
    /// Value of the `role` attribute, if present.
    pub role: Option<&'a str>,
    /// Whether the element has an `href` attribute.
    pub has_href: bool,
    /// Whether the element has an `onclick` attribute.
    pub has_onclick: bool,
    /// Whether the element's class list contains `clickable`.
    pub has_clickable_class: bool,
}

impl<'a> ElementInfo<'a> {
    /// An element with the given tag and no other facts.
    #[must_use]
    pub fn tag(tag_name: &'a str) -> Self {
        Self {
            tag_name,
            ..Self::default()
        }
    }
}

/// Classifies a single element.
#[must_use]
pub fn interactive_role(info: &ElementInfo<'_>) -> Option<InteractiveRole> {
    const TAGS: [(&str, InteractiveRole); 5] = [
        ("a", InteractiveRole::Link),
        ("button", InteractiveRole::Button),
        ("input", InteractiveRole::Input),
        ("select", InteractiveRole::Select),
        ("textarea", InteractiveRole::TextArea),
    ];

    if let Some((_, role)) = TAGS
        .iter()
        .find(|(tag, _)| info.tag_name.eq_ignore_ascii_case(tag))
    {
        return Some(*role);
    }
    match info.role {
        Some(role) if role.trim().eq_ignore_ascii_case("button") => {
            return Some(InteractiveRole::AriaButton);
        }
        Some(role) if role.trim().eq_ignore_ascii_case("link") => {
            return Some(InteractiveRole::AriaLink);
        }
        _ => {}
    }
    if info.has_clickable_class {
        Some(InteractiveRole::Clickable)
    } else if info.has_onclick {
        Some(InteractiveRole::InlineHandler)
    } else if info.has_href {
        Some(InteractiveRole::Href)
    } else {
        None
    }
}

/// Returns `true` if any element on `path` is interactive.
///
/// `path` runs from the event target outwards and should end at the
/// viewport element.
#[must_use]
pub fn is_interactive_path<'a>(path: impl IntoIterator<Item = ElementInfo<'a>>) -> bool {
    path.into_iter()
        .any(|info| interactive_role(&info).is_some())
}
