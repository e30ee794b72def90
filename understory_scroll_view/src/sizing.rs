// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intrinsic size resolution for scalable content.

use kurbo::Size;

/// Sizing hints gathered from content before it is made interactive.
///
/// Each hint is optional; [`resolve_intrinsic_size`] decides per axis which
/// one to trust.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeHints {
    /// Width and height of the content's `viewBox`, if it has a valid one.
    pub view_box: Option<Size>,
    /// Parsed `width` attribute.
    pub width_attribute: Option<f64>,
    /// Parsed `height` attribute.
    pub height_attribute: Option<f64>,
    /// Measured layout box. May be zero before layout has settled.
    pub measured: Option<Size>,
}

impl SizeHints {
    /// Builds hints from raw attribute text, as found on an `<svg>` element.
    #[must_use]
    pub fn from_attributes(
        view_box: Option<&str>,
        width: Option<&str>,
        height: Option<&str>,
    ) -> Self {
        Self {
            view_box: view_box.and_then(parse_view_box),
            width_attribute: width.and_then(parse_length),
            height_attribute: height.and_then(parse_length),
            measured: None,
        }
    }

    /// Returns these hints with a measured box attached.
    #[must_use]
    pub fn with_measured(mut self, measured: Size) -> Self {
        self.measured = Some(measured);
        self
    }
}

/// Resolves the intrinsic content size from `hints`.
///
/// For each axis, the first finite positive value wins, in this order:
/// `viewBox`, explicit attribute, measured box, `fallback`. The axes are
/// resolved independently, so a `viewBox` with a zero height still supplies
/// the width.
#[must_use]
pub fn resolve_intrinsic_size(hints: &SizeHints, fallback: Size) -> Size {
    let width = first_positive([
        hints.view_box.map(|s| s.width),
        hints.width_attribute,
        hints.measured.map(|s| s.width),
    ])
    .unwrap_or(fallback.width);
    let height = first_positive([
        hints.view_box.map(|s| s.height),
        hints.height_attribute,
        hints.measured.map(|s| s.height),
    ])
    .unwrap_or(fallback.height);
    Size::new(width, height)
}

fn first_positive(candidates: [Option<f64>; 3]) -> Option<f64> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| v.is_finite() && *v > 0.0)
}

/// Parses a `viewBox` attribute (`min-x min-y width height`) and returns its
/// width and height.
///
/// Values may be separated by whitespace and/or commas. Anything other than
/// exactly four numbers yields `None`.
#[must_use]
pub fn parse_view_box(text: &str) -> Option<Size> {
    let mut values = [0.0_f64; 4];
    let mut count = 0;
    for token in text
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
    {
        if count == values.len() {
            return None;
        }
        values[count] = token.parse::<f64>().ok()?;
        count += 1;
    }
    if count != values.len() {
        return None;
    }
    Some(Size::new(values[2], values[3]))
}

/// Parses the leading number of a length attribute.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"120px"` is `120.0` and `"50%"` is `50.0`. Returns `None` when there is
/// no numeric prefix or the value is not finite.
#[must_use]
pub fn parse_length(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let value = text[..end].parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}
