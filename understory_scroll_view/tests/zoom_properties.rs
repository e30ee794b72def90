// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for `understory_scroll_view`.
//!
//! These check the contracts of the zoom operations over arbitrary inputs:
//! clamping, idempotence at the current scale, anchor preservation, reset and
//! fit bounds.

use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;
use understory_scroll_view::{ScrollHost, ViewportState, ZoomConfig, fit_scale};

#[derive(Debug)]
struct Host {
    client: Size,
    scroll: Vec2,
    scroll_writes: usize,
    renders: usize,
}

impl Host {
    fn new(client: Size, scroll: Vec2) -> Self {
        Self {
            client,
            scroll,
            scroll_writes: 0,
            renders: 0,
        }
    }
}

impl ScrollHost for Host {
    fn client_size(&self) -> Size {
        self.client
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: Vec2) {
        self.scroll = offset;
        self.scroll_writes += 1;
    }

    fn apply_scale(&mut self, _rendered: Size, _label: &str) {
        self.renders += 1;
    }
}

fn arb_size(lo: f64, hi: f64) -> impl Strategy<Value = Size> {
    (lo..hi, lo..hi).prop_map(|(w, h)| Size::new(w, h))
}

fn arb_scroll() -> impl Strategy<Value = Vec2> {
    (0.0..2000.0_f64, 0.0..2000.0_f64).prop_map(|(x, y)| Vec2::new(x, y))
}

fn content_under(host: &Host, state: &ViewportState, anchor: Point) -> Point {
    Point::new(
        (host.scroll.x + anchor.x) / state.scale(),
        (host.scroll.y + anchor.y) / state.scale(),
    )
}

proptest! {
    #[test]
    fn scale_is_always_clamped(
        intrinsic in arb_size(1.0, 5000.0),
        targets in prop::collection::vec(-10.0..50.0_f64, 1..20),
    ) {
        let mut host = Host::new(Size::new(400.0, 300.0), Vec2::ZERO);
        let mut state = ViewportState::new(intrinsic, ZoomConfig::default());
        for target in targets {
            state.set_scale(&mut host, target, Point::new(10.0, 10.0));
            prop_assert!(state.scale() >= 0.25 && state.scale() <= 4.0);
        }
    }

    #[test]
    fn repeating_a_request_changes_nothing(
        target in 0.01..10.0_f64,
        scroll in arb_scroll(),
        anchor in (0.0..400.0_f64, 0.0..300.0_f64),
    ) {
        let mut host = Host::new(Size::new(400.0, 300.0), scroll);
        let mut state = ViewportState::new(Size::new(800.0, 400.0), ZoomConfig::default());
        let anchor = Point::new(anchor.0, anchor.1);
        state.set_scale(&mut host, target, anchor);

        let scroll_before = host.scroll;
        let writes = host.scroll_writes;
        let renders = host.renders;
        prop_assert!(!state.set_scale(&mut host, target, anchor));
        prop_assert_eq!(host.scroll, scroll_before);
        prop_assert_eq!(host.scroll_writes, writes);
        prop_assert_eq!(host.renders, renders);
    }

    #[test]
    fn anchor_stays_fixed_across_successive_zooms(
        intrinsic in arb_size(50.0, 3000.0),
        scroll in arb_scroll(),
        anchor in (0.0..400.0_f64, 0.0..300.0_f64),
        first in 0.25..4.0_f64,
        second in 0.25..4.0_f64,
    ) {
        let mut host = Host::new(Size::new(400.0, 300.0), scroll);
        let mut state = ViewportState::new(intrinsic, ZoomConfig::default());
        let anchor = Point::new(anchor.0, anchor.1);

        let before = content_under(&host, &state, anchor);
        state.set_scale(&mut host, first, anchor);
        let middle = content_under(&host, &state, anchor);
        state.set_scale(&mut host, second, anchor);
        let after = content_under(&host, &state, anchor);

        prop_assert!((middle - before).hypot() < 1e-6);
        prop_assert!((after - before).hypot() < 1e-6);
    }

    #[test]
    fn reset_always_returns_home(
        ops in prop::collection::vec(0_u8..4, 0..12),
        scroll in arb_scroll(),
    ) {
        let mut host = Host::new(Size::new(400.0, 300.0), scroll);
        let mut state = ViewportState::new(Size::new(800.0, 400.0), ZoomConfig::default());
        for op in ops {
            match op {
                0 => { state.zoom_in(&mut host); }
                1 => { state.zoom_out(&mut host); }
                2 => state.fit(&mut host),
                _ => { state.zoom_by_wheel(&mut host, -1.0, Point::new(3.0, 4.0)); }
            }
        }

        state.reset(&mut host);

        prop_assert_eq!(state.scale(), 1.0);
        prop_assert_eq!(host.scroll, Vec2::ZERO);
    }

    #[test]
    fn fit_is_the_largest_scale_that_fits(
        intrinsic in arb_size(1.0, 5000.0),
        client in arb_size(0.0, 3000.0),
    ) {
        let mut host = Host::new(client, Vec2::ZERO);
        let mut state = ViewportState::new(intrinsic, ZoomConfig::default());
        state.fit(&mut host);

        let scale = state.scale();
        prop_assert!((0.25..=4.0).contains(&scale));
        prop_assert_eq!(scale, fit_scale(intrinsic, client, &ZoomConfig::default()));

        let available_w = (client.width - 24.0).max(1.0);
        let available_h = (client.height - 24.0).max(1.0);
        let ratio = (available_w / intrinsic.width).min(available_h / intrinsic.height);
        if (0.25..=4.0).contains(&ratio) {
            prop_assert!(intrinsic.width * scale <= available_w + 1e-9);
            prop_assert!(intrinsic.height * scale <= available_h + 1e-9);
            // One axis is tight.
            let tight_w = (intrinsic.width * scale - available_w).abs() < 1e-6;
            let tight_h = (intrinsic.height * scale - available_h).abs() < 1e-6;
            prop_assert!(tight_w || tight_h);
        }

        let rendered = state.rendered_size();
        let expected = Vec2::new(
            ((rendered.width - client.width) / 2.0).max(0.0),
            ((rendered.height - client.height) / 2.0).max(0.0),
        );
        prop_assert_eq!(host.scroll, expected);
    }
}
