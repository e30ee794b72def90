// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Coalesces render requests into at most one queued pass.
///
/// DOM mutation observers can fire many times per frame; only the first
/// request after a pass has started queues a new one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderGate {
    queued: bool,
}

impl RenderGate {
    /// Creates a gate with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the caller should queue a pass, `false` if one is
    /// already queued.
    pub fn try_queue(&mut self) -> bool {
        !core::mem::replace(&mut self.queued, true)
    }

    /// Marks the queued pass as started. Requests made from now on queue a
    /// new pass.
    pub fn begin_pass(&mut self) {
        self.queued = false;
    }

    /// Whether a pass is queued and has not started.
    #[must_use]
    pub fn is_queued(&self) -> bool {
        self.queued
    }
}
