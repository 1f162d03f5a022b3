// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event values: immutable configuration, mutable propagation state, and dispatch context.
//!
//! An [`Event`] keeps "what kind of event is this" ([`EventFlags`], fixed at
//! construction) apart from "how far has dispatch progressed" ([`PropagationState`]).
//! The payload `P` is carried for handlers and never interpreted by the engine.

use crate::types::Phase;

bitflags::bitflags! {
    /// Dispatch-control flags, fixed when the event is constructed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// Ancestors with capture handlers observe the event before the target.
        const TRICKLES_DOWN = 0b0000_0001;
        /// Ancestors with bubble handlers observe the event after the target.
        const BUBBLES = 0b0000_0010;
        /// Composite roots are walked through as ordinary ancestors instead of
        /// absorbing the event.
        const SKIP_DISABLED_ELEMENTS = 0b0000_0100;
        /// Both trickles down and bubbles.
        const PROPAGATES = Self::TRICKLES_DOWN.bits() | Self::BUBBLES.bits();
    }
}

/// Mutable propagation state of an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationState {
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl PropagationState {
    /// No further node receives the event.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// No further handler on the current node receives the event.
    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }
}

/// An event routed through a hierarchy keyed by `K`, carrying payload `P`.
///
/// Handlers receive `&mut Event` and may call [`Event::stop_propagation`] or
/// [`Event::stop_immediate_propagation`].
/// The two are independent: stopping immediately only skips the remaining
/// handlers on the current node.
#[derive(Clone, Debug)]
pub struct Event<K, P = ()> {
    flags: EventFlags,
    state: PropagationState,
    target: Option<K>,
    current: Option<K>,
    phase: Option<Phase>,
    payload: P,
}

impl<K: Copy> Event<K> {
    /// Create an event without payload.
    pub fn from_flags(flags: EventFlags) -> Self {
        Self::new(flags, ())
    }
}

impl<K: Copy, P> Event<K, P> {
    /// Create an event with the given flags and payload.
    pub fn new(flags: EventFlags, payload: P) -> Self {
        Self {
            flags,
            state: PropagationState::default(),
            target: None,
            current: None,
            phase: None,
            payload,
        }
    }

    /// Dispatch-control flags.
    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Shorthand for [`EventFlags::TRICKLES_DOWN`].
    pub fn trickles_down(&self) -> bool {
        self.flags.contains(EventFlags::TRICKLES_DOWN)
    }

    /// Shorthand for [`EventFlags::BUBBLES`].
    pub fn bubbles(&self) -> bool {
        self.flags.contains(EventFlags::BUBBLES)
    }

    /// Shorthand for [`EventFlags::SKIP_DISABLED_ELEMENTS`].
    pub fn skips_disabled_elements(&self) -> bool {
        self.flags.contains(EventFlags::SKIP_DISABLED_ELEMENTS)
    }

    /// Current propagation state.
    pub fn state(&self) -> PropagationState {
        self.state
    }

    /// Stop the dispatch after the current node's remaining handlers.
    pub fn stop_propagation(&mut self) {
        self.state.propagation_stopped = true;
    }

    /// Skip the remaining handlers on the current node.
    ///
    /// Later nodes still receive the event unless [`Event::stop_propagation`] is also called.
    pub fn stop_immediate_propagation(&mut self) {
        self.state.immediate_propagation_stopped = true;
    }

    /// See [`PropagationState::is_propagation_stopped`].
    pub fn is_propagation_stopped(&self) -> bool {
        self.state.propagation_stopped
    }

    /// See [`PropagationState::is_immediate_propagation_stopped`].
    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.state.immediate_propagation_stopped
    }

    /// Clear both stop flags so the value can be dispatched again.
    pub fn reset_propagation(&mut self) {
        self.state = PropagationState::default();
    }

    /// Node the event was dispatched to. Set by the dispatcher and kept after it returns.
    pub fn target(&self) -> Option<K> {
        self.target
    }

    /// Node whose handlers are currently running; `None` outside of a handler.
    pub fn current_node(&self) -> Option<K> {
        self.current
    }

    /// Phase of the running handler; `None` outside of a handler.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable payload, e.g. for handlers that accumulate results.
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Consume the event, returning its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    pub(crate) fn begin(&mut self, target: K) {
        self.target = Some(target);
        self.current = None;
        self.phase = None;
    }

    pub(crate) fn enter(&mut self, phase: Phase, node: K) {
        self.phase = Some(phase);
        self.current = Some(node);
    }

    pub(crate) fn leave_node(&mut self) {
        self.state.immediate_propagation_stopped = false;
    }

    pub(crate) fn finish(&mut self) {
        self.current = None;
        self.phase = None;
    }
}
