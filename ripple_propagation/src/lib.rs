// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple Propagation: a deterministic, `no_std` event propagation engine.
//!
//! ## Overview
//!
//! Given a target node in a hierarchy, this crate computes who receives an event
//! and in what order, then invokes their handlers: capture → target → bubble.
//! It does not own nodes or perform hit testing. The hierarchy and its handler
//! registry are read through small traits in [`types`].
//!
//! ## Paths
//!
//! [`PropagationPaths`](crate::paths::PropagationPaths) holds the result of walking
//! the target's ancestors once:
//!
//! - trickle-down: ancestors with capture handlers (only if the event trickles down),
//! - target elements: composite roots absorbed into the target phase,
//! - bubble-up: ancestors with bubble handlers (only if the event bubbles).
//!
//! Composite roots are absorbed unless the event sets
//! [`EventFlags::SKIP_DISABLED_ELEMENTS`](crate::event::EventFlags::SKIP_DISABLED_ELEMENTS);
//! then they are ordinary ancestors.
//!
//! ## Dispatch
//!
//! [`Dispatcher`](crate::dispatcher::Dispatcher) leases paths from its
//! [`PathPool`](crate::pool::PathPool), walks them, and honors
//! [`Event::stop_propagation`](crate::event::Event::stop_propagation) between nodes
//! and [`Event::stop_immediate_propagation`](crate::event::Event::stop_immediate_propagation)
//! between handlers of one node. Handler errors abort the dispatch and are
//! returned as [`DispatchError`](crate::error::DispatchError).
//!
//! ## Hover
//!
//! [`HoverState`](crate::hover::HoverState) turns changes of the hovered node into
//! leave (inner→outer) and enter (outer→inner) transitions.
//!
//! ## Minimal example
//!
//! ```
//! use core::cell::RefCell;
//! use core::convert::Infallible;
//! use std::rc::Rc;
//!
//! use ripple_propagation::dispatcher::Dispatcher;
//! use ripple_propagation::event::{Event, EventFlags};
//! use ripple_propagation::types::{
//!     Callback, HandlerLookup, HandlerPhase, HandlerRegistry, Hierarchy, ParentLookup, callback,
//! };
//!
//! type Cb = Callback<usize, (), Infallible>;
//!
//! // Root (0) -> Mid (1) -> Leaf (2), bubble handlers only.
//! struct Chain {
//!     bubble: Vec<Vec<Cb>>,
//! }
//!
//! impl ParentLookup<usize> for Chain {
//!     fn parent_of(&self, node: &usize) -> Option<usize> {
//!         node.checked_sub(1)
//!     }
//! }
//! impl Hierarchy<usize> for Chain {}
//! impl HandlerLookup<usize> for Chain {
//!     fn has_handlers(&self, node: &usize, phase: HandlerPhase) -> bool {
//!         phase == HandlerPhase::Bubble && !self.bubble[*node].is_empty()
//!     }
//! }
//! impl HandlerRegistry<usize, ()> for Chain {
//!     type Handler = Cb;
//!     fn handlers_into<X: Extend<Cb>>(&self, node: &usize, phase: HandlerPhase, out: &mut X) {
//!         if phase == HandlerPhase::Bubble {
//!             out.extend(self.bubble[*node].iter().cloned());
//!         }
//!     }
//! }
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let named = |name: &'static str| -> Cb {
//!     let log = log.clone();
//!     callback(move |_: &mut Event<usize>| {
//!         log.borrow_mut().push(name);
//!         Ok(())
//!     })
//! };
//! let chain = Chain {
//!     bubble: vec![vec![named("Root")], vec![named("Mid")], vec![]],
//! };
//!
//! let dispatcher = Dispatcher::new();
//! let mut event = Event::from_flags(EventFlags::BUBBLES);
//! dispatcher.dispatch(&chain, 2, &mut event).unwrap();
//! assert_eq!(*log.borrow(), ["Mid", "Root"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod hover;
pub mod paths;
pub mod pool;
pub mod types;

#[cfg(test)]
mod test_scene;
