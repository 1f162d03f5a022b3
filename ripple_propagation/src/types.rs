// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for propagation: phases, and the traits a hierarchy implements.
//!
//! ## Overview
//!
//! The engine never owns nodes. It reads the hierarchy through these traits:
//!
//! - [`ParentLookup`]: parent links.
//! - [`Hierarchy`]: composite-root marking on top of parent links.
//! - [`HandlerLookup`]: whether a node has capture or bubble handlers.
//! - [`HandlerRegistry`]: an ordered snapshot of a node's handlers.
//! - [`Handler`]: the single capability a handler exposes.
//!
//! They are consumed by [`PropagationPaths::build`](crate::paths::PropagationPaths::build)
//! and [`Dispatcher`](crate::dispatcher::Dispatcher).

use alloc::rc::Rc;

use crate::event::Event;

/// Phases of event propagation.
///
/// Reported by [`Event::phase`] while a handler runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Root-to-target traversal.
    Capture,
    /// Target node and absorbed composite roots.
    Target,
    /// Target-to-root traversal.
    Bubble,
}

/// Which handler set of a node is consulted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HandlerPhase {
    /// Handlers registered for the trickle-down phase.
    Capture,
    /// Handlers registered for the bubble-up phase.
    Bubble,
}

/// Look up the parent of a node.
///
/// Parent links are non-owning: returning a key must not extend the parent's lifetime.
/// The chain must be finite; the engine guards against cycles with a depth limit
/// (see [`DispatchConfig::max_depth`](crate::config::DispatchConfig::max_depth)).
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider: every node is a root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// Hierarchy provider: parent links plus composite-root marking.
pub trait Hierarchy<K>: ParentLookup<K> {
    /// Returns true if `node` absorbs propagation and is treated as a target.
    fn is_composite_root(&self, _node: &K) -> bool {
        false
    }
}

/// Presence predicates of a callback registry.
///
/// Kept separate from [`HandlerRegistry`] so path building does not depend on
/// the event payload type.
pub trait HandlerLookup<K> {
    /// Returns true if `node` has at least one handler in `phase`.
    fn has_handlers(&self, node: &K, phase: HandlerPhase) -> bool;
}

/// Callback registry: per node, an ordered list of handlers per phase.
pub trait HandlerRegistry<K, P>: HandlerLookup<K> {
    /// Handle type stored per registration. Cloning must be cheap (e.g. an `Rc`)
    /// because the dispatcher snapshots a node's handlers before invoking them.
    type Handler: Handler<K, P> + Clone;

    /// Append the handlers registered on `node` for `phase` to `out`, in registration order.
    fn handlers_into<X: Extend<Self::Handler>>(&self, node: &K, phase: HandlerPhase, out: &mut X);
}

/// A single event handler.
pub trait Handler<K, P> {
    /// Error surfaced to the caller of the dispatch.
    type Error;

    /// Observe (and possibly stop) `event` at [`Event::current_node`].
    fn handle(&self, event: &mut Event<K, P>) -> Result<(), Self::Error>;
}

/// Shared closure handler.
pub type Callback<K, P, E> = Rc<dyn Fn(&mut Event<K, P>) -> Result<(), E>>;

impl<K, P, E> Handler<K, P> for Rc<dyn Fn(&mut Event<K, P>) -> Result<(), E>> {
    type Error = E;

    #[inline]
    fn handle(&self, event: &mut Event<K, P>) -> Result<(), E> {
        (**self)(event)
    }
}

/// Wrap a closure as a [`Callback`].
pub fn callback<K, P, E, F>(f: F) -> Callback<K, P, E>
where
    F: Fn(&mut Event<K, P>) -> Result<(), E> + 'static,
{
    Rc::new(f)
}

/// Error type produced by the handlers of registry `R`.
pub type HandlerError<R, K, P> =
    <<R as HandlerRegistry<K, P>>::Handler as Handler<K, P>>::Error;
