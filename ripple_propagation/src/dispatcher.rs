// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: drives capture → target → bubble over a built path.
//!
//! ## Overview
//!
//! [`Dispatcher::dispatch`] leases a path from its pool, builds it for the target,
//! and walks it:
//!
//! 1. Capture: trickle-down ancestors, outermost first, capture handlers only.
//! 2. Target: the target's capture then bubble handlers, then every absorbed
//!    composite root (nearest first), each treated as a target.
//! 3. Bubble: bubble-up ancestors, nearest first, bubble handlers only.
//!
//! ## Stopping
//!
//! After each handler the dispatcher checks
//! [`is_immediate_propagation_stopped`](crate::event::Event::is_immediate_propagation_stopped);
//! if set, the rest of that node's handlers are skipped and the flag is cleared
//! before the next node.
//! After each node it checks
//! [`is_propagation_stopped`](crate::event::Event::is_propagation_stopped);
//! if set, the dispatch ends and the outcome records where.
//!
//! ## Lifetimes
//!
//! The leased path is returned to the pool on every exit path, including handler
//! errors and unwinding. The pool is borrowed only while leasing and returning,
//! so a handler may start a nested dispatch on the same dispatcher.
//!
//! A node's handlers are snapshotted before any of them runs, so handlers can
//! register or deregister handlers mid-dispatch without disturbing the walk.

use core::cell::RefCell;
use core::fmt::Debug;
use core::ops::{Deref, DerefMut};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::DispatchConfig;
use crate::error::{DispatchError, PathError};
use crate::event::{Event, EventFlags};
use crate::paths::PropagationPaths;
use crate::pool::{PathPool, PoolStats};
use crate::types::{
    Handler, HandlerError, HandlerLookup, HandlerPhase, HandlerRegistry, Hierarchy, Phase,
};

/// Handlers per node kept inline while invoking them.
const INLINE_HANDLERS: usize = 16;

const CAPTURE_SETS: &[HandlerPhase] = &[HandlerPhase::Capture];
const TARGET_SETS: &[HandlerPhase] = &[HandlerPhase::Capture, HandlerPhase::Bubble];
const BUBBLE_SETS: &[HandlerPhase] = &[HandlerPhase::Bubble];

/// Where a dispatch was stopped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StopPoint<K> {
    /// Phase of the node that stopped propagation.
    pub phase: Phase,
    /// Node whose handler stopped propagation.
    pub node: K,
}

/// Summary of a finished dispatch.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DispatchOutcome<K> {
    /// Number of handlers invoked.
    pub handlers_invoked: usize,
    /// Set if propagation was stopped before the walk completed.
    pub stopped_at: Option<StopPoint<K>>,
}

impl<K> DispatchOutcome<K> {
    fn empty() -> Self {
        Self {
            handlers_invoked: 0,
            stopped_at: None,
        }
    }

    /// Returns true if a handler stopped propagation.
    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }
}

/// Three-phase event dispatcher owning a [`PathPool`].
///
/// ## Usage
///
/// - Construct with [`Dispatcher::new`] or [`Dispatcher::with_config`].
/// - Call [`Dispatcher::dispatch`] with anything implementing [`Hierarchy`] and
///   [`HandlerRegistry`] (for example a `ripple_tree::Tree` with the
///   `tree_adapter` feature).
/// - To replay a path after the hierarchy changed, build it once with
///   [`Dispatcher::build_paths`], keep a snapshot from [`Dispatcher::copy_paths`],
///   dispatch it with [`Dispatcher::dispatch_paths`], and hand every built or
///   copied path back with [`Dispatcher::recycle_paths`].
///
/// Not thread-safe; dispatch is synchronous on the calling thread.
pub struct Dispatcher<K> {
    pool: RefCell<PathPool<K>>,
    config: DispatchConfig,
}

impl<K: Copy> Debug for Dispatcher<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stats = self.pool.try_borrow().map(|p| p.stats()).ok();
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("pool", &stats)
            .finish()
    }
}

impl<K: Copy + Debug> Default for Dispatcher<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Debug> Dispatcher<K> {
    /// Create a dispatcher with default configuration.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Create a dispatcher with explicit configuration.
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            pool: RefCell::new(PathPool::with_config(config.pool)),
            config,
        }
    }

    /// Configuration this dispatcher was created with.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Counters of the owned path pool.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.borrow().stats()
    }

    /// Dispatch `event` to `target`, running all three phases.
    ///
    /// An event whose propagation was stopped before this call reaches no handler.
    pub fn dispatch<P, S>(
        &self,
        scene: &S,
        target: K,
        event: &mut Event<K, P>,
    ) -> Result<DispatchOutcome<K>, DispatchError<HandlerError<S, K, P>>>
    where
        S: Hierarchy<K> + HandlerRegistry<K, P> + ?Sized,
    {
        let mut lease = self.lease();
        lease.build(scene, target, event.flags(), self.config.max_depth)?;
        self.run(scene, &lease, event)
    }

    /// Dispatch `event` along prebuilt `paths` (for example a copy of an earlier path).
    ///
    /// `paths` stays owned by the caller. Paths with no target invoke nothing.
    pub fn dispatch_paths<P, S>(
        &self,
        scene: &S,
        paths: &PropagationPaths<K>,
        event: &mut Event<K, P>,
    ) -> Result<DispatchOutcome<K>, DispatchError<HandlerError<S, K, P>>>
    where
        S: HandlerRegistry<K, P> + ?Sized,
    {
        self.run(scene, paths, event)
    }

    /// Lease a path from the pool and build it for `target`.
    ///
    /// Return it with [`Dispatcher::recycle_paths`] when done.
    pub fn build_paths<S>(
        &self,
        scene: &S,
        target: K,
        flags: EventFlags,
    ) -> Result<PropagationPaths<K>, PathError>
    where
        S: Hierarchy<K> + HandlerLookup<K> + ?Sized,
    {
        let mut lease = self.lease();
        lease.build(scene, target, flags, self.config.max_depth)?;
        Ok(lease.into_inner())
    }

    /// Snapshot `paths` into another pooled instance.
    pub fn copy_paths(&self, paths: &PropagationPaths<K>) -> PropagationPaths<K> {
        self.pool.borrow_mut().copy(paths)
    }

    /// Return paths obtained from [`Dispatcher::build_paths`] or [`Dispatcher::copy_paths`].
    pub fn recycle_paths(&self, paths: PropagationPaths<K>) {
        self.pool.borrow_mut().release(paths);
    }

    fn lease(&self) -> PathLease<'_, K> {
        let paths = self.pool.borrow_mut().acquire();
        PathLease {
            pool: &self.pool,
            paths,
        }
    }

    fn run<P, S>(
        &self,
        scene: &S,
        paths: &PropagationPaths<K>,
        event: &mut Event<K, P>,
    ) -> Result<DispatchOutcome<K>, DispatchError<HandlerError<S, K, P>>>
    where
        S: HandlerRegistry<K, P> + ?Sized,
    {
        let Some(target) = paths.target() else {
            return Ok(DispatchOutcome::empty());
        };
        event.begin(target);
        if event.is_propagation_stopped() {
            debug!(?target, "event was stopped before dispatch");
            return Ok(DispatchOutcome::empty());
        }
        trace!(
            ?target,
            trickle = paths.trickle_down_path().len(),
            composite = paths.target_elements().len(),
            bubble = paths.bubble_up_path().len(),
            "dispatch"
        );
        let result = Self::walk(scene, paths, target, event);
        event.finish();
        result
    }

    fn walk<P, S>(
        scene: &S,
        paths: &PropagationPaths<K>,
        target: K,
        event: &mut Event<K, P>,
    ) -> Result<DispatchOutcome<K>, DispatchError<HandlerError<S, K, P>>>
    where
        S: HandlerRegistry<K, P> + ?Sized,
    {
        let mut snapshot: SmallVec<[S::Handler; INLINE_HANDLERS]> = SmallVec::new();
        let mut outcome = DispatchOutcome::empty();

        let capture = paths.capture_order().map(|n| (Phase::Capture, n));
        let at_target = core::iter::once(target)
            .chain(paths.target_elements().iter().copied())
            .map(|n| (Phase::Target, n));
        let bubble = paths
            .bubble_up_path()
            .iter()
            .copied()
            .map(|n| (Phase::Bubble, n));

        let mut last_phase = None;
        for (phase, node) in capture.chain(at_target).chain(bubble) {
            if last_phase != Some(phase) {
                trace!(?phase, "entering phase");
                last_phase = Some(phase);
            }
            let sets = match phase {
                Phase::Capture => CAPTURE_SETS,
                Phase::Target => TARGET_SETS,
                Phase::Bubble => BUBBLE_SETS,
            };
            outcome.handlers_invoked +=
                Self::invoke_node(scene, phase, node, sets, event, &mut snapshot)?;
            if event.is_propagation_stopped() {
                debug!(?phase, ?node, "propagation stopped");
                outcome.stopped_at = Some(StopPoint { phase, node });
                return Ok(outcome);
            }
        }
        Ok(outcome)
    }

    /// Run `node`'s handlers from `sets`, honoring immediate stop.
    fn invoke_node<P, S>(
        scene: &S,
        phase: Phase,
        node: K,
        sets: &[HandlerPhase],
        event: &mut Event<K, P>,
        snapshot: &mut SmallVec<[S::Handler; INLINE_HANDLERS]>,
    ) -> Result<usize, DispatchError<HandlerError<S, K, P>>>
    where
        S: HandlerRegistry<K, P> + ?Sized,
    {
        snapshot.clear();
        for &set in sets {
            scene.handlers_into(&node, set, snapshot);
        }
        if snapshot.is_empty() {
            return Ok(0);
        }

        event.enter(phase, node);
        let mut invoked = 0;
        for handler in snapshot.drain(..) {
            invoked += 1;
            if let Err(source) = handler.handle(event) {
                debug!(?phase, ?node, "handler failed");
                event.leave_node();
                return Err(DispatchError::Handler { phase, source });
            }
            if event.is_immediate_propagation_stopped() {
                break;
            }
        }
        event.leave_node();
        Ok(invoked)
    }
}

/// A path on loan from the pool; returned on drop.
struct PathLease<'a, K: Copy> {
    pool: &'a RefCell<PathPool<K>>,
    paths: PropagationPaths<K>,
}

impl<K: Copy> PathLease<'_, K> {
    /// Keep the path instead of returning it; the caller becomes responsible for release.
    fn into_inner(mut self) -> PropagationPaths<K> {
        let paths = core::mem::take(&mut self.paths);
        // What is left behind owns no allocation.
        core::mem::forget(self);
        paths
    }
}

impl<K: Copy> Deref for PathLease<'_, K> {
    type Target = PropagationPaths<K>;

    fn deref(&self) -> &Self::Target {
        &self.paths
    }
}

impl<K: Copy> DerefMut for PathLease<'_, K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.paths
    }
}

impl<K: Copy> Drop for PathLease<'_, K> {
    fn drop(&mut self) {
        let paths = core::mem::take(&mut self.paths);
        self.pool.borrow_mut().release(paths);
    }
}
