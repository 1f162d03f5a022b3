// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover transitions: enter/leave events from changes of the hovered node.
//!
//! ## Usage
//!
//! 1) On every pointer move, resolve the hovered node (or `None`).
//! 2) Call [`HoverState::update_target`] to refresh the root→target chain and get
//!    the transitions.
//! 3) Deliver them with [`dispatch_transitions`]. Each transition is its own
//!    non-propagating event, so only the entered or left node's handlers run.
//!
//! ```
//! use ripple_propagation::hover::{HoverEvent, HoverState};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update_path(&[1, 2]), vec![HoverEvent::Enter(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update_path(&[1, 3]), vec![HoverEvent::Leave(2), HoverEvent::Enter(3)]);
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::trace;

use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, PathError};
use crate::event::Event;
use crate::paths::ancestry;
use crate::types::{HandlerError, HandlerRegistry, Hierarchy, ParentLookup};

/// Tracks the hovered root→target chain.
///
/// Leaves are reported inner→outer, then enters outer→inner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverState<K> {
    current: Vec<K>,
    scratch: Vec<K>,
}

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer entered this node or one of its descendants.
    Enter(K),
    /// The pointer left this node and all of its descendants.
    Leave(K),
}

impl<K: Copy> HoverEvent<K> {
    /// Node the transition is about.
    pub fn node(&self) -> K {
        match *self {
            Self::Enter(k) | Self::Leave(k) => k,
        }
    }
}

impl<K: Copy + Eq> Default for HoverState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Current root→target chain; empty when nothing is hovered.
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// Forget the hovered chain, returning leaves inner→outer.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        let out = self.current.iter().rev().map(|&k| HoverEvent::Leave(k)).collect();
        self.current.clear();
        out
    }

    /// Replace the hovered chain with `new_path` (root→target).
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        let shared = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = Vec::with_capacity(self.current.len() - shared + new_path.len() - shared);
        out.extend(self.current[shared..].iter().rev().map(|&k| HoverEvent::Leave(k)));
        out.extend(new_path[shared..].iter().map(|&k| HoverEvent::Enter(k)));

        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }

    /// Hover `target` (or nothing), deriving its chain from `hierarchy`.
    ///
    /// On [`PathError::HierarchyCycle`] the hovered chain is left unchanged.
    pub fn update_target<L>(
        &mut self,
        hierarchy: &L,
        target: Option<K>,
        max_depth: usize,
    ) -> Result<Vec<HoverEvent<K>>, PathError>
    where
        L: ParentLookup<K> + ?Sized,
    {
        let Some(target) = target else {
            return Ok(self.clear());
        };
        let mut path = core::mem::take(&mut self.scratch);
        let result = ancestry(hierarchy, target, max_depth, &mut path);
        let transitions = result.map(|()| self.update_path(&path));
        self.scratch = path;
        transitions
    }
}

/// Deliver `transitions` in order, one dispatch each, targeting the transition's node.
///
/// `make_event` builds the event for each transition. Events are normally
/// non-propagating (empty [`EventFlags`](crate::event::EventFlags)). Returns the
/// total number of handlers invoked; the first error aborts the remaining transitions.
pub fn dispatch_transitions<K, P, S, F>(
    dispatcher: &Dispatcher<K>,
    scene: &S,
    transitions: &[HoverEvent<K>],
    mut make_event: F,
) -> Result<usize, DispatchError<HandlerError<S, K, P>>>
where
    K: Copy + Debug,
    S: Hierarchy<K> + HandlerRegistry<K, P> + ?Sized,
    F: FnMut(HoverEvent<K>) -> Event<K, P>,
{
    let mut invoked = 0;
    for &transition in transitions {
        trace!(?transition, "hover");
        let mut event = make_event(transition);
        invoked += dispatcher
            .dispatch(scene, transition.node(), &mut event)?
            .handlers_invoked;
    }
    Ok(invoked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventFlags;
    use crate::test_scene::{Scene, TestError, new_log, record};
    use crate::types::{HandlerPhase, callback};
    use alloc::vec;

    #[test]
    fn entering_from_nothing_goes_outer_to_inner() {
        let mut h: HoverState<u32> = HoverState::new();
        assert_eq!(
            h.update_path(&[1, 2, 3]),
            vec![
                HoverEvent::Enter(1),
                HoverEvent::Enter(2),
                HoverEvent::Enter(3)
            ]
        );
        assert_eq!(h.current_path(), &[1, 2, 3]);
    }

    #[test]
    fn clearing_leaves_inner_to_outer() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[1, 2]);
        assert_eq!(h.clear(), vec![HoverEvent::Leave(2), HoverEvent::Leave(1)]);
        assert!(h.current_path().is_empty());
        assert!(h.clear().is_empty());
    }

    #[test]
    fn moving_to_a_cousin_stops_at_the_shared_ancestor() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[1, 2, 3, 4, 5]);
        assert_eq!(
            h.update_path(&[1, 2, 3, 9]),
            vec![
                HoverEvent::Leave(5),
                HoverEvent::Leave(4),
                HoverEvent::Enter(9)
            ]
        );
    }

    #[test]
    fn moving_to_an_ancestor_only_leaves() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[1, 2, 3]);
        assert_eq!(h.update_path(&[1]), vec![HoverEvent::Leave(3), HoverEvent::Leave(2)]);
        assert!(h.update_path(&[1]).is_empty());
    }

    #[test]
    fn update_target_walks_parents() {
        let scene = Scene::default();
        let root = scene.add(None);
        let a = scene.add(Some(root));
        let b = scene.add(Some(root));
        let mut h = HoverState::new();

        assert_eq!(
            h.update_target(&scene, Some(a), 16).unwrap(),
            vec![HoverEvent::Enter(root), HoverEvent::Enter(a)]
        );
        assert_eq!(
            h.update_target(&scene, Some(b), 16).unwrap(),
            vec![HoverEvent::Leave(a), HoverEvent::Enter(b)]
        );
        assert_eq!(
            h.update_target(&scene, None, 16).unwrap(),
            vec![HoverEvent::Leave(b), HoverEvent::Leave(root)]
        );
    }

    #[test]
    fn update_target_keeps_state_on_cycle() {
        let scene = Scene::default();
        let a = scene.add(None);
        let b = scene.add(Some(a));
        let mut h = HoverState::new();
        let _ = h.update_target(&scene, Some(b), 16).unwrap();

        scene.set_parent(a, Some(b));
        assert_eq!(
            h.update_target(&scene, Some(b), 16),
            Err(PathError::HierarchyCycle { limit: 16 })
        );
        assert_eq!(h.current_path(), &[a, b]);
    }

    #[test]
    fn transitions_reach_only_their_own_node() {
        let scene = Scene::default();
        let root = scene.add(None);
        let a = scene.add(Some(root));
        let b = scene.add(Some(root));
        let log = new_log();
        scene.on(root, HandlerPhase::Bubble, record(&log, "root"));
        scene.on(a, HandlerPhase::Bubble, record(&log, "a"));
        scene.on(b, HandlerPhase::Capture, record(&log, "b"));

        let dispatcher = Dispatcher::new();
        let mut h = HoverState::new();
        let enter = h.update_target(&scene, Some(a), 16).unwrap();
        let n = dispatch_transitions(&dispatcher, &scene, &enter, |_| {
            Event::from_flags(EventFlags::empty())
        })
        .unwrap();
        assert_eq!(n, 2);
        assert_eq!(*log.borrow(), vec!["root", "a"]);

        log.borrow_mut().clear();
        let moved = h.update_target(&scene, Some(b), 16).unwrap();
        dispatch_transitions(&dispatcher, &scene, &moved, |_| {
            Event::from_flags(EventFlags::empty())
        })
        .unwrap();
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn failing_transition_aborts_the_rest() {
        let scene = Scene::default();
        let root = scene.add(None);
        let a = scene.add(Some(root));
        let log = new_log();
        scene.on(root, HandlerPhase::Bubble, callback(|_| Err(TestError(0))));
        scene.on(a, HandlerPhase::Bubble, record(&log, "a"));

        let dispatcher = Dispatcher::new();
        let transitions = [HoverEvent::Enter(root), HoverEvent::Enter(a)];
        let err = dispatch_transitions(&dispatcher, &scene, &transitions, |_| {
            Event::from_flags(EventFlags::empty())
        })
        .unwrap_err();
        assert_eq!(err.handler_error(), Some(&TestError(0)));
        assert!(log.borrow().is_empty());
        assert_eq!(dispatcher.pool_stats().outstanding, 0);
    }
}
