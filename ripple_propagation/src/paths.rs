// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation paths: which ancestors observe an event, and in which order.
//!
//! ## Overview
//!
//! [`PropagationPaths::build`] walks the parent chain of a target once,
//! starting at the target's parent, and classifies every ancestor:
//!
//! - A composite root (unless the event skips disabled elements) is appended to
//!   [`target_elements`](PropagationPaths::target_elements) and is not a trickle/bubble participant.
//! - Otherwise it is appended to [`trickle_down_path`](PropagationPaths::trickle_down_path)
//!   if the event trickles down and the node has capture handlers, and to
//!   [`bubble_up_path`](PropagationPaths::bubble_up_path) if the event bubbles and
//!   the node has bubble handlers.
//!
//! All three lists are in walk order, nearest ancestor first. Bubbling plays them
//! in that order; capture plays the trickle-down list in reverse
//! (see [`PropagationPaths::capture_order`]).
//!
//! The target itself is never part of the walk; a parentless target yields three
//! empty lists.

use alloc::vec::Vec;

use tracing::warn;

use crate::error::PathError;
use crate::event::EventFlags;
use crate::types::{HandlerLookup, HandlerPhase, Hierarchy, ParentLookup};

/// The three ordered node lists for one dispatch.
///
/// Holds non-owning keys. Usually leased from a [`PathPool`](crate::pool::PathPool)
/// and cleared when released.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagationPaths<K> {
    target: Option<K>,
    trickle_down: Vec<K>,
    target_elements: Vec<K>,
    bubble_up: Vec<K>,
}

impl<K> Default for PropagationPaths<K> {
    fn default() -> Self {
        Self {
            target: None,
            trickle_down: Vec::new(),
            target_elements: Vec::new(),
            bubble_up: Vec::new(),
        }
    }
}

impl<K: Copy> PropagationPaths<K> {
    /// Create empty paths without allocating.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty paths with room for `depth` ancestors per list and
    /// `targets` composite roots.
    pub fn with_capacity(depth: usize, targets: usize) -> Self {
        Self {
            target: None,
            trickle_down: Vec::with_capacity(depth),
            target_elements: Vec::with_capacity(targets),
            bubble_up: Vec::with_capacity(depth),
        }
    }

    /// Rebuild the lists for an event with `flags` dispatched to `target`.
    ///
    /// Previous contents are cleared first; capacity is kept.
    /// Fails with [`PathError::HierarchyCycle`] if more than `max_depth` ancestors
    /// are visited, in which case the paths are left empty.
    pub fn build<S>(
        &mut self,
        scene: &S,
        target: K,
        flags: EventFlags,
        max_depth: usize,
    ) -> Result<(), PathError>
    where
        S: Hierarchy<K> + HandlerLookup<K> + ?Sized,
    {
        self.clear();
        self.target = Some(target);

        let trickles = flags.contains(EventFlags::TRICKLES_DOWN);
        let bubbles = flags.contains(EventFlags::BUBBLES);
        let absorbs = !flags.contains(EventFlags::SKIP_DISABLED_ELEMENTS);

        let mut depth = 0_usize;
        let mut cur = scene.parent_of(&target);
        while let Some(node) = cur {
            depth += 1;
            if depth > max_depth {
                warn!(limit = max_depth, "propagation path exceeds depth limit");
                self.clear();
                return Err(PathError::HierarchyCycle { limit: max_depth });
            }
            if absorbs && scene.is_composite_root(&node) {
                self.target_elements.push(node);
            } else {
                if trickles && scene.has_handlers(&node, HandlerPhase::Capture) {
                    self.trickle_down.push(node);
                }
                if bubbles && scene.has_handlers(&node, HandlerPhase::Bubble) {
                    self.bubble_up.push(node);
                }
            }
            cur = scene.parent_of(&node);
        }
        Ok(())
    }

    /// Target these paths were built for.
    pub fn target(&self) -> Option<K> {
        self.target
    }

    /// Ancestors with capture handlers, nearest first (build order).
    pub fn trickle_down_path(&self) -> &[K] {
        &self.trickle_down
    }

    /// Trickle-down ancestors in playback order: outermost first.
    pub fn capture_order(&self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator + '_ {
        self.trickle_down.iter().rev().copied()
    }

    /// Absorbed composite roots, nearest to the target first.
    pub fn target_elements(&self) -> &[K] {
        &self.target_elements
    }

    /// Ancestors with bubble handlers, nearest first (playback order).
    pub fn bubble_up_path(&self) -> &[K] {
        &self.bubble_up
    }

    /// Returns true if no target is recorded and all lists are empty.
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
            && self.trickle_down.is_empty()
            && self.target_elements.is_empty()
            && self.bubble_up.is_empty()
    }

    /// Drop all node references, keeping capacity.
    pub fn clear(&mut self) {
        self.target = None;
        self.trickle_down.clear();
        self.target_elements.clear();
        self.bubble_up.clear();
    }

    /// Overwrite these paths with a copy of `other`, reusing capacity.
    pub fn copy_from(&mut self, other: &Self) {
        self.target = other.target;
        self.trickle_down.clear();
        self.trickle_down.extend_from_slice(&other.trickle_down);
        self.target_elements.clear();
        self.target_elements.extend_from_slice(&other.target_elements);
        self.bubble_up.clear();
        self.bubble_up.extend_from_slice(&other.bubble_up);
    }
}

/// Write the root→target chain of `target` into `out` (cleared first).
///
/// Fails with [`PathError::HierarchyCycle`] if `target` has more than `max_depth`
/// ancestors, leaving `out` empty.
pub fn ancestry<K, L>(
    lookup: &L,
    target: K,
    max_depth: usize,
    out: &mut Vec<K>,
) -> Result<(), PathError>
where
    K: Copy,
    L: ParentLookup<K> + ?Sized,
{
    out.clear();
    out.push(target);
    let mut cur = lookup.parent_of(&target);
    while let Some(node) = cur {
        if out.len() > max_depth {
            warn!(limit = max_depth, "ancestry exceeds depth limit");
            out.clear();
            return Err(PathError::HierarchyCycle { limit: max_depth });
        }
        out.push(node);
        cur = lookup.parent_of(&node);
    }
    out.reverse();
    Ok(())
}
