// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, handler registration.

use alloc::vec::Vec;

use crate::types::{HandlerId, HandlerSet, NodeFlags, NodeId, TreeError};

/// Node hierarchy with per-node handler registries.
///
/// `H` is the handler type stored in each node's capture and bubble sets.
/// The tree never invokes handlers; it only stores them in registration order.
pub struct Tree<H> {
    nodes: Vec<Option<Node<H>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl<H> Default for Tree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> core::fmt::Debug for Tree<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

struct Node<H> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    flags: NodeFlags,
    capture: Vec<(u32, H)>,
    bubble: Vec<(u32, H)>,
    next_handler: u32,
}

impl<H> Node<H> {
    fn new(generation: u32, flags: NodeFlags) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            flags,
            capture: Vec::new(),
            bubble: Vec::new(),
            next_handler: 0,
        }
    }

    fn set(&self, set: HandlerSet) -> &Vec<(u32, H)> {
        match set {
            HandlerSet::Capture => &self.capture,
            HandlerSet::Bubble => &self.bubble,
        }
    }

    fn set_mut(&mut self, set: HandlerSet) -> &mut Vec<(u32, H)> {
        match set {
            HandlerSet::Capture => &mut self.capture,
            HandlerSet::Bubble => &mut self.bubble,
        }
    }
}

impl<H> Tree<H> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns true if the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, flags: NodeFlags) -> Result<NodeId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleNode(p));
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, flags));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, flags)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        Ok(id)
    }

    /// Remove a node and its whole subtree, dropping their handlers.
    ///
    /// Returns false if `id` was already stale.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        // Explicit stack so deep subtrees do not grow the call stack.
        let mut stack = Vec::from([id]);
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes[cur.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(cur.idx());
            }
        }
        true
    }

    /// Reparent `id` under `new_parent` (or detach it as a root if `None`).
    ///
    /// Refuses to place a node under itself or one of its descendants.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleNode(id));
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return Err(TreeError::StaleNode(p));
            }
            if self.is_ancestor_or_self(id, p) {
                return Err(TreeError::WouldCycle {
                    node: id,
                    parent: p,
                });
            }
        }
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        Ok(())
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Parent of a live node, or `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a live node in insertion order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Replace the flags of a live node.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> Result<(), TreeError> {
        let n = self.node_opt_mut(id).ok_or(TreeError::StaleNode(id))?;
        n.flags = flags;
        Ok(())
    }

    /// Returns true if `id` is live and marked [`NodeFlags::COMPOSITE_ROOT`].
    pub fn is_composite_root(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::COMPOSITE_ROOT))
    }

    /// Register `handler` at the end of `id`'s `set`.
    pub fn add_handler(
        &mut self,
        id: NodeId,
        set: HandlerSet,
        handler: H,
    ) -> Result<HandlerId, TreeError> {
        let n = self.node_opt_mut(id).ok_or(TreeError::StaleNode(id))?;
        let key = n.next_handler;
        n.next_handler = n.next_handler.wrapping_add(1);
        n.set_mut(set).push((key, handler));
        Ok(HandlerId { node: id, set, key })
    }

    /// Deregister a handler, returning it if it was still registered.
    ///
    /// The relative order of the remaining handlers is preserved.
    pub fn remove_handler(&mut self, handler: HandlerId) -> Option<H> {
        let n = self.node_opt_mut(handler.node)?;
        let list = n.set_mut(handler.set);
        let pos = list.iter().position(|(k, _)| *k == handler.key)?;
        Some(list.remove(pos).1)
    }

    /// Handlers registered in `id`'s `set`, in registration order.
    pub fn handlers(&self, id: NodeId, set: HandlerSet) -> impl Iterator<Item = &H> + '_ {
        self.node_opt(id)
            .into_iter()
            .flat_map(move |n| n.set(set).iter().map(|(_, h)| h))
    }

    /// Returns true if `id` is live and has at least one handler in `set`.
    pub fn has_handlers(&self, id: NodeId, set: HandlerSet) -> bool {
        self.node_opt(id).is_some_and(|n| !n.set(set).is_empty())
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node<H>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<H>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// True if `ancestor` is `node` or lies on `node`'s parent chain.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    // Callers check liveness of both ends first.
    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }
}
