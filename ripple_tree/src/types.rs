// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree: node and handler identifiers, flags, and errors.

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this identifier.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Generation of this identifier.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Per-node flags read by event propagation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is an atomic unit for events: it absorbs propagation at its
        /// boundary and receives events as a target instead of passing them through.
        const COMPOSITE_ROOT = 0b0000_0001;
    }
}

/// Which of a node's two handler sets a handler belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HandlerSet {
    /// Handlers that observe events on the way down (trickle-down).
    Capture,
    /// Handlers that observe events on the way back up.
    Bubble,
}

/// Identifier for a registered handler, returned by
/// [`Tree::add_handler`](crate::Tree::add_handler).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HandlerId {
    pub(crate) node: NodeId,
    pub(crate) set: HandlerSet,
    pub(crate) key: u32,
}

impl HandlerId {
    /// Node the handler is registered on.
    pub const fn node(self) -> NodeId {
        self.node
    }

    /// Handler set the handler is registered in.
    pub const fn set(self) -> HandlerSet {
        self.set
    }
}

/// Errors from structural tree updates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// The identifier does not refer to a live node.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// Linking `node` under `parent` would make the parent chain cyclic.
    #[error("cannot place {node:?} under its own descendant {parent:?}")]
    WouldCycle {
        /// Node being moved.
        node: NodeId,
        /// Requested new parent.
        parent: NodeId,
    },
}
