// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple Tree: a generational node hierarchy with per-node handler registries.
//!
//! This crate is the hierarchy side of event propagation. It owns nodes, their
//! parent links, and the handlers registered on them. It does not dispatch
//! events; `ripple_propagation` walks the tree (via its `tree_adapter` feature)
//! and invokes the handlers stored here.
//!
//! - [`Tree`]: container managing nodes, parent/child links, and handlers.
//! - [`NodeId`]: generational handle of a node. Stale handles never alias live nodes.
//! - [`NodeFlags`]: per-node flags; [`NodeFlags::COMPOSITE_ROOT`] marks a node that
//!   absorbs propagation and is treated as a target.
//! - [`HandlerSet`]: the capture or bubble set of a node.
//! - [`HandlerId`]: handle returned on registration, used to deregister.
//!
//! Parent links are plain [`NodeId`]s, so a node never keeps its ancestors alive.
//! Structural updates refuse to create cycles.
//!
//! ## Minimal usage
//!
//! ```
//! use ripple_tree::{HandlerSet, NodeFlags, Tree};
//!
//! let mut tree: Tree<&str> = Tree::new();
//! let root = tree.insert(None, NodeFlags::empty()).unwrap();
//! let button = tree.insert(Some(root), NodeFlags::COMPOSITE_ROOT).unwrap();
//! let label = tree.insert(Some(button), NodeFlags::empty()).unwrap();
//!
//! tree.add_handler(root, HandlerSet::Bubble, "root clicked").unwrap();
//! assert_eq!(tree.parent(label), Some(button));
//! assert!(tree.is_composite_root(button));
//! assert!(tree.has_handlers(root, HandlerSet::Bubble));
//!
//! // Removing a node frees its subtree.
//! tree.remove(button);
//! assert!(!tree.is_alive(label));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::Tree;
pub use types::{HandlerId, HandlerSet, NodeFlags, NodeId, TreeError};
