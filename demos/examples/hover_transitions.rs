// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover enter/leave delivered as non-propagating events.
//!
//! The pointer moves from `a1` to its cousin `b1`, then off the tree. Each move
//! yields leaves (inner→outer) and enters (outer→inner) relative to the shared
//! ancestor, and each transition is dispatched to its own node only.
//!
//! Run:
//! - `cargo run -p ripple_demos --example hover_transitions`

use std::convert::Infallible;

use ripple_propagation::dispatcher::Dispatcher;
use ripple_propagation::event::{Event, EventFlags};
use ripple_propagation::hover::{HoverEvent, HoverState, dispatch_transitions};
use ripple_propagation::types::{Callback, callback};
use ripple_tree::{HandlerSet, NodeFlags, NodeId, Tree};
use tracing_subscriber::EnvFilter;

type Handler = Callback<NodeId, HoverEvent<NodeId>, Infallible>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree: Tree<Handler> = Tree::new();
    let root = tree.insert(None, NodeFlags::empty()).unwrap();
    let a = tree.insert(Some(root), NodeFlags::empty()).unwrap();
    let a1 = tree.insert(Some(a), NodeFlags::empty()).unwrap();
    let b = tree.insert(Some(root), NodeFlags::empty()).unwrap();
    let b1 = tree.insert(Some(b), NodeFlags::empty()).unwrap();

    for (node, name) in [(root, "root"), (a, "a"), (a1, "a1"), (b, "b"), (b1, "b1")] {
        tree.add_handler(
            node,
            HandlerSet::Bubble,
            callback(move |ev: &mut Event<NodeId, HoverEvent<NodeId>>| {
                match ev.payload() {
                    HoverEvent::Enter(_) => println!("  enter {name}"),
                    HoverEvent::Leave(_) => println!("  leave {name}"),
                }
                Ok(())
            }),
        )
        .unwrap();
    }

    let dispatcher = Dispatcher::new();
    let max_depth = dispatcher.config().max_depth;
    let mut hover = HoverState::new();

    for (label, target) in [("a1", Some(a1)), ("b1", Some(b1)), ("nothing", None)] {
        println!("== Hover {label} ==");
        let transitions = hover.update_target(&tree, target, max_depth).unwrap();
        let n = dispatch_transitions(&dispatcher, &tree, &transitions, |t| {
            Event::new(EventFlags::empty(), t)
        })
        .unwrap();
        assert_eq!(n, transitions.len());
    }
    assert!(hover.current_path().is_empty());
}
