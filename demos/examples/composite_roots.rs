// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite roots absorb events from their parts.
//!
//! A `slider` made of a `track` and a `thumb` is marked as a composite root.
//! A click on the thumb is delivered to the slider in the target phase, as if
//! the slider itself had been clicked. With `SKIP_DISABLED_ELEMENTS` the slider
//! is an ordinary ancestor again.
//!
//! Run:
//! - `cargo run -p ripple_demos --example composite_roots`

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use ripple_propagation::dispatcher::Dispatcher;
use ripple_propagation::event::{Event, EventFlags};
use ripple_propagation::types::{Callback, callback};
use ripple_tree::{HandlerSet, NodeFlags, NodeId, Tree};
use tracing_subscriber::EnvFilter;

type Handler = Callback<NodeId, (), Infallible>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree: Tree<Handler> = Tree::new();
    let window = tree.insert(None, NodeFlags::empty()).unwrap();
    let slider = tree
        .insert(Some(window), NodeFlags::COMPOSITE_ROOT)
        .unwrap();
    let track = tree.insert(Some(slider), NodeFlags::empty()).unwrap();
    let thumb = tree.insert(Some(track), NodeFlags::empty()).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    for (node, name) in [
        (window, "window"),
        (slider, "slider"),
        (track, "track"),
        (thumb, "thumb"),
    ] {
        let seen = seen.clone();
        tree.add_handler(
            node,
            HandlerSet::Bubble,
            callback(move |ev: &mut Event<NodeId>| {
                seen.borrow_mut().push((name, ev.phase()));
                Ok(())
            }),
        )
        .unwrap();
    }

    let dispatcher = Dispatcher::new();

    let mut ev = Event::from_flags(EventFlags::BUBBLES);
    dispatcher.dispatch(&tree, thumb, &mut ev).unwrap();
    println!("== Absorbed ==\n  {:?}", seen.borrow());

    seen.borrow_mut().clear();
    let mut ev = Event::from_flags(EventFlags::BUBBLES | EventFlags::SKIP_DISABLED_ELEMENTS);
    dispatcher.dispatch(&tree, thumb, &mut ev).unwrap();
    println!("== Not absorbed ==\n  {:?}", seen.borrow());
}
