// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capture, target, and bubble over a small tree.
//!
//! Builds `root -> panel -> button`, registers logging handlers on every node,
//! and dispatches three events: one that propagates fully, one stopped by the
//! panel during capture, and one whose handler fails.
//!
//! Run:
//! - `RUST_LOG=ripple_propagation=trace cargo run -p ripple_demos --example dispatch_basics`

use std::cell::RefCell;
use std::rc::Rc;

use ripple_propagation::dispatcher::Dispatcher;
use ripple_propagation::error::DispatchError;
use ripple_propagation::event::{Event, EventFlags};
use ripple_propagation::types::{Callback, callback};
use ripple_tree::{HandlerSet, NodeFlags, NodeId, Tree};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
#[error("button is disabled")]
struct Disabled;

#[derive(Debug, Default)]
struct Click {
    stop_at_panel: bool,
    fail_at_button: bool,
}

type Handler = Callback<NodeId, Click, Disabled>;
type Log = Rc<RefCell<Vec<String>>>;

fn logger(log: &Log, name: &'static str) -> Handler {
    let log = log.clone();
    callback(move |ev: &mut Event<NodeId, Click>| {
        log.borrow_mut().push(format!("{name} ({:?})", ev.phase()));
        Ok(())
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree: Tree<Handler> = Tree::new();
    let root = tree.insert(None, NodeFlags::empty()).unwrap();
    let panel = tree.insert(Some(root), NodeFlags::empty()).unwrap();
    let button = tree.insert(Some(panel), NodeFlags::empty()).unwrap();

    let log = Log::default();
    for (node, name) in [(root, "root"), (panel, "panel"), (button, "button")] {
        tree.add_handler(node, HandlerSet::Capture, logger(&log, name))
            .unwrap();
        tree.add_handler(node, HandlerSet::Bubble, logger(&log, name))
            .unwrap();
    }
    tree.add_handler(
        panel,
        HandlerSet::Capture,
        callback(|ev: &mut Event<NodeId, Click>| {
            if ev.payload().stop_at_panel {
                ev.stop_propagation();
            }
            Ok(())
        }),
    )
    .unwrap();
    tree.add_handler(
        button,
        HandlerSet::Bubble,
        callback(|ev: &mut Event<NodeId, Click>| {
            if ev.payload().fail_at_button {
                return Err(Disabled);
            }
            Ok(())
        }),
    )
    .unwrap();

    let dispatcher = Dispatcher::new();

    let mut ev = Event::new(EventFlags::PROPAGATES, Click::default());
    let out = dispatcher.dispatch(&tree, button, &mut ev).unwrap();
    info!(handlers = out.handlers_invoked, "full dispatch");
    println!("== Full ==\n  {:#?}", log.borrow());
    assert_eq!(log.borrow().len(), 6);

    log.borrow_mut().clear();
    let mut ev = Event::new(
        EventFlags::PROPAGATES,
        Click {
            stop_at_panel: true,
            ..Click::default()
        },
    );
    let out = dispatcher.dispatch(&tree, button, &mut ev).unwrap();
    println!("== Stopped at {:?} ==\n  {:#?}", out.stopped_at, log.borrow());
    assert_eq!(*log.borrow(), ["root (Some(Capture))", "panel (Some(Capture))"]);

    log.borrow_mut().clear();
    let mut ev = Event::new(
        EventFlags::PROPAGATES,
        Click {
            fail_at_button: true,
            ..Click::default()
        },
    );
    match dispatcher.dispatch(&tree, button, &mut ev) {
        Err(DispatchError::Handler { phase, source }) => {
            println!("== Failed during {phase:?}: {source} ==\n  {:#?}", log.borrow());
        }
        other => panic!("expected a handler error, got {other:?}"),
    }
    println!("pool: {:?}", dispatcher.pool_stats());
    assert_eq!(dispatcher.pool_stats().outstanding, 0);
}
