// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-written hierarchy shared by the unit tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::types::{
    Callback, HandlerLookup, HandlerPhase, HandlerRegistry, Hierarchy, ParentLookup, callback,
};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("handler on node {0} failed")]
pub(crate) struct TestError(pub(crate) u32);

pub(crate) type TestCallback = Callback<u32, (), TestError>;

pub(crate) type Log = Rc<RefCell<Vec<&'static str>>>;

#[derive(Default)]
struct TestNode {
    parent: Option<u32>,
    composite: bool,
    capture: Vec<TestCallback>,
    bubble: Vec<TestCallback>,
}

/// Nodes are numbered in insertion order starting at 0.
///
/// Interior mutability lets handlers register callbacks mid-dispatch.
#[derive(Default)]
pub(crate) struct Scene {
    nodes: RefCell<Vec<TestNode>>,
}

impl Scene {
    pub(crate) fn add(&self, parent: Option<u32>) -> u32 {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(TestNode {
            parent,
            ..TestNode::default()
        });
        u32::try_from(nodes.len() - 1).unwrap()
    }

    pub(crate) fn add_composite(&self, parent: Option<u32>) -> u32 {
        let id = self.add(parent);
        self.set_composite(id, true);
        id
    }

    pub(crate) fn set_composite(&self, node: u32, composite: bool) {
        self.nodes.borrow_mut()[node as usize].composite = composite;
    }

    pub(crate) fn set_parent(&self, node: u32, parent: Option<u32>) {
        self.nodes.borrow_mut()[node as usize].parent = parent;
    }

    pub(crate) fn on(&self, node: u32, phase: HandlerPhase, cb: TestCallback) {
        let mut nodes = self.nodes.borrow_mut();
        let n = &mut nodes[node as usize];
        match phase {
            HandlerPhase::Capture => n.capture.push(cb),
            HandlerPhase::Bubble => n.bubble.push(cb),
        }
    }
}

impl ParentLookup<u32> for Scene {
    fn parent_of(&self, node: &u32) -> Option<u32> {
        self.nodes.borrow().get(*node as usize)?.parent
    }
}

impl Hierarchy<u32> for Scene {
    fn is_composite_root(&self, node: &u32) -> bool {
        self.nodes
            .borrow()
            .get(*node as usize)
            .is_some_and(|n| n.composite)
    }
}

impl HandlerLookup<u32> for Scene {
    fn has_handlers(&self, node: &u32, phase: HandlerPhase) -> bool {
        self.nodes
            .borrow()
            .get(*node as usize)
            .is_some_and(|n| match phase {
                HandlerPhase::Capture => !n.capture.is_empty(),
                HandlerPhase::Bubble => !n.bubble.is_empty(),
            })
    }
}

impl HandlerRegistry<u32, ()> for Scene {
    type Handler = TestCallback;

    fn handlers_into<X: Extend<TestCallback>>(&self, node: &u32, phase: HandlerPhase, out: &mut X) {
        let nodes = self.nodes.borrow();
        if let Some(n) = nodes.get(*node as usize) {
            let list = match phase {
                HandlerPhase::Capture => &n.capture,
                HandlerPhase::Bubble => &n.bubble,
            };
            out.extend(list.iter().cloned());
        }
    }
}

pub(crate) fn noop() -> TestCallback {
    callback(|_| Ok(()))
}

/// Handler that appends `name` to `log`.
pub(crate) fn record(log: &Log, name: &'static str) -> TestCallback {
    let log = log.clone();
    callback(move |_| {
        log.borrow_mut().push(name);
        Ok(())
    })
}

pub(crate) fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}
