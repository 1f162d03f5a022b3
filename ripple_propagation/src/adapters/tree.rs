// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation over a [`ripple_tree::Tree`].
//!
//! ## Feature
//!
//! Enable with `tree_adapter`.
//!
//! ## Notes
//!
//! [`Tree<H>`] implements [`Hierarchy`] and [`HandlerRegistry`] directly, keyed by
//! [`NodeId`]. [`NodeFlags::COMPOSITE_ROOT`](ripple_tree::NodeFlags::COMPOSITE_ROOT)
//! marks composite roots. Stale ids behave as parentless nodes without handlers.
//!
//! Handlers that restructure the tree mid-dispatch need shared access to it, so
//! the same traits are implemented for `RefCell<Tree<H>>`. Each trait call takes
//! a short shared borrow; none is held while a handler runs.
//!
//! ```
//! use core::convert::Infallible;
//! use ripple_propagation::dispatcher::Dispatcher;
//! use ripple_propagation::event::{Event, EventFlags};
//! use ripple_propagation::types::{Callback, callback};
//! use ripple_tree::{HandlerSet, NodeFlags, NodeId, Tree};
//!
//! let mut tree: Tree<Callback<NodeId, u32, Infallible>> = Tree::new();
//! let root = tree.insert(None, NodeFlags::empty()).unwrap();
//! let leaf = tree.insert(Some(root), NodeFlags::empty()).unwrap();
//! tree.add_handler(root, HandlerSet::Bubble, callback(|ev: &mut Event<NodeId, u32>| {
//!     *ev.payload_mut() += 1;
//!     Ok(())
//! }))
//! .unwrap();
//!
//! let dispatcher = Dispatcher::new();
//! let mut ev = Event::new(EventFlags::BUBBLES, 0);
//! dispatcher.dispatch(&tree, leaf, &mut ev).unwrap();
//! assert_eq!(*ev.payload(), 1);
//! ```

use core::cell::RefCell;

use ripple_tree::{HandlerSet, NodeId, Tree};

use crate::types::{
    Handler, HandlerLookup, HandlerPhase, HandlerRegistry, Hierarchy, ParentLookup,
};

fn handler_set(phase: HandlerPhase) -> HandlerSet {
    match phase {
        HandlerPhase::Capture => HandlerSet::Capture,
        HandlerPhase::Bubble => HandlerSet::Bubble,
    }
}

impl<H> ParentLookup<NodeId> for Tree<H> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }
}

impl<H> Hierarchy<NodeId> for Tree<H> {
    fn is_composite_root(&self, node: &NodeId) -> bool {
        Tree::is_composite_root(self, *node)
    }
}

impl<H> HandlerLookup<NodeId> for Tree<H> {
    fn has_handlers(&self, node: &NodeId, phase: HandlerPhase) -> bool {
        Tree::has_handlers(self, *node, handler_set(phase))
    }
}

impl<H, P> HandlerRegistry<NodeId, P> for Tree<H>
where
    H: Handler<NodeId, P> + Clone,
{
    type Handler = H;

    fn handlers_into<X: Extend<H>>(&self, node: &NodeId, phase: HandlerPhase, out: &mut X) {
        out.extend(self.handlers(*node, handler_set(phase)).cloned());
    }
}

impl<H> ParentLookup<NodeId> for RefCell<Tree<H>> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.borrow().parent(*node)
    }
}

impl<H> Hierarchy<NodeId> for RefCell<Tree<H>> {
    fn is_composite_root(&self, node: &NodeId) -> bool {
        self.borrow().is_composite_root(*node)
    }
}

impl<H> HandlerLookup<NodeId> for RefCell<Tree<H>> {
    fn has_handlers(&self, node: &NodeId, phase: HandlerPhase) -> bool {
        self.borrow().has_handlers(*node, handler_set(phase))
    }
}

impl<H, P> HandlerRegistry<NodeId, P> for RefCell<Tree<H>>
where
    H: Handler<NodeId, P> + Clone,
{
    type Handler = H;

    fn handlers_into<X: Extend<H>>(&self, node: &NodeId, phase: HandlerPhase, out: &mut X) {
        out.extend(self.borrow().handlers(*node, handler_set(phase)).cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use crate::event::{Event, EventFlags};
    use crate::paths::PropagationPaths;
    use crate::types::{Callback, callback};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::convert::Infallible;
    use ripple_tree::NodeFlags;

    type Log = Rc<RefCell<Vec<NodeId>>>;
    type Cb = Callback<NodeId, (), Infallible>;

    fn log_current(log: &Log) -> Cb {
        let log = log.clone();
        callback(move |ev: &mut Event<NodeId, ()>| {
            log.borrow_mut().extend(ev.current_node());
            Ok(())
        })
    }

    #[test]
    fn paths_follow_tree_structure_and_flags() {
        let mut tree: Tree<Cb> = Tree::new();
        let root = tree.insert(None, NodeFlags::empty()).unwrap();
        let widget = tree.insert(Some(root), NodeFlags::COMPOSITE_ROOT).unwrap();
        let part = tree.insert(Some(widget), NodeFlags::empty()).unwrap();
        let log = Log::default();
        tree.add_handler(root, HandlerSet::Capture, log_current(&log))
            .unwrap();
        tree.add_handler(root, HandlerSet::Bubble, log_current(&log))
            .unwrap();

        let mut paths = PropagationPaths::new();
        paths
            .build(&tree, part, EventFlags::PROPAGATES, 64)
            .unwrap();
        assert_eq!(paths.trickle_down_path(), &[root]);
        assert_eq!(paths.target_elements(), &[widget]);
        assert_eq!(paths.bubble_up_path(), &[root]);

        paths
            .build(
                &tree,
                part,
                EventFlags::PROPAGATES | EventFlags::SKIP_DISABLED_ELEMENTS,
                64,
            )
            .unwrap();
        assert!(paths.target_elements().is_empty());
    }

    #[test]
    fn dispatch_over_a_tree() {
        let mut tree: Tree<Cb> = Tree::new();
        let root = tree.insert(None, NodeFlags::empty()).unwrap();
        let mid = tree.insert(Some(root), NodeFlags::empty()).unwrap();
        let leaf = tree.insert(Some(mid), NodeFlags::empty()).unwrap();
        let log = Log::default();
        for node in [root, mid, leaf] {
            tree.add_handler(node, HandlerSet::Bubble, log_current(&log))
                .unwrap();
        }

        let dispatcher = Dispatcher::new();
        let mut ev = Event::from_flags(EventFlags::BUBBLES);
        dispatcher.dispatch(&tree, leaf, &mut ev).unwrap();
        assert_eq!(*log.borrow(), vec![leaf, mid, root]);
    }

    #[test]
    fn removed_handlers_and_nodes_drop_out() {
        let mut tree: Tree<Cb> = Tree::new();
        let root = tree.insert(None, NodeFlags::empty()).unwrap();
        let mid = tree.insert(Some(root), NodeFlags::empty()).unwrap();
        let leaf = tree.insert(Some(mid), NodeFlags::empty()).unwrap();
        let log = Log::default();
        tree.add_handler(root, HandlerSet::Bubble, log_current(&log))
            .unwrap();
        let on_mid = tree
            .add_handler(mid, HandlerSet::Bubble, log_current(&log))
            .unwrap();
        assert!(tree.remove_handler(on_mid).is_some());

        let dispatcher = Dispatcher::new();
        let mut ev = Event::from_flags(EventFlags::BUBBLES);
        dispatcher.dispatch(&tree, leaf, &mut ev).unwrap();
        assert_eq!(*log.borrow(), vec![root]);

        // A stale target has no parent and no handlers.
        tree.remove(mid);
        log.borrow_mut().clear();
        let mut ev = Event::from_flags(EventFlags::BUBBLES);
        let out = dispatcher.dispatch(&tree, leaf, &mut ev).unwrap();
        assert_eq!(out.handlers_invoked, 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn handlers_can_edit_a_shared_tree_mid_dispatch() {
        let tree: Rc<RefCell<Tree<Cb>>> = Rc::new(RefCell::new(Tree::new()));
        let (root, leaf) = {
            let mut t = tree.borrow_mut();
            let root = t.insert(None, NodeFlags::empty()).unwrap();
            let leaf = t.insert(Some(root), NodeFlags::empty()).unwrap();
            (root, leaf)
        };
        let log = Log::default();
        let on_root = tree
            .borrow_mut()
            .add_handler(root, HandlerSet::Bubble, log_current(&log))
            .unwrap();

        // The target deregisters the root's handler; the walk already built
        // the path, but the root is snapshotted only when reached.
        let weak = Rc::downgrade(&tree);
        let l = log.clone();
        tree.borrow_mut()
            .add_handler(
                leaf,
                HandlerSet::Bubble,
                callback(move |ev: &mut Event<NodeId, ()>| {
                    l.borrow_mut().extend(ev.current_node());
                    if let Some(tree) = weak.upgrade() {
                        tree.borrow_mut().remove_handler(on_root);
                    }
                    Ok(())
                }),
            )
            .unwrap();

        let dispatcher = Dispatcher::new();
        let mut ev = Event::from_flags(EventFlags::BUBBLES);
        let out = dispatcher.dispatch(&*tree, leaf, &mut ev).unwrap();
        assert_eq!(*log.borrow(), vec![leaf]);
        assert_eq!(out.handlers_invoked, 1);
    }
}
