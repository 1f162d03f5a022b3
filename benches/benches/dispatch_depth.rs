// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::convert::Infallible;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use ripple_propagation::dispatcher::Dispatcher;
use ripple_propagation::event::{Event, EventFlags};
use ripple_propagation::paths::PropagationPaths;
use ripple_propagation::types::{Callback, callback};
use ripple_tree::{HandlerSet, NodeFlags, NodeId, Tree};

type Cb = Callback<NodeId, u64, Infallible>;

fn counter() -> Cb {
    callback(|ev: &mut Event<NodeId, u64>| {
        *ev.payload_mut() += 1;
        Ok(())
    })
}

/// A single chain of `depth` nodes; every `handler_every`-th node gets a capture
/// and a bubble handler, every `composite_every`-th is a composite root.
fn gen_chain(depth: usize, handler_every: usize, composite_every: usize) -> (Tree<Cb>, NodeId) {
    let mut tree = Tree::new();
    let mut parent = None;
    for i in 0..depth {
        let flags = if composite_every != 0 && i % composite_every == composite_every - 1 {
            NodeFlags::COMPOSITE_ROOT
        } else {
            NodeFlags::empty()
        };
        let id = tree.insert(parent, flags).unwrap();
        if handler_every != 0 && i % handler_every == 0 {
            tree.add_handler(id, HandlerSet::Capture, counter()).unwrap();
            tree.add_handler(id, HandlerSet::Bubble, counter()).unwrap();
        }
        parent = Some(id);
    }
    (tree, parent.unwrap())
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &depth in &[8_usize, 64, 512] {
        let (tree, leaf) = gen_chain(depth, 2, 0);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("chain_d{}", depth), |b| {
            let mut paths = PropagationPaths::with_capacity(depth, 4);
            b.iter(|| {
                paths
                    .build(&tree, black_box(leaf), EventFlags::PROPAGATES, 4096)
                    .unwrap();
                black_box(paths.bubble_up_path().len());
            });
        });
    }
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for &depth in &[8_usize, 64, 512] {
        let (tree, leaf) = gen_chain(depth, 1, 0);
        let dispatcher = Dispatcher::new();
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("all_handlers_d{}", depth), |b| {
            b.iter(|| {
                let mut ev = Event::new(EventFlags::PROPAGATES, 0_u64);
                dispatcher.dispatch(&tree, black_box(leaf), &mut ev).unwrap();
                black_box(*ev.payload());
            });
        });
    }

    let (tree, leaf) = gen_chain(256, 4, 16);
    let dispatcher = Dispatcher::new();
    group.bench_function("composite_roots_d256", |b| {
        b.iter(|| {
            let mut ev = Event::new(EventFlags::PROPAGATES, 0_u64);
            dispatcher.dispatch(&tree, black_box(leaf), &mut ev).unwrap();
            black_box(*ev.payload());
        });
    });
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    let (tree, leaf) = gen_chain(64, 1, 0);
    let dispatcher = Dispatcher::new();
    group.bench_function("copy_and_recycle_d64", |b| {
        let built = dispatcher
            .build_paths(&tree, leaf, EventFlags::PROPAGATES)
            .unwrap();
        b.iter(|| {
            let copy = dispatcher.copy_paths(&built);
            black_box(copy.trickle_down_path().len());
            dispatcher.recycle_paths(copy);
        });
        dispatcher.recycle_paths(built);
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_dispatch, bench_replay);
criterion_main!(benches);
