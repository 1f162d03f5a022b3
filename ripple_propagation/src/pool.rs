// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free list of reusable [`PropagationPaths`].
//!
//! ## Overview
//!
//! Dispatch leases a path, fills it, and hands it back. Released paths keep their
//! capacity, so steady-state dispatch does not allocate.
//!
//! - [`PathPool::acquire`] returns a released path (already empty) or a fresh one
//!   sized by [`PoolConfig`].
//! - [`PathPool::release`] clears the path, dropping its node keys, and keeps it
//!   for reuse up to [`PoolConfig::max_retained`].
//! - [`PathPool::copy`] snapshots a path into another pooled instance.
//!
//! The pool is owned by a [`Dispatcher`](crate::dispatcher::Dispatcher), not global.
//! It has no locking; nested dispatch on one thread is fine because every
//! acquire hands out a distinct instance.

use alloc::vec::Vec;

use crate::config::PoolConfig;
use crate::paths::PropagationPaths;

/// Counters describing a [`PathPool`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Released paths waiting for reuse.
    pub free: usize,
    /// Paths acquired and not yet released.
    pub outstanding: usize,
    /// Paths constructed by the pool since it was created.
    pub allocated: usize,
}

/// Reusable free list of [`PropagationPaths`].
#[derive(Debug)]
pub struct PathPool<K> {
    free: Vec<PropagationPaths<K>>,
    config: PoolConfig,
    outstanding: usize,
    allocated: usize,
}

impl<K: Copy> Default for PathPool<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy> PathPool<K> {
    /// Create an empty pool with default sizing.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create an empty pool with explicit sizing.
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            free: Vec::new(),
            config,
            outstanding: 0,
            allocated: 0,
        }
    }

    /// Sizing this pool was created with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Take an empty path from the free list, or construct one.
    pub fn acquire(&mut self) -> PropagationPaths<K> {
        self.outstanding += 1;
        match self.free.pop() {
            Some(paths) => {
                debug_assert!(paths.is_empty(), "pooled paths must be cleared on release");
                paths
            }
            None => {
                self.allocated += 1;
                PropagationPaths::with_capacity(
                    self.config.depth_capacity,
                    self.config.target_capacity,
                )
            }
        }
    }

    /// Clear `paths` and return it to the free list.
    ///
    /// Releasing more paths than were acquired is a lifetime bug in the caller.
    pub fn release(&mut self, mut paths: PropagationPaths<K>) {
        debug_assert!(
            self.outstanding > 0,
            "released a path that was not acquired from this pool"
        );
        self.outstanding = self.outstanding.saturating_sub(1);
        paths.clear();
        if self.free.len() < self.config.max_retained {
            self.free.push(paths);
        }
    }

    /// Acquire a path holding a copy of `source`.
    ///
    /// The copy is independent: `source` can be mutated or released afterwards.
    pub fn copy(&mut self, source: &PropagationPaths<K>) -> PropagationPaths<K> {
        let mut paths = self.acquire();
        paths.copy_from(source);
        paths
    }

    /// Current counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            free: self.free.len(),
            outstanding: self.outstanding,
            allocated: self.allocated,
        }
    }
}
