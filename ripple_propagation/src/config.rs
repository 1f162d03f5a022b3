// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher and pool configuration.
//!
//! Both types implement `Default`; with the `serde` feature they also derive
//! `Serialize`/`Deserialize`, with missing fields falling back to the defaults.

/// Sizing of the [`PathPool`](crate::pool::PathPool).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Initial capacity of the trickle-down and bubble-up lists of a fresh path.
    pub depth_capacity: usize,
    /// Initial capacity of the composite-root list of a fresh path.
    pub target_capacity: usize,
    /// Maximum number of released paths kept for reuse; surplus paths are dropped.
    pub max_retained: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            depth_capacity: 16,
            target_capacity: 4,
            max_retained: 32,
        }
    }
}

/// Configuration of a [`Dispatcher`](crate::dispatcher::Dispatcher).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Maximum number of ancestors walked before the hierarchy is reported as cyclic.
    pub max_depth: usize,
    /// Path pool sizing.
    pub pool: PoolConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4096,
            pool: PoolConfig::default(),
        }
    }
}
