// Copyright 2025 the Ripple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by path building and dispatch.

use crate::types::Phase;

/// Path building failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PathError {
    /// The parent chain did not reach a root within `limit` ancestors.
    #[error("parent chain exceeds {limit} ancestors; the hierarchy is cyclic or malformed")]
    HierarchyCycle {
        /// Configured maximum depth.
        limit: usize,
    },
}

/// Dispatch failed. `E` is the handler error type.
///
/// In every case the path was returned to the pool before the error was returned.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError<E> {
    /// The propagation path could not be built; no handler ran.
    #[error(transparent)]
    Hierarchy(#[from] PathError),
    /// A handler returned an error; the remaining handlers and phases were skipped.
    #[error("handler failed during {phase:?} phase")]
    Handler {
        /// Phase of the failing handler.
        phase: Phase,
        /// Error returned by the handler.
        #[source]
        source: E,
    },
}

impl<E> DispatchError<E> {
    /// Handler error, if this is a [`DispatchError::Handler`].
    pub fn handler_error(&self) -> Option<&E> {
        match self {
            Self::Handler { source, .. } => Some(source),
            Self::Hierarchy(_) => None,
        }
    }
}
