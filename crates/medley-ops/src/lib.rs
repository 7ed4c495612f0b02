// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Abortable asynchronous operations for the Medley media plugin framework.
//!
//! Every long-running action in the pipeline (network fetch, transmux,
//! manifest refresh) is wrapped as an [`AbortableOperation`] so callers get
//! one cancellation and completion contract regardless of which plugin
//! implementation is doing the work. Cancellation is always cooperative,
//! signalled through a [`tokio_util::sync::CancellationToken`] the work
//! observes at its own safe points.

pub mod handle;
pub mod operation;

pub use handle::AbortHandle;
pub use operation::{AbortableOperation, OperationState};
