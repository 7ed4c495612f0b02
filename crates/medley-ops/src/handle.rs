// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clonable abort handles, detached from the operation's result type.

use std::sync::Arc;

use crate::operation::{OperationState, Shared};

/// The abort capability of one [`AbortableOperation`], without its result.
///
/// Cloned freely and handed to controllers that must be able to stop the
/// work but never consume its value, e.g. an external timeout: start a
/// timer, call [`AbortHandle::abort`] when it fires, and let the owner
/// observe the terminal state as usual.
///
/// [`AbortableOperation`]: crate::AbortableOperation
#[derive(Clone)]
pub struct AbortHandle {
    shared: Arc<Shared>,
}

impl AbortHandle {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Same contract as [`AbortableOperation::abort`]: requests cooperative
    /// cancellation, resolves once the work has ceased, never fails, and is
    /// a prompt no-op on an already-terminal operation.
    ///
    /// [`AbortableOperation::abort`]: crate::AbortableOperation::abort
    pub async fn abort(&self) {
        self.shared.request_abort().await;
    }

    /// Current lifecycle state of the underlying operation.
    pub fn state(&self) -> OperationState {
        self.shared.state()
    }
}

impl std::fmt::Debug for AbortHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbortHandle")
            .field("state", &self.shared.state())
            .finish()
    }
}
