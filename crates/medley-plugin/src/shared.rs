// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread-safe, clone-to-share registry wrapper for multi-threaded hosts.

use std::sync::Arc;

use tokio::sync::RwLock;

use medley_core::{MedleyError, MimeType};

use crate::registry::PluginRegistry;

/// A [`PluginRegistry`] behind `Arc<RwLock<..>>`.
///
/// Each operation takes the lock once, so every call observes a single
/// consistent snapshot of the mapping. No ordering is promised between a
/// registration and a concurrently in-flight resolve racing it; hosts are
/// expected to register plugins before issuing work that depends on them.
pub struct SharedRegistry<F> {
    inner: Arc<RwLock<PluginRegistry<F>>>,
}

impl<F> Clone for SharedRegistry<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F> SharedRegistry<F> {
    /// Creates an empty shared registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PluginRegistry::new())),
        }
    }

    /// See [`PluginRegistry::register`].
    pub async fn register(&self, identifier: &str, factory: F) -> Result<(), MedleyError> {
        self.inner.write().await.register(identifier, factory)
    }

    /// See [`PluginRegistry::unregister`].
    pub async fn unregister(&self, identifier: &str) {
        self.inner.write().await.unregister(identifier);
    }

    /// See [`PluginRegistry::is_supported`].
    pub async fn is_supported(&self, identifier: &str) -> bool {
        self.inner.read().await.is_supported(identifier)
    }

    /// All registered content types, sorted.
    pub async fn mime_types(&self) -> Vec<MimeType> {
        self.inner
            .read()
            .await
            .mime_types()
            .into_iter()
            .cloned()
            .collect()
    }
}

impl<F: Clone> SharedRegistry<F> {
    /// Clone of the factory for `identifier`, or `None`.
    ///
    /// Factories are shared (typically `Arc`-wrapped), so resolution hands
    /// out a clone rather than holding the lock across instantiation.
    pub async fn resolve(&self, identifier: &str) -> Option<F> {
        self.inner.read().await.resolve(identifier).cloned()
    }
}

impl<F> Default for SharedRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}
