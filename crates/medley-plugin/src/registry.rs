// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-type plugin registry.
//!
//! The registry maps normalized content-type identifiers to opaque plugin
//! factories. It decouples "what content type am I dealing with" from
//! "which concrete plugin handles it", supporting dynamic registration for
//! tests, platform-conditional plugins, and late-loaded codecs. Factories
//! are stored and handed out untouched; the registry never inspects them.

use std::collections::HashMap;

use tracing::{debug, warn};

use medley_core::{MedleyError, MimeType};

/// Registry of plugin factories keyed by normalized content type.
///
/// Keys are case-insensitive end-to-end: every operation folds its
/// identifier through [`MimeType::parse`] before touching the map, so two
/// raw identifiers differing only in letter case collide by design. The
/// last registration for a normalized key wins; insertion order is
/// irrelevant to resolution.
pub struct PluginRegistry<F> {
    entries: HashMap<MimeType, F>,
}

impl<F> PluginRegistry<F> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Stores `factory` under the normalized form of `identifier`,
    /// overwriting any prior entry for that key.
    ///
    /// Overwriting is not an error -- last writer wins, which supports test
    /// setup/teardown and runtime plugin replacement. An empty or malformed
    /// identifier is rejected synchronously and nothing is stored.
    pub fn register(&mut self, identifier: &str, factory: F) -> Result<(), MedleyError> {
        let key = MimeType::parse(identifier)?;
        if self.entries.insert(key.clone(), factory).is_some() {
            warn!(mime_type = %key, "replacing previously registered plugin factory");
        } else {
            debug!(mime_type = %key, "registered plugin factory");
        }
        Ok(())
    }

    /// Removes the entry for the normalized form of `identifier`.
    ///
    /// A no-op, not an error, if no such entry exists. A malformed
    /// identifier can never have been registered, so it is likewise a no-op.
    pub fn unregister(&mut self, identifier: &str) {
        let Ok(key) = MimeType::parse(identifier) else {
            return;
        };
        if self.entries.remove(&key).is_some() {
            debug!(mime_type = %key, "unregistered plugin factory");
        }
    }

    /// Whether a factory is registered for `identifier`, case-insensitively.
    pub fn is_supported(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_some()
    }

    /// The factory for `identifier`, or `None`.
    ///
    /// Absence is a normal, expected outcome -- an unsupported content type
    /// is reported upstream as such, never as a crash.
    pub fn resolve(&self, identifier: &str) -> Option<&F> {
        let key = MimeType::parse(identifier).ok()?;
        self.entries.get(&key)
    }

    /// All registered content types, sorted.
    pub fn mime_types(&self) -> Vec<&MimeType> {
        let mut keys: Vec<&MimeType> = self.entries.keys().collect();
        keys.sort();
        keys
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no factories are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F> Default for PluginRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}
