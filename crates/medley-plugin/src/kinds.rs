// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry aliases bound to the concrete plugin kinds.
//!
//! Factories are stored `Arc`-wrapped so the shared registries can hand out
//! clones without holding their lock across plugin instantiation.

use std::sync::Arc;

use crate::capabilities::{ManifestParserFactory, TransmuxerFactory};
use crate::registry::PluginRegistry;
use crate::shared::SharedRegistry;

/// Content type -> transmuxer factory.
pub type TransmuxerRegistry = PluginRegistry<Arc<dyn TransmuxerFactory>>;

/// Content type -> manifest parser factory.
pub type ManifestParserRegistry = PluginRegistry<Arc<dyn ManifestParserFactory>>;

/// Thread-safe [`TransmuxerRegistry`].
pub type SharedTransmuxerRegistry = SharedRegistry<Arc<dyn TransmuxerFactory>>;

/// Thread-safe [`ManifestParserRegistry`].
pub type SharedManifestParserRegistry = SharedRegistry<Arc<dyn ManifestParserFactory>>;
