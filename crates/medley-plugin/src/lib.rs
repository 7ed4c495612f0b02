// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry and capability traits for the Medley media framework.
//!
//! A caller asks the registry to resolve a content-type identifier; the
//! registry returns a factory or `None`; the caller instantiates a plugin
//! from the factory. Long-running work those instances perform (transmux,
//! manifest load) comes back as [`medley_ops::AbortableOperation`] values,
//! so the caller keeps one cancellation and completion contract regardless
//! of which plugin implementation is in use.

pub mod capabilities;
pub mod kinds;
pub mod registry;
pub mod shared;

pub use capabilities::{ManifestParser, ManifestParserFactory, Transmuxer, TransmuxerFactory};
pub use kinds::{
    ManifestParserRegistry, SharedManifestParserRegistry, SharedTransmuxerRegistry,
    TransmuxerRegistry,
};
pub use registry::PluginRegistry;
pub use shared::SharedRegistry;
