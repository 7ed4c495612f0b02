// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions for the plugin kinds the registry resolves.
//!
//! Each plugin kind is a closed capability interface plus a factory trait.
//! The registry is generic over the factory and never looks past it; what a
//! produced instance does internally belongs to the plugin author.

pub mod manifest;
pub mod transmuxer;

pub use manifest::{ManifestParser, ManifestParserFactory};
pub use transmuxer::{Transmuxer, TransmuxerFactory};
