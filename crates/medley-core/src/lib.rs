// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Medley media plugin framework.
//!
//! This crate provides the error type and the common value types (normalized
//! content-type identifiers, stream descriptors) used by the plugin registry
//! and the abortable-operation crates.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MedleyError;
pub use types::{
    ContentType, Manifest, MimeType, ParserConfig, SegmentReference, StreamDescriptor,
};
