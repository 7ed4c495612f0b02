// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the Medley registry and plugin capability traits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::MedleyError;

/// A normalized content-type identifier (`type/subtype`, MIME syntax).
///
/// The wrapped string is always the trimmed, ASCII-lower-cased form of the
/// caller-supplied identifier. Normalization happens exactly once, in
/// [`MimeType::parse`]; every mapping boundary (insert, delete, query) goes
/// through it, so two raw identifiers differing only in letter case collide
/// by design.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeType(String);

impl MimeType {
    /// Parse and normalize a raw content-type identifier.
    ///
    /// Rejects empty or whitespace-only input, and input that is not two
    /// non-empty halves around a `/`. MIME parameters (`; codecs=...`) are
    /// kept as part of the identifier.
    pub fn parse(raw: &str) -> Result<Self, MedleyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MedleyError::InvalidMimeType(raw.to_string()));
        }
        match trimmed.split_once('/') {
            Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty() => {
                Ok(Self(trimmed.to_ascii_lowercase()))
            }
            _ => Err(MedleyError::InvalidMimeType(raw.to_string())),
        }
    }

    /// The normalized identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `type` half of the identifier (e.g. `"video"` for `video/mp4`).
    pub fn kind(&self) -> &str {
        // parse() guarantees the separator is present.
        self.0.split('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MimeType {
    type Err = MedleyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The media dimension a stream or plugin capability applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Audio,
    Video,
    Text,
    Image,
}

/// Description of the stream a transmuxer is asked to convert.
///
/// The registry and operation layers never inspect these fields; they are
/// passed through to plugin instances as-is.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    pub mime_type: MimeType,
    pub codecs: String,
    pub content_type: ContentType,
}

/// Time range of one media segment, in presentation seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentReference {
    pub start_time: f64,
    pub end_time: f64,
}

/// Configuration handed to a manifest parser before it starts.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Seconds between manifest refreshes for live content; 0 disables.
    pub update_period_secs: f64,
    pub default_presentation_delay_secs: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            update_period_secs: 0.0,
            default_presentation_delay_secs: 10.0,
        }
    }
}

/// Result of a manifest parse, as much of it as this core needs to name.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub duration_secs: Option<f64>,
    pub is_live: bool,
}
