// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest parser capability: fetching and interpreting presentation
//! descriptions (DASH MPDs, HLS playlists and the like).

use async_trait::async_trait;

use medley_core::{Manifest, MedleyError, ParserConfig};
use medley_ops::AbortableOperation;

/// A plugin instance that loads and maintains one presentation manifest.
#[async_trait]
pub trait ManifestParser: Send + Sync {
    /// Applies configuration. Called before `start` and again whenever the
    /// host's configuration changes.
    fn configure(&mut self, config: ParserConfig);

    /// Begins loading the manifest at `uri`. The returned operation settles
    /// with the parsed manifest, or aborted if the caller stops playback
    /// before the load finishes.
    fn start(&self, uri: &str) -> AbortableOperation<Manifest>;

    /// Refreshes a live manifest in place.
    async fn update(&self) -> Result<(), MedleyError>;

    /// Releases resources held by the parser. Called once, after which the
    /// instance is dropped.
    async fn stop(&self) -> Result<(), MedleyError>;
}

/// Constructs [`ManifestParser`] instances on demand.
pub trait ManifestParserFactory: Send + Sync + 'static {
    fn create(&self) -> Box<dyn ManifestParser>;
}

impl<F> ManifestParserFactory for F
where
    F: Fn() -> Box<dyn ManifestParser> + Send + Sync + 'static,
{
    fn create(&self) -> Box<dyn ManifestParser> {
        self()
    }
}
