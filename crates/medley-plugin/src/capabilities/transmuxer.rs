// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transmuxer capability: container conversion without re-encoding.

use medley_core::{ContentType, MimeType, SegmentReference, StreamDescriptor};
use medley_ops::AbortableOperation;

/// A plugin instance that repackages media from one container to another.
pub trait Transmuxer: Send + Sync {
    /// Whether this transmuxer handles `mime_type`, optionally narrowed to
    /// one media dimension.
    fn is_supported(&self, mime_type: &MimeType, content_type: Option<ContentType>) -> bool;

    /// The codec string the output will carry for input declared as
    /// `mime_type` within `content_type`.
    fn convert_codecs(&self, content_type: ContentType, mime_type: &MimeType) -> String;

    /// Repackages `data`, returning the converted bytes as an abortable
    /// operation. Long transmuxes honour the operation's cancellation
    /// token at segment boundaries.
    fn transmux(
        &self,
        data: Vec<u8>,
        stream: &StreamDescriptor,
        reference: Option<&SegmentReference>,
    ) -> AbortableOperation<Vec<u8>>;
}

/// Constructs [`Transmuxer`] instances on demand.
///
/// Instantiation is lazy: the registry stores factories and only calls
/// `create` when a caller actually requests an instance.
pub trait TransmuxerFactory: Send + Sync + 'static {
    fn create(&self) -> Box<dyn Transmuxer>;
}

// Plain closures work as factories, so tests and plugin authors can
// register `|| Box::new(MyTransmuxer::new())` directly.
impl<F> TransmuxerFactory for F
where
    F: Fn() -> Box<dyn Transmuxer> + Send + Sync + 'static,
{
    fn create(&self) -> Box<dyn Transmuxer> {
        self()
    }
}
