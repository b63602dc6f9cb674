use crate::image::ImageBuffer;
use crate::timeline::Profile;

/// One secondary media stream the bridge decodes auxiliary images from.
///
/// Sources are stateful: `seek` moves the internal read position and
/// `decode_frame` consumes one frame from it. A source is exclusively owned
/// by its [`ImageProducer`](crate::producer::ImageProducer) and never shared
/// across threads.
pub trait MediaSource {
    /// Last valid frame position of this source. Requests past it are
    /// silently skipped by the producer, allowing auxiliary clips shorter
    /// than the main timeline.
    fn out_position(&self) -> i64;

    fn seek(&mut self, position: i64);

    /// Decode one frame at the current read position, sized to fit the
    /// requested dimensions. Implementations may return other actual
    /// dimensions; the producer's truncating copy absorbs the mismatch.
    fn decode_frame(&mut self, width: u32, height: u32) -> anyhow::Result<ImageBuffer>;

    /// Receive one `producer.<name>.*` pass-through property. Sources ignore
    /// keys they do not understand.
    fn set_property(&mut self, _key: &str, _value: &str) {}
}

/// Builds media sources from a resource string, e.g. a file path or URL.
/// Failures at bridge initialization surface as
/// [`BridgeError::ProducerCreate`](crate::error::BridgeError::ProducerCreate).
pub trait MediaFactory: Send + Sync {
    fn create(
        &self,
        profile: &Profile,
        kind: Option<&str>,
        resource: &str,
    ) -> anyhow::Result<Box<dyn MediaSource>>;
}
