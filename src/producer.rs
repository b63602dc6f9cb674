use crate::error::{BridgeError, BridgeResult};
use crate::image::ImageBuffer;
use crate::media::MediaSource;

/// Binds one Extra image slot to the media source that feeds it.
///
/// Producers are driven sequentially in declaration order on every render
/// call; each `produce_image` advances the source's internal read position.
pub struct ImageProducer {
    name: String,
    source: Box<dyn MediaSource>,
}

impl ImageProducer {
    pub fn new(name: impl Into<String>, source: Box<dyn MediaSource>) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seek to `position`, decode one frame and copy it into `target` at
    /// `target`'s existing dimensions.
    ///
    /// Positions past the source's declared out position are not an error:
    /// the call succeeds and `target` is left byte-for-byte unchanged, so
    /// auxiliary clips may be shorter than the main timeline.
    pub fn produce_image(
        &mut self,
        position: i64,
        target: &mut ImageBuffer,
    ) -> BridgeResult<()> {
        if position > self.source.out_position() {
            return Ok(());
        }
        self.source.seek(position);
        let frame = self
            .source
            .decode_frame(target.width(), target.height())
            .map_err(|e| {
                BridgeError::decode(format!(
                    "failed to produce image for '{}' at position {position}: {e:#}",
                    self.name
                ))
            })?;
        target.copy_pixels_from(&frame);
        Ok(())
    }
}
