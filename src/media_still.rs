use std::path::Path;

use anyhow::Context;

use crate::image::ImageBuffer;
use crate::media::{MediaFactory, MediaSource};
use crate::timeline::Profile;

/// A media source backed by a single still image, decoded once and served
/// resized to whatever dimensions each frame request asks for.
///
/// Every position up to `out_position` yields the same picture; the `out`
/// pass-through property bounds the valid range so a still can end before
/// the host timeline does.
pub struct StillImageSource {
    decoded: image::RgbaImage,
    out_position: i64,
}

impl StillImageSource {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read still image '{}'", path.display()))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .context("decode still image from memory")?
            .to_rgba8();
        Ok(Self {
            decoded,
            out_position: i64::MAX,
        })
    }
}

impl MediaSource for StillImageSource {
    fn out_position(&self) -> i64 {
        self.out_position
    }

    fn seek(&mut self, _position: i64) {
        // A still image has a single frame; every position reads the same.
    }

    fn decode_frame(&mut self, width: u32, height: u32) -> anyhow::Result<ImageBuffer> {
        let resized = if self.decoded.dimensions() == (width, height) {
            self.decoded.clone()
        } else {
            image::imageops::resize(
                &self.decoded,
                width,
                height,
                image::imageops::FilterType::Triangle,
            )
        };
        let (w, h) = resized.dimensions();
        let stride = w as usize * ImageBuffer::BYTES_PER_PIXEL;
        Ok(ImageBuffer::from_pixels(w, h, stride, resized.into_raw())?)
    }

    fn set_property(&mut self, key: &str, value: &str) {
        if key == "out"
            && let Ok(out) = value.trim().parse::<i64>()
        {
            self.out_position = out;
        }
    }
}

/// The crate's stock [`MediaFactory`]: treats every resource as a still
/// image file path. The producer kind is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct StillImageFactory;

impl MediaFactory for StillImageFactory {
    fn create(
        &self,
        _profile: &Profile,
        _kind: Option<&str>,
        resource: &str,
    ) -> anyhow::Result<Box<dyn MediaSource>> {
        Ok(Box::new(StillImageSource::open(Path::new(resource))?))
    }
}
