use crate::error::{BridgeError, BridgeResult};

/// A plain raw-pixel container: RGBA8, row-major, `stride` bytes per row.
///
/// Buffers cross the bridge in two ownership shapes: the host's destination
/// buffer is borrowed per render call, while named-slot buffers are owned by
/// the render engine and fetched by name. Both are `ImageBuffer`s; only the
/// copy direction differs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    stride: usize,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Bytes per pixel of the fixed RGBA8 layout.
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Allocate a zeroed buffer with a tight stride.
    pub fn new(width: u32, height: u32) -> BridgeResult<Self> {
        let stride = width as usize * Self::BYTES_PER_PIXEL;
        Self::from_pixels(width, height, stride, vec![0; stride * height as usize])
    }

    /// Wrap existing pixel data with an explicit stride.
    pub fn from_pixels(
        width: u32,
        height: u32,
        stride: usize,
        pixels: Vec<u8>,
    ) -> BridgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(BridgeError::validation(
                "ImageBuffer dimensions must be > 0",
            ));
        }
        if stride < width as usize * Self::BYTES_PER_PIXEL {
            return Err(BridgeError::validation(
                "ImageBuffer stride must cover a full row",
            ));
        }
        if stride * height as usize > pixels.len() {
            return Err(BridgeError::validation(
                "ImageBuffer pixel data shorter than stride * height",
            ));
        }
        Ok(Self {
            width,
            height,
            stride,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.pixels[start..start + self.width as usize * Self::BYTES_PER_PIXEL]
    }

    fn row_mut(&mut self, y: usize, row_bytes: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.pixels[start..start + row_bytes]
    }

    /// Copy pixels from `src`, respecting both strides.
    ///
    /// Copies `min` dimensions; never resizes the destination, silently
    /// truncates a larger source.
    pub fn copy_pixels_from(&mut self, src: &ImageBuffer) {
        let rows = self.height.min(src.height) as usize;
        let row_bytes =
            self.width.min(src.width) as usize * Self::BYTES_PER_PIXEL;
        for y in 0..rows {
            self.row_mut(y, row_bytes)
                .copy_from_slice(&src.row(y)[..row_bytes]);
        }
    }

    /// Symmetric counterpart of [`copy_pixels_from`](Self::copy_pixels_from).
    pub fn copy_pixels_to(&self, dst: &mut ImageBuffer) {
        dst.copy_pixels_from(self);
    }
}
