// Decoded video frames
// Decoding and resizing happen upstream; the pipeline only moves frames
// between the clip accumulator and the evidence buffer.

use std::sync::Arc;

/// One decoded image. Pixel data is immutable and shared, so retaining a
/// frame in the evidence buffer is a cheap clone rather than a pixel copy.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    data: Arc<[u8]>,
}

impl Frame {
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * channels) as usize);
        Self {
            width,
            height,
            channels,
            data: data.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}
