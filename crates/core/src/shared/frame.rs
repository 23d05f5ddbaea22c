use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

/// A single camera frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at the capture and display boundaries only;
/// everything in between treats pixel data as opaque.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the source has not produced a decoded picture yet.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// JPEG-encode at the frame's native resolution for the wire.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, image::ImageError> {
        let mut out = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
        encoder.encode(&self.data, self.width, self.height, ExtendedColorType::Rgb8)?;
        Ok(out)
    }

    /// Expand to RGBA for display surfaces that want an alpha channel.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / 3 * 4);
        for px in self.data.chunks_exact(3) {
            out.extend_from_slice(px);
            out.push(u8::MAX);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.data(), &data[..]);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_zero_dimension_frame_is_empty() {
        let frame = Frame::new(Vec::new(), 0, 0);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_encode_jpeg_produces_jpeg_magic() {
        let frame = Frame::new(vec![128u8; 4 * 4 * 3], 4, 4);
        let jpeg = frame.encode_jpeg(80).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_to_rgba_interleaves_opaque_alpha() {
        let frame = Frame::new(vec![1, 2, 3, 4, 5, 6], 2, 1);
        assert_eq!(frame.to_rgba(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }
}
