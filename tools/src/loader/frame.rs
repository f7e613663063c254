use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::error::ToolsError;

/// Prefix the recorder puts in front of every frame payload.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Decode one base64 PNG payload. A payload that fails to decode is fatal
/// for the whole run; the error names the frame it came from.
pub fn decode_frame(index: u32, payload: &str) -> Result<RgbaImage, ToolsError> {
    let encoded = payload.strip_prefix(DATA_URI_PREFIX).unwrap_or(payload);
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| ToolsError::Frame(format!("frame {index}: invalid base64: {e}")))?;
    let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .map_err(|e| ToolsError::Frame(format!("frame {index}: invalid PNG: {e}")))?;
    Ok(img.to_rgba8())
}

/// Integer nearest-neighbor upscale. Pure pixel replication: a factor of
/// 2 turns every source pixel into a 2x2 block of the same color.
pub fn upscale(frame: &RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return frame.clone();
    }
    imageops::resize(
        frame,
        frame.width() * factor,
        frame.height() * factor,
        FilterType::Nearest,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn upscale_replicates_without_blending() {
        let mut frame = RgbaImage::new(2, 1);
        frame.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        frame.put_pixel(1, 0, Rgba([200, 100, 0, 255]));

        let scaled = upscale(&frame, 3);
        assert_eq!(scaled.dimensions(), (6, 3));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(scaled.get_pixel(x, y), &Rgba([10, 20, 30, 255]));
                assert_eq!(scaled.get_pixel(x + 3, y), &Rgba([200, 100, 0, 255]));
            }
        }
    }
}
