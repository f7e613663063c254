use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use super::{ExportFormat, ExportSettings, FrameExporter, frame_delay_ms};
use crate::error::ToolsError;

/// Animated GIF backend. The first frame anchors the file, every frame
/// gets the same delay, and the animation loops forever.
pub struct GifExporter;

impl FrameExporter for GifExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Gif
    }

    fn export(
        &self,
        path: &Path,
        frames: &[RgbaImage],
        settings: &ExportSettings,
    ) -> Result<(), ToolsError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        let mut encoder = GifEncoder::new(writer);
        encoder.set_repeat(Repeat::Infinite)?;

        let delay = Delay::from_numer_denom_ms(frame_delay_ms(settings.fps), 1);
        for frame in frames {
            encoder.encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))?;
        }
        Ok(())
    }
}
