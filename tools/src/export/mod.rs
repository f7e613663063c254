mod ffmpeg_export;
mod gif_export;

pub use ffmpeg_export::FfmpegExporter;
pub use gif_export::GifExporter;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use image::RgbaImage;
use log::{debug, info};

use crate::error::ToolsError;
use crate::loader::frame::{decode_frame, upscale};
use crate::model::session::SessionLog;
use crate::util::tmp_sibling;

/// Container formats the compositor can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Gif,
    Webp,
    Mp4,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Gif => "gif",
            ExportFormat::Webp => "webp",
            ExportFormat::Mp4 => "mp4",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gif" => Some(ExportFormat::Gif),
            "webp" => Some(ExportFormat::Webp),
            "mp4" => Some(ExportFormat::Mp4),
            _ => None,
        }
    }
}

/// Settings for one compositor run.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Playback rate of the recording.
    pub fps: f64,
    /// Integer nearest-neighbor upscale applied to every frame.
    pub scale: u32,
    pub formats: Vec<ExportFormat>,
    pub output_dir: PathBuf,
    /// Also write each upscaled frame to `<output_dir>/frames/<index>.png`.
    pub dump_frames: bool,
    /// Override for the ffmpeg binary used by the webp/mp4 exporters.
    pub ffmpeg_path: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            fps: 20.0,
            scale: 2,
            formats: vec![ExportFormat::Gif, ExportFormat::Webp],
            output_dir: PathBuf::from("media"),
            dump_frames: false,
            ffmpeg_path: None,
        }
    }
}

/// Per-frame display duration in whole milliseconds.
pub fn frame_delay_ms(fps: f64) -> u32 {
    (1000.0 / fps).round() as u32
}

/// One encoder backend. Exporters receive upscaled, dimension-checked
/// frames in playback order and must not reorder them.
pub trait FrameExporter {
    fn format(&self) -> ExportFormat;

    fn export(
        &self,
        path: &Path,
        frames: &[RgbaImage],
        settings: &ExportSettings,
    ) -> Result<(), ToolsError>;
}

pub fn exporter_for(format: ExportFormat) -> Box<dyn FrameExporter> {
    match format {
        ExportFormat::Gif => Box::new(GifExporter),
        ExportFormat::Webp => Box::new(FfmpegExporter::webp()),
        ExportFormat::Mp4 => Box::new(FfmpegExporter::mp4()),
    }
}

/// Decode every frame of the session and render the requested outputs.
///
/// Returns the paths written, one per requested format.
pub fn compose_session(
    log: &SessionLog,
    settings: &ExportSettings,
) -> Result<Vec<PathBuf>, ToolsError> {
    validate_settings(settings)?;
    if log.is_empty() {
        return Err(ToolsError::Session(
            "frame log contains no frames".to_string(),
        ));
    }

    let frames = decode_session_frames(log, settings)?;

    let stamp = Local::now().format("%Y-%m-%d_%H%M%S");
    fs::create_dir_all(&settings.output_dir)?;

    let mut written = Vec::with_capacity(settings.formats.len());
    for &format in &settings.formats {
        let exporter = exporter_for(format);
        let path = settings
            .output_dir
            .join(format!("video_{}.{}", stamp, exporter.format().extension()));
        let tmp = tmp_sibling(&path);
        exporter.export(&tmp, &frames, settings)?;
        fs::rename(&tmp, &path)?;
        info!("wrote {} ({} frames)", path.display(), frames.len());
        written.push(path);
    }
    Ok(written)
}

fn validate_settings(settings: &ExportSettings) -> Result<(), ToolsError> {
    if !(settings.fps.is_finite() && settings.fps > 0.0) {
        return Err(ToolsError::InvalidArgument(format!(
            "fps must be positive, got {}",
            settings.fps
        )));
    }
    if settings.scale == 0 {
        return Err(ToolsError::InvalidArgument(
            "scale factor must be at least 1".to_string(),
        ));
    }
    if settings.formats.is_empty() {
        return Err(ToolsError::InvalidArgument(
            "no output formats requested".to_string(),
        ));
    }
    Ok(())
}

/// Decode, upscale, and dimension-check the session's frames, in
/// ascending index order. The first frame fixes the dimensions every
/// later frame must match.
fn decode_session_frames(
    log: &SessionLog,
    settings: &ExportSettings,
) -> Result<Vec<RgbaImage>, ToolsError> {
    let dump_dir = settings.output_dir.join("frames");
    if settings.dump_frames {
        fs::create_dir_all(&dump_dir)?;
    }

    let mut frames = Vec::with_capacity(log.frame_count());
    let mut expected: Option<(u32, u32)> = None;
    for (index, payload) in log.frames() {
        let frame = upscale(&decode_frame(index, payload)?, settings.scale);
        let dims = frame.dimensions();
        match expected {
            None => expected = Some(dims),
            Some(first) if first != dims => {
                return Err(ToolsError::Frame(format!(
                    "frame {} is {}x{} but the session started at {}x{}",
                    index, dims.0, dims.1, first.0, first.1
                )));
            }
            Some(_) => {}
        }
        if settings.dump_frames {
            frame.save(dump_dir.join(format!("{index}.png")))?;
        }
        debug!("decoded frame {} ({}x{})", index, dims.0, dims.1);
        frames.push(frame);
    }
    Ok(frames)
}
