use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use image::RgbaImage;
use log::info;

use super::{ExportFormat, ExportSettings, FrameExporter};
use crate::error::ToolsError;

/// WEBP/MP4 backend. Spawns the ffmpeg binary, declares stdin as raw
/// RGBA video at the session's dimensions and rate, and pipes every
/// frame through. Pixel-format conversion and container muxing are
/// ffmpeg's job.
pub struct FfmpegExporter {
    format: ExportFormat,
    container: &'static str,
    codec_args: &'static [&'static str],
}

impl FfmpegExporter {
    pub fn webp() -> Self {
        Self {
            format: ExportFormat::Webp,
            container: "webp",
            // Lossless keeps the pixel-art colors intact; -loop 0 loops forever.
            codec_args: &["-c:v", "libwebp", "-lossless", "1", "-loop", "0"],
        }
    }

    pub fn mp4() -> Self {
        Self {
            format: ExportFormat::Mp4,
            container: "mp4",
            codec_args: &["-c:v", "libx264", "-pix_fmt", "yuv420p"],
        }
    }
}

impl FrameExporter for FfmpegExporter {
    fn format(&self) -> ExportFormat {
        self.format
    }

    fn export(
        &self,
        path: &Path,
        frames: &[RgbaImage],
        settings: &ExportSettings,
    ) -> Result<(), ToolsError> {
        let Some(first) = frames.first() else {
            return Err(ToolsError::Session("no frames to export".to_string()));
        };
        let (width, height) = first.dimensions();

        let mut session = FfmpegSession::spawn(path, width, height, self, settings)?;
        for frame in frames {
            session.write_frame(frame.as_raw())?;
        }
        session.finish()
    }
}

struct FfmpegSession {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl FfmpegSession {
    fn spawn(
        path: &Path,
        width: u32,
        height: u32,
        exporter: &FfmpegExporter,
        settings: &ExportSettings,
    ) -> Result<Self, ToolsError> {
        let binary = settings.ffmpeg_path.as_deref().unwrap_or("ffmpeg");
        info!(
            "starting ffmpeg session: container={} size={}x{} fps={}",
            exporter.container, width, height, settings.fps
        );

        let mut cmd = Command::new(binary);
        cmd.arg("-y")
            .arg("-f")
            .arg("rawvideo")
            .arg("-pix_fmt")
            .arg("rgba")
            .arg("-s")
            .arg(format!("{}x{}", width, height))
            .arg("-r")
            .arg(format!("{}", settings.fps))
            .arg("-i")
            .arg("-")
            .args(exporter.codec_args)
            .arg("-f")
            .arg(exporter.container)
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let mut child = cmd
            .spawn()
            .map_err(|e| ToolsError::Ffmpeg(format!("failed to spawn {binary}: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ToolsError::Ffmpeg("failed to capture ffmpeg stdin".to_string()))?;
        Ok(Self {
            child,
            stdin: Some(stdin),
        })
    }

    fn write_frame(&mut self, data: &[u8]) -> Result<(), ToolsError> {
        match self.stdin.as_mut() {
            Some(stdin) => {
                stdin.write_all(data)?;
                Ok(())
            }
            None => Err(ToolsError::Ffmpeg("ffmpeg stdin is closed".to_string())),
        }
    }

    /// Close stdin and wait. The output is only trustworthy if ffmpeg
    /// exits cleanly.
    fn finish(mut self) -> Result<(), ToolsError> {
        drop(self.stdin.take());
        let status = self.child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ToolsError::Ffmpeg(format!("ffmpeg exited with {status}")))
        }
    }
}

impl Drop for FfmpegSession {
    fn drop(&mut self) {
        drop(self.stdin.take());
        let _ = self.child.wait();
    }
}
