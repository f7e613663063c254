use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Palette error: {0}")]
    Palette(String),
    #[error("Level error: {0}")]
    Level(String),
    #[error("Session log error: {0}")]
    Session(String),
    #[error("Frame decode error: {0}")]
    Frame(String),
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
