use std::path::Path;

use image::RgbImage;

use crate::error::ToolsError;

/// Load a level map as RGB. Alpha, if the PNG carries it, is dropped.
pub fn load_level_image(path: &Path) -> Result<RgbImage, ToolsError> {
    let img = image::open(path)?;
    Ok(img.to_rgb8())
}
