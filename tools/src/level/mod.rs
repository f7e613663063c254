use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;
use log::info;

use crate::error::ToolsError;
use crate::loader::image::load_level_image;
use crate::model::level::LevelObject;
use crate::model::palette::Palette;
use crate::util::tmp_sibling;

/// Grid region to scan. Level sets use a fixed grid that may be smaller
/// than the bitmap, so the bounds are explicit rather than derived from
/// the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBounds {
    pub width: u32,
    pub height: u32,
}

/// Scan a level map and classify every pixel against the palette.
///
/// The scan is column-major (outer `x`, inner `y`) and the emitted order
/// is the scan order; consumers rely on it being stable. The emitted `y`
/// is flipped so that row 0 is the bottom of the level.
pub fn decode_level(
    image: &RgbImage,
    bounds: ScanBounds,
    palette: &Palette,
) -> Result<Vec<LevelObject>, ToolsError> {
    if bounds.width > image.width() || bounds.height > image.height() {
        return Err(ToolsError::Level(format!(
            "scan bounds {}x{} exceed bitmap dimensions {}x{}",
            bounds.width,
            bounds.height,
            image.width(),
            image.height()
        )));
    }

    let mut objects = Vec::new();
    for x in 0..bounds.width {
        for y in 0..bounds.height {
            let pixel = image.get_pixel(x, y);
            if let Some(kind) = palette.classify([pixel[0], pixel[1], pixel[2]]) {
                objects.push(LevelObject {
                    kind,
                    x,
                    y: bounds.height - y - 1,
                });
            }
        }
    }
    Ok(objects)
}

/// Write the placement list as pretty-printed JSON, overwriting any
/// previous content at `path`.
pub fn write_level_json(path: &Path, objects: &[LevelObject]) -> Result<(), ToolsError> {
    let tmp = tmp_sibling(path);
    {
        let file = File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, objects)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Decode one level map file to its placement JSON.
pub fn decode_level_file(
    image_path: &Path,
    output_path: &Path,
    bounds: ScanBounds,
    palette: &Palette,
) -> Result<Vec<LevelObject>, ToolsError> {
    let image = load_level_image(image_path)?;
    let objects = decode_level(&image, bounds, palette)?;
    write_level_json(output_path, &objects)?;
    info!(
        "decoded {}: {} objects -> {}",
        image_path.display(),
        objects.len(),
        output_path.display()
    );
    Ok(objects)
}
