use std::path::{Path, PathBuf};
use std::process;

use tools::ToolsError;
use tools::level::{ScanBounds, decode_level_file};
use tools::model::palette::Palette;

const USAGE: &str =
    "Usage: parse_level <level.png> <level.json> [--width N] [--height N] [--palette FILE]";

// The platformer level set uses a fixed 40x23 grid.
const DEFAULT_WIDTH: u32 = 40;
const DEFAULT_HEIGHT: u32 = 23;

fn main() {
    env_logger::init();
    if let Err(err) = run(std::env::args().collect()) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<(), ToolsError> {
    if args.len() < 3 {
        return Err(ToolsError::InvalidArgument(USAGE.to_string()));
    }

    let image_path = PathBuf::from(&args[1]);
    let output_path = PathBuf::from(&args[2]);
    let mut bounds = ScanBounds {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
    };
    let mut palette = Palette::platformer();

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                bounds.width = parse_dimension(&args, i, "--width")?;
                i += 2;
            }
            "--height" => {
                bounds.height = parse_dimension(&args, i, "--height")?;
                i += 2;
            }
            "--palette" => {
                let path = args.get(i + 1).ok_or_else(|| {
                    ToolsError::InvalidArgument("--palette needs a file path".to_string())
                })?;
                palette = Palette::load(Path::new(path))?;
                i += 2;
            }
            other => {
                return Err(ToolsError::InvalidArgument(format!(
                    "unknown flag {other}; {USAGE}"
                )));
            }
        }
    }

    let objects = decode_level_file(&image_path, &output_path, bounds, &palette)?;
    println!("{} objects -> {}", objects.len(), output_path.display());
    Ok(())
}

fn parse_dimension(args: &[String], i: usize, flag: &str) -> Result<u32, ToolsError> {
    args.get(i + 1)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| ToolsError::InvalidArgument(format!("{flag} needs a positive integer")))
}
