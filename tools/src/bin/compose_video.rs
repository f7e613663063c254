use std::path::PathBuf;
use std::process;

use log::info;
use tools::ToolsError;
use tools::export::{ExportFormat, ExportSettings, compose_session};
use tools::model::session::SessionLog;

const USAGE: &str = "Usage: compose_video <img.json> [--fps N] [--scale N] [--out-dir DIR] \
[--formats gif,webp,mp4] [--dump-frames]";

fn main() {
    env_logger::init();
    if let Err(err) = run(std::env::args().collect()) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<(), ToolsError> {
    if args.len() < 2 {
        return Err(ToolsError::InvalidArgument(USAGE.to_string()));
    }

    let log_path = PathBuf::from(&args[1]);
    let mut settings = ExportSettings::default();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--fps" => {
                settings.fps = parse_value(&args, i, "--fps")?;
                i += 2;
            }
            "--scale" => {
                settings.scale = parse_value(&args, i, "--scale")?;
                i += 2;
            }
            "--out-dir" => {
                let dir = args.get(i + 1).ok_or_else(|| {
                    ToolsError::InvalidArgument("--out-dir needs a path".to_string())
                })?;
                settings.output_dir = PathBuf::from(dir);
                i += 2;
            }
            "--formats" => {
                let list = args.get(i + 1).ok_or_else(|| {
                    ToolsError::InvalidArgument("--formats needs a comma-separated list".to_string())
                })?;
                settings.formats = parse_formats(list)?;
                i += 2;
            }
            "--dump-frames" => {
                settings.dump_frames = true;
                i += 1;
            }
            other => {
                return Err(ToolsError::InvalidArgument(format!(
                    "unknown flag {other}; {USAGE}"
                )));
            }
        }
    }

    let log = SessionLog::load(&log_path)?;
    if let Some(level) = &log.metadata.level {
        info!("session level: {level}");
    }
    if let Some(deaths) = &log.metadata.deaths {
        info!("session deaths: {deaths}");
    }

    let written = compose_session(&log, &settings)?;
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, ToolsError> {
    args.get(i + 1)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| ToolsError::InvalidArgument(format!("{flag} needs a value")))
}

fn parse_formats(list: &str) -> Result<Vec<ExportFormat>, ToolsError> {
    list.split(',')
        .map(|name| {
            ExportFormat::from_name(name.trim())
                .ok_or_else(|| ToolsError::InvalidArgument(format!("unknown format {name:?}")))
        })
        .collect()
}
