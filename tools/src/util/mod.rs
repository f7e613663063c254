use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Temporary sibling of `path`. Outputs are written here first and
/// renamed into place, so a failed run never leaves a half-written file
/// at the final location. Same directory, so the rename stays on one
/// filesystem.
pub fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_sibling_stays_in_the_same_directory() {
        let tmp = tmp_sibling(Path::new("media/video_x.gif"));
        assert_eq!(tmp, PathBuf::from("media/video_x.gif.tmp"));
    }
}
