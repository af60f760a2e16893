use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::{StridecardError, StridecardResult};

/// Resolve an asset path against the assets root.
///
/// Absolute paths pass through; relative paths are joined onto `root`
/// (the config file's directory when running from the CLI).
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Open and decode an image asset, resolving against `root`.
pub fn load_image(root: &Path, path: &Path) -> StridecardResult<DynamicImage> {
    let abs = resolve(root, path);
    image::open(&abs)
        .map_err(|e| StridecardError::asset(format!("open image '{}': {e}", abs.display())))
}

/// Read raw font bytes; decoding happens at the draw site.
pub fn read_font_bytes(path: &Path) -> StridecardResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| StridecardError::asset(format!("read font '{}': {e}", path.display())))
}
