//! Convenience helpers for decoding rasters via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::RasterImage;
use crate::template::Template;
use crate::util::{SymMatchError, SymMatchResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions accepted by [`load_templates_from_dir`].
pub const TEMPLATE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// A template file that could not be turned into a [`Template`].
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateLoadFailure {
    /// Path of the offending file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub error: SymMatchError,
}

/// Creates an owned raster from a grayscale image buffer.
pub fn raster_from_gray_image(img: &::image::GrayImage) -> SymMatchResult<RasterImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    RasterImage::new(img.as_raw().clone(), width, height)
}

/// Converts a decoded image of any color type to a grayscale raster.
///
/// Color images go through [`RasterImage::from_interleaved`], so the BT.601
/// luma weights apply regardless of the source format.
pub fn raster_from_dynamic_image(img: &::image::DynamicImage) -> SymMatchResult<RasterImage> {
    match img {
        ::image::DynamicImage::ImageLuma8(gray) => raster_from_gray_image(gray),
        other => {
            let rgba = other.to_rgba8();
            RasterImage::from_interleaved(
                rgba.as_raw(),
                rgba.width() as usize,
                rgba.height() as usize,
                4,
            )
        }
    }
}

/// Decodes an encoded image (PNG, JPEG, WebP) held in memory.
pub fn decode_gray_image(bytes: &[u8]) -> SymMatchResult<RasterImage> {
    let img = ::image::load_from_memory(bytes)
        .map_err(|err| SymMatchError::invalid_image(err.to_string()))?;
    raster_from_dynamic_image(&img)
}

/// Loads an image from disk and converts it to a grayscale raster.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> SymMatchResult<RasterImage> {
    let img = ::image::open(path).map_err(|err| SymMatchError::invalid_image(err.to_string()))?;
    raster_from_dynamic_image(&img)
}

/// Loads every symbol image in `dir` as a named template.
///
/// Files are visited in name order and filtered by extension
/// (case-insensitive). Each template is named after its file name; a file
/// that fails to decode is reported in the second list and does not stop the
/// remaining files from loading. Only a failure to read the directory itself
/// is returned as an error.
pub fn load_templates_from_dir<P: AsRef<Path>>(
    dir: P,
) -> SymMatchResult<(Vec<Template>, Vec<TemplateLoadFailure>)> {
    let entries = fs::read_dir(dir.as_ref()).map_err(|err| {
        SymMatchError::invalid_image(format!(
            "cannot read symbol directory {}: {err}",
            dir.as_ref().display()
        ))
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_template_extension(path))
        .collect();
    paths.sort();

    let mut templates = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match load_gray_image(&path) {
            Ok(raster) => templates.push(Template::from_raster(name, raster)),
            Err(error) => failures.push(TemplateLoadFailure { path, error }),
        }
    }
    Ok((templates, failures))
}

fn has_template_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            TEMPLATE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{decode_gray_image, has_template_extension};
    use std::path::Path;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(has_template_extension(Path::new("a/stop.PNG")));
        assert!(has_template_extension(Path::new("yield.jpeg")));
        assert!(has_template_extension(Path::new("x.webp")));
        assert!(!has_template_extension(Path::new("notes.txt")));
        assert!(!has_template_extension(Path::new("README")));
    }

    #[test]
    fn undecodable_bytes_are_invalid_image() {
        let err = decode_gray_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, crate::SymMatchError::InvalidImage { .. }));
    }
}
