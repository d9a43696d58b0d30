//! Writing extracted sprites to disk
//!
//! Every sprite becomes `{label}.png` in the output directory, followed by a
//! `sprites.css` stylesheet and, optionally, a `preview.html` page.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info};

use crate::errors::{SpriteError, SpriteResult};
use crate::extractor::ExtractedSprite;
use crate::raster::Rgb;
use crate::utils::progress::ProgressTracker;

use super::css::{generate_css, CssOptions, SpriteInfo};
use super::preview::{generate_preview_html, PreviewOptions};

/// Name of the generated stylesheet
pub const CSS_FILE_NAME: &str = "sprites.css";
/// Name of the generated preview page
pub const PREVIEW_FILE_NAME: &str = "preview.html";

/// Check that labels can be used as file stems in one directory
///
/// Labels must be non-empty, unique, and free of path separators; `.` and
/// `..` are refused as well.
///
/// # Returns
/// A description of the first offending label
pub fn check_labels<'a, I>(labels: I) -> Result<(), String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for label in labels {
        if label.is_empty() || label == "." || label == ".." {
            return Err(format!("Invalid sprite label '{}'", label));
        }
        if label.contains('/') || label.contains('\\') {
            return Err(format!("Sprite label '{}' contains a path separator", label));
        }
        if !seen.insert(label) {
            return Err(format!("Duplicate sprite label '{}'", label));
        }
    }
    Ok(())
}

/// Writes sprites, CSS and preview into an output directory
pub struct SpriteWriter {
    output_dir: PathBuf,
    css: CssOptions,
    preview: Option<PreviewOptions>,
    show_progress: bool,
}

impl SpriteWriter {
    /// Create a writer for the given directory
    ///
    /// The directory is created on the first write if it does not exist.
    pub fn new<P: AsRef<Path>>(output_dir: P, css: CssOptions) -> Self {
        SpriteWriter {
            output_dir: output_dir.as_ref().to_path_buf(),
            css,
            preview: None,
            show_progress: false,
        }
    }

    /// Also write an HTML preview page
    pub fn with_preview(mut self, preview: PreviewOptions) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Draw a progress bar while writing sprites
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn css_path(&self) -> PathBuf {
        self.output_dir.join(CSS_FILE_NAME)
    }

    pub fn preview_path(&self) -> PathBuf {
        self.output_dir.join(PREVIEW_FILE_NAME)
    }

    /// Write all outputs
    ///
    /// # Arguments
    /// * `sprites` - Extracted sprites in output order
    /// * `background` - Sheet background, used as the preview page color
    ///   unless the preview options set one
    ///
    /// # Returns
    /// The description of every written sprite
    pub fn write_all(&self, sprites: &[ExtractedSprite], background: Rgb) -> SpriteResult<Vec<SpriteInfo>> {
        check_labels(sprites.iter().map(|s| s.label.as_str())).map_err(SpriteError::InvalidInput)?;

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            SpriteError::InvalidInput(format!(
                "Cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let progress = if self.show_progress {
            ProgressTracker::new(sprites.len() as u64, "Writing sprites")
        } else {
            ProgressTracker::hidden()
        };

        let mut infos = Vec::with_capacity(sprites.len());
        for sprite in sprites {
            let info = self.write_sprite(sprite)?;
            progress.set_message(&info.filename);
            progress.increment(1);
            infos.push(info);
        }
        progress.finish();

        let css = generate_css(&infos, &self.css);
        fs::write(self.css_path(), css)?;
        info!("Generated CSS file: {}", self.css_path().display());

        if let Some(options) = &self.preview {
            let mut options = options.clone();
            options.background.get_or_insert(background);
            let html = generate_preview_html(&infos, &options);
            fs::write(self.preview_path(), html)?;
            info!("Generated preview page: {}", self.preview_path().display());
        }

        Ok(infos)
    }

    /// Write one sprite as PNG
    pub fn write_sprite(&self, sprite: &ExtractedSprite) -> SpriteResult<SpriteInfo> {
        let filename = format!("{}.png", sprite.label);
        let path = self.output_dir.join(&filename);

        sprite.image.save_with_format(&path, ImageFormat::Png)?;
        debug!("Saved {} ({}x{})", path.display(), sprite.image.width(), sprite.image.height());

        Ok(SpriteInfo {
            label: sprite.label.clone(),
            filename,
            width: sprite.image.width(),
            height: sprite.image.height(),
            original_x: sprite.bounds.min_x,
            original_y: sprite.bounds.min_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    use crate::coordinate::BoundingBox;

    fn sprite(index: usize, label: &str, size: u32) -> ExtractedSprite {
        ExtractedSprite {
            index,
            label: label.to_string(),
            bounds: BoundingBox::new(0, 0, size - 1, size - 1),
            image: RgbaImage::from_pixel(size, size, Rgba([255, 0, 0, 255])),
        }
    }

    #[test]
    fn test_check_labels() {
        assert!(check_labels(["jet_1", "jet_2", "f15"]).is_ok());
        assert!(check_labels(["jet", "f15", "jet"]).unwrap_err().contains("Duplicate"));
        assert!(check_labels(["../escape"]).unwrap_err().contains("separator"));
        assert!(check_labels(["a\\b"]).unwrap_err().contains("separator"));
        assert!(check_labels([""]).is_err());
        assert!(check_labels([".."]).is_err());
    }

    #[test]
    fn test_duplicate_labels_write_nothing() {
        let dir = std::env::temp_dir().join(format!("spritekit_writer_dup_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let writer = SpriteWriter::new(&dir, CssOptions::default());
        let sprites = vec![sprite(1, "jet", 10), sprite(2, "jet", 20)];
        let result = writer.write_all(&sprites, Rgb::new(171, 212, 230));

        assert!(matches!(result, Err(SpriteError::InvalidInput(_))));
        assert!(!dir.join("jet.png").exists());
        assert!(!writer.css_path().exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_label_with_separator_is_refused() {
        let dir = std::env::temp_dir().join(format!("spritekit_writer_sep_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let writer = SpriteWriter::new(dir.join("out"), CssOptions::default());
        let result = writer.write_all(&[sprite(1, "../jet", 4)], Rgb::new(0, 0, 0));

        assert!(matches!(result, Err(SpriteError::InvalidInput(_))));
        assert!(!dir.join("jet.png").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
