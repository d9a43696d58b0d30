//! Output generation
//!
//! This module turns extracted sprites into files: one PNG per sprite, a
//! stylesheet referencing them and an optional HTML preview page.

pub mod css;
pub mod preview;
pub mod writer;

pub use css::{generate_css, CssOptions, SpriteInfo};
pub use preview::{generate_preview_html, PreviewOptions};
pub use writer::{check_labels, SpriteWriter, CSS_FILE_NAME, PREVIEW_FILE_NAME};
