//! CSS generation for extracted sprites
//!
//! Produces one rule per sprite that sizes an element and points its
//! background at the sprite's PNG file. Optionally each rule also carries the
//! sprite's position on the original sheet, for use as a `background-position`
//! offset when the sheet itself is used as the background.

use std::fmt::Write;

/// Description of one written sprite, as consumed by CSS and HTML output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteInfo {
    /// Sprite label (file stem)
    pub label: String,
    /// File name relative to the output directory
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// Left edge on the original sheet
    pub original_x: u32,
    /// Top edge on the original sheet
    pub original_y: u32,
}

/// Options controlling the generated CSS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssOptions {
    /// Class name shared by all sprite elements (without the dot)
    pub class_name: String,
    /// Prefix prepended to each file name in `url(...)`
    pub url_prefix: String,
    /// Emit `background-position` offsets against the original sheet
    pub include_position: bool,
    /// `nth-child` index of the first sprite
    pub first_child: usize,
    /// Declarations for the shared class block
    pub base_declarations: Vec<String>,
}

impl Default for CssOptions {
    fn default() -> Self {
        CssOptions {
            class_name: "plane".to_string(),
            url_prefix: "sprites/".to_string(),
            include_position: false,
            first_child: 1,
            base_declarations: vec![
                "position: absolute".to_string(),
                "image-rendering: pixelated".to_string(),
            ],
        }
    }
}

/// Generate the CSS text for a list of sprites
///
/// An empty list still yields a well-formed stylesheet containing the
/// header comment and the shared class block.
pub fn generate_css(sprites: &[SpriteInfo], options: &CssOptions) -> String {
    let mut css = String::new();
    let class = &options.class_name;

    // writing into a String cannot fail
    let _ = writeln!(css, "/* Individual sprite styles ({} sprites) */", sprites.len());
    let _ = writeln!(css, ".{} {{", class);
    for declaration in &options.base_declarations {
        let _ = writeln!(css, "  {};", declaration.trim_end_matches(';'));
    }
    let _ = writeln!(css, "}}");
    css.push('\n');

    for (i, sprite) in sprites.iter().enumerate() {
        let _ = writeln!(css, ".{}:nth-child({}) {{", class, options.first_child + i);
        let _ = writeln!(css, "  width: {}px;", sprite.width);
        let _ = writeln!(css, "  height: {}px;", sprite.height);
        let _ = writeln!(
            css,
            "  background: url('{}{}') no-repeat center;",
            options.url_prefix, sprite.filename
        );
        let _ = writeln!(css, "  background-size: contain;");
        if options.include_position {
            let _ = writeln!(
                css,
                "  background-position: {} {};",
                offset(sprite.original_x),
                offset(sprite.original_y)
            );
        }
        let _ = writeln!(css, "}}");
        css.push('\n');
    }

    css
}

/// Negative pixel offset, written as `0` for the origin
fn offset(value: u32) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("-{}px", value)
    }
}
