//! HTML preview page for extracted sprites

use std::fmt::Write;

use crate::raster::Rgb;

use super::css::SpriteInfo;

/// Options for the preview page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Page title and heading
    pub title: String,
    /// Page background; white if unset
    pub background: Option<Rgb>,
    /// Display scale for each sprite
    pub scale: u32,
    /// Prefix prepended to each file name in `src`
    pub src_prefix: String,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        PreviewOptions {
            title: "Extracted Sprites".to_string(),
            background: None,
            scale: 2,
            src_prefix: String::new(),
        }
    }
}

/// Generate a standalone HTML page showing every sprite with its size and
/// original position
pub fn generate_preview_html(sprites: &[SpriteInfo], options: &PreviewOptions) -> String {
    let mut html = String::new();
    let title = escape(&options.title);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <style>
        body {{
            background: {background};
            padding: 20px;
            font-family: monospace;
        }}
        .preview {{
            display: flex;
            gap: 20px;
            flex-wrap: wrap;
        }}
        .sprite-box {{
            background: white;
            padding: 10px;
            border: 2px solid #000;
        }}
        .sprite-img {{
            image-rendering: pixelated;
            display: block;
        }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p>{count} sprite(s)</p>
    <div class="preview">
"#,
        title = title,
        background = options.background.unwrap_or(Rgb::new(255, 255, 255)).to_hex(),
        count = sprites.len(),
    );

    for sprite in sprites {
        let _ = write!(
            html,
            r#"        <div class="sprite-box">
            <img src="{src}" class="sprite-img" width="{w}" height="{h}">
            <p>{label}<br>
            {width}x{height}px<br>
            Pos: ({x}, {y})</p>
        </div>
"#,
            src = escape(&format!("{}{}", options.src_prefix, sprite.filename)),
            w = sprite.width * options.scale,
            h = sprite.height * options.scale,
            label = escape(&sprite.label),
            width = sprite.width,
            height = sprite.height,
            x = sprite.original_x,
            y = sprite.original_y,
        );
    }

    html.push_str("    </div>\n</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
