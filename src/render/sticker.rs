//! Emoji sticker rasterization using the bundled Twemoji SVG set.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use twemoji_assets::svg::SvgTwemojiAsset;

use crate::error::StickerRenderError;

/// Edge length used when rasterizing stickers for compositing.
pub const STICKER_RASTER_SIZE: u32 = 256;

/// Returns `true` if the emoji has a glyph in the bundled Twemoji set.
pub fn is_supported_emoji(emoji: &str) -> bool {
    SvgTwemojiAsset::from_emoji(emoji).is_some()
}

/// Rasterizes an emoji to an RGBA image at the given size.
///
/// The glyph is scaled to fit within `size x size` pixels while preserving
/// aspect ratio (the larger dimension will be `size`).
pub fn rasterize_emoji(emoji: &str, size: u32) -> Result<RgbaImage, StickerRenderError> {
    let asset = SvgTwemojiAsset::from_emoji(emoji)
        .ok_or_else(|| StickerRenderError::UnknownEmoji(emoji.to_string()))?;

    render_svg(asset.as_ref(), size).map_err(|e| match e {
        StickerRenderError::InvalidSvg { reason, .. } => StickerRenderError::InvalidSvg {
            emoji: emoji.to_string(),
            reason,
        },
        other => other,
    })
}

/// Renders an SVG string to an RGBA image at the specified size.
fn render_svg(svg_data: &str, size: u32) -> Result<RgbaImage, StickerRenderError> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts).map_err(|e| StickerRenderError::InvalidSvg {
        emoji: String::new(),
        reason: e.to_string(),
    })?;

    // Scale to fit within size x size
    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(StickerRenderError::Rasterize(size))?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if let Some(pixel) = pixmap.pixel(x, y) {
                // tiny_skia stores premultiplied alpha
                let (r, g, b, a) =
                    unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
                img.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}
