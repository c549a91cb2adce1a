//! Scene flattening for export capture.
//!
//! The composite canvas is described as a [`Scene`] (background pixels plus
//! an optional sticker layer with its placement). Capture flattens the scene
//! into a single RGBA image at a fixed target height, using the same
//! placement mapping the live canvas uses for display.

use std::sync::Arc;

use cgmath::Vector2;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::CaptureError;

/// Height in pixels of the flattened capture output.
pub const CAPTURE_HEIGHT: u32 = 440;

/// Sticker height at scale 1.0, as a fraction of the background height.
pub const STICKER_BASE_FRACTION: f32 = 0.25;

/// Allowed range for the sticker scale factor.
pub const MIN_STICKER_SCALE: f32 = 0.1;
pub const MAX_STICKER_SCALE: f32 = 8.0;

// ============================================================================
// Placement
// ============================================================================

/// Where the sticker sits on the background.
///
/// `offset` is the sticker center relative to the background center,
/// normalized to the background dimensions: (0, 0) is dead center and
/// (0.5, 0.5) is the bottom-right corner. Offsets are not clamped, so a
/// sticker may be dragged partially or fully off the photo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset: Vector2<f32>,
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            offset: Vector2::new(0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl Placement {
    /// Nudge the sticker center by a delta normalized to background dimensions.
    pub fn nudge(&mut self, delta: Vector2<f32>) {
        self.offset += delta;
    }

    /// Adjust the scale factor, keeping it within the allowed range.
    pub fn rescale(&mut self, delta: f32) {
        self.scale = (self.scale + delta).clamp(MIN_STICKER_SCALE, MAX_STICKER_SCALE);
    }
}

// ============================================================================
// Scene
// ============================================================================

/// A sticker layer: rasterized pixels plus placement.
#[derive(Debug, Clone)]
pub struct StickerLayer {
    pub image: Arc<RgbaImage>,
    pub placement: Placement,
}

/// Everything needed to flatten the composite canvas: the background photo
/// and at most one sticker above it.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Arc<RgbaImage>,
    pub sticker: Option<StickerLayer>,
}

/// Flattens a scene into a single image `target_height` pixels tall.
///
/// The background is resized to the target height preserving aspect ratio,
/// then the sticker (if any) is alpha-blended on top at its mapped position.
pub fn flatten(scene: &Scene, target_height: u32) -> Result<RgbaImage, CaptureError> {
    let bg = scene.background.as_ref();
    if bg.width() == 0 || bg.height() == 0 || target_height == 0 {
        return Err(CaptureError::Render(format!(
            "background has unusable dimensions {}x{}",
            bg.width(),
            bg.height()
        )));
    }

    let out_h = target_height;
    let out_w = ((bg.width() as f32 / bg.height() as f32) * out_h as f32)
        .round()
        .max(1.0) as u32;

    let mut output = imageops::resize(bg, out_w, out_h, FilterType::Lanczos3);

    if let Some(layer) = &scene.sticker {
        let sticker = sticker_at_scale(layer, out_h)?;
        let center_x = out_w as f32 / 2.0 + layer.placement.offset.x * out_w as f32;
        let center_y = out_h as f32 / 2.0 + layer.placement.offset.y * out_h as f32;
        let x = (center_x - sticker.width() as f32 / 2.0).round() as i32;
        let y = (center_y - sticker.height() as f32 / 2.0).round() as i32;

        composite_over(&mut output, &sticker, x, y);
    }

    Ok(output)
}

/// Resizes the sticker raster for an output of the given height.
fn sticker_at_scale(layer: &StickerLayer, out_h: u32) -> Result<RgbaImage, CaptureError> {
    let src = layer.image.as_ref();
    if src.width() == 0 || src.height() == 0 {
        return Err(CaptureError::Render("sticker raster is empty".to_string()));
    }

    let target_h = (layer.placement.scale * STICKER_BASE_FRACTION * out_h as f32)
        .round()
        .max(1.0) as u32;
    let target_w = ((src.width() as f32 / src.height() as f32) * target_h as f32)
        .round()
        .max(1.0) as u32;

    Ok(imageops::resize(src, target_w, target_h, FilterType::Lanczos3))
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified
/// position, using standard alpha blending (source over destination).
/// Pixels falling outside the destination are skipped.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let dx = x + sx as i32;
            let dy = y + sy as i32;

            if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
                continue;
            }

            let src_pixel = src.get_pixel(sx, sy);
            let dst_pixel = dest.get_pixel(dx as u32, dy as u32);

            let blended = alpha_blend(*src_pixel, *dst_pixel);
            dest.put_pixel(dx as u32, dy as u32, blended);
        }
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
