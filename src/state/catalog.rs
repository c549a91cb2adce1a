//! The fixed, compile-time sticker catalog.
//!
//! Every entry is an emoji rasterized once at startup from the bundled
//! Twemoji SVG set: a full-size raster for the canvas and capture pipeline,
//! plus a small thumbnail for the picker grid.

use std::sync::Arc;

use iced::widget::image::Handle;
use image::imageops;
use image::RgbaImage;

use crate::error::StickerRenderError;
use crate::media::loader;
use crate::render::sticker::{self, STICKER_RASTER_SIZE};

/// Edge length of the picker grid thumbnails.
const THUMB_SIZE: u32 = 72;

/// The compiled-in sticker set.
pub const STICKER_EMOJI: &[&str] = &[
    "😀", "😂", "😍", "😎", "🤩", "🥳", "😜", "🤗", "😺", "🐶", "🐸", "🦆", "🌈", "🌟", "🎉",
    "🎈", "🎂", "🍕", "🚀", "🔥",
];

/// One prepared catalog sticker.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub emoji: &'static str,
    /// Full-size raster shared with the capture pipeline.
    pub image: Arc<RgbaImage>,
    /// Display handle for the canvas.
    pub handle: Handle,
    /// Small handle for the picker grid.
    pub thumb: Handle,
}

impl CatalogEntry {
    fn prepare(emoji: &'static str) -> Result<Self, StickerRenderError> {
        let image = sticker::rasterize_emoji(emoji, STICKER_RASTER_SIZE)?;
        let thumb_img = imageops::thumbnail(&image, THUMB_SIZE, THUMB_SIZE);

        Ok(Self {
            emoji,
            handle: loader::handle_from_rgba(&image),
            thumb: loader::handle_from_rgba(&thumb_img),
            image: Arc::new(image),
        })
    }
}

/// All stickers the picker offers. Fixed at startup; no dynamic loading.
#[derive(Debug, Clone)]
pub struct StickerCatalog {
    entries: Vec<CatalogEntry>,
}

impl StickerCatalog {
    /// Rasterize the full compiled-in sticker set.
    ///
    /// The set is validated by tests, so a lookup failure here means the
    /// binary itself is broken and the app cannot meaningfully continue.
    pub fn load() -> Self {
        let catalog = Self::with_emoji(STICKER_EMOJI)
            .expect("bundled sticker set failed to rasterize");
        println!("🎟  Prepared {} stickers", catalog.len());
        catalog
    }

    /// Rasterize an explicit emoji set.
    pub fn with_emoji(set: &[&'static str]) -> Result<Self, StickerRenderError> {
        let entries = set
            .iter()
            .map(|emoji| CatalogEntry::prepare(emoji))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
