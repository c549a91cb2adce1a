//! UI module
//!
//! This module contains the widgets and screen views:
//! - The live composite canvas (canvas.rs)
//! - The sticker picker modal (picker.rs)
//! - The home and about screens (home.rs, about.rs)

pub mod about;
pub mod canvas;
pub mod home;
pub mod picker;
