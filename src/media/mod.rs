//! Media access module
//!
//! This module handles:
//! - The platform capability gateway (gateway.rs): permission, picking,
//!   capture and media-library writes behind one injectable trait
//! - Photo decoding and the bundled default background (loader.rs)

pub mod gateway;
pub mod loader;
