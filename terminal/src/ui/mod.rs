//! # Text Rendering
//!
//! Every page of the client renders to a `String`:
//!
//! - [`tables`]: column-aligned text tables and small layout helpers
//! - [`views`]: one render function per page

pub mod tables;
pub mod views;
