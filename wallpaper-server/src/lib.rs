//! Serving and rasterizing calendar wallpapers.
//!
//! `calendar-core` decides where every dot goes; this crate turns that into
//! PNG bytes, serves it over HTTP alongside a small browser UI, and provides
//! the `wallpaper_serve` and `wallpaper_render` binaries.

pub mod config;
pub mod embedded_assets;
pub mod error;
pub mod fonts;
pub mod raster;
pub mod server;

pub use error::ApiError;
pub use fonts::{FontCache, FontError, FontSource};
pub use raster::{rasterize, render_png, RasterError};
pub use server::{create_router, run, AppState, ServerConfig};
