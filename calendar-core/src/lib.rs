//! Dot-grid calendar wallpapers.
//!
//! A calendar is a grid of dots, one per unit of time, filled when that unit
//! has passed. Year calendars have one dot per day in seven columns; life
//! calendars have one dot per week in fifty-two columns. This crate lays the
//! grid out on a canvas, decides which dots are filled and writes the result
//! as SVG. Rasterizing and serving live in `wallpaper-server`.

pub mod calendar;
pub mod clock;
pub mod color;
pub mod dates;
pub mod error;
pub mod fill;
pub mod image_size;
pub mod layout;
pub mod params;
pub mod presets;
pub mod scene;
pub mod style;
pub mod svg;

pub use calendar::{CalendarConfig, CalendarKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use color::HexColor;
pub use error::{CalendarError, Result};
pub use image_size::{CanvasSize, PixelShape};
pub use layout::{compute_layout, GridLayout, GridRequest, Padding};
pub use params::{OutputFormat, WallpaperQuery, WallpaperRequest};
pub use scene::Scene;
pub use style::{Mode, RenderProfile};
