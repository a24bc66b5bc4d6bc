//! Query-string parameters for wallpaper and preview requests.
//!
//! Every field arrives as loosely typed text. Non-numeric values fall back
//! to defaults; out-of-range values are clamped or rejected per field.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{current_year, CalendarConfig, CalendarKind, DEFAULT_LIFE_EXPECTANCY_YEARS};
use crate::color::HexColor;
use crate::dates::parse_birthday;
use crate::error::{CalendarError, Result};
use crate::image_size::{CanvasSize, PixelShape};
use crate::style::Mode;

pub const DEFAULT_WIDTH: u32 = 1290;
pub const DEFAULT_HEIGHT: u32 = 2796;
/// Largest raster edge the server will produce.
pub const MAX_DIMENSION: u32 = 8192;
pub const MAX_LIFE_EXPECTANCY_YEARS: u32 = 150;
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Path of the wallpaper endpoint, used when building install links.
pub const WALLPAPER_PATH: &str = "/api/wallpaper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn from_query(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("svg") {
            OutputFormat::Svg
        } else {
            OutputFormat::Png
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Raw query parameters, exactly as sent by the UI or a phone shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperQuery {
    pub mode: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub year: Option<String>,
    pub birthday: Option<String>,
    #[serde(rename = "lifeExpectancyYears")]
    pub life_expectancy_years: Option<String>,
    #[serde(rename = "showStats")]
    pub show_stats: Option<String>,
    pub format: Option<String>,
}

/// Validated wallpaper request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperRequest {
    pub config: CalendarConfig,
    pub size: PixelShape,
    pub format: OutputFormat,
}

impl WallpaperQuery {
    /// Validate a full-resolution wallpaper request.
    pub fn into_wallpaper(self, now: NaiveDateTime) -> Result<WallpaperRequest> {
        let width = parse_dimension("width", self.width.as_deref(), DEFAULT_WIDTH)?;
        let height = parse_dimension("height", self.height.as_deref(), DEFAULT_HEIGHT)?;
        let format = self
            .format
            .as_deref()
            .map(OutputFormat::from_query)
            .unwrap_or_default();
        let config = self.into_config(now)?;
        Ok(WallpaperRequest {
            config,
            size: PixelShape::new(width, height),
            format,
        })
    }

    /// Validate a live-preview request sized to its container.
    pub fn into_preview(self, now: NaiveDateTime) -> Result<(CalendarConfig, CanvasSize)> {
        let width = parse_container_size("width", self.width.as_deref())?;
        let height = parse_container_size("height", self.height.as_deref())?;
        let canvas = CanvasSize::new(width, height)?;
        Ok((self.into_config(now)?, canvas))
    }

    /// Mode, colors and mode-specific parameters.
    pub fn into_config(self, now: NaiveDateTime) -> Result<CalendarConfig> {
        let foreground = parse_color(self.fg.as_deref(), HexColor::WHITE)?;
        let background = parse_color(self.bg.as_deref(), HexColor::BLACK)?;
        let mode = self
            .mode
            .as_deref()
            .map(Mode::from_query)
            .unwrap_or(Mode::Year);

        let kind = match mode {
            Mode::Year => {
                let year = self
                    .year
                    .as_deref()
                    .and_then(parse_int)
                    .filter(|&y| y != 0)
                    .map(|y| y.clamp(MIN_YEAR as i64, MAX_YEAR as i64) as i32)
                    .unwrap_or_else(|| current_year(now));
                CalendarKind::Year { year }
            }
            Mode::Life => {
                let birthday = parse_birthday(self.birthday.as_deref().unwrap_or_default())?;
                let life_expectancy_years = self
                    .life_expectancy_years
                    .as_deref()
                    .and_then(parse_int)
                    .filter(|&y| y > 0)
                    .map(|y| y.min(MAX_LIFE_EXPECTANCY_YEARS as i64) as u32)
                    .unwrap_or(DEFAULT_LIFE_EXPECTANCY_YEARS);
                let show_stats = self.show_stats.as_deref().is_some_and(parse_flag);
                CalendarKind::Life {
                    birthday,
                    life_expectancy_years,
                    show_stats,
                }
            }
        };

        Ok(CalendarConfig {
            kind,
            foreground,
            background,
        })
    }
}

impl WallpaperRequest {
    /// Query string that reproduces this request.
    pub fn to_query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("mode", self.config.mode().as_str())
            .append_pair("width", &self.size.width.to_string())
            .append_pair("height", &self.size.height.to_string())
            .append_pair("fg", &self.config.foreground.to_hex())
            .append_pair("bg", &self.config.background.to_hex());

        match self.config.kind {
            CalendarKind::Year { year } => {
                query.append_pair("year", &year.to_string());
            }
            CalendarKind::Life {
                birthday,
                life_expectancy_years,
                show_stats,
            } => {
                query
                    .append_pair("birthday", &birthday.format("%Y-%m-%d").to_string())
                    .append_pair("lifeExpectancyYears", &life_expectancy_years.to_string())
                    .append_pair("showStats", if show_stats { "1" } else { "0" });
            }
        }
        if self.format == OutputFormat::Svg {
            query.append_pair("format", "svg");
        }
        query.finish()
    }

    /// Link a phone shortcut can fetch to get this wallpaper.
    pub fn install_url(&self, base_url: &str) -> String {
        format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            WALLPAPER_PATH,
            self.to_query_string()
        )
    }
}

/// Integer prefix of `s`, the way a browser's `parseInt` reads it:
/// optional sign, then leading digits. `"12px"` is 12; `"px12"` is `None`.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // Saturate absurdly long inputs instead of failing.
    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "on" | "yes")
}

fn parse_dimension(field: &'static str, value: Option<&str>, default: u32) -> Result<u32> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match parse_int(raw) {
        None => Ok(default),
        Some(v) if v <= 0 => Err(CalendarError::InvalidDimension {
            field,
            value: raw.to_string(),
        }),
        Some(v) => Ok(v.min(MAX_DIMENSION as i64) as u32),
    }
}

fn parse_container_size(field: &'static str, value: Option<&str>) -> Result<f64> {
    let raw = value.unwrap_or_default();
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v.min(MAX_DIMENSION as f64)),
        _ => Err(CalendarError::InvalidDimension {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_color(value: Option<&str>, default: HexColor) -> Result<HexColor> {
    match value {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.parse(),
    }
}
