//! Render profiles: how a grid is padded, spaced, stroked and captioned in
//! each rendering context.

use serde::{Deserialize, Serialize};

use crate::layout::Padding;

/// Calendar mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Year,
    Life,
}

impl Mode {
    /// Lenient parse used for query strings: anything but `life` is a year
    /// calendar.
    pub fn from_query(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("life") {
            Mode::Life
        } else {
            Mode::Year
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Year => "year",
            Mode::Life => "life",
        }
    }

    /// Grid columns: days of the week, or weeks of a year.
    pub fn columns(&self) -> usize {
        match self {
            Mode::Year => 7,
            Mode::Life => 52,
        }
    }
}

/// Rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderProfile {
    /// Full-resolution phone wallpaper.
    Wallpaper,
    /// Small live preview sized to its container.
    Preview,
}

/// Stroke width of an empty dot: `max(min, scale * diameter)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeWidth {
    pub scale: f64,
    pub min: f64,
}

impl StrokeWidth {
    pub const fn fixed(width: f64) -> Self {
        Self {
            scale: 0.0,
            min: width,
        }
    }

    pub fn for_diameter(&self, diameter: f64) -> f64 {
        (self.scale * diameter).max(self.min)
    }
}

/// Where the caption goes and how much room it takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptionPlacement {
    /// Fixed band along the bottom edge; the baseline sits `inset` pixels
    /// above the canvas bottom.
    BottomBand { height: f64, inset: f64 },
    /// Directly below the grid, `margin_factor` times the padding away. The
    /// grid and caption are centered together as one block.
    BelowGrid { margin_factor: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionStyle {
    pub placement: CaptionPlacement,
    /// Font size as a multiple of the dot diameter.
    pub font_scale: f64,
    pub min_font_size: f64,
    pub opacity: f64,
}

impl CaptionStyle {
    pub fn font_size(&self, dot_diameter: f64) -> f64 {
        (self.font_scale * dot_diameter).max(self.min_font_size)
    }
}

/// Complete styling for one mode in one rendering context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub padding: Padding,
    pub gap_ratio: f64,
    pub empty_stroke: StrokeWidth,
    pub empty_opacity: f64,
    pub caption: CaptionStyle,
}

impl RenderProfile {
    pub fn grid_style(&self, mode: Mode) -> GridStyle {
        match (self, mode) {
            (RenderProfile::Wallpaper, Mode::Year) => GridStyle {
                padding: Padding::Fraction(0.1),
                gap_ratio: 0.5,
                empty_stroke: StrokeWidth::fixed(1.0),
                empty_opacity: 0.2,
                caption: CaptionStyle {
                    placement: CaptionPlacement::BelowGrid { margin_factor: 0.5 },
                    font_scale: 2.0,
                    min_font_size: 0.0,
                    opacity: 0.5,
                },
            },
            (RenderProfile::Wallpaper, Mode::Life) => GridStyle {
                padding: Padding::Fraction(0.05),
                gap_ratio: 0.5,
                empty_stroke: StrokeWidth::fixed(1.0),
                empty_opacity: 0.2,
                caption: CaptionStyle {
                    placement: CaptionPlacement::BelowGrid { margin_factor: 1.0 },
                    font_scale: 2.0,
                    min_font_size: 0.0,
                    opacity: 0.5,
                },
            },
            (RenderProfile::Preview, Mode::Year) => GridStyle {
                padding: Padding::Pixels(6.0),
                gap_ratio: 0.35,
                empty_stroke: StrokeWidth {
                    scale: 0.12,
                    min: 0.3,
                },
                empty_opacity: 0.35,
                caption: CaptionStyle {
                    placement: CaptionPlacement::BottomBand {
                        height: 14.0,
                        inset: 6.0,
                    },
                    font_scale: 1.5,
                    min_font_size: 8.0,
                    opacity: 0.6,
                },
            },
            (RenderProfile::Preview, Mode::Life) => GridStyle {
                padding: Padding::Pixels(4.0),
                gap_ratio: 0.3,
                empty_stroke: StrokeWidth {
                    scale: 0.15,
                    min: 0.2,
                },
                empty_opacity: 0.35,
                caption: CaptionStyle {
                    placement: CaptionPlacement::BottomBand {
                        height: 14.0,
                        inset: 2.0,
                    },
                    font_scale: 2.0,
                    min_font_size: 6.0,
                    opacity: 0.6,
                },
            },
        }
    }
}
