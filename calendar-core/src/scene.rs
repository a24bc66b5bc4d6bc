//! Resolved drawing: every dot and caption positioned in canvas pixels.
//!
//! A scene is the single hand-off point between the layout engine and the
//! output writers. The wallpaper rasterizer and the live preview both draw
//! from the same scene and only differ in what they do with the SVG.

use crate::color::HexColor;
use crate::error::Result;
use crate::fill::FillPredicate;
use crate::image_size::CanvasSize;
use crate::layout::{GridLayout, GridRequest};
use crate::style::{CaptionPlacement, GridStyle};

/// Baseline offset below the top of a caption line, as a fraction of the
/// font size.
const BASELINE_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center_x: f64,
    pub center_y: f64,
    pub diameter: f64,
    pub filled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    /// Horizontal center of the text.
    pub x: f64,
    /// Text baseline.
    pub y: f64,
    pub font_size: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub canvas: CanvasSize,
    pub foreground: HexColor,
    pub background: HexColor,
    pub layout: GridLayout,
    pub dots: Vec<Dot>,
    pub empty_stroke_width: f64,
    pub empty_opacity: f64,
    pub caption: Option<Caption>,
}

impl Scene {
    pub fn filled_count(&self) -> usize {
        self.dots.iter().filter(|d| d.filled).count()
    }
}

/// Inputs for [`build_scene`] that do not come from the render profile.
#[derive(Debug, Clone)]
pub struct SceneSpec {
    pub canvas: CanvasSize,
    pub cell_count: usize,
    pub columns: usize,
    pub foreground: HexColor,
    pub background: HexColor,
    pub caption: Option<String>,
}

/// Lay out the grid, classify every cell and place the caption.
pub fn build_scene(spec: SceneSpec, style: &GridStyle, fill: &impl FillPredicate) -> Result<Scene> {
    let canvas = spec.canvas;
    let request = GridRequest::new(canvas, spec.cell_count, spec.columns)
        .with_padding(style.padding)
        .with_gap_ratio(style.gap_ratio);

    let (layout, caption) = match spec.caption {
        None => (request.layout()?, None),
        Some(text) => match style.caption.placement {
            CaptionPlacement::BottomBand { height, inset } => {
                let layout = request.with_label_reserve(height).layout()?;
                let caption = Caption {
                    text,
                    x: canvas.width / 2.0,
                    y: canvas.height - inset,
                    font_size: style.caption.font_size(layout.dot_diameter),
                    opacity: style.caption.opacity,
                };
                (layout, Some(caption))
            }
            CaptionPlacement::BelowGrid { margin_factor } => {
                // Size the font from the uncaptioned grid, then shrink the
                // grid to make room for margin plus one line of text.
                let font_size = style.caption.font_size(request.layout()?.dot_diameter);
                let margin = style.padding.resolve(canvas) * margin_factor;
                let layout = request.with_label_reserve(margin + font_size).layout()?;
                let caption = Caption {
                    text,
                    x: canvas.width / 2.0,
                    y: layout.bottom() + margin + font_size * BASELINE_RATIO,
                    font_size,
                    opacity: style.caption.opacity,
                };
                (layout, Some(caption))
            }
        },
    };

    let dots = layout
        .cells()
        .map(|cell| Dot {
            center_x: cell.center_x,
            center_y: cell.center_y,
            diameter: layout.dot_diameter,
            filled: fill.is_filled(cell.index),
        })
        .collect();

    Ok(Scene {
        canvas,
        foreground: spec.foreground,
        background: spec.background,
        layout,
        dots,
        empty_stroke_width: style.empty_stroke.for_diameter(layout.dot_diameter),
        empty_opacity: style.empty_opacity,
        caption,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Mode, RenderProfile};
    use approx::assert_relative_eq;

    fn spec(width: f64, height: f64, cells: usize, columns: usize) -> SceneSpec {
        SceneSpec {
            canvas: CanvasSize::new(width, height).unwrap(),
            cell_count: cells,
            columns,
            foreground: HexColor::WHITE,
            background: HexColor::BLACK,
            caption: None,
        }
    }

    #[test]
    fn test_dots_follow_predicate() {
        let style = RenderProfile::Wallpaper.grid_style(Mode::Year);
        let scene = build_scene(spec(700.0, 1400.0, 20, 7), &style, &|i: usize| i < 5).unwrap();
        assert_eq!(scene.dots.len(), 20);
        assert_eq!(scene.filled_count(), 5);
        assert!(scene.dots[4].filled);
        assert!(!scene.dots[5].filled);
        assert!(scene.caption.is_none());
    }

    #[test]
    fn test_bottom_band_caption() {
        let style = RenderProfile::Preview.grid_style(Mode::Year);
        let mut s = spec(100.0, 200.0, 365, 7);
        s.caption = Some("2025".into());
        let scene = build_scene(s, &style, &|_: usize| false).unwrap();
        let caption = scene.caption.as_ref().unwrap();
        assert_eq!(caption.text, "2025");
        assert_relative_eq!(caption.x, 50.0);
        assert_relative_eq!(caption.y, 194.0);
        // Grid stays clear of the 14px caption band.
        assert!(scene.layout.bottom() <= 200.0 - 6.0 - 14.0 + 1e-9);
    }

    #[test]
    fn test_below_grid_caption_fits_canvas() {
        let style = RenderProfile::Wallpaper.grid_style(Mode::Year);
        let mut s = spec(1290.0, 2796.0, 365, 7);
        s.caption = Some("2025".into());
        let scene = build_scene(s, &style, &|_: usize| true).unwrap();
        let caption = scene.caption.as_ref().unwrap();
        assert!(caption.y > scene.layout.bottom());
        assert!(caption.y < 2796.0);
        // Grid plus caption block is centered: equal space above and below.
        let block_bottom = scene.layout.bottom() + 129.0 / 2.0 + caption.font_size;
        assert_relative_eq!(
            scene.layout.origin_y,
            2796.0 - block_bottom,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_empty_stroke_scales_with_dot() {
        let style = RenderProfile::Preview.grid_style(Mode::Life);
        let scene = build_scene(spec(300.0, 600.0, 4160, 52), &style, &|_: usize| false).unwrap();
        assert_relative_eq!(
            scene.empty_stroke_width,
            (scene.layout.dot_diameter * 0.15).max(0.2)
        );
    }
}
