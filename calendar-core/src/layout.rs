//! Dot-grid layout engine.
//!
//! Packs `cell_count` equal circles into `columns` columns, choosing the
//! largest diameter that fits both axes of the available area and centering
//! the resulting grid on the canvas. Trailing partial rows are allowed.

use crate::error::{CalendarError, Result};
use crate::image_size::CanvasSize;

/// Smallest dot diameter the engine will produce.
///
/// Tiny or over-padded canvases would otherwise yield zero or negative
/// geometry. When this floor binds the grid may overflow the available area.
pub const MIN_DOT_DIAMETER: f64 = 0.5;

/// Margin kept clear around the grid on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Padding {
    /// Fraction of the canvas' shorter side, in `[0, 0.5)`.
    Fraction(f64),
    /// Fixed margin in pixels.
    Pixels(f64),
}

impl Padding {
    /// Resolve the margin in pixels for a given canvas.
    pub fn resolve(self, canvas: CanvasSize) -> f64 {
        match self {
            Padding::Fraction(fraction) => canvas.min_side() * fraction,
            Padding::Pixels(px) => px,
        }
    }

    fn validate(self) -> Result<()> {
        match self {
            Padding::Fraction(f) if f.is_finite() && (0.0..0.5).contains(&f) => Ok(()),
            Padding::Pixels(px) if px.is_finite() && px >= 0.0 => Ok(()),
            Padding::Fraction(v) | Padding::Pixels(v) => Err(CalendarError::InvalidPadding(v)),
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Padding::Fraction(0.0)
    }
}

/// Input to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRequest {
    pub canvas: CanvasSize,
    pub cell_count: usize,
    pub columns: usize,
    pub padding: Padding,
    /// Gap between neighbouring dots as a multiple of the dot diameter.
    pub gap_ratio: f64,
    /// Vertical band below the grid kept free for a caption.
    pub label_reserve: f64,
}

impl GridRequest {
    pub fn new(canvas: CanvasSize, cell_count: usize, columns: usize) -> Self {
        Self {
            canvas,
            cell_count,
            columns,
            padding: Padding::default(),
            gap_ratio: 0.0,
            label_reserve: 0.0,
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_gap_ratio(mut self, gap_ratio: f64) -> Self {
        self.gap_ratio = gap_ratio;
        self
    }

    pub fn with_label_reserve(mut self, label_reserve: f64) -> Self {
        self.label_reserve = label_reserve;
        self
    }

    /// Number of rows needed, counting a trailing partial row.
    ///
    /// Returns 0 when there are no columns; `layout` rejects that case.
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            return 0;
        }
        self.cell_count.div_ceil(self.columns)
    }

    /// Compute the grid geometry.
    pub fn layout(&self) -> Result<GridLayout> {
        if self.columns == 0 {
            return Err(CalendarError::ZeroColumns);
        }
        if !self.gap_ratio.is_finite() || self.gap_ratio < 0.0 {
            return Err(CalendarError::InvalidGapRatio(self.gap_ratio));
        }
        self.padding.validate()?;
        if !self.label_reserve.is_finite() || self.label_reserve < 0.0 {
            return Err(CalendarError::InvalidPadding(self.label_reserve));
        }

        let columns = self.columns;
        let rows = self.rows();
        let padding = self.padding.resolve(self.canvas);
        let available_width = self.canvas.width - 2.0 * padding;
        let available_height = self.canvas.height - 2.0 * padding - self.label_reserve;

        let width_candidate = available_width / span_units(columns, self.gap_ratio);
        let height_candidate = if rows == 0 {
            f64::INFINITY
        } else {
            available_height / span_units(rows, self.gap_ratio)
        };
        let dot_diameter = width_candidate.min(height_candidate).max(MIN_DOT_DIAMETER);
        let gap = dot_diameter * self.gap_ratio;

        let grid_width = span(columns, dot_diameter, gap);
        let grid_height = span(rows, dot_diameter, gap);

        Ok(GridLayout {
            dot_diameter,
            gap,
            grid_width,
            grid_height,
            origin_x: (self.canvas.width - grid_width) / 2.0,
            origin_y: (self.canvas.height - grid_height - self.label_reserve) / 2.0,
            columns,
            rows,
            cell_count: self.cell_count,
            available_width,
            available_height,
        })
    }
}

/// Length of `n` dots plus the `n - 1` gaps between them, in dot diameters.
fn span_units(n: usize, gap_ratio: f64) -> f64 {
    n as f64 + (n as f64 - 1.0) * gap_ratio
}

fn span(n: usize, dot: f64, gap: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    n as f64 * dot + (n - 1) as f64 * gap
}

/// Geometry of a laid-out grid. Pure function of its [`GridRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub dot_diameter: f64,
    pub gap: f64,
    pub grid_width: f64,
    pub grid_height: f64,
    /// Top-left corner of the grid's bounding box.
    pub origin_x: f64,
    pub origin_y: f64,
    pub columns: usize,
    pub rows: usize,
    pub cell_count: usize,
    pub available_width: f64,
    pub available_height: f64,
}

/// Position of a single cell within the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub center_x: f64,
    pub center_y: f64,
}

impl GridLayout {
    /// Distance between the centers of neighbouring dots.
    pub fn pitch(&self) -> f64 {
        self.dot_diameter + self.gap
    }

    /// Bottom edge of the grid's bounding box.
    pub fn bottom(&self) -> f64 {
        self.origin_y + self.grid_height
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        if index >= self.cell_count {
            return None;
        }
        let row = index / self.columns;
        let column = index % self.columns;
        let radius = self.dot_diameter / 2.0;
        Some(Cell {
            index,
            row,
            column,
            center_x: self.origin_x + column as f64 * self.pitch() + radius,
            center_y: self.origin_y + row as f64 * self.pitch() + radius,
        })
    }

    /// All cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count).filter_map(move |i| self.cell(i))
    }
}

/// Lay out `cell_count` dots with a fractional padding and no caption band.
pub fn compute_layout(
    canvas_width: f64,
    canvas_height: f64,
    cell_count: usize,
    columns: usize,
    padding_fraction: f64,
    gap_ratio: f64,
) -> Result<GridLayout> {
    let canvas = CanvasSize::new(canvas_width, canvas_height)?;
    GridRequest::new(canvas, cell_count, columns)
        .with_padding(Padding::Fraction(padding_fraction))
        .with_gap_ratio(gap_ratio)
        .layout()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_width_bound_grid() {
        // 100 wide, 1000 tall: width is the binding constraint.
        let layout = compute_layout(100.0, 1000.0, 10, 10, 0.0, 0.0).unwrap();
        assert_relative_eq!(layout.dot_diameter, 10.0);
        assert_relative_eq!(layout.grid_width, 100.0);
        assert_relative_eq!(layout.grid_height, 10.0);
        assert_relative_eq!(layout.origin_x, 0.0);
        assert_relative_eq!(layout.origin_y, 495.0);
    }

    #[test]
    fn test_height_bound_grid() {
        let layout = compute_layout(1000.0, 100.0, 20, 2, 0.0, 0.0).unwrap();
        assert_eq!(layout.rows, 10);
        assert_relative_eq!(layout.dot_diameter, 10.0);
        assert_relative_eq!(layout.grid_height, 100.0);
        assert_relative_eq!(layout.origin_x, 490.0);
    }

    #[test]
    fn test_gap_ratio_applied() {
        // 3 dots + 2 gaps of half a dot = 4 diameters across 400px.
        let layout = compute_layout(400.0, 400.0, 3, 3, 0.0, 0.5).unwrap();
        assert_relative_eq!(layout.dot_diameter, 100.0);
        assert_relative_eq!(layout.gap, 50.0);
        assert_relative_eq!(layout.grid_width, 400.0);
        assert_relative_eq!(layout.pitch(), 150.0);
    }

    #[test]
    fn test_fractional_padding_uses_short_side() {
        let layout = compute_layout(200.0, 400.0, 1, 1, 0.1, 0.0).unwrap();
        assert_relative_eq!(layout.available_width, 160.0);
        assert_relative_eq!(layout.available_height, 360.0);
        assert_relative_eq!(layout.dot_diameter, 160.0);
    }

    #[test]
    fn test_label_reserve_shifts_origin_up() {
        let canvas = CanvasSize::new(100.0, 200.0).unwrap();
        let plain = GridRequest::new(canvas, 1, 1).layout().unwrap();
        let reserved = GridRequest::new(canvas, 1, 1)
            .with_label_reserve(20.0)
            .layout()
            .unwrap();
        assert_relative_eq!(reserved.available_height, 180.0);
        assert_relative_eq!(plain.origin_y - reserved.origin_y, 10.0);
    }

    #[test]
    fn test_cell_positions() {
        let layout = compute_layout(70.0, 70.0, 5, 3, 0.0, 0.0).unwrap();
        // 3 columns x 2 rows of 23.33px dots.
        let cell = layout.cell(4).unwrap();
        assert_eq!((cell.row, cell.column), (1, 1));
        assert_relative_eq!(cell.center_x, layout.origin_x + 1.5 * layout.dot_diameter);
        assert_relative_eq!(cell.center_y, layout.origin_y + 1.5 * layout.dot_diameter);
        assert!(layout.cell(5).is_none());
        assert_eq!(layout.cells().count(), 5);
    }

    #[test]
    fn test_more_columns_than_cells() {
        let layout = compute_layout(100.0, 100.0, 3, 10, 0.0, 0.0).unwrap();
        assert_eq!(layout.rows, 1);
        // Width is still sized for all ten columns.
        assert_relative_eq!(layout.dot_diameter, 10.0);
    }

    #[test]
    fn test_empty_grid() {
        let layout = compute_layout(100.0, 100.0, 0, 7, 0.1, 0.5).unwrap();
        assert_eq!(layout.rows, 0);
        assert_eq!(layout.grid_height, 0.0);
        assert!(layout.dot_diameter.is_finite());
        assert_eq!(layout.cells().count(), 0);
    }

    #[test]
    fn test_minimum_diameter_floor() {
        let canvas = CanvasSize::new(10.0, 10.0).unwrap();
        let layout = GridRequest::new(canvas, 4160, 52)
            .with_padding(Padding::Pixels(4.0))
            .with_gap_ratio(0.3)
            .layout()
            .unwrap();
        assert_eq!(layout.dot_diameter, MIN_DOT_DIAMETER);
    }

    #[test]
    fn test_floor_when_reserve_exceeds_canvas() {
        let canvas = CanvasSize::new(50.0, 10.0).unwrap();
        let layout = GridRequest::new(canvas, 7, 7)
            .with_label_reserve(14.0)
            .layout()
            .unwrap();
        assert!(layout.available_height < 0.0);
        assert_eq!(layout.dot_diameter, MIN_DOT_DIAMETER);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            compute_layout(100.0, 100.0, 10, 0, 0.0, 0.0),
            Err(CalendarError::ZeroColumns)
        );
        assert!(matches!(
            compute_layout(0.0, 100.0, 10, 2, 0.0, 0.0),
            Err(CalendarError::InvalidCanvas { .. })
        ));
        assert!(matches!(
            compute_layout(100.0, 100.0, 10, 2, 0.0, -0.1),
            Err(CalendarError::InvalidGapRatio(_))
        ));
        assert!(matches!(
            compute_layout(100.0, 100.0, 10, 2, 0.5, 0.0),
            Err(CalendarError::InvalidPadding(_))
        ));
    }
}
