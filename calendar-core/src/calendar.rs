//! Calendar configuration and the mode-specific glue between dates, fill
//! predicates and the scene builder.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::color::HexColor;
use crate::error::Result;
use crate::fill::{LifeProgress, YearProgress};
use crate::image_size::CanvasSize;
use crate::scene::{build_scene, Scene, SceneSpec};
use crate::style::{Mode, RenderProfile};
use crate::svg::render_svg;

pub const DEFAULT_LIFE_EXPECTANCY_YEARS: u32 = 80;

/// What the grid counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarKind {
    Year {
        year: i32,
    },
    Life {
        birthday: NaiveDate,
        life_expectancy_years: u32,
        show_stats: bool,
    },
}

impl CalendarKind {
    pub fn mode(&self) -> Mode {
        match self {
            CalendarKind::Year { .. } => Mode::Year,
            CalendarKind::Life { .. } => Mode::Life,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    pub kind: CalendarKind,
    pub foreground: HexColor,
    pub background: HexColor,
}

impl CalendarConfig {
    /// White-on-black progress of `year`.
    pub fn year(year: i32) -> Self {
        Self {
            kind: CalendarKind::Year { year },
            foreground: HexColor::WHITE,
            background: HexColor::BLACK,
        }
    }

    /// White-on-black life in weeks.
    pub fn life(birthday: NaiveDate, life_expectancy_years: u32, show_stats: bool) -> Self {
        Self {
            kind: CalendarKind::Life {
                birthday,
                life_expectancy_years,
                show_stats,
            },
            foreground: HexColor::WHITE,
            background: HexColor::BLACK,
        }
    }

    pub fn with_colors(mut self, foreground: HexColor, background: HexColor) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn mode(&self) -> Mode {
        self.kind.mode()
    }

    /// Lay out and classify the calendar for a canvas at time `now`.
    pub fn scene(
        &self,
        canvas: CanvasSize,
        profile: RenderProfile,
        now: NaiveDateTime,
    ) -> Result<Scene> {
        let mode = self.mode();
        let style = profile.grid_style(mode);
        let spec = |cell_count: usize, caption: Option<String>| SceneSpec {
            canvas,
            cell_count,
            columns: mode.columns(),
            foreground: self.foreground,
            background: self.background,
            caption,
        };

        match self.kind {
            CalendarKind::Year { year } => {
                let progress = YearProgress::new(year, now.date());
                build_scene(
                    spec(progress.cell_count(), Some(year.to_string())),
                    &style,
                    &progress,
                )
            }
            CalendarKind::Life {
                birthday,
                life_expectancy_years,
                show_stats,
            } => {
                let progress = LifeProgress::new(birthday, life_expectancy_years, now);
                let caption = show_stats.then(|| life_caption(&progress, profile));
                build_scene(spec(progress.total_weeks(), caption), &style, &progress)
            }
        }
    }

    /// Convenience wrapper producing SVG markup directly.
    pub fn render_svg(
        &self,
        canvas: CanvasSize,
        profile: RenderProfile,
        now: NaiveDateTime,
    ) -> Result<String> {
        Ok(render_svg(&self.scene(canvas, profile, now)?))
    }
}

fn life_caption(progress: &LifeProgress, profile: RenderProfile) -> String {
    match profile {
        RenderProfile::Wallpaper => format!("{}% lived", progress.percent_lived()),
        RenderProfile::Preview => format!("{}%", progress.percent_lived()),
    }
}

/// Year used when a request does not name one.
pub fn current_year(now: NaiveDateTime) -> i32 {
    now.year()
}
