//! Fill predicates: which cells count as elapsed time.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::dates::{day_of_year, days_in_year, weeks_between};

/// Weeks drawn per year of life expectancy.
pub const WEEKS_PER_YEAR: usize = 52;

/// Decides whether the cell at `index` is drawn filled.
pub trait FillPredicate {
    fn is_filled(&self, index: usize) -> bool;
}

impl<F> FillPredicate for F
where
    F: Fn(usize) -> bool,
{
    fn is_filled(&self, index: usize) -> bool {
        self(index)
    }
}

/// One cell per day of `year`, filled for days up to and including today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearProgress {
    year: i32,
    elapsed_days: usize,
}

impl YearProgress {
    pub fn new(year: i32, today: NaiveDate) -> Self {
        let elapsed_days = match year.cmp(&today.year()) {
            std::cmp::Ordering::Less => days_in_year(year) as usize,
            std::cmp::Ordering::Greater => 0,
            std::cmp::Ordering::Equal => day_of_year(today) as usize,
        };
        Self { year, elapsed_days }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn cell_count(&self) -> usize {
        days_in_year(self.year) as usize
    }

    pub fn elapsed_days(&self) -> usize {
        self.elapsed_days
    }
}

impl FillPredicate for YearProgress {
    fn is_filled(&self, index: usize) -> bool {
        // Day `index + 1` has elapsed once today's ordinal reaches it.
        index < self.elapsed_days
    }
}

/// One cell per week of an assumed lifespan, filled for weeks already lived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeProgress {
    total_weeks: usize,
    lived_weeks: usize,
}

impl LifeProgress {
    /// Weeks lived are clamped to `[0, total]`, so unborn and very old
    /// birthdays never overflow the grid.
    pub fn new(birthday: NaiveDate, life_expectancy_years: u32, now: NaiveDateTime) -> Self {
        let total_weeks = life_expectancy_years as usize * WEEKS_PER_YEAR;
        let elapsed = weeks_between(birthday.and_time(NaiveTime::MIN), now);
        let lived_weeks = usize::try_from(elapsed.max(0))
            .unwrap_or(usize::MAX)
            .min(total_weeks);
        Self {
            total_weeks,
            lived_weeks,
        }
    }

    pub fn total_weeks(&self) -> usize {
        self.total_weeks
    }

    pub fn lived_weeks(&self) -> usize {
        self.lived_weeks
    }

    /// Whole percent of the lifespan already lived, rounded down.
    pub fn percent_lived(&self) -> usize {
        if self.total_weeks == 0 {
            return 0;
        }
        self.lived_weeks * 100 / self.total_weeks
    }
}

impl FillPredicate for LifeProgress {
    fn is_filled(&self, index: usize) -> bool {
        index < self.lived_weeks
    }
}
