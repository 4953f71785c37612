use chrono::{Datelike, Days, NaiveDate};

pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
}

/// Six Sunday-first weeks covering `month`, padded with days from the
/// neighbouring months.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let grid_start = first.checked_sub_days(Days::new(lead))?;

    let mut cells = Vec::with_capacity(GRID_CELLS);
    let mut day = grid_start;
    for _ in 0..GRID_CELLS {
        cells.push(CalendarDay {
            date: day,
            in_month: day.month() == month && day.year() == year,
        });
        day = day.succ_opt()?;
    }
    Some(cells)
}

pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|day| day.format("%B %Y").to_string())
        .unwrap_or_default()
}
