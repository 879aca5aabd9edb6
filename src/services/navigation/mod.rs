// Calendar navigation: moving between periods and listing the dates a view shows

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::ui::ViewType;

/// Move `date` by `direction` periods of `view`.
///
/// Day and week views keep the weekday; month and year views land on the
/// first day of the new month or year.
pub fn offset_period(date: NaiveDate, view: ViewType, direction: i32) -> NaiveDate {
    match view {
        ViewType::Day => date + Duration::days(i64::from(direction)),
        ViewType::Week => date + Duration::weeks(i64::from(direction)),
        ViewType::Month => {
            let first = date.with_day(1).unwrap_or(date);
            let months = Months::new(direction.unsigned_abs());
            let shifted = if direction >= 0 {
                first.checked_add_months(months)
            } else {
                first.checked_sub_months(months)
            };
            shifted.unwrap_or(first)
        }
        ViewType::Year => NaiveDate::from_ymd_opt(date.year() + direction, 1, 1).unwrap_or(date),
    }
}

/// First day of the week containing `date`.
///
/// `first_day_of_week` counts from Sunday (0) to Saturday (6).
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    date - Duration::days(week_column(date, first_day_of_week))
}

/// Position of `date` within its week, 0..=6
pub fn week_column(date: NaiveDate, first_day_of_week: u8) -> i64 {
    let weekday = i64::from(date.weekday().num_days_from_sunday());
    (weekday - i64::from(first_day_of_week) + 7) % 7
}

pub fn week_dates(date: NaiveDate, first_day_of_week: u8) -> [NaiveDate; 7] {
    let start = week_start(date, first_day_of_week);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Dates of the full weeks covering `date`'s month, padded with days of the
/// neighbouring months.
pub fn month_dates(date: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);

    let start = week_start(first, first_day_of_week);
    let end = week_start(last, first_day_of_week) + Duration::days(6);

    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Dates shown as day columns by `view`; month and year views have none.
pub fn visible_days(date: NaiveDate, view: ViewType, first_day_of_week: u8) -> Vec<NaiveDate> {
    match view {
        ViewType::Day => vec![date],
        ViewType::Week => week_dates(date, first_day_of_week).to_vec(),
        ViewType::Month | ViewType::Year => Vec::new(),
    }
}

/// Heading for the period around `date`
pub fn period_label(date: NaiveDate, view: ViewType) -> String {
    match view {
        ViewType::Day => date.format("%A, %-d %B %Y").to_string(),
        ViewType::Week | ViewType::Month => date.format("%B %Y").to_string(),
        ViewType::Year => date.format("%Y").to_string(),
    }
}
