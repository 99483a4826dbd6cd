use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, Result};

/// Pixel width of one day column in day mode.
pub const DEFAULT_DAY_WIDTH: f32 = 40.0;

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// `date` shifted by `days`, or `None` past the representable calendar.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Granularity of the header strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    Day,
    Week,
    Month,
    Quarter,
}

impl ViewMode {
    /// Finest to coarsest.
    pub const ALL: [ViewMode; 4] = [Self::Day, Self::Week, Self::Month, Self::Quarter];

    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Quarter => "Quarter",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// One step finer; stays on `Day`.
    pub fn zoom_in(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    /// One step coarser; stays on `Quarter`.
    pub fn zoom_out(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn can_zoom_in(self) -> bool {
        self != Self::Day
    }

    pub fn can_zoom_out(self) -> bool {
        self != Self::Quarter
    }
}

/// The fixed, inclusive date range drawn by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(PlanningError::InvalidWindow { start, end });
        }
        // Both neighbours must exist so header stepping never leaves the calendar
        if add_days(start, -1).is_none() || add_days(end, 1).is_none() {
            return Err(PlanningError::WindowOutOfRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Nov 1 - Dec 31 2025, the range the planning board ships with.
    pub fn planning_default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or(NaiveDate::MIN),
        }
    }

    /// Number of days in the window, both ends included.
    pub fn total_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }
}

/// One labelled column of the header strip.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSegment {
    pub name: String,
    pub sub_label: String,
    /// Share of the whole chart width, 0..=100.
    pub width_pct: f32,
    pub is_weekend: bool,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Overall horizontal extent of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartWidth {
    /// Percentage of the visible viewport width.
    Percent(f32),
    /// Absolute width, used by day mode.
    Pixels(f32),
}

impl ChartWidth {
    pub fn resolve(self, available_px: f32) -> f32 {
        match self {
            Self::Percent(pct) => (available_px * pct / 100.0).max(0.0),
            Self::Pixels(px) => px.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GanttConfig {
    pub width: ChartWidth,
    pub headers: Vec<HeaderSegment>,
}

/// Week-of-year used in the week header labels.
///
/// Moves the date to the Thursday of its Monday-based week, then counts
/// weeks from January 1st of that Thursday's year.
pub fn week_number(date: NaiveDate) -> u32 {
    let weekday = date.weekday().number_from_monday() as i64;
    let thursday = add_days(date, 4 - weekday).unwrap_or(date);
    let day_of_year = thursday.ordinal0() as i64;
    ((day_of_year + 1 + 6) / 7) as u32
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month > 12 {
        NaiveDate::from_ymd_opt(year + 1, month - 12, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month, 1)
    }
}

fn share(days: i64, total_days: i64) -> f32 {
    (days as f64 / total_days as f64 * 100.0) as f32
}

/// Build the header segments and chart width for `mode`.
///
/// Pure function of its inputs; callers may cache the result until the
/// mode or window changes.
pub fn generate_gantt_config(
    window: &TimelineWindow,
    mode: ViewMode,
    day_width_px: f32,
) -> GanttConfig {
    let total = window.total_days();
    let mut headers = Vec::new();
    let mut current = window.start;

    let width = match mode {
        ViewMode::Day => {
            while current <= window.end {
                let weekday = current.weekday();
                headers.push(HeaderSegment {
                    name: current.day().to_string(),
                    sub_label: current.format("%a").to_string(),
                    width_pct: share(1, total),
                    is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
                    start: current,
                    end: current,
                });
                let Some(next) = add_days(current, 1) else {
                    break;
                };
                current = next;
            }
            ChartWidth::Pixels(total as f32 * day_width_px)
        }
        ViewMode::Week => {
            while current <= window.end {
                let to_next_monday = 8 - current.weekday().number_from_monday() as i64;
                let segment_end = add_days(current, to_next_monday - 1)
                    .map_or(window.end, |d| d.min(window.end));
                let days = days_between(current, segment_end) + 1;
                headers.push(HeaderSegment {
                    name: format!(
                        "{}/{} - {}/{}",
                        current.month(),
                        current.day(),
                        segment_end.month(),
                        segment_end.day()
                    ),
                    sub_label: format!("W{}", week_number(current)),
                    width_pct: share(days, total),
                    is_weekend: false,
                    start: current,
                    end: segment_end,
                });
                let Some(next) = add_days(segment_end, 1) else {
                    break;
                };
                current = next;
            }
            ChartWidth::Percent((total as f32 / 7.0 * 100.0).max(100.0))
        }
        ViewMode::Month => {
            while current <= window.end {
                let segment_end = first_of_month(current.year(), current.month() + 1)
                    .and_then(|next| add_days(next, -1))
                    .map_or(window.end, |d| d.min(window.end));
                headers.push(HeaderSegment {
                    name: current.format("%b %Y").to_string(),
                    sub_label: String::new(),
                    width_pct: share(days_between(current, segment_end) + 1, total),
                    is_weekend: false,
                    start: current,
                    end: segment_end,
                });
                let Some(next) = add_days(segment_end, 1) else {
                    break;
                };
                current = next;
            }
            ChartWidth::Percent(100.0)
        }
        ViewMode::Quarter => {
            while current <= window.end {
                let quarter = (current.month() - 1) / 3 + 1;
                let segment_end = first_of_month(current.year(), quarter * 3 + 1)
                    .and_then(|next| add_days(next, -1))
                    .map_or(window.end, |d| d.min(window.end));
                headers.push(HeaderSegment {
                    name: format!("{} Q{}", current.year(), quarter),
                    sub_label: String::new(),
                    width_pct: share(days_between(current, segment_end) + 1, total),
                    is_weekend: false,
                    start: current,
                    end: segment_end,
                });
                let Some(next) = add_days(segment_end, 1) else {
                    break;
                };
                current = next;
            }
            ChartWidth::Percent(100.0)
        }
    };

    GanttConfig { width, headers }
}

/// Horizontal placement of a bar, in percent of the chart width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPosition {
    pub left_pct: f32,
    pub width_pct: f32,
}

/// Place an item's inclusive `[start, end]` range on the chart.
///
/// Items reaching past either edge of the window are not clipped; only the
/// left offset is floored at zero.
pub fn calculate_position(window: &TimelineWindow, start: NaiveDate, end: NaiveDate) -> BarPosition {
    let total = window.total_days();
    let offset = days_between(window.start, start);
    let duration = days_between(start, end) + 1;

    BarPosition {
        left_pct: share(offset, total).max(0.0),
        width_pct: share(duration, total).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window() -> TimelineWindow {
        TimelineWindow::planning_default()
    }

    fn width_sum(config: &GanttConfig) -> f32 {
        config.headers.iter().map(|h| h.width_pct).sum()
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        let result = TimelineWindow::new(date(2025, 12, 31), date(2025, 11, 1));
        assert!(matches!(result, Err(PlanningError::InvalidWindow { .. })));
    }

    #[test]
    fn test_window_rejects_calendar_edges() {
        let before_max = NaiveDate::MAX.pred_opt().unwrap();
        assert!(matches!(
            TimelineWindow::new(before_max, NaiveDate::MAX),
            Err(PlanningError::WindowOutOfRange { .. })
        ));
        assert!(matches!(
            TimelineWindow::new(NaiveDate::MIN, date(2025, 1, 1)),
            Err(PlanningError::WindowOutOfRange { .. })
        ));
    }

    #[test]
    fn test_add_days_overflow_is_none() {
        assert_eq!(add_days(date(2025, 11, 1), 3), Some(date(2025, 11, 4)));
        assert_eq!(add_days(NaiveDate::MAX, 1), None);
        assert_eq!(add_days(date(2025, 11, 1), i64::MAX), None);
    }

    #[test]
    fn test_headers_stop_at_calendar_end() {
        // Built directly: `new` refuses this window.
        let w = TimelineWindow {
            start: NaiveDate::MAX.pred_opt().unwrap(),
            end: NaiveDate::MAX,
        };
        for mode in ViewMode::ALL {
            let config = generate_gantt_config(&w, mode, DEFAULT_DAY_WIDTH);
            assert_eq!(config.headers.last().unwrap().end, NaiveDate::MAX);
            assert!((width_sum(&config) - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_default_window_has_61_days() {
        assert_eq!(window().total_days(), 61);
    }

    #[test]
    fn test_zoom_steps_saturate() {
        assert_eq!(ViewMode::Month.zoom_in(), ViewMode::Week);
        assert_eq!(ViewMode::Day.zoom_in(), ViewMode::Day);
        assert_eq!(ViewMode::Month.zoom_out(), ViewMode::Quarter);
        assert_eq!(ViewMode::Quarter.zoom_out(), ViewMode::Quarter);
        assert!(!ViewMode::Day.can_zoom_in());
        assert!(!ViewMode::Quarter.can_zoom_out());
    }

    #[test]
    fn test_day_mode_segments() {
        let config = generate_gantt_config(&window(), ViewMode::Day, DEFAULT_DAY_WIDTH);
        assert_eq!(config.headers.len(), 61);
        assert_eq!(config.width, ChartWidth::Pixels(61.0 * 40.0));

        let first = &config.headers[0];
        assert_eq!(first.name, "1");
        assert_eq!(first.sub_label, "Sat");
        assert!(first.is_weekend);
        assert!(!config.headers[2].is_weekend); // Monday Nov 3
        assert!((first.width_pct - 100.0 / 61.0).abs() < 1e-4);
    }

    #[test]
    fn test_week_mode_first_and_last_segments() {
        let config = generate_gantt_config(&window(), ViewMode::Week, DEFAULT_DAY_WIDTH);
        let first = &config.headers[0];
        assert_eq!(first.start, date(2025, 11, 1));
        assert_eq!(first.end, date(2025, 11, 2));
        assert_eq!(first.name, "11/1 - 11/2");
        assert!((first.width_pct - 2.0 / 61.0 * 100.0).abs() < 1e-4);

        let second = &config.headers[1];
        assert_eq!(second.start, date(2025, 11, 3));
        assert_eq!(second.end, date(2025, 11, 9));

        let last = config.headers.last().unwrap();
        assert_eq!(last.end, date(2025, 12, 31));
        assert_eq!(last.start, date(2025, 12, 29));
        assert_eq!(config.width, ChartWidth::Percent(61.0 / 7.0 * 100.0));
    }

    #[test]
    fn test_month_mode_clips_partial_months() {
        let w = TimelineWindow::new(date(2025, 11, 20), date(2026, 1, 10)).unwrap();
        let config = generate_gantt_config(&w, ViewMode::Month, DEFAULT_DAY_WIDTH);
        let names: Vec<_> = config.headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Nov 2025", "Dec 2025", "Jan 2026"]);
        assert_eq!(config.headers[0].end, date(2025, 11, 30));
        assert_eq!(config.headers[2].end, date(2026, 1, 10));
        let total = w.total_days() as f32;
        assert!((config.headers[0].width_pct - 11.0 / total * 100.0).abs() < 1e-4);
        assert_eq!(config.width, ChartWidth::Percent(100.0));
    }

    #[test]
    fn test_quarter_mode_crosses_year() {
        let w = TimelineWindow::new(date(2025, 11, 1), date(2026, 2, 15)).unwrap();
        let config = generate_gantt_config(&w, ViewMode::Quarter, DEFAULT_DAY_WIDTH);
        assert_eq!(config.headers.len(), 2);
        assert_eq!(config.headers[0].name, "2025 Q4");
        assert_eq!(config.headers[0].end, date(2025, 12, 31));
        assert_eq!(config.headers[1].name, "2026 Q1");
        assert_eq!(config.headers[1].start, date(2026, 1, 1));
        assert_eq!(config.headers[1].end, date(2026, 2, 15));
    }

    #[test]
    fn test_single_day_window() {
        let w = TimelineWindow::new(date(2025, 11, 5), date(2025, 11, 5)).unwrap();
        for mode in ViewMode::ALL {
            let config = generate_gantt_config(&w, mode, DEFAULT_DAY_WIDTH);
            assert_eq!(config.headers.len(), 1);
            assert!((width_sum(&config) - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_week_numbers() {
        assert_eq!(week_number(date(2025, 11, 1)), 44);
        assert_eq!(week_number(date(2025, 11, 3)), 45);
        assert_eq!(week_number(date(2025, 12, 29)), 1); // Thursday lands in 2026
        assert_eq!(week_number(date(2021, 1, 3)), 53); // Thursday lands in 2020
        assert_eq!(week_number(date(2026, 1, 1)), 1);
    }

    #[test]
    fn test_calculate_position_example() {
        let pos = calculate_position(&window(), date(2025, 11, 5), date(2025, 11, 12));
        assert!((pos.left_pct - 4.0 / 61.0 * 100.0).abs() < 1e-4);
        assert!((pos.width_pct - 8.0 / 61.0 * 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_single_day_bar_width() {
        let pos = calculate_position(&window(), date(2025, 12, 1), date(2025, 12, 1));
        assert!((pos.width_pct - 100.0 / 61.0).abs() < 1e-4);
    }

    #[test]
    fn test_bar_before_window_is_floored_not_clipped() {
        let pos = calculate_position(&window(), date(2025, 10, 30), date(2025, 11, 2));
        assert_eq!(pos.left_pct, 0.0);
        // Full four-day width is kept even though two days fall outside.
        assert!((pos.width_pct - 4.0 / 61.0 * 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_chart_width_resolve() {
        assert_eq!(ChartWidth::Percent(200.0).resolve(500.0), 1000.0);
        assert_eq!(ChartWidth::Pixels(2440.0).resolve(500.0), 2440.0);
    }

    proptest! {
        #[test]
        fn prop_headers_cover_whole_window(offset in 0i64..2000, len in 0i64..900, mode_idx in 0usize..4) {
            let start = add_days(date(2020, 1, 1), offset).unwrap();
            let w = TimelineWindow::new(start, add_days(start, len).unwrap()).unwrap();
            let config = generate_gantt_config(&w, ViewMode::ALL[mode_idx], DEFAULT_DAY_WIDTH);

            prop_assert!((width_sum(&config) - 100.0).abs() < 0.01);
            prop_assert_eq!(config.headers.first().unwrap().start, w.start);
            prop_assert_eq!(config.headers.last().unwrap().end, w.end);
            for pair in config.headers.windows(2) {
                prop_assert_eq!(add_days(pair[0].end, 1), Some(pair[1].start));
            }
        }
    }
}
