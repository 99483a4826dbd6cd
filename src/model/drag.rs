//! Drag and resize gestures on timeline bars.
//!
//! A gesture is `Idle -> Dragging -> Idle`. Dates are rewritten on every
//! pointer move, so releasing the pointer simply drops the anchor.

use chrono::NaiveDate;

use super::timeline::add_days;
use super::work_item::WorkItem;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Bar body: shift both dates.
    Move,
    /// Left handle: shift the start date.
    ResizeLeft,
    /// Right handle: shift the end date.
    ResizeRight,
}

/// What was grabbed, and where, at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct DragAnchor {
    pub item_id: String,
    pub kind: DragKind,
    pub pointer_x: f32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Convert a horizontal pointer travel into whole days.
pub fn day_delta(pixel_delta: f32, chart_px_width: f32, total_days: i64) -> i64 {
    if chart_px_width <= 0.0 {
        return 0;
    }
    (pixel_delta / chart_px_width * total_days as f32).round() as i64
}

/// Runtime-agnostic pointer callbacks that drive a gesture.
pub trait PointerSession {
    /// Pointer pressed on a bar or one of its handles.
    fn pointer_down(&mut self, item_id: &str, kind: DragKind, pointer_x: f32) -> Result<bool>;
    /// Pointer moved while pressed. Returns whether any date changed.
    fn pointer_move(&mut self, pointer_x: f32) -> bool;
    /// Pointer released anywhere.
    fn pointer_up(&mut self);
}

/// Single-slot gesture state. Only one item can be mid-gesture.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragAnchor>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&DragAnchor> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self, item_id: &str) -> bool {
        self.active.as_ref().is_some_and(|a| a.item_id == item_id)
    }

    /// Start a gesture on `item`. Refused while another gesture is live.
    pub fn begin(&mut self, item: &WorkItem, kind: DragKind, pointer_x: f32) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(DragAnchor {
            item_id: item.id.clone(),
            kind,
            pointer_x,
            start: item.start_date,
            end: item.end_date,
        });
        true
    }

    /// Apply the current pointer position to the anchored item.
    ///
    /// Resizes that would put the start after the end are dropped for this
    /// tick and the item keeps its previous dates. So is any travel that
    /// would leave the representable calendar.
    pub fn update(
        &mut self,
        items: &mut [WorkItem],
        pointer_x: f32,
        chart_px_width: f32,
        total_days: i64,
    ) -> bool {
        let Some(anchor) = self.active.as_ref() else {
            return false;
        };
        let delta = day_delta(pointer_x - anchor.pointer_x, chart_px_width, total_days);
        if delta == 0 && anchor.kind == DragKind::Move {
            return false;
        }
        let Some(item) = items.iter_mut().find(|i| i.id == anchor.item_id) else {
            return false;
        };

        let mut start = item.start_date;
        let mut end = item.end_date;
        match anchor.kind {
            DragKind::Move => {
                let moved = add_days(anchor.start, delta).zip(add_days(anchor.end, delta));
                let Some((s, e)) = moved else {
                    return false;
                };
                start = s;
                end = e;
            }
            DragKind::ResizeLeft => match add_days(anchor.start, delta) {
                Some(proposed) if proposed <= item.end_date => start = proposed,
                _ => {}
            },
            DragKind::ResizeRight => match add_days(anchor.end, delta) {
                Some(proposed) if item.start_date <= proposed => end = proposed,
                _ => {}
            },
        }

        let changed = start != item.start_date || end != item.end_date;
        item.start_date = start;
        item.end_date = end;
        changed
    }

    /// Finish the gesture. The dates written by the last `update` stay.
    pub fn end(&mut self) -> Option<DragAnchor> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::work_item::WorkItemType;
    use proptest::prelude::*;

    const TOTAL: i64 = 61;
    const WIDTH: f32 = 610.0; // 10 px per day

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn items() -> Vec<WorkItem> {
        vec![WorkItem::new(
            "a",
            "Login page",
            WorkItemType::Bug,
            date(2025, 11, 5),
            date(2025, 11, 12),
        )]
    }

    #[test]
    fn test_day_delta_rounds() {
        assert_eq!(day_delta(14.0, WIDTH, TOTAL), 1);
        assert_eq!(day_delta(16.0, WIDTH, TOTAL), 2);
        assert_eq!(day_delta(-26.0, WIDTH, TOTAL), -3);
        assert_eq!(day_delta(50.0, 0.0, TOTAL), 0);
    }

    #[test]
    fn test_move_shifts_both_dates() {
        let mut items = items();
        let mut drag = DragController::new();
        assert!(drag.begin(&items[0], DragKind::Move, 100.0));
        assert!(drag.update(&mut items, 130.0, WIDTH, TOTAL));
        assert_eq!(items[0].start_date, date(2025, 11, 8));
        assert_eq!(items[0].end_date, date(2025, 11, 15));

        // Dates are relative to the anchor, not cumulative.
        assert!(drag.update(&mut items, 90.0, WIDTH, TOTAL));
        assert_eq!(items[0].start_date, date(2025, 11, 4));
        assert_eq!(items[0].end_date, date(2025, 11, 11));
    }

    #[test]
    fn test_move_with_zero_delta_is_noop() {
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(&items[0], DragKind::Move, 100.0);
        assert!(!drag.update(&mut items, 103.0, WIDTH, TOTAL));
        assert_eq!(items[0].start_date, date(2025, 11, 5));
    }

    #[test]
    fn test_resize_left_rejects_crossing_end() {
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(&items[0], DragKind::ResizeLeft, 0.0);

        assert!(drag.update(&mut items, 70.0, WIDTH, TOTAL));
        assert_eq!(items[0].start_date, date(2025, 11, 12));

        // Nine days would land after the end: keep the previous start.
        assert!(!drag.update(&mut items, 90.0, WIDTH, TOTAL));
        assert_eq!(items[0].start_date, date(2025, 11, 12));
        assert_eq!(items[0].end_date, date(2025, 11, 12));
    }

    #[test]
    fn test_resize_right_rejects_crossing_start() {
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(&items[0], DragKind::ResizeRight, 200.0);

        assert!(drag.update(&mut items, 220.0, WIDTH, TOTAL));
        assert_eq!(items[0].end_date, date(2025, 11, 14));

        assert!(!drag.update(&mut items, 100.0, WIDTH, TOTAL));
        assert_eq!(items[0].end_date, date(2025, 11, 14));
        assert_eq!(items[0].start_date, date(2025, 11, 5));
    }

    #[test]
    fn test_second_gesture_is_refused_until_release() {
        let items = items();
        let mut drag = DragController::new();
        assert!(drag.begin(&items[0], DragKind::Move, 0.0));
        assert!(!drag.begin(&items[0], DragKind::ResizeLeft, 10.0));
        assert_eq!(drag.active().unwrap().kind, DragKind::Move);

        let released = drag.end().unwrap();
        assert_eq!(released.item_id, "a");
        assert!(drag.active().is_none());
        assert!(drag.begin(&items[0], DragKind::ResizeLeft, 10.0));
    }

    #[test]
    fn test_release_keeps_last_dates() {
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(&items[0], DragKind::Move, 0.0);
        drag.update(&mut items, 50.0, WIDTH, TOTAL);
        drag.end();
        assert_eq!(items[0].start_date, date(2025, 11, 10));
        assert!(!drag.update(&mut items, 500.0, WIDTH, TOTAL));
        assert_eq!(items[0].start_date, date(2025, 11, 10));
    }

    #[test]
    fn test_update_without_gesture_or_item() {
        let mut items = items();
        let mut drag = DragController::new();
        assert!(!drag.update(&mut items, 50.0, WIDTH, TOTAL));

        let ghost = WorkItem::new("ghost", "", WorkItemType::Task, date(2025, 11, 1), date(2025, 11, 1));
        drag.begin(&ghost, DragKind::Move, 0.0);
        assert!(!drag.update(&mut items, 50.0, WIDTH, TOTAL));
    }

    #[test]
    fn test_travel_past_calendar_is_dropped() {
        for kind in [DragKind::Move, DragKind::ResizeLeft, DragKind::ResizeRight] {
            let mut items = items();
            let mut drag = DragController::new();
            drag.begin(&items[0], kind, 0.0);

            assert!(!drag.update(&mut items, 1.0e12, WIDTH, TOTAL));
            assert!(!drag.update(&mut items, -1.0e12, WIDTH, TOTAL));
            assert_eq!(items[0].start_date, date(2025, 11, 5));
            assert_eq!(items[0].end_date, date(2025, 11, 12));

            // A sane move afterwards still lands relative to the anchor.
            if kind == DragKind::Move {
                assert!(drag.update(&mut items, 10.0, WIDTH, TOTAL));
                assert_eq!(items[0].start_date, date(2025, 11, 6));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_resize_never_inverts(
            right in any::<bool>(),
            moves in proptest::collection::vec(-700.0f32..700.0, 1..40),
        ) {
            let mut items = items();
            let mut drag = DragController::new();
            let kind = if right { DragKind::ResizeRight } else { DragKind::ResizeLeft };
            drag.begin(&items[0], kind, 0.0);
            for x in moves {
                drag.update(&mut items, x, WIDTH, TOTAL);
                prop_assert!(items[0].start_date <= items[0].end_date);
            }
        }

        #[test]
        fn prop_move_preserves_duration(days in -200i64..200) {
            let mut items = items();
            let before = items[0].duration_days();
            let mut drag = DragController::new();
            drag.begin(&items[0], DragKind::Move, 0.0);
            drag.update(&mut items, days as f32 * 10.0, WIDTH, TOTAL);
            drag.end();

            prop_assert_eq!(items[0].duration_days(), before);
            prop_assert_eq!(Some(items[0].start_date), add_days(date(2025, 11, 5), days));
            prop_assert_eq!(Some(items[0].end_date), add_days(date(2025, 11, 12), days));
        }
    }
}
