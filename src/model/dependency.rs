use super::timeline::{days_between, TimelineWindow};
use super::work_item::WorkItem;

/// Largest horizontal distance between an endpoint and its control point.
pub const CONTROL_POINT_CAP: f32 = 40.0;

/// A cubic connector from the end of a predecessor's bar to the start of
/// its dependent's bar. Coordinates are chart-local pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyCurve {
    pub from_id: String,
    pub to_id: String,
    pub start: (f32, f32),
    pub control1: (f32, f32),
    pub control2: (f32, f32),
    pub end: (f32, f32),
}

impl DependencyCurve {
    pub fn points(&self) -> [(f32, f32); 4] {
        [self.start, self.control1, self.control2, self.end]
    }
}

/// Lay out one curve per `(predecessor -> item)` edge.
///
/// Row `i` of `items` is centred at `i * row_height + row_height / 2`.
/// Edges naming an id that is not in `items` are skipped. Cycles are drawn
/// like any other edges.
pub fn dependency_curves(
    items: &[WorkItem],
    window: &TimelineWindow,
    chart_px_width: f32,
    row_height: f32,
) -> Vec<DependencyCurve> {
    if chart_px_width <= 0.0 {
        return Vec::new();
    }

    let total = window.total_days() as f32;
    let day_to_x = |days: i64| days as f32 / total * chart_px_width;
    let row_center = |row: usize| row as f32 * row_height + row_height / 2.0;

    let mut curves = Vec::new();
    for (row, item) in items.iter().enumerate() {
        for pred_id in &item.predecessors {
            let Some(pred_row) = items.iter().position(|i| &i.id == pred_id) else {
                continue;
            };
            let pred = &items[pred_row];

            let start = (
                day_to_x(days_between(window.start, pred.end_date) + 1),
                row_center(pred_row),
            );
            let end = (
                day_to_x(days_between(window.start, item.start_date)),
                row_center(row),
            );
            let offset = ((end.0 - start.0).abs() / 2.0).min(CONTROL_POINT_CAP);

            curves.push(DependencyCurve {
                from_id: pred.id.clone(),
                to_id: item.id.clone(),
                start,
                control1: (start.0 + offset, start.1),
                control2: (end.0 - offset, end.1),
                end,
            });
        }
    }
    curves
}
