use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dependency::{dependency_curves, DependencyCurve};
use super::drag::{DragController, DragKind, PointerSession};
use super::timeline::{
    calculate_position, generate_gantt_config, BarPosition, GanttConfig, TimelineWindow, ViewMode,
};
use super::work_item::{Assignee, ItemDraft, Priority, Status, WorkItem, WorkItemType};
use crate::error::{PlanningError, Result};

/// Optional table columns next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Status,
    Assignee,
    Start,
    End,
}

impl Column {
    pub const ALL: [Column; 4] = [Self::Status, Self::Assignee, Self::Start, Self::End];

    pub fn label(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Assignee => "Assignee",
            Self::Start => "Planned start",
            Self::End => "Planned end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibleColumns {
    pub status: bool,
    pub assignee: bool,
    pub start: bool,
    pub end: bool,
}

impl Default for VisibleColumns {
    fn default() -> Self {
        Self {
            status: true,
            assignee: true,
            start: true,
            end: true,
        }
    }
}

impl VisibleColumns {
    pub fn is_visible(&self, column: Column) -> bool {
        match column {
            Column::Status => self.status,
            Column::Assignee => self.assignee,
            Column::Start => self.start,
            Column::End => self.end,
        }
    }

    pub fn toggle(&mut self, column: Column) {
        let flag = match column {
            Column::Status => &mut self.status,
            Column::Assignee => &mut self.assignee,
            Column::Start => &mut self.start,
            Column::End => &mut self.end,
        };
        *flag = !*flag;
    }
}

/// Quick filters from the toolbar chips and the advanced filter dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub keyword: String,
    pub item_type: Option<WorkItemType>,
    pub status: Option<Status>,
    pub assignee: Option<String>,
}

impl ItemFilter {
    pub fn is_empty(&self) -> bool {
        self.keyword.trim().is_empty()
            && self.item_type.is_none()
            && self.status.is_none()
            && self.assignee.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, item: &WorkItem) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        if !keyword.is_empty()
            && !item.title.to_lowercase().contains(&keyword)
            && !item.id.to_lowercase().contains(&keyword)
        {
            return false;
        }
        if self.item_type.is_some_and(|t| t != item.item_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != item.status) {
            return false;
        }
        if let Some(name) = &self.assignee {
            if &item.assignee.name != name {
                return false;
            }
        }
        true
    }
}

/// State behind the planning view: the work items, the timeline window,
/// header configuration and the live drag gesture.
#[derive(Debug)]
pub struct PlanningBoard {
    pub window: TimelineWindow,
    pub items: Vec<WorkItem>,
    pub columns: VisibleColumns,
    pub filter: ItemFilter,
    view_mode: ViewMode,
    config: GanttConfig,
    day_width_px: f32,
    chart_px_width: f32,
    drag: DragController,
}

impl PlanningBoard {
    pub fn new(
        window: TimelineWindow,
        items: Vec<WorkItem>,
        view_mode: ViewMode,
        day_width_px: f32,
    ) -> Self {
        Self {
            config: generate_gantt_config(&window, view_mode, day_width_px),
            window,
            items,
            columns: VisibleColumns::default(),
            filter: ItemFilter::default(),
            view_mode,
            day_width_px,
            chart_px_width: 0.0,
            drag: DragController::new(),
        }
    }

    /// Board preloaded with the demo work items.
    pub fn with_seed_data(window: TimelineWindow, view_mode: ViewMode, day_width_px: f32) -> Self {
        Self::new(window, seed_items(), view_mode, day_width_px)
    }

    // ── View mode ───────────────────────────────────────────────

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Returns true when the mode changed and the header was rebuilt.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if mode == self.view_mode {
            return false;
        }
        info!("View mode {} -> {}", self.view_mode.label(), mode.label());
        self.view_mode = mode;
        self.config = generate_gantt_config(&self.window, mode, self.day_width_px);
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_view_mode(self.view_mode.zoom_in())
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_view_mode(self.view_mode.zoom_out())
    }

    pub fn gantt_config(&self) -> &GanttConfig {
        &self.config
    }

    // ── Layout ──────────────────────────────────────────────────

    /// Record the measured pixel width of the chart. Returns true when it
    /// moved by more than half a pixel.
    pub fn observe_chart_width(&mut self, px: f32) -> bool {
        if (px - self.chart_px_width).abs() <= 0.5 {
            return false;
        }
        debug!("Chart width {:.1}px -> {:.1}px", self.chart_px_width, px);
        self.chart_px_width = px;
        true
    }

    pub fn position_of(&self, item: &WorkItem) -> BarPosition {
        calculate_position(&self.window, item.start_date, item.end_date)
    }

    /// Items passing the current filter, in board order.
    pub fn visible_items(&self) -> Vec<&WorkItem> {
        self.items.iter().filter(|i| self.filter.matches(i)).collect()
    }

    /// Connectors between the visible rows.
    pub fn dependency_curves(&self, row_height: f32) -> Vec<DependencyCurve> {
        let rows: Vec<WorkItem> = self.visible_items().into_iter().cloned().collect();
        dependency_curves(&rows, &self.window, self.chart_px_width, row_height)
    }

    // ── Items ───────────────────────────────────────────────────

    pub fn item(&self, id: &str) -> Option<&WorkItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Distinct assignee names, for the filter chip.
    pub fn assignees(&self) -> Vec<String> {
        let mut names: Vec<String> = self.items.iter().map(|i| i.assignee.name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Validate `draft`, append it and return the new id.
    pub fn create_item(&mut self, draft: ItemDraft) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let item = draft.into_item(id.clone())?;
        info!("Created work item {} '{}'", item.id, item.title);
        self.items.push(item);
        Ok(id)
    }

    pub fn is_dragging(&self, item_id: &str) -> bool {
        self.drag.is_dragging(item_id)
    }

    pub fn dragging_item(&self) -> Option<&str> {
        self.drag.active().map(|a| a.item_id.as_str())
    }
}

impl PointerSession for PlanningBoard {
    fn pointer_down(&mut self, item_id: &str, kind: DragKind, pointer_x: f32) -> Result<bool> {
        let item = self
            .items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| PlanningError::UnknownItem(item_id.to_string()))?;
        let started = self.drag.begin(item, kind, pointer_x);
        if started {
            debug!("Drag {:?} started on {} at x={:.1}", kind, item_id, pointer_x);
        }
        Ok(started)
    }

    fn pointer_move(&mut self, pointer_x: f32) -> bool {
        let total = self.window.total_days();
        self.drag
            .update(&mut self.items, pointer_x, self.chart_px_width, total)
    }

    fn pointer_up(&mut self) {
        if let Some(anchor) = self.drag.end() {
            if let Some(item) = self.item(&anchor.item_id) {
                debug!(
                    "Drag {:?} on {} committed {} -> {}",
                    anchor.kind, anchor.item_id, item.start_date, item.end_date
                );
            }
        }
    }
}

fn seed_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn seed_item(
    id: &str,
    title: &str,
    item_type: WorkItemType,
    priority: Priority,
    status: Status,
    start: NaiveDate,
    end: NaiveDate,
) -> WorkItem {
    let mut item = WorkItem::new(id, title, item_type, start, end);
    item.priority = priority;
    item.status = status;
    item.assignee = Assignee::new("looking4id");
    item
}

/// Demo rows shown on first launch.
pub fn seed_items() -> Vec<WorkItem> {
    vec![
        seed_item(
            "1",
            "[Sample defect] Phone sign-up page renders incorrectly",
            WorkItemType::Bug,
            Priority::High,
            Status::Done,
            seed_date(2025, 11, 5),
            seed_date(2025, 11, 12),
        ),
        seed_item(
            "2",
            "[Sample feature] Online ordering in the WeChat mini-program",
            WorkItemType::Feature,
            Priority::Medium,
            Status::ToDo,
            seed_date(2025, 11, 15),
            seed_date(2025, 11, 25),
        )
        .with_predecessors(["1"]),
        seed_item(
            "3",
            "[Sample defect] Ordering page lags with many users",
            WorkItemType::Bug,
            Priority::Critical,
            Status::InProgress,
            seed_date(2025, 11, 20),
            seed_date(2025, 12, 5),
        ),
        seed_item(
            "4",
            "[Sample defect] Group ordering PRD",
            WorkItemType::Bug,
            Priority::Medium,
            Status::InProgress,
            seed_date(2025, 12, 2),
            seed_date(2025, 12, 15),
        )
        .with_predecessors(["2", "3"]),
        seed_item(
            "5",
            "[Sample defect] Language switch has no effect",
            WorkItemType::Bug,
            Priority::Low,
            Status::Done,
            seed_date(2025, 12, 10),
            seed_date(2025, 12, 20),
        )
        .with_predecessors(["4"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> PlanningBoard {
        PlanningBoard::with_seed_data(TimelineWindow::planning_default(), ViewMode::Month, 40.0)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seed_data_edges() {
        let b = board();
        assert_eq!(b.items.len(), 5);
        assert_eq!(b.item("4").unwrap().predecessors, vec!["2", "3"]);
        assert_eq!(b.assignees(), vec!["looking4id".to_string()]);
    }

    #[test]
    fn test_view_mode_regenerates_headers_only_on_change() {
        let mut b = board();
        assert_eq!(b.gantt_config().headers.len(), 2);
        assert!(!b.set_view_mode(ViewMode::Month));
        assert!(b.zoom_in());
        assert_eq!(b.view_mode(), ViewMode::Week);
        assert_eq!(b.gantt_config().headers.len(), 10);
        assert!(b.zoom_out());
        assert!(b.zoom_out());
        assert!(!b.zoom_out());
        assert_eq!(b.gantt_config().headers[0].name, "2025 Q4");
    }

    #[test]
    fn test_example_position() {
        let b = board();
        let pos = b.position_of(b.item("1").unwrap());
        assert!((pos.left_pct - 6.557).abs() < 1e-2);
        assert!((pos.width_pct - 13.115).abs() < 1e-2);
    }

    #[test]
    fn test_filter_by_keyword_type_and_status() {
        let mut b = board();
        b.filter.keyword = "ORDER".into();
        let ids: Vec<_> = b.visible_items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);

        b.filter.item_type = Some(WorkItemType::Bug);
        b.filter.status = Some(Status::InProgress);
        let ids: Vec<_> = b.visible_items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["3", "4"]);

        b.filter.assignee = Some("nobody".into());
        assert!(b.visible_items().is_empty());

        b.filter.clear();
        assert!(b.filter.is_empty());
        assert_eq!(b.visible_items().len(), 5);
    }

    #[test]
    fn test_curves_follow_visible_rows() {
        let mut b = board();
        assert!(b.dependency_curves(45.0).is_empty()); // width not measured yet
        assert!(b.observe_chart_width(610.0));
        assert!(!b.observe_chart_width(610.3));
        assert_eq!(b.dependency_curves(45.0).len(), 4);

        // Hiding item 3 drops the 3 -> 4 edge.
        b.filter.status = Some(Status::Done);
        assert!(b.dependency_curves(45.0).is_empty());
        b.filter.clear();
        b.filter.keyword = "order".into();
        assert_eq!(b.dependency_curves(45.0).len(), 2);
    }

    #[test]
    fn test_columns_toggle() {
        let mut cols = VisibleColumns::default();
        cols.toggle(Column::Assignee);
        assert!(!cols.is_visible(Column::Assignee));
        assert!(cols.is_visible(Column::Status));
        cols.toggle(Column::Assignee);
        assert!(cols.is_visible(Column::Assignee));
    }

    #[test]
    fn test_create_item_appends_with_fresh_id() {
        let mut b = board();
        let mut draft = ItemDraft::new(date(2025, 12, 1), date(2025, 12, 3));
        draft.title = "Payment retries".into();
        let id = b.create_item(draft).unwrap();
        assert_eq!(b.items.len(), 6);
        assert_eq!(b.items.last().unwrap().id, id);
        assert!(Uuid::parse_str(&id).is_ok());

        let bad = ItemDraft::new(date(2025, 12, 1), date(2025, 12, 3));
        assert!(b.create_item(bad).is_err());
        assert_eq!(b.items.len(), 6);
    }

    #[test]
    fn test_pointer_session_drives_drag() {
        let mut b = board();
        b.observe_chart_width(610.0);

        assert!(b.pointer_down("1", DragKind::Move, 100.0).unwrap());
        assert!(b.is_dragging("1"));
        assert!(!b.pointer_down("2", DragKind::Move, 100.0).unwrap());
        assert_eq!(b.dragging_item(), Some("1"));

        assert!(b.pointer_move(120.0));
        b.pointer_up();
        assert!(b.dragging_item().is_none());

        let item = b.item("1").unwrap();
        assert_eq!(item.start_date, date(2025, 11, 7));
        assert_eq!(item.end_date, date(2025, 11, 14));
    }

    #[test]
    fn test_huge_pointer_travel_is_ignored() {
        let mut b = board();
        b.observe_chart_width(610.0);
        b.pointer_down("1", DragKind::Move, 0.0).unwrap();

        assert!(!b.pointer_move(1.0e12));
        assert!(!b.pointer_move(-1.0e12));
        b.pointer_up();

        let item = b.item("1").unwrap();
        assert_eq!(item.start_date, date(2025, 11, 5));
        assert_eq!(item.end_date, date(2025, 11, 12));
    }

    #[test]
    fn test_pointer_down_on_unknown_item() {
        let mut b = board();
        let err = b.pointer_down("99", DragKind::ResizeLeft, 0.0).unwrap_err();
        assert!(matches!(err, PlanningError::UnknownItem(id) if id == "99"));
    }
}
