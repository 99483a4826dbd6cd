pub mod board;
pub mod dependency;
pub mod drag;
pub mod timeline;
pub mod work_item;

pub use board::{Column, PlanningBoard, VisibleColumns};
pub use dependency::DependencyCurve;
pub use drag::{DragKind, PointerSession};
pub use timeline::{HeaderSegment, TimelineWindow, ViewMode};
pub use work_item::{ItemDraft, Priority, Status, WorkItem, WorkItemType};
