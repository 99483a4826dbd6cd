use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, Result};

/// Category tag shown as a badge in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkItemType {
    Feature,
    Bug,
    Task,
}

impl WorkItemType {
    pub const ALL: [WorkItemType; 3] = [Self::Feature, Self::Bug, Self::Task];

    pub fn label(self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::Bug => "Bug",
            Self::Task => "Task",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    ToDo,
    InProgress,
    Done,
    Blocked,
}

impl Status {
    pub const ALL: [Status; 4] = [Self::ToDo, Self::InProgress, Self::Done, Self::Blocked];

    pub fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Blocked => "Blocked",
        }
    }
}

/// Display-only reference to a person; there is no user entity behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
}

impl Assignee {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn unassigned() -> Self {
        Self::new("Unassigned")
    }

    /// Two-letter badge text for the avatar circle.
    pub fn initials(&self) -> String {
        let mut chars = self.name.chars();
        let mut out = String::new();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
        }
        if let Some(second) = chars.next() {
            out.push(second);
        }
        out
    }
}

/// A requirement, task or defect plotted as one row of the Gantt chart.
///
/// `start_date` and `end_date` are both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    pub item_type: WorkItemType,
    pub priority: Priority,
    pub status: Status,
    pub assignee: Assignee,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    /// Ids of the items this one waits on. Not checked for cycles.
    #[serde(default)]
    pub predecessors: Vec<String>,
}

impl WorkItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        item_type: WorkItemType,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            item_type,
            priority: Priority::Medium,
            status: Status::ToDo,
            assignee: Assignee::unassigned(),
            start_date,
            end_date,
            description: String::new(),
            predecessors: Vec::new(),
        }
    }

    pub fn with_predecessors<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Number of calendar days covered, counting both ends.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn short_type_tag(&self) -> &'static str {
        match self.item_type {
            WorkItemType::Bug => "Bug",
            _ => "Feat",
        }
    }
}

/// Form state behind the "Create Work Item" dialog.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub title: String,
    pub item_type: WorkItemType,
    pub priority: Priority,
    pub assignee: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
}

impl ItemDraft {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            item_type: WorkItemType::Feature,
            priority: Priority::High,
            assignee: "looking4id".to_string(),
            start_date,
            end_date,
            description: String::new(),
        }
    }

    /// Validate the draft and turn it into a work item carrying `id`.
    pub fn into_item(self, id: impl Into<String>) -> Result<WorkItem> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PlanningError::EmptyTitle);
        }
        if self.end_date < self.start_date {
            return Err(PlanningError::InvertedRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        let mut item = WorkItem::new(id, title, self.item_type, self.start_date, self.end_date);
        item.priority = self.priority;
        item.assignee = Assignee::new(self.assignee.trim());
        item.description = self.description;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_item_has_duration_one() {
        let item = WorkItem::new("1", "x", WorkItemType::Task, date(2025, 11, 5), date(2025, 11, 5));
        assert_eq!(item.duration_days(), 1);
    }

    #[test]
    fn test_initials() {
        assert_eq!(Assignee::new("looking4id").initials(), "Lo");
        assert_eq!(Assignee::new("a").initials(), "A");
        assert_eq!(Assignee::new("").initials(), "");
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        let mut draft = ItemDraft::new(date(2025, 11, 1), date(2025, 11, 2));
        draft.title = "   ".into();
        assert!(matches!(draft.into_item("x"), Err(PlanningError::EmptyTitle)));
    }

    #[test]
    fn test_draft_rejects_inverted_range() {
        let mut draft = ItemDraft::new(date(2025, 11, 10), date(2025, 11, 2));
        draft.title = "Checkout flow".into();
        assert!(matches!(
            draft.into_item("x"),
            Err(PlanningError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_draft_builds_item() {
        let mut draft = ItemDraft::new(date(2025, 11, 1), date(2025, 11, 3));
        draft.title = "  Checkout flow ".into();
        draft.item_type = WorkItemType::Bug;
        let item = draft.into_item("abc").unwrap();
        assert_eq!(item.id, "abc");
        assert_eq!(item.title, "Checkout flow");
        assert_eq!(item.short_type_tag(), "Bug");
        assert_eq!(item.assignee.name, "looking4id");
        assert!(item.predecessors.is_empty());
    }
}
