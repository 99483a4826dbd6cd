pub mod dialogs;
pub mod gantt_chart;
pub mod item_table;
pub mod theme;
pub mod toolbar;
