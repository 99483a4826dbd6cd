use log::{info, warn};
use std::path::Path;

use crate::io::PlannerSettings;
use crate::model::timeline::add_days;
use crate::model::{Column, ItemDraft, PlanningBoard, ViewMode};
use crate::ui;

/// Main application state.
pub struct PlannerApp {
    pub board: PlanningBoard,
    pub settings: PlannerSettings,

    // Dialog state
    pub show_create: bool,
    pub show_filter: bool,
    pub show_about: bool,
    pub draft: ItemDraft,
    pub create_error: Option<String>,

    // Status message
    pub status_message: String,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: PlannerSettings) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        Self::with_settings(settings)
    }

    fn with_settings(settings: PlannerSettings) -> Self {
        let window = settings.window();
        let mut board =
            PlanningBoard::with_seed_data(window, settings.view_mode, settings.day_width_px);
        board.columns = settings.visible_columns;
        info!(
            "Planning board ready: {} items, {} .. {} ({} days)",
            board.items.len(),
            window.start,
            window.end,
            window.total_days()
        );

        Self {
            draft: Self::fresh_draft(&board),
            board,
            settings,
            show_create: false,
            show_filter: false,
            show_about: false,
            create_error: None,
            status_message: "Ready".to_string(),
        }
    }

    fn fresh_draft(board: &PlanningBoard) -> ItemDraft {
        let start = board.window.start;
        let end = add_days(start, 7).map_or(board.window.end, |d| d.min(board.window.end));
        ItemDraft::new(start, end)
    }

    // --- View operations ---

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.board.set_view_mode(mode) {
            self.status_message = format!("Timeline scale: {}", mode.label());
            self.persist_settings();
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_view_mode(self.board.view_mode().zoom_in());
    }

    pub fn zoom_out(&mut self) {
        self.set_view_mode(self.board.view_mode().zoom_out());
    }

    pub fn toggle_column(&mut self, column: Column) {
        self.board.columns.toggle(column);
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        self.settings.view_mode = self.board.view_mode();
        self.settings.visible_columns = self.board.columns;
        if let Err(e) = self.settings.save() {
            warn!("Could not save settings: {}", e);
            self.status_message = format!("Could not save settings: {}", e);
        }
    }

    pub fn open_settings_folder(&mut self) {
        match PlannerSettings::config_dir() {
            Ok(dir) => self.open_folder(&dir),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn open_folder(&mut self, dir: &Path) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!("Failed to create {}: {}", dir.display(), e);
            self.status_message = format!("Failed to create settings folder: {}", e);
            return;
        }
        if let Err(e) = open::that(dir) {
            warn!("Failed to open {}: {}", dir.display(), e);
            self.status_message = format!("Failed to open settings folder: {}", e);
        }
    }

    // --- Item operations ---

    pub fn open_create_dialog(&mut self) {
        self.draft = Self::fresh_draft(&self.board);
        self.create_error = None;
        self.show_create = true;
    }

    pub fn create_item_from_dialog(&mut self) {
        match self.board.create_item(self.draft.clone()) {
            Ok(id) => {
                let title = self.board.item(&id).map(|i| i.title.clone()).unwrap_or_default();
                self.status_message = format!("Created '{}'", title);
                self.show_create = false;
                self.create_error = None;
            }
            Err(e) => {
                warn!("Create rejected: {}", e);
                self.create_error = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Top panel: menu bar + toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_menu_bar(self, ui);
            ui.separator();
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Items: {} of {}",
                                self.board.visible_items().len(),
                                self.board.items.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let row_height = self.settings.row_height;

        // Left panel: work item table
        let screen_width = ctx.screen_rect().width();
        egui::SidePanel::left("item_table")
            .default_width(screen_width * ui::theme::TABLE_WIDTH_FRACTION)
            .resizable(true)
            .show(ctx, |ui| {
                let items = self.board.visible_items();
                ui::item_table::show_item_table(&items, self.board.columns, row_height, ui);
            });

        // Central panel: Gantt chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_CHART)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::gantt_chart::show_gantt_chart(&mut self.board, row_height, ui);
            if interaction.changed {
                if let Some(item) = self.board.dragging_item().and_then(|id| self.board.item(id)) {
                    self.status_message = format!(
                        "{} → {}",
                        item.start_date.format("%Y-%m-%d"),
                        item.end_date.format("%Y-%m-%d")
                    );
                }
            }
            if let Some(item_id) = interaction.committed {
                if let Some(item) = self.board.item(&item_id) {
                    self.status_message = format!(
                        "Updated '{}' ({} → {})",
                        item.title,
                        item.start_date.format("%Y-%m-%d"),
                        item.end_date.format("%Y-%m-%d")
                    );
                }
            }
            match interaction.zoom_in {
                Some(true) => self.zoom_in(),
                Some(false) => self.zoom_out(),
                None => {}
            }
        });

        // Dialogs
        if self.show_create {
            ui::dialogs::show_create_dialog(self, ctx);
        }
        if self.show_filter {
            ui::dialogs::show_filter_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app_uses_settings() {
        let mut settings = PlannerSettings::default();
        settings.view_mode = ViewMode::Week;
        settings.visible_columns.end = false;
        let app = PlannerApp::with_settings(settings);
        assert_eq!(app.board.view_mode(), ViewMode::Week);
        assert!(!app.board.columns.end);
        assert_eq!(app.board.items.len(), 5);
        assert!(app.draft.end_date >= app.draft.start_date);
    }

    #[test]
    fn test_open_folder_reports_create_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let mut app = PlannerApp::with_settings(PlannerSettings::default());
        app.open_folder(&blocker.join("settings"));
        assert!(app.status_message.starts_with("Failed to create settings folder"));
    }

    #[test]
    fn test_create_from_dialog_keeps_dialog_open_on_error() {
        let mut app = PlannerApp::with_settings(PlannerSettings::default());
        app.open_create_dialog();
        app.create_item_from_dialog();
        assert!(app.show_create);
        assert!(app.create_error.is_some());

        app.draft.title = "Checkout retries".into();
        app.create_item_from_dialog();
        assert!(!app.show_create);
        assert!(app.create_error.is_none());
        assert_eq!(app.board.items.len(), 6);
    }
}
