use egui::{menu, Button, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::app::PlannerApp;
use crate::model::{Column, Status, ViewMode, WorkItemType};
use crate::ui::theme;

/// Render the top menu bar.
pub fn show_menu_bar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button("  File  ", |ui| {
            if ui.button("  New Work Item...").clicked() {
                app.open_create_dialog();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Settings Folder").clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
            if ui.button("  Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.menu_button("  View  ", |ui| {
            if ui
                .add_enabled(app.board.view_mode().can_zoom_in(), Button::new("  Zoom In        Ctrl+Scroll ↑"))
                .clicked()
            {
                app.zoom_in();
                ui.close_menu();
            }
            if ui
                .add_enabled(app.board.view_mode().can_zoom_out(), Button::new("  Zoom Out      Ctrl+Scroll ↓"))
                .clicked()
            {
                app.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Timeline Scale").small().weak());
            for mode in ViewMode::ALL {
                if ui.radio(app.board.view_mode() == mode, mode.label()).clicked() {
                    app.set_view_mode(mode);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button("  Help  ", |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });
    });
}

/// Title row and filter row above the split view.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Planning").strong().size(20.0).color(theme::TEXT_PRIMARY));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let new_btn = Button::new(
                RichText::new(format!("{} New", icons::PLUS)).color(egui::Color32::WHITE),
            )
            .fill(theme::ACCENT);
            if ui.add(new_btn).clicked() {
                app.open_create_dialog();
            }

            let mode = app.board.view_mode();
            if ui
                .add_enabled(mode.can_zoom_in(), Button::new(icons::MAGNIFYING_GLASS_PLUS))
                .on_hover_text("Zoom in (Ctrl+Scroll Up)")
                .clicked()
            {
                app.zoom_in();
            }
            if ui
                .add_enabled(mode.can_zoom_out(), Button::new(icons::MAGNIFYING_GLASS_MINUS))
                .on_hover_text("Zoom out (Ctrl+Scroll Down)")
                .clicked()
            {
                app.zoom_out();
            }

            ui.separator();
            for candidate in ViewMode::ALL.into_iter().rev() {
                if ui.selectable_label(mode == candidate, candidate.label()).clicked() {
                    app.set_view_mode(candidate);
                }
            }

            ui.separator();
            ui.menu_button(format!("{} Columns", icons::COLUMNS), |ui| {
                ui.label(RichText::new("Visible fields").small().weak());
                for column in Column::ALL {
                    let mut visible = app.board.columns.is_visible(column);
                    if ui.checkbox(&mut visible, column.label()).changed() {
                        app.toggle_column(column);
                    }
                }
            });
        });
    });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let filter = &mut app.board.filter;

        egui::ComboBox::from_id_salt("filter_type")
            .selected_text(filter.item_type.map_or("Type", |t| t.label()))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.item_type, None, "Any type");
                for t in WorkItemType::ALL {
                    ui.selectable_value(&mut filter.item_type, Some(t), t.label());
                }
            });

        let assignees = app.board.assignees();
        let filter = &mut app.board.filter;
        egui::ComboBox::from_id_salt("filter_assignee")
            .selected_text(filter.assignee.clone().unwrap_or_else(|| "Assignee".into()))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.assignee, None, "Anyone");
                for name in assignees {
                    ui.selectable_value(&mut filter.assignee, Some(name.clone()), name);
                }
            });

        egui::ComboBox::from_id_salt("filter_status")
            .selected_text(filter.status.map_or("Status", |s| s.label()))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.status, None, "Any status");
                for s in Status::ALL {
                    ui.selectable_value(&mut filter.status, Some(s), s.label());
                }
            });

        if ui
            .add(Button::new(RichText::new(format!("{} More filters", icons::FUNNEL)).color(theme::TEXT_DIM)).frame(false))
            .clicked()
        {
            app.show_filter = true;
        }

        let filter = &mut app.board.filter;
        ui.add(
            egui::TextEdit::singleline(&mut filter.keyword)
                .hint_text(format!("{} Work item keyword", icons::MAGNIFYING_GLASS))
                .desired_width(200.0),
        );
        if ui
            .add_enabled(!filter.is_empty(), Button::new(RichText::new("Clear").color(theme::BADGE_FEATURE)).frame(false))
            .clicked()
        {
            filter.clear();
        }
    });
    ui.add_space(6.0);
}
