use crate::app::PlannerApp;
use crate::model::{Priority, Status, WorkItemType};
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

const DIALOG_WIDTH: f32 = 460.0;

/// Render the "Create Work Item" dialog.
pub fn show_create_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    let mut submit = false;

    Window::new(RichText::new("New Work Item").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            let draft = &mut app.draft;

            egui::Grid::new("create_item_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title *").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [300.0, 24.0],
                        egui::TextEdit::singleline(&mut draft.title).hint_text("Work item title"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Type").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("create_type")
                        .selected_text(draft.item_type.label())
                        .show_ui(ui, |ui| {
                            for t in WorkItemType::ALL {
                                ui.selectable_value(&mut draft.item_type, t, t.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Priority").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("create_priority")
                        .selected_text(draft.priority.label())
                        .show_ui(ui, |ui| {
                            for p in Priority::ALL {
                                ui.selectable_value(&mut draft.priority, p, p.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Assignee").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("create_assignee")
                        .selected_text(draft.assignee.as_str())
                        .show_ui(ui, |ui| {
                            for name in ["looking4id", "Unassigned"] {
                                ui.selectable_value(&mut draft.assignee, name.to_string(), name);
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut draft.start_date)
                            .id_salt("create_dp_start"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut draft.end_date)
                            .id_salt("create_dp_end"),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.label(RichText::new("Description").color(theme::TEXT_SECONDARY));
            ui.add(
                egui::TextEdit::multiline(&mut draft.description)
                    .hint_text("Details...")
                    .desired_rows(5)
                    .desired_width(f32::INFINITY),
            );

            if let Some(err) = &app.create_error {
                ui.add_space(4.0);
                ui.label(RichText::new(err).color(theme::BADGE_BUG).small());
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    submit = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if submit {
        // Stays open on validation failure so the error is visible
        app.create_item_from_dialog();
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_create = false;
        app.create_error = None;
    }
}

/// Render the "Advanced Filter" dialog.
pub fn show_filter_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("Advanced Filter").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            let filter = &mut app.board.filter;
            egui::Grid::new("filter_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Keyword").color(theme::TEXT_SECONDARY));
                    ui.add(egui::TextEdit::singleline(&mut filter.keyword).hint_text("Title or id"));
                    ui.end_row();

                    ui.label(RichText::new("Status").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("adv_status")
                        .selected_text(filter.status.map_or("Any", |s| s.label()))
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut filter.status, None, "Any");
                            for s in Status::ALL {
                                ui.selectable_value(&mut filter.status, Some(s), s.label());
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], egui::Button::new("Reset")).clicked() {
                    filter.clear();
                }
                let apply = egui::Button::new(RichText::new("Apply").color(Color32::WHITE)).fill(theme::ACCENT);
                if ui.add_sized([80.0, 28.0], apply).clicked() {
                    should_close = true;
                }
            });
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_filter = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Planning Gantt").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag bars to move · Drag edges to resize");
                ui.label("Ctrl+Scroll to change the timeline scale");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
