use egui::{Align, Color32, Layout, RichText, Rounding, Sense, Ui, Vec2};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::model::{Column, VisibleColumns, WorkItem, WorkItemType};
use crate::ui::theme;

/// Render the work-item table next to the chart.
///
/// Rows are `row_height` tall so they line up with the bars on the right.
pub fn show_item_table(items: &[&WorkItem], columns: VisibleColumns, row_height: f32, ui: &mut Ui) {
    let shown: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|c| columns.is_visible(*c))
        .collect();

    let mut table = TableBuilder::new(ui)
        .striped(false)
        .resizable(false)
        .auto_shrink([false, false])
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(TableColumn::exact(24.0))
        .column(TableColumn::remainder().at_least(140.0).clip(true));
    for column in &shown {
        table = table.column(TableColumn::exact(match column {
            Column::Status => 90.0,
            Column::Assignee => 64.0,
            Column::Start | Column::End => 84.0,
        }));
    }

    table
        .header(theme::HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("▾").color(theme::TEXT_DIM));
            });
            header.col(|ui| {
                ui.label(RichText::new("Work item").strong().color(theme::TEXT_SECONDARY));
            });
            for column in &shown {
                header.col(|ui| {
                    ui.label(RichText::new(column.label()).strong().color(theme::TEXT_SECONDARY));
                });
            }
        })
        .body(|body| {
            body.rows(row_height, items.len(), |mut row| {
                let item = items[row.index()];
                row.col(|ui| {
                    ui.label(RichText::new("▸").color(theme::TEXT_DIM));
                });
                row.col(|ui| {
                    type_badge(ui, item);
                    ui.add(
                        egui::Label::new(RichText::new(&item.title).color(theme::TEXT_PRIMARY))
                            .truncate(),
                    );
                });
                for column in &shown {
                    row.col(|ui| match column {
                        Column::Status => status_pill(ui, item),
                        Column::Assignee => avatar(ui, item),
                        Column::Start => date_cell(ui, item.start_date),
                        Column::End => date_cell(ui, item.end_date),
                    });
                }
            });
        });
}

fn type_badge(ui: &mut Ui, item: &WorkItem) {
    let fill = match item.item_type {
        WorkItemType::Bug => theme::BADGE_BUG,
        _ => theme::BADGE_FEATURE,
    };
    egui::Frame::none()
        .fill(fill)
        .rounding(Rounding::same(3.0))
        .inner_margin(egui::Margin::symmetric(3.0, 1.0))
        .show(ui, |ui| {
            ui.label(RichText::new(item.short_type_tag()).size(9.5).color(Color32::WHITE));
        });
}

fn status_pill(ui: &mut Ui, item: &WorkItem) {
    let (text, fill) = theme::status_pill(item.status);
    egui::Frame::none()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, text.gamma_multiply(0.3)))
        .rounding(Rounding::same(3.0))
        .inner_margin(egui::Margin::symmetric(6.0, 1.0))
        .show(ui, |ui| {
            ui.label(RichText::new(item.status.label()).size(10.5).color(text));
        });
}

fn avatar(ui: &mut Ui, item: &WorkItem) {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(22.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 11.0, theme::AVATAR);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        item.assignee.initials(),
        theme::font_small(),
        Color32::WHITE,
    );
    response.on_hover_text(&item.assignee.name);
}

fn date_cell(ui: &mut Ui, date: chrono::NaiveDate) {
    ui.label(
        RichText::new(date.format("%Y-%m-%d").to_string())
            .size(11.0)
            .color(theme::TEXT_SECONDARY),
    );
}
