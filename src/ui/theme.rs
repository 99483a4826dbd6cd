use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::Status;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_CHART: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_PANEL: Color32 = Color32::from_rgb(250, 250, 252);
pub const BG_HEADER: Color32 = Color32::from_rgb(249, 250, 251);
pub const BG_ROW_HOVER: Color32 = Color32::from_rgb(243, 244, 246);
pub const BG_WEEKEND: Color32 = Color32::from_rgba_premultiplied(238, 240, 243, 200);
pub const BG_FIELD: Color32 = Color32::from_rgb(255, 255, 255);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(229, 231, 235);
pub const GRID_LINE: Color32 = Color32::from_rgb(241, 242, 245);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(31, 41, 55);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(107, 114, 128);
pub const TEXT_DIM: Color32 = Color32::from_rgb(156, 163, 175);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(219, 39, 119);
pub const BAR_ACTIVE: Color32 = Color32::from_rgb(59, 130, 246);
pub const BAR_DONE: Color32 = Color32::from_rgb(156, 163, 175);
pub const DEPENDENCY_LINE: Color32 = Color32::from_rgba_premultiplied(94, 98, 105, 153);
pub const HANDLE_FILL: Color32 = Color32::from_rgb(255, 255, 255);

pub const BADGE_BUG: Color32 = Color32::from_rgb(239, 68, 68);
pub const BADGE_FEATURE: Color32 = Color32::from_rgb(59, 130, 246);
pub const AVATAR: Color32 = Color32::from_rgb(245, 158, 11);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 40.0;
pub const BAR_HEIGHT: f32 = 16.0;
pub const HANDLE_RADIUS: f32 = 6.0;
pub const TABLE_WIDTH_FRACTION: f32 = 0.45;
pub const ARROW_SIZE: f32 = 6.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

// ── Status colours ───────────────────────────────────────────────────────────

/// Bar fill for an item.
pub fn bar_color(status: Status) -> Color32 {
    match status {
        Status::Done => BAR_DONE,
        _ => BAR_ACTIVE,
    }
}

/// (text, fill) for the status pill in the table.
pub fn status_pill(status: Status) -> (Color32, Color32) {
    match status {
        Status::Done => (TEXT_SECONDARY, Color32::from_rgb(243, 244, 246)),
        Status::InProgress => (Color32::from_rgb(37, 99, 235), Color32::from_rgb(239, 246, 255)),
        Status::Blocked => (Color32::from_rgb(220, 38, 38), Color32::from_rgb(254, 242, 242)),
        Status::ToDo => (Color32::from_rgb(202, 138, 4), Color32::from_rgb(254, 252, 232)),
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_CHART;
    visuals.extreme_bg_color = BG_FIELD;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = Color32::from_rgb(252, 231, 243);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
