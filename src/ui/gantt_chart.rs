use egui::epaint::CubicBezierShape;
use egui::{Align2, Color32, CursorIcon, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};
use log::warn;

use crate::model::{DependencyCurve, DragKind, PlanningBoard, PointerSession, WorkItem};
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const BAR_HEIGHT: f32 = theme::BAR_HEIGHT;
const HANDLE_RADIUS: f32 = theme::HANDLE_RADIUS;

/// What happened in the chart this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// Some item's dates moved.
    pub changed: bool,
    /// A gesture was released on this item.
    pub committed: Option<String>,
    /// Ctrl+wheel asked for a finer (`true`) or coarser (`false`) view.
    pub zoom_in: Option<bool>,
}

/// Render the Gantt chart area (right panel).
pub fn show_gantt_chart(board: &mut PlanningBoard, row_height: f32, ui: &mut Ui) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();

    // Ctrl+wheel steps through the view modes
    if ui.rect_contains_pointer(ui.max_rect()) {
        let zoom = ui.input(|i| i.zoom_delta());
        if zoom > 1.0 {
            interaction.zoom_in = Some(true);
        } else if zoom < 1.0 {
            interaction.zoom_in = Some(false);
        }
    }

    let config = board.gantt_config().clone();
    let chart_width = config.width.resolve(available.x);
    board.observe_chart_width(chart_width);

    // Pointer moves and releases are tracked globally while a gesture is live
    if let Some(item_id) = board.dragging_item().map(str::to_owned) {
        let (down, pos) = ui.input(|i| (i.pointer.primary_down(), i.pointer.interact_pos()));
        if down {
            if let Some(pos) = pos {
                interaction.changed |= board.pointer_move(pos.x);
            }
        } else {
            board.pointer_up();
            interaction.committed = Some(item_id);
        }
    }

    let rows: Vec<WorkItem> = board.visible_items().into_iter().cloned().collect();
    let curves = board.dependency_curves(row_height);
    let chart_height = HEADER_HEIGHT + rows.len() as f32 * row_height + 10.0;
    let mut pending_down: Option<(String, DragKind, f32)> = None;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::hover(),
            );
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, theme::BG_CHART);

            draw_grid(&painter, origin, &config.headers, chart_width, response.rect.height());

            // Row separators and hover highlight
            let hover = response.hover_pos();
            for i in 0..rows.len() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * row_height;
                let row_rect = Rect::from_min_size(
                    Pos2::new(origin.x, y),
                    Vec2::new(chart_width, row_height),
                );
                if hover.is_some_and(|p| row_rect.contains(p)) {
                    painter.rect_filled(row_rect, 0.0, theme::BG_ROW_HOVER);
                }
                painter.line_segment(
                    [row_rect.left_bottom(), row_rect.right_bottom()],
                    Stroke::new(0.5, theme::GRID_LINE),
                );
            }

            let body_origin = Pos2::new(origin.x, origin.y + HEADER_HEIGHT);
            for curve in &curves {
                draw_dependency(&painter, body_origin, curve);
            }

            for (i, item) in rows.iter().enumerate() {
                let row_top = origin.y + HEADER_HEIGHT + i as f32 * row_height;
                let dragging = board.is_dragging(&item.id);
                let bar_rect = draw_bar(&painter, origin.x, chart_width, board, item, row_top, row_height);

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("bar", &item.id)),
                    Sense::drag(),
                );
                let left_rect = Rect::from_center_size(
                    bar_rect.left_center(),
                    Vec2::splat(HANDLE_RADIUS * 2.0 + 4.0),
                );
                let right_rect = Rect::from_center_size(
                    bar_rect.right_center(),
                    Vec2::splat(HANDLE_RADIUS * 2.0 + 4.0),
                );
                let left_response = ui.interact(
                    left_rect,
                    ui.make_persistent_id(("resize-left", &item.id)),
                    Sense::drag(),
                );
                let right_response = ui.interact(
                    right_rect,
                    ui.make_persistent_id(("resize-right", &item.id)),
                    Sense::drag(),
                );

                let start_x = |r: &egui::Response| r.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                if left_response.drag_started() {
                    pending_down = Some((item.id.clone(), DragKind::ResizeLeft, start_x(&left_response)));
                } else if right_response.drag_started() {
                    pending_down = Some((item.id.clone(), DragKind::ResizeRight, start_x(&right_response)));
                } else if bar_response.drag_started() {
                    pending_down = Some((item.id.clone(), DragKind::Move, start_x(&bar_response)));
                }

                let over_handle = left_response.hovered() || right_response.hovered();
                let hovered = over_handle || bar_response.hovered();
                if over_handle {
                    ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
                } else if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(CursorIcon::Move);
                }

                if hovered || dragging {
                    let border = theme::bar_color(item.status);
                    for center in [bar_rect.left_center(), bar_rect.right_center()] {
                        painter.circle(center, HANDLE_RADIUS, theme::HANDLE_FILL, Stroke::new(2.0, border));
                    }
                }

                if hovered && !dragging {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("bar-tip", &item.id)),
                        |ui| {
                            ui.strong(&item.title);
                            ui.label(format!(
                                "{} → {}  ({} days)",
                                item.start_date.format("%Y-%m-%d"),
                                item.end_date.format("%Y-%m-%d"),
                                item.duration_days()
                            ));
                            ui.label(format!("{} · {}", item.priority.label(), item.status.label()));
                            if !item.description.is_empty() {
                                ui.weak(&item.description);
                            }
                        },
                    );
                }
            }

            draw_header(&painter, origin, &config.headers, chart_width);

            // Date range of the header cell under the pointer
            if let Some(p) = hover.filter(|p| p.y < origin.y + HEADER_HEIGHT) {
                let edges = segment_edges(origin.x, &config.headers, chart_width);
                let cell = config
                    .headers
                    .iter()
                    .zip(edges.windows(2))
                    .find(|(_, pair)| pair[0] <= p.x && p.x < pair[1]);
                if let Some((header, _)) = cell {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new("header-tip"),
                        |ui| {
                            ui.label(format!(
                                "{} → {}",
                                header.start.format("%b %-d, %Y"),
                                header.end.format("%b %-d, %Y")
                            ));
                        },
                    );
                }
            }
        });

    if let Some((item_id, kind, x)) = pending_down {
        if let Err(e) = board.pointer_down(&item_id, kind, x) {
            warn!("Ignoring drag: {}", e);
        }
    }

    if board.dragging_item().is_some() {
        ui.ctx().request_repaint();
    }

    interaction
}

/// Left edges of each header segment in screen x, plus the right edge.
fn segment_edges(origin_x: f32, headers: &[crate::model::HeaderSegment], width: f32) -> Vec<f32> {
    let mut edges = Vec::with_capacity(headers.len() + 1);
    let mut acc = 0.0;
    edges.push(origin_x);
    for header in headers {
        acc += header.width_pct;
        edges.push(origin_x + acc / 100.0 * width);
    }
    edges
}

fn draw_grid(
    painter: &egui::Painter,
    origin: Pos2,
    headers: &[crate::model::HeaderSegment],
    width: f32,
    height: f32,
) {
    let edges = segment_edges(origin.x, headers, width);
    for (header, pair) in headers.iter().zip(edges.windows(2)) {
        if header.is_weekend {
            painter.rect_filled(
                Rect::from_min_max(
                    Pos2::new(pair[0], origin.y + HEADER_HEIGHT),
                    Pos2::new(pair[1], origin.y + height),
                ),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        painter.line_segment(
            [
                Pos2::new(pair[1], origin.y + HEADER_HEIGHT),
                Pos2::new(pair[1], origin.y + height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    headers: &[crate::model::HeaderSegment],
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let edges = segment_edges(origin.x, headers, width);
    for (header, pair) in headers.iter().zip(edges.windows(2)) {
        let cell = Rect::from_min_max(
            Pos2::new(pair[0], origin.y),
            Pos2::new(pair[1], origin.y + HEADER_HEIGHT),
        );
        if header.is_weekend {
            painter.rect_filled(cell, 0.0, theme::BG_WEEKEND);
        }
        painter.line_segment(
            [cell.right_top(), cell.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );

        let clipped = painter.with_clip_rect(cell.shrink(1.0));
        let name_y = if header.sub_label.is_empty() { cell.center().y } else { cell.top() + 13.0 };
        clipped.text(
            Pos2::new(cell.left() + 6.0, name_y),
            Align2::LEFT_CENTER,
            &header.name,
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
        if !header.sub_label.is_empty() {
            clipped.text(
                Pos2::new(cell.left() + 6.0, cell.top() + 29.0),
                Align2::LEFT_CENTER,
                &header.sub_label,
                theme::font_sub(),
                theme::TEXT_DIM,
            );
        }
    }
}

fn draw_bar(
    painter: &egui::Painter,
    origin_x: f32,
    chart_width: f32,
    board: &PlanningBoard,
    item: &WorkItem,
    row_top: f32,
    row_height: f32,
) -> Rect {
    let pos = board.position_of(item);
    let x = origin_x + pos.left_pct / 100.0 * chart_width;
    let w = (pos.width_pct / 100.0 * chart_width).max(2.0);
    let bar_rect = Rect::from_min_size(
        Pos2::new(x, row_top + (row_height - BAR_HEIGHT) / 2.0),
        Vec2::new(w, BAR_HEIGHT),
    );
    let rounding = Rounding::same(BAR_HEIGHT / 2.0);

    painter.rect_filled(bar_rect.translate(Vec2::new(0.0, 1.0)), rounding, Color32::from_black_alpha(20));
    painter.rect_filled(bar_rect, rounding, theme::bar_color(item.status));

    if w > 30.0 {
        let galley = painter.layout_no_wrap(item.title.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect.shrink2(Vec2::new(6.0, 0.0)));
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(Pos2::new(bar_rect.left() + 8.0, text_y), galley, Color32::TRANSPARENT);
    }

    bar_rect
}

fn draw_dependency(painter: &egui::Painter, body_origin: Pos2, curve: &DependencyCurve) {
    let [p0, p1, p2, p3] = curve
        .points()
        .map(|(x, y)| Pos2::new(body_origin.x + x, body_origin.y + y));
    let stroke = Stroke::new(1.5, theme::DEPENDENCY_LINE);
    painter.add(CubicBezierShape::from_points_stroke(
        [p0, p1, p2, p3],
        false,
        Color32::TRANSPARENT,
        stroke,
    ));

    // Arrowhead along the final tangent
    let dir = (p3 - p2).normalized();
    let dir = if dir.x.is_finite() && dir.length() > 0.0 { dir } else { Vec2::X };
    let perp = Vec2::new(-dir.y, dir.x);
    let base = p3 - dir * theme::ARROW_SIZE;
    painter.add(Shape::convex_polygon(
        vec![
            p3,
            base + perp * (theme::ARROW_SIZE * 0.5),
            base - perp * (theme::ARROW_SIZE * 0.5),
        ],
        theme::DEPENDENCY_LINE,
        Stroke::NONE,
    ));
}
