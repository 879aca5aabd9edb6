//! Day and week time grid with an all-day ribbon above it.
//!
//! Each day column mounts its [`ColumnRef`] every frame so drag math always
//! reads the rect that is on screen. Presses are reported back as
//! [`ViewAction::StartDrag`]; the app owns the drag sessions.

use chrono::{Local, NaiveDate};
use egui::{pos2, vec2, Align2, Color32, CursorIcon, FontId, Rect, Sense, Stroke, Ui};

use super::{
    category_color, text_color_for, DragTarget, ViewAction, ALL_DAY_ROW_HEIGHT, COLUMN_SPACING,
    HEADER_HEIGHT, RESIZE_HANDLE_HEIGHT, TIME_LABEL_WIDTH,
};
use crate::models::category::CategoryPalette;
use crate::models::settings::Settings;
use crate::services::drag::geometry::hours_from_midnight;
use crate::services::drag::{event_box, ColumnRef, ResizeEdge};
use crate::services::layout::PositionedEvent;
use crate::ui_egui::input;
use crate::utils::date::{format_time_range, hour_label};

const GRID_LINE: Color32 = Color32::from_gray(70);
const LABEL_COLOR: Color32 = Color32::from_gray(160);
const TODAY_TINT: Color32 = Color32::from_rgba_premultiplied(40, 60, 90, 40);
const NOW_LINE: Color32 = Color32::from_rgb(255, 100, 100);

pub struct DayColumn {
    pub date: NaiveDate,
    pub events: Vec<PositionedEvent>,
}

pub struct DaysView<'a> {
    pub columns: &'a [DayColumn],
    pub all_day: &'a [PositionedEvent],
    pub column_refs: &'a [ColumnRef],
    pub settings: &'a Settings,
    pub palette: &'a CategoryPalette,
    /// False while a drag or draft is in progress
    pub interactive: bool,
}

impl DaysView<'_> {
    pub fn show(&self, ui: &mut Ui) -> Option<ViewAction> {
        let mut action = None;
        let col_width = self.column_width(ui.available_width());

        self.header(ui, col_width, &mut action);
        if self.settings.show_all_day_row {
            self.all_day_ribbon(ui, col_width, &mut action);
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .drag_to_scroll(false)
            .show(ui, |ui| self.grid(ui, col_width, &mut action));

        action
    }

    fn column_width(&self, available: f32) -> f32 {
        let count = self.columns.len().max(1) as f32;
        ((available - TIME_LABEL_WIDTH - COLUMN_SPACING * count) / count).max(40.0)
    }

    fn column_left(&self, origin: f32, index: usize, col_width: f32) -> f32 {
        origin + TIME_LABEL_WIDTH + index as f32 * (col_width + COLUMN_SPACING)
    }

    fn header(&self, ui: &mut Ui, col_width: f32, action: &mut Option<ViewAction>) {
        let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), HEADER_HEIGHT), Sense::hover());
        let today = Local::now().date_naive();

        for (index, column) in self.columns.iter().enumerate() {
            let left = self.column_left(rect.left(), index, col_width);
            let cell = Rect::from_min_size(pos2(left, rect.top()), vec2(col_width, HEADER_HEIGHT));
            let response = ui.interact(cell, ui.id().with(("day_header", index)), Sense::click());

            let color = if column.date == today { NOW_LINE } else { LABEL_COLOR };
            ui.painter().text(
                cell.center(),
                Align2::CENTER_CENTER,
                column.date.format("%a %-d").to_string(),
                FontId::proportional(14.0),
                color,
            );

            if response.clicked() && self.columns.len() > 1 {
                *action = Some(ViewAction::OpenDay(column.date));
            }
        }
    }

    fn all_day_ribbon(&self, ui: &mut Ui, col_width: f32, action: &mut Option<ViewAction>) {
        let (Some(first), Some(last)) = (self.columns.first(), self.columns.last()) else {
            return;
        };

        let rows = self.all_day.iter().map(|p| p.num_channels).max().unwrap_or(1);
        let (rect, _) = ui.allocate_exact_size(
            vec2(ui.available_width(), rows as f32 * ALL_DAY_ROW_HEIGHT),
            Sense::hover(),
        );
        ui.painter().text(
            pos2(rect.left() + 4.0, rect.top() + 4.0),
            Align2::LEFT_TOP,
            "all-day",
            FontId::proportional(11.0),
            LABEL_COLOR,
        );

        for positioned in self.all_day {
            let event = &positioned.item;
            let from = event.start.date().max(first.date);
            let to = event.end.date().min(last.date);
            let start_index = (from - first.date).num_days().max(0) as usize;
            let end_index = (to - first.date).num_days().max(0) as usize;

            let left = self.column_left(rect.left(), start_index, col_width);
            let right = self.column_left(rect.left(), end_index, col_width) + col_width;
            let top = rect.top() + positioned.channel_index as f32 * ALL_DAY_ROW_HEIGHT;
            let bar = Rect::from_min_max(pos2(left + 2.0, top + 2.0), pos2(right - 2.0, top + ALL_DAY_ROW_HEIGHT - 2.0));

            let fill = category_color(self.palette, event.category_id);
            ui.painter().rect_filled(bar, 4.0, fill);
            ui.painter_at(bar).text(
                pos2(bar.left() + 6.0, bar.center().y),
                Align2::LEFT_CENTER,
                event.display_title(),
                FontId::proportional(12.0),
                text_color_for(fill),
            );

            if !self.interactive {
                continue;
            }
            let response = ui.interact(bar, ui.id().with(("all_day", event.id.to_string())), Sense::click());
            if response.double_clicked() {
                *action = Some(ViewAction::Edit(event.clone()));
            }
            response.context_menu(|ui| {
                if ui.button("Edit").clicked() {
                    *action = Some(ViewAction::Edit(event.clone()));
                    ui.close_menu();
                }
                if ui.button("Delete").clicked() {
                    *action = Some(ViewAction::Delete(event.id));
                    ui.close_menu();
                }
            });
        }
    }

    fn grid(&self, ui: &mut Ui, col_width: f32, action: &mut Option<ViewAction>) {
        let px_per_hour = self.settings.px_per_hour;
        let height = self.settings.day_height();
        let (grid, _) = ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());

        for hour in 0..24u32 {
            let y = grid.top() + hour as f32 * px_per_hour;
            ui.painter().line_segment(
                [pos2(grid.left() + TIME_LABEL_WIDTH, y), pos2(grid.right(), y)],
                Stroke::new(1.0, GRID_LINE),
            );
            ui.painter().text(
                pos2(grid.left() + 4.0, y + 2.0),
                Align2::LEFT_TOP,
                hour_label(hour),
                FontId::proportional(11.0),
                LABEL_COLOR,
            );
        }

        let now = Local::now().naive_local();
        for (index, column) in self.columns.iter().enumerate() {
            let left = self.column_left(grid.left(), index, col_width);
            let col_rect = Rect::from_min_size(pos2(left, grid.top()), vec2(col_width, height));
            if let Some(column_ref) = self.column_refs.get(index) {
                column_ref.mount(col_rect.into());
            }

            if column.date == now.date() {
                ui.painter().rect_filled(col_rect, 0.0, TODAY_TINT);
            }

            let background = ui.interact(col_rect, ui.id().with(("day_column", index)), Sense::click_and_drag());
            if self.interactive && background.drag_started() {
                if let Some(pointer) = input::pointer_down(ui.ctx()) {
                    *action = Some(ViewAction::StartDrag {
                        column: index,
                        pointer,
                        target: DragTarget::Create,
                    });
                }
            }

            for positioned in &column.events {
                self.event_block(ui, col_rect, index, positioned, action);
            }

            if column.date == now.date() {
                let y = col_rect.top() + hours_from_midnight(now) * px_per_hour;
                ui.painter().circle_filled(pos2(col_rect.left(), y), 3.0, NOW_LINE);
                ui.painter().line_segment(
                    [pos2(col_rect.left(), y), pos2(col_rect.right(), y)],
                    Stroke::new(2.0, NOW_LINE),
                );
            }
        }
    }

    fn event_block(
        &self,
        ui: &mut Ui,
        col_rect: Rect,
        column: usize,
        positioned: &PositionedEvent,
        action: &mut Option<ViewAction>,
    ) {
        let event = &positioned.item;
        let padding = self.settings.event_padding;
        let (top, height) = event_box(event.start, event.end, self.settings.px_per_hour, padding);
        let (left_fraction, width_fraction) = positioned.horizontal_fraction();

        let rect = Rect::from_min_size(
            pos2(
                col_rect.left() + left_fraction * col_rect.width() + padding,
                col_rect.top() + top,
            ),
            vec2(
                (width_fraction * col_rect.width() - padding * 2.0).max(1.0),
                height.max(4.0),
            ),
        );

        let base = category_color(self.palette, event.category_id);
        let fill = if event.is_draft() { base.gamma_multiply(0.6) } else { base };
        ui.painter().rect_filled(rect, 4.0, fill);

        let text_painter = ui.painter_at(rect.shrink(2.0));
        let text_color = text_color_for(base);
        text_painter.text(
            pos2(rect.left() + 4.0, rect.top() + 2.0),
            Align2::LEFT_TOP,
            event.display_title(),
            FontId::proportional(12.0),
            text_color,
        );
        text_painter.text(
            pos2(rect.left() + 4.0, rect.top() + 16.0),
            Align2::LEFT_TOP,
            format_time_range(event.start, event.end),
            FontId::proportional(11.0),
            text_color,
        );

        if event.is_draft() || !self.interactive {
            return;
        }

        let id = ui.id().with(("event", event.id.to_string(), column));
        let body = ui.interact(rect, id, Sense::click_and_drag());
        let top_zone = Rect::from_min_max(
            rect.min,
            pos2(rect.right(), (rect.top() + RESIZE_HANDLE_HEIGHT).min(rect.bottom())),
        );
        let bottom_zone = Rect::from_min_max(
            pos2(rect.left(), (rect.bottom() - RESIZE_HANDLE_HEIGHT).max(rect.top())),
            rect.max,
        );
        let top_handle = ui.interact(top_zone, id.with("top"), Sense::drag());
        let bottom_handle = ui.interact(bottom_zone, id.with("bottom"), Sense::drag());

        if top_handle.hovered() || bottom_handle.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::ResizeVertical);
        } else if body.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }

        let target = if top_handle.drag_started() {
            Some(DragTarget::Resize(event.clone(), ResizeEdge::Top))
        } else if bottom_handle.drag_started() {
            Some(DragTarget::Resize(event.clone(), ResizeEdge::Bottom))
        } else if body.drag_started() {
            Some(DragTarget::Move(event.clone()))
        } else {
            None
        };

        if let (Some(target), Some(pointer)) = (target, input::pointer_down(ui.ctx())) {
            *action = Some(ViewAction::StartDrag {
                column,
                pointer,
                target,
            });
        }

        if body.double_clicked() {
            *action = Some(ViewAction::Edit(event.clone()));
        }
        body.context_menu(|ui| {
            if ui.button("Edit").clicked() {
                *action = Some(ViewAction::Edit(event.clone()));
                ui.close_menu();
            }
            if ui.button("Delete").clicked() {
                *action = Some(ViewAction::Delete(event.id));
                ui.close_menu();
            }
        });
    }
}
