use super::CalendarApp;
use crate::models::ui::ViewType;
use crate::ui_egui::input;
use crate::ui_egui::views::days_view::{DayColumn, DaysView};
use crate::ui_egui::views::month_view::{show_year, MonthView};
use crate::ui_egui::views::ViewAction;

impl CalendarApp {
    pub(super) fn handle_update(&mut self, ctx: &egui::Context) {
        // Bus input first so callbacks see this frame's release before views redraw
        input::pump_pointer(ctx, &self.bus);
        self.process_gesture_messages();
        self.handle_keyboard_shortcuts(ctx);
        input::apply_bus_style(ctx, &self.bus);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.render_toolbar(ui));

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| self.render_view(ui))
            .inner;
        if let Some(action) = action {
            self.handle_view_action(action);
        }

        self.show_event_window(ctx);

        if self.active_drag.is_some() {
            ctx.request_repaint();
        }
    }

    fn render_view(&mut self, ui: &mut egui::Ui) -> Option<ViewAction> {
        match self.current_view {
            ViewType::Day | ViewType::Week => {
                let days = self.visible_days();
                for column in self.columns.iter().skip(days.len()) {
                    column.unmount();
                }

                let columns: Vec<DayColumn> = days
                    .iter()
                    .map(|date| DayColumn {
                        date: *date,
                        events: self.displayed_day(*date),
                    })
                    .collect();
                let all_day = self.displayed_all_day(&days);

                DaysView {
                    columns: &columns,
                    all_day: &all_day,
                    column_refs: &self.columns,
                    settings: &self.settings,
                    palette: &self.palette,
                    interactive: self.active_drag.is_none() && self.form.is_none(),
                }
                .show(ui)
            }
            ViewType::Month => {
                self.unmount_columns();
                MonthView {
                    date: self.current_date,
                    first_day_of_week: self.settings.first_day_of_week,
                    events: self.collection.events(),
                    palette: &self.palette,
                }
                .show(ui)
            }
            ViewType::Year => {
                self.unmount_columns();
                show_year(ui, self.current_date, self.collection.events())
            }
        }
    }

    fn unmount_columns(&self) {
        for column in &self.columns {
            column.unmount();
        }
    }

    fn handle_view_action(&mut self, action: ViewAction) {
        match action {
            ViewAction::StartDrag {
                column,
                pointer,
                target,
            } => self.start_drag(column, pointer, target),
            ViewAction::Delete(id) => self.delete_event(id),
            ViewAction::OpenDay(date) => {
                self.go_to(date);
                self.set_view(ViewType::Day);
            }
            ViewAction::OpenMonth(date) => {
                self.go_to(date);
                self.set_view(ViewType::Month);
            }
            ViewAction::Edit(event) => self.open_event_form(event),
            ViewAction::NewEvent(date) => self.open_new_event(date),
        }
    }
}
