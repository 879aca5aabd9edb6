use chrono::{Datelike, Local, Months, NaiveDate};
use egui::{pos2, vec2, Align2, Color32, FontId, Rect, Sense, Stroke, Ui};

use super::{category_color, ViewAction};
use crate::models::category::CategoryPalette;
use crate::models::event::Event;
use crate::services::event::{day_range, events_for_day, events_for_range};
use crate::services::navigation::{month_dates, week_dates};

/// Titles shown per cell before collapsing into "+N more"
const MAX_CELL_ENTRIES: usize = 3;
const CELL_BORDER: Color32 = Color32::from_gray(70);
const OUTSIDE_MONTH: Color32 = Color32::from_gray(110);
const IN_MONTH: Color32 = Color32::from_gray(210);

pub struct MonthView<'a> {
    pub date: NaiveDate,
    pub first_day_of_week: u8,
    pub events: &'a [Event],
    pub palette: &'a CategoryPalette,
}

impl MonthView<'_> {
    pub fn show(&self, ui: &mut Ui) -> Option<ViewAction> {
        let mut action = None;
        let dates = month_dates(self.date, self.first_day_of_week);
        let weeks = (dates.len() / 7).max(1);

        let header_height = 22.0;
        let (area, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let cell_size = vec2(area.width() / 7.0, (area.height() - header_height) / weeks as f32);

        for (index, day) in week_dates(self.date, self.first_day_of_week).iter().enumerate() {
            ui.painter().text(
                pos2(area.left() + (index as f32 + 0.5) * cell_size.x, area.top() + header_height / 2.0),
                Align2::CENTER_CENTER,
                day.format("%a").to_string(),
                FontId::proportional(13.0),
                IN_MONTH,
            );
        }

        let today = Local::now().date_naive();
        for (index, day) in dates.iter().enumerate() {
            let row = (index / 7) as f32;
            let col = (index % 7) as f32;
            let cell = Rect::from_min_size(
                pos2(area.left() + col * cell_size.x, area.top() + header_height + row * cell_size.y),
                cell_size,
            );

            ui.painter().rect_stroke(cell, 0.0, Stroke::new(1.0, CELL_BORDER));
            let number_color = if *day == today {
                Color32::from_rgb(255, 100, 100)
            } else if day.month() == self.date.month() {
                IN_MONTH
            } else {
                OUTSIDE_MONTH
            };
            ui.painter().text(
                pos2(cell.left() + 4.0, cell.top() + 2.0),
                Align2::LEFT_TOP,
                day.day().to_string(),
                FontId::proportional(12.0),
                number_color,
            );

            self.cell_entries(ui, cell, *day);

            let response = ui.interact(cell, ui.id().with(("month_cell", index)), Sense::click());
            if response.double_clicked() {
                action = Some(ViewAction::OpenDay(*day));
            }
            response.context_menu(|ui| {
                if ui.button("New event").clicked() {
                    action = Some(ViewAction::NewEvent(*day));
                    ui.close_menu();
                }
            });
        }

        action
    }

    fn cell_entries(&self, ui: &Ui, cell: Rect, day: NaiveDate) {
        let (start, end) = day_range(day, day);
        let mut entries: Vec<&Event> = Vec::new();
        let all_day = events_for_range(self.events, start, end);
        let timed = events_for_day(self.events, day, None);
        entries.extend(all_day.iter().map(|p| &p.item));
        entries.extend(timed.iter().map(|p| &p.item));

        let painter = ui.painter_at(cell);
        let line_height = 15.0;
        for (line, event) in entries.iter().take(MAX_CELL_ENTRIES).enumerate() {
            let y = cell.top() + 18.0 + line as f32 * line_height;
            painter.circle_filled(pos2(cell.left() + 8.0, y + 6.0), 3.0, category_color(self.palette, event.category_id));
            painter.text(
                pos2(cell.left() + 14.0, y),
                Align2::LEFT_TOP,
                event.display_title(),
                FontId::proportional(11.0),
                IN_MONTH,
            );
        }

        if entries.len() > MAX_CELL_ENTRIES {
            painter.text(
                pos2(cell.left() + 14.0, cell.top() + 18.0 + MAX_CELL_ENTRIES as f32 * line_height),
                Align2::LEFT_TOP,
                format!("+{} more", entries.len() - MAX_CELL_ENTRIES),
                FontId::proportional(11.0),
                OUTSIDE_MONTH,
            );
        }
    }
}

/// Twelve month tiles for the year of `date`
pub fn show_year(ui: &mut Ui, date: NaiveDate, events: &[Event]) -> Option<ViewAction> {
    let mut action = None;
    let year = date.year();

    egui::Grid::new("year_grid")
        .num_columns(4)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for month in 1..=12u32 {
                let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
                    continue;
                };
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(first);
                let (start, end) = day_range(first, last);
                let count = events
                    .iter()
                    .filter(|e| e.start <= end && e.end >= start)
                    .count();

                let label = format!("{}\n{} events", first.format("%B"), count);
                if ui.add_sized([140.0, 60.0], egui::Button::new(label)).clicked() {
                    action = Some(ViewAction::OpenMonth(first));
                }
                if month % 4 == 0 {
                    ui.end_row();
                }
            }
        });

    action
}
