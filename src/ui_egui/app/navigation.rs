use super::CalendarApp;
use crate::models::settings::Settings;
use crate::models::ui::ViewType;
use crate::services::navigation::{offset_period, period_label};
use chrono::{Local, NaiveDate};

/// Snap intervals offered in the toolbar
const SNAP_CHOICES: [u32; 5] = [5, 10, 15, 30, 60];

impl CalendarApp {
    pub(super) fn navigate_previous(&mut self) {
        self.go_to(offset_period(self.current_date, self.current_view, -1));
    }

    pub(super) fn navigate_next(&mut self) {
        self.go_to(offset_period(self.current_date, self.current_view, 1));
    }

    pub(super) fn jump_to_today(&mut self) {
        self.go_to(Local::now().date_naive());
    }

    /// Show the period containing `date`.
    ///
    /// Any running gesture or open form is cancelled first.
    pub(super) fn go_to(&mut self, date: NaiveDate) {
        if date == self.current_date {
            return;
        }
        self.cancel_gesture();
        self.current_date = date;
    }

    pub(super) fn set_view(&mut self, view: ViewType) {
        if self.current_view == view {
            return;
        }
        self.cancel_gesture();
        self.current_view = view;
        log::debug!("Switched to {} view", view.label());
    }

    pub(super) fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.cancel_gesture();
        }
        if ctx.wants_keyboard_input() || self.form.is_some() {
            return;
        }

        let pressed = |key| ctx.input(|i| i.key_pressed(key) && !i.modifiers.any());
        if pressed(egui::Key::D) {
            self.set_view(ViewType::Day);
        } else if pressed(egui::Key::W) {
            self.set_view(ViewType::Week);
        } else if pressed(egui::Key::M) {
            self.set_view(ViewType::Month);
        } else if pressed(egui::Key::Y) {
            self.set_view(ViewType::Year);
        } else if pressed(egui::Key::B) || pressed(egui::Key::P) {
            self.navigate_previous();
        } else if pressed(egui::Key::F) || pressed(egui::Key::N) {
            self.navigate_next();
        } else if pressed(egui::Key::T) {
            self.jump_to_today();
        }
    }

    pub(super) fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀").on_hover_text("Previous (B)").clicked() {
                self.navigate_previous();
            }
            if ui.button("Today").on_hover_text("Today (T)").clicked() {
                self.jump_to_today();
            }
            if ui.button("▶").on_hover_text("Next (N)").clicked() {
                self.navigate_next();
            }

            ui.heading(period_label(self.current_date, self.current_view));

            if ui.button("New event").clicked() {
                self.open_new_event(self.current_date);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for view in ViewType::ALL.iter().rev() {
                    if ui
                        .selectable_label(self.current_view == *view, view.label())
                        .clicked()
                    {
                        self.set_view(*view);
                    }
                }

                ui.separator();
                let mut snap = self.settings.snap_minutes;
                egui::ComboBox::from_id_source("snap_minutes")
                    .selected_text(format!("{} min", snap))
                    .show_ui(ui, |ui| {
                        for choice in SNAP_CHOICES {
                            ui.selectable_value(&mut snap, choice, format!("{} min", choice));
                        }
                    });
                ui.label("Snap");

                if snap != self.settings.snap_minutes {
                    self.update_settings(Settings {
                        snap_minutes: snap,
                        ..self.settings.clone()
                    });
                }
            });
        });
    }

    fn update_settings(&mut self, settings: Settings) {
        match settings.validate() {
            Ok(()) => {
                self.settings = settings;
                self.persist_settings();
            }
            Err(err) => log::warn!("Ignoring invalid settings: {}", err),
        }
    }
}
