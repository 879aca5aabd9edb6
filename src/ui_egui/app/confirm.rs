//! Event form for new and existing events.
//!
//! Drags and the "New event" actions only produce a time range; the user
//! names it, picks a category and optionally marks it all-day here before it
//! reaches the store. Opening an existing event edits it in place.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{Align2, Context, RichText};

use super::CalendarApp;
use crate::models::event::{Event, EventId};
use crate::utils::date::{format_time_range, start_of_day};

/// Hour new events start at when they are not created by dragging
const NEW_EVENT_HOUR: i64 = 9;

#[derive(Debug, Clone)]
pub(super) struct EventForm {
    pub event: Event,
    pub title: String,
    pub location: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub all_day: bool,
}

impl EventForm {
    pub fn new(event: Event) -> Self {
        Self {
            title: event.title.clone(),
            location: event.location.clone().unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
            category_id: event.category_id,
            all_day: event.all_day,
            event,
        }
    }

    /// Whether saving creates a new event rather than updating one
    pub fn is_new(&self) -> bool {
        self.event.is_draft()
    }

    /// Times the event will be saved with.
    ///
    /// Switching to all-day covers the whole days touched; switching back
    /// gives a one hour slot on the first day.
    pub fn span(&self) -> (NaiveDateTime, NaiveDateTime) {
        let (start, end) = (self.event.start, self.event.end);
        match (self.event.all_day, self.all_day) {
            (false, true) => whole_days(start.date(), end.date()),
            (true, false) => {
                let start = start_of_day(start.date()) + Duration::hours(NEW_EVENT_HOUR);
                (start, start + Duration::hours(1))
            }
            _ => (start, end),
        }
    }

    pub fn into_event(self) -> Event {
        let (start, end) = self.span();
        Event {
            title: self.title.trim().to_string(),
            location: non_empty(&self.location),
            description: non_empty(&self.description),
            category_id: self.category_id,
            all_day: self.all_day,
            start,
            end,
            ..self.event
        }
    }
}

/// One hour draft on `date` for forms opened without a drag
pub(super) fn new_event_on(date: NaiveDate, category_id: Option<i64>) -> Event {
    let start = start_of_day(date) + Duration::hours(NEW_EVENT_HOUR);
    Event::preview(start, start + Duration::hours(1), category_id)
}

fn whole_days(first: NaiveDate, last: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end = last.and_hms_opt(23, 59, 59).unwrap_or_else(|| start_of_day(last));
    (start_of_day(first), end)
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

enum FormDecision {
    Save,
    Delete(EventId),
    Cancel,
}

impl CalendarApp {
    /// Open the form for an existing event.
    pub(super) fn open_event_form(&mut self, event: Event) {
        if self.active_drag.is_some() || self.form.is_some() {
            return;
        }
        self.form = Some(EventForm::new(event));
    }

    pub(super) fn open_new_event(&mut self, date: NaiveDate) {
        let category = self.palette.default_category().map(|c| c.id);
        self.open_event_form(new_event_on(date, category));
    }

    pub(super) fn show_event_window(&mut self, ctx: &Context) {
        let palette = &self.palette;
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let (heading, save_label) = if form.is_new() {
            ("New event", "Create")
        } else {
            ("Edit event", "Update")
        };

        let mut decision = None;
        egui::Window::new(heading)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let (start, end) = form.span();
                let when = if form.all_day {
                    if start.date() == end.date() {
                        format!("{}  all day", start.format("%a %-d %b"))
                    } else {
                        format!("{} to {}", start.format("%a %-d %b"), end.format("%a %-d %b"))
                    }
                } else {
                    format!("{}  {}", start.format("%a %-d %b"), format_time_range(start, end))
                };
                ui.label(RichText::new(when));

                egui::Grid::new("event_form_fields")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Title");
                        ui.text_edit_singleline(&mut form.title);
                        ui.end_row();

                        ui.label("Location");
                        ui.text_edit_singleline(&mut form.location);
                        ui.end_row();

                        ui.label("Category");
                        let selected = form
                            .category_id
                            .and_then(|id| palette.get(id))
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| "None".to_string());
                        egui::ComboBox::from_id_source("event_form_category")
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                for category in palette.categories() {
                                    ui.selectable_value(
                                        &mut form.category_id,
                                        Some(category.id),
                                        category.name.as_str(),
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut form.all_day, "All day");
                        ui.end_row();
                    });

                ui.label("Description");
                ui.add(
                    egui::TextEdit::multiline(&mut form.description)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(save_label).clicked() {
                        decision = Some(FormDecision::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(FormDecision::Cancel);
                    }
                    if !form.is_new() && ui.button("Delete").clicked() {
                        decision = Some(FormDecision::Delete(form.event.id));
                    }
                });
            });

        match decision {
            Some(FormDecision::Save) => {
                if let Some(form) = self.form.take() {
                    self.save_form(form);
                }
            }
            Some(FormDecision::Delete(id)) => {
                self.cancel_gesture();
                self.delete_event(id);
            }
            Some(FormDecision::Cancel) => self.cancel_gesture(),
            None => {}
        }
    }

    /// Create or update the event described by `form`.
    pub(super) fn save_form(&mut self, form: EventForm) {
        let is_new = form.is_new();
        let event = form.into_event();

        if is_new {
            match self.collection.create(&event, self.store.as_mut()) {
                Ok(created) => log::info!("Created event {} \"{}\"", created.id, created.display_title()),
                Err(err) => log::warn!("Could not create event: {}", err),
            }
        } else if let Err(err) = self.collection.update(&event, self.store.as_mut()) {
            log::warn!("Could not save event {}: {}", event.id, err);
        }

        self.form = None;
        self.overlay = None;
    }
}
