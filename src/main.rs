// Chronos Calendar
// Main entry point

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use chronos_calendar::models::event::Event;
use chronos_calendar::models::settings::Settings;
use chronos_calendar::services::event::{EventStore, InMemoryEventStore, JsonEventStore};
use chronos_calendar::services::settings::SettingsService;
use chronos_calendar::ui_egui::CalendarApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting Chronos Calendar");

    let (settings, settings_service) = load_settings();
    let (events, store) = open_event_store();
    let app = CalendarApp::new(settings, settings_service, events, store);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Chronos Calendar"),
        ..Default::default()
    };

    eframe::run_native("Chronos Calendar", options, Box::new(|_cc| Ok(Box::new(app))))
}

fn load_settings() -> (Settings, Option<SettingsService>) {
    let service = match SettingsService::from_project_dirs() {
        Ok(service) => service,
        Err(err) => {
            log::warn!("Settings will not be saved: {:#}", err);
            return (Settings::default(), None);
        }
    };

    let settings = service.get().unwrap_or_else(|err| {
        log::warn!("Failed to load settings from {}: {:#}", service.path().display(), err);
        Settings::default()
    });
    (settings, Some(service))
}

/// JSON store in the data directory, seeded on first launch; falls back to memory.
fn open_event_store() -> (Vec<Event>, Box<dyn EventStore>) {
    let today = Local::now().date_naive();
    let opened = JsonEventStore::default_path().and_then(JsonEventStore::open);

    match opened {
        Ok(mut store) => {
            if store.is_empty() {
                if let Err(err) = store.seed(sample_events(today)) {
                    log::warn!("Failed to seed {}: {:#}", store.path().display(), err);
                }
            }
            let events = store.events();
            (events, Box::new(store) as Box<dyn EventStore>)
        }
        Err(err) => {
            log::warn!("Events will not be saved: {:#}", err);
            let store = InMemoryEventStore::with_events(sample_events(today));
            let events = store.events();
            (events, Box::new(store) as Box<dyn EventStore>)
        }
    }
}

/// A few events around `today` so the grid is not empty on first launch
fn sample_events(today: NaiveDate) -> Vec<Event> {
    let at = |offset: i64, hour: u32, minute: u32| -> Option<NaiveDateTime> {
        (today + Duration::days(offset)).and_hms_opt(hour, minute, 0)
    };

    let timed = [
        ("Standup", 0, (9, 0), (9, 15), 1),
        ("Design review", 0, (9, 0), (10, 30), 1),
        ("Lunch with Sam", 0, (12, 0), (13, 0), 3),
        ("Gym", 1, (7, 0), (8, 0), 4),
        ("Planning", 1, (14, 0), (15, 30), 1),
        ("Dentist", 2, (16, 0), (16, 45), 2),
    ];

    let mut events: Vec<Event> = timed
        .into_iter()
        .filter_map(|(title, day, from, to, category)| {
            Event::builder()
                .title(title)
                .start(at(day, from.0, from.1)?)
                .end(at(day, to.0, to.1)?)
                .category_id(category)
                .build()
                .ok()
        })
        .collect();

    if let (Some(start), Some(end)) = (at(-1, 0, 0), at(1, 23, 59)) {
        if let Ok(trip) = Event::builder()
            .title("Conference")
            .start(start)
            .end(end)
            .all_day(true)
            .category_id(1)
            .build()
        {
            events.push(trip);
        }
    }

    events
}
