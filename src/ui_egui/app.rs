mod confirm;
mod gestures;
mod lifecycle;
mod navigation;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Local, NaiveDate};

use self::confirm::EventForm;
use self::gestures::GestureMessage;
use crate::models::category::{default_categories, CategoryPalette};
use crate::models::event::Event;
use crate::models::settings::Settings;
use crate::models::ui::ViewType;
use crate::services::drag::geometry::DAYS_PER_WEEK;
use crate::services::drag::{ColumnRef, DragHandle, InputBus};
use crate::services::event::{EventCollection, EventStore};
use crate::services::navigation::visible_days;
use crate::services::settings::SettingsService;

pub struct CalendarApp {
    settings: Settings,
    /// Missing when no config directory could be resolved; settings then live in memory only
    settings_service: Option<SettingsService>,
    palette: CategoryPalette,
    collection: EventCollection,
    store: Box<dyn EventStore>,
    bus: InputBus,
    /// One live geometry handle per visible day column
    columns: Vec<ColumnRef>,
    current_view: ViewType,
    current_date: NaiveDate,
    /// Event drawn over the collection while a gesture or draft is in progress
    overlay: Option<Event>,
    active_drag: Option<DragHandle>,
    /// Gesture callbacks run inside bus dispatch and report here
    outbox: Rc<RefCell<Vec<GestureMessage>>>,
    form: Option<EventForm>,
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_update(ctx);
    }
}

impl CalendarApp {
    pub fn new(
        settings: Settings,
        settings_service: Option<SettingsService>,
        events: Vec<Event>,
        store: Box<dyn EventStore>,
    ) -> Self {
        let collection = EventCollection::new(events);
        log::info!("Loaded {} events", collection.events().len());

        Self {
            current_view: settings.default_view,
            settings,
            settings_service,
            palette: CategoryPalette::new(default_categories()),
            collection,
            store,
            bus: InputBus::new(),
            columns: (0..DAYS_PER_WEEK).map(|_| ColumnRef::new()).collect(),
            current_date: Local::now().date_naive(),
            overlay: None,
            active_drag: None,
            outbox: Rc::new(RefCell::new(Vec::new())),
            form: None,
        }
    }

    fn visible_days(&self) -> Vec<NaiveDate> {
        visible_days(
            self.current_date,
            self.current_view,
            self.settings.first_day_of_week,
        )
    }

    fn persist_settings(&self) {
        if let Some(service) = &self.settings_service {
            if let Err(err) = service.update(&self.settings) {
                log::error!("Failed to save settings: {:#}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventId;
    use crate::services::drag::{ColumnRect, PointerEvent, PointerInput};
    use crate::services::event::InMemoryEventStore;
    use crate::ui_egui::views::DragTarget;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn standup() -> Event {
        Event::builder()
            .id(EventId::Persisted(1))
            .title("Standup")
            .start(at(9, 0))
            .end(at(9, 30))
            .build()
            .unwrap()
    }

    /// Day view on 2025-03-05 with its column mounted at one pixel per minute
    fn day_app(events: Vec<Event>) -> CalendarApp {
        let store = InMemoryEventStore::with_events(events.clone());
        let mut app = CalendarApp::new(Settings::default(), None, events, Box::new(store));
        app.current_view = ViewType::Day;
        app.current_date = at(0, 0).date();
        app.columns[0].mount(ColumnRect::new(100.0, 0.0, 200.0, 1440.0));
        app
    }

    #[test]
    fn test_creation_drag_opens_draft_and_saves() {
        let mut app = day_app(Vec::new());

        app.start_drag(0, PointerEvent::primary(150.0, 600.0), DragTarget::Create);
        app.bus.dispatch(PointerInput::Move { x: 150.0, y: 660.0 });
        app.process_gesture_messages();
        assert_eq!(app.overlay.as_ref().map(|e| e.start), Some(at(10, 0)));

        app.bus.dispatch(PointerInput::Up { x: 150.0, y: 690.0 });
        app.process_gesture_messages();
        assert!(app.active_drag.is_none());

        let mut form = app.form.take().expect("event form");
        assert_eq!((form.event.start, form.event.end), (at(10, 0), at(11, 30)));
        form.title = "Planning".into();
        app.save_form(form);

        let events = app.collection.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Planning");
        assert!(matches!(events[0].id, EventId::Persisted(_)));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_move_drag_commits_new_times() {
        let mut app = day_app(vec![standup()]);

        app.start_drag(0, PointerEvent::primary(150.0, 540.0), DragTarget::Move(standup()));
        app.bus.dispatch(PointerInput::Up { x: 150.0, y: 600.0 });
        app.process_gesture_messages();

        let moved = app.collection.get(EventId::Persisted(1)).unwrap();
        assert_eq!((moved.start, moved.end), (at(10, 0), at(10, 30)));
        assert!(app.active_drag.is_none());
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_cancel_discards_preview() {
        let mut app = day_app(vec![standup()]);

        app.start_drag(0, PointerEvent::primary(150.0, 540.0), DragTarget::Move(standup()));
        app.bus.dispatch(PointerInput::Move { x: 150.0, y: 720.0 });
        app.process_gesture_messages();
        assert!(app.overlay.is_some());

        app.cancel_gesture();
        assert!(app.overlay.is_none());
        assert_eq!(app.bus.listener_count(), 0);
        assert_eq!(app.collection.get(EventId::Persisted(1)).map(|e| e.start), Some(at(9, 0)));
    }

    #[test]
    fn test_move_preview_replaces_original_in_layout() {
        let mut app = day_app(vec![standup()]);
        app.overlay = Some(standup().with_times(at(13, 0), at(13, 30)));

        let shown = app.displayed_day(at(0, 0).date());
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].item.start, at(13, 0));
    }

    #[test]
    fn test_navigation_cancels_running_drag() {
        let mut app = day_app(vec![standup()]);

        app.start_drag(0, PointerEvent::primary(150.0, 540.0), DragTarget::Move(standup()));
        assert_eq!(app.bus.listener_count(), 1);

        app.navigate_next();
        assert_eq!(app.current_date, NaiveDate::from_ymd_opt(2025, 3, 6).unwrap());
        assert!(app.active_drag.is_none());
        assert_eq!(app.bus.listener_count(), 0);

        app.bus.dispatch(PointerInput::Up { x: 150.0, y: 600.0 });
        app.process_gesture_messages();
        let kept = app.collection.get(EventId::Persisted(1)).unwrap();
        assert_eq!((kept.start, kept.end), (at(9, 0), at(9, 30)));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_jump_and_previous_cancel_running_drag() {
        let mut app = day_app(vec![standup()]);

        app.start_drag(0, PointerEvent::primary(150.0, 540.0), DragTarget::Move(standup()));
        app.navigate_previous();
        assert_eq!(app.bus.listener_count(), 0);

        app.start_drag(0, PointerEvent::primary(150.0, 540.0), DragTarget::Create);
        app.jump_to_today();
        assert!(app.active_drag.is_none());
        assert_eq!(app.bus.listener_count(), 0);
    }

    #[test]
    fn test_edit_form_updates_existing_event() {
        let mut app = day_app(vec![standup()]);

        app.open_event_form(standup());
        let mut form = app.form.take().expect("event form");
        assert!(!form.is_new());
        form.title = "Daily standup".into();
        form.location = "Room 2".into();
        form.all_day = true;
        app.save_form(form);

        let edited = app.collection.get(EventId::Persisted(1)).unwrap();
        assert_eq!(edited.title, "Daily standup");
        assert_eq!(edited.location.as_deref(), Some("Room 2"));
        assert!(edited.all_day);
        assert_eq!(app.collection.events().len(), 1);

        let day = at(0, 0).date();
        assert!(app.displayed_day(day).is_empty());
        assert_eq!(app.displayed_all_day(&[day]).len(), 1);
    }

    #[test]
    fn test_new_event_form_creates_event() {
        let mut app = day_app(Vec::new());

        app.open_new_event(at(0, 0).date());
        let mut form = app.form.take().expect("event form");
        assert!(form.is_new());
        form.title = "Dentist".into();
        form.description = "Bring forms".into();
        app.save_form(form);

        let events = app.collection.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].id, EventId::Persisted(_)));
        assert_eq!(events[0].description.as_deref(), Some("Bring forms"));
        assert_eq!((events[0].start, events[0].end), (at(9, 0), at(10, 0)));
    }

    #[test]
    fn test_form_does_not_open_during_drag() {
        let mut app = day_app(vec![standup()]);

        app.start_drag(0, PointerEvent::primary(150.0, 540.0), DragTarget::Move(standup()));
        app.open_event_form(standup());
        assert!(app.form.is_none());
    }

    #[test]
    fn test_settings_are_persisted() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));
        let mut app = CalendarApp::new(
            Settings::default(),
            Some(service),
            Vec::new(),
            Box::new(InMemoryEventStore::new()),
        );

        app.settings.snap_minutes = 30;
        app.persist_settings();

        let stored = SettingsService::new(dir.path().join("settings.toml")).get().unwrap();
        assert_eq!(stored.snap_minutes, 30);
    }
}
