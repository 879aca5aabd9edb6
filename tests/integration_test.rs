// Integration tests for layout, queries, drag gestures and the event collection
mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Timelike;
use chronos_calendar::models::event::{Event, EventId};
use chronos_calendar::models::settings::Settings;
use chronos_calendar::models::ui::ViewType;
use chronos_calendar::services::drag::{
    move_gesture, resize_gesture, ColumnRect, ColumnRef, DragController, DragOptions, InputBus,
    PointerEvent, PointerInput, ResizeEdge,
};
use chronos_calendar::services::event::queries::day_range;
use chronos_calendar::services::event::{
    events_for_day, events_for_range, EventCollection, EventStore, InMemoryEventStore, StoreError,
};
use chronos_calendar::services::layout::{compute_layout, PositionedEvent};
use chronos_calendar::services::settings::SettingsService;
use fixtures::{dates, events};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn channels(layout: &[PositionedEvent]) -> Vec<(usize, usize)> {
    layout
        .iter()
        .map(|p| (p.channel_index, p.num_channels))
        .collect()
}

#[test]
fn test_day_with_one_cluster_and_one_single() {
    let all = vec![
        events::timed(1, (9, 0), (10, 0)),
        events::timed(2, (9, 30), (10, 30)),
        events::timed(3, (11, 0), (12, 0)),
    ];

    let layout = events_for_day(&all, dates::monday(), None);
    assert_eq!(channels(&layout), vec![(0, 2), (1, 2), (0, 1)]);
}

#[test]
fn test_four_identical_events_get_four_channels() {
    let all: Vec<Event> = (1..=4).map(|id| events::timed(id, (9, 0), (10, 0))).collect();

    let layout = compute_layout(&all);
    let mut indices: Vec<usize> = layout.iter().map(|p| p.channel_index).collect();
    indices.sort_unstable();

    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(layout.iter().all(|p| p.num_channels == 4));
}

#[test]
fn test_column_top_maps_to_midnight() {
    let column = ColumnRef::new();
    column.mount(ColumnRect::new(0.0, 120.0, 100.0, 750.0));
    let controller = DragController::new(
        InputBus::new(),
        column,
        dates::at(0, 0, 0),
        DragOptions::default(),
    );

    assert_eq!(controller.pixel_to_time(120.0), dates::at(0, 0, 0));
}

#[test]
fn test_snapping_to_quarter_hours() {
    let column = ColumnRef::new();
    column.mount(ColumnRect::new(0.0, 0.0, 100.0, 1440.0));
    let controller = DragController::new(
        InputBus::new(),
        column,
        dates::at(0, 0, 0),
        DragOptions::default(),
    );

    let down = controller.pixel_to_time(607.0);
    let up = controller.pixel_to_time(608.0);
    assert_eq!((down.hour(), down.minute()), (10, 0));
    assert_eq!((up.hour(), up.minute()), (10, 15));
}

#[test]
fn test_top_handle_dragged_past_bottom_edge() {
    let bus = InputBus::new();
    let column = ColumnRef::new();
    column.mount(ColumnRect::new(0.0, 0.0, 100.0, 1440.0));

    let event = events::timed(7, (10, 0), (11, 0));
    let committed = Rc::new(RefCell::new(None));
    let slot = committed.clone();

    let controller = DragController::new(bus.clone(), column, event.start, DragOptions::default());
    let callbacks = resize_gesture(event.clone(), ResizeEdge::Top, |_| {}, move |e| {
        *slot.borrow_mut() = Some(e)
    });
    controller
        .start_drag(&PointerEvent::primary(50.0, 600.0), callbacks)
        .unwrap();
    bus.dispatch(PointerInput::Move { x: 50.0, y: 680.0 });
    bus.dispatch(PointerInput::Up { x: 50.0, y: 690.0 });

    let resized = committed.borrow().clone().unwrap();
    assert_eq!((resized.start, resized.end), (dates::at(0, 11, 0), dates::at(0, 11, 30)));
}

#[test]
fn test_week_range_includes_midweek_all_day_event() {
    let wed_to_fri = events::all_day(1, 2, 4);
    let next_mon_to_tue = events::all_day(2, 7, 8);
    let all = vec![wed_to_fri.clone(), next_mon_to_tue];

    let (start, end) = day_range(dates::monday(), dates::sunday());
    let layout = events_for_range(&all, start, end);

    assert_eq!(layout.len(), 1);
    assert_eq!(layout[0].item, wed_to_fri);
}

#[test]
fn test_week_move_commits_through_collection() {
    let original = events::timed(1, (10, 0), (11, 0));
    let mut store = InMemoryEventStore::with_events(vec![original.clone()]);
    let mut collection = EventCollection::new(store.events());

    let bus = InputBus::new();
    let column = ColumnRef::new();
    // Monday column of a week view, 100px wide
    column.mount(ColumnRect::new(100.0, 0.0, 100.0, 1440.0));

    let commits = Rc::new(RefCell::new(Vec::new()));
    let sink = commits.clone();
    let callbacks = move_gesture(original.clone(), |_, _| {}, move |e| sink.borrow_mut().push(e));

    let controller = DragController::new(
        bus.clone(),
        column,
        original.start,
        DragOptions {
            anchor_column: Some(0),
            ..DragOptions::default()
        },
    );
    controller
        .start_drag(&PointerEvent::primary(150.0, 615.0), callbacks)
        .unwrap();
    bus.dispatch(PointerInput::Up { x: 350.0, y: 735.0 });

    for event in commits.borrow().iter() {
        collection.update(event, &mut store).unwrap();
    }

    let moved = collection.get(EventId::Persisted(1)).unwrap();
    assert_eq!((moved.start, moved.end), (dates::at(2, 12, 0), dates::at(2, 13, 0)));
    assert_eq!(store.get(1).map(|e| e.start), Some(dates::at(2, 12, 0)));
    assert!(collection.day(dates::monday(), None).is_empty());
}

struct RejectingStore;

impl EventStore for RejectingStore {
    fn create_event(&mut self, _draft: &Event) -> Result<Option<Event>, StoreError> {
        Err(StoreError::Rejected("offline".into()))
    }

    fn update_event(&mut self, _event: &Event) -> Result<Option<Event>, StoreError> {
        Err(StoreError::Rejected("offline".into()))
    }

    fn delete_event(&mut self, _id: EventId) -> Result<(), StoreError> {
        Err(StoreError::Rejected("offline".into()))
    }
}

#[test]
fn test_rejected_changes_leave_collection_untouched() {
    let original = events::timed(1, (10, 0), (11, 0));
    let mut collection = EventCollection::new(vec![original.clone()]);
    let mut store = RejectingStore;

    let draft = Event::preview(dates::at(0, 14, 0), dates::at(0, 15, 0), None);
    assert!(collection.create(&draft, &mut store).is_err());
    assert!(collection.update(&original.shifted_by_days(1), &mut store).is_err());
    assert!(collection.delete(original.id, &mut store).is_err());

    assert_eq!(collection.events(), &[original][..]);
}

#[test]
fn test_settings_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let service = SettingsService::new(dir.path().join("config").join("settings.toml"));

    assert_eq!(service.get().unwrap(), Settings::default());

    let custom = Settings {
        snap_minutes: 30,
        default_view: ViewType::Day,
        ..Settings::default()
    };
    service.update(&custom).unwrap();

    assert_eq!(service.get().unwrap(), custom);
}
