use calwidget_core::{
    CalendarState, CalendarWidget, Change, EditorState, EventStore, MemoryKvStore, WidgetConfig,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn fill(state: &mut CalendarState, name: &str, start: &str, end: &str) {
    let form = state.editor_mut().form_mut().expect("editor should be open");
    form.name = name.to_string();
    form.start_time = start.to_string();
    form.end_time = end.to_string();
}

#[test]
fn click_day_then_save_creates_event_and_closes_editor() {
    let mut state = CalendarState::new(date(2024, 3, 1), EventStore::new());
    assert_eq!(state.click_day(date(2024, 3, 15)), Change::Unchanged);
    assert_eq!(state.editor().selected_date(), Some(date(2024, 3, 15)));

    fill(&mut state, "Lunch", "12:00", "13:00");
    assert_eq!(state.submit(), Change::EventsChanged);
    assert!(!state.editor().is_open());

    let events = state.events_for_day(date(2024, 3, 15));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Lunch");
}

#[test]
fn save_with_empty_name_keeps_editor_open() {
    let mut state = CalendarState::new(date(2024, 3, 1), EventStore::new());
    state.click_day(date(2024, 3, 15));
    fill(&mut state, "", "12:00", "13:00");

    assert_eq!(state.submit(), Change::Unchanged);
    assert!(state.editor().is_open());
    assert!(state.store().is_empty());
}

#[test]
fn click_event_prefills_form_and_update_keeps_date() {
    let mut state = CalendarState::new(date(2024, 3, 1), EventStore::new());
    state.click_day(date(2024, 3, 15));
    fill(&mut state, "Lunch", "12:00", "13:00");
    state.submit();
    let id = state.store().events()[0].id;

    state.click_event(id);
    assert_eq!(state.editor().editing_id(), Some(id));
    assert_eq!(state.editor().form().expect("editor should be open").start_time, "12:00");

    fill(&mut state, "Long lunch", "12:00", "14:00");
    assert_eq!(state.submit(), Change::EventsChanged);
    assert_eq!(*state.editor(), EditorState::Closed);

    let event = state.store().get(id).expect("edited event should exist");
    assert_eq!(event.name, "Long lunch");
    assert_eq!(event.end_time, "14:00");
    assert_eq!(event.date, date(2024, 3, 15));
}

#[test]
fn click_event_while_creating_switches_to_editing() {
    let mut state = CalendarState::new(date(2024, 3, 1), EventStore::new());
    state.click_day(date(2024, 3, 2));
    fill(&mut state, "Standup", "9", "9:15");
    state.submit();
    let id = state.store().events()[0].id;

    state.click_day(date(2024, 3, 20));
    state.click_event(id);
    assert_eq!(state.editor().editing_id(), Some(id));
    assert_eq!(state.editor().selected_date(), Some(date(2024, 3, 2)));
}

#[test]
fn update_of_event_deleted_meanwhile_closes_without_change() {
    let mut state = CalendarState::new(date(2024, 3, 1), EventStore::new());
    state.click_day(date(2024, 3, 2));
    fill(&mut state, "Stale", "", "");
    state.submit();
    let id = state.store().events()[0].id;

    state.click_event(id);
    // A direct delete of another id must not disturb the dialog.
    assert_eq!(state.delete_event(id + 1), Change::Unchanged);
    assert!(state.editor().is_open());

    let mut other = state.clone();
    other.delete_event(id);
    assert!(!other.editor().is_open());

    // Simulate the store losing the event while the dialog stays open.
    let snapshot = state.editor().clone();
    let mut detached = CalendarState::new(date(2024, 3, 1), EventStore::new());
    *detached.editor_mut() = snapshot;
    assert_eq!(detached.submit(), Change::Unchanged);
    assert!(!detached.editor().is_open());
    assert!(detached.store().is_empty());
}

#[test]
fn delete_edited_removes_event_and_closes() {
    let mut state = CalendarState::new(date(2024, 3, 1), EventStore::new());
    for name in ["One", "Two"] {
        state.click_day(date(2024, 3, 15));
        fill(&mut state, name, "", "");
        state.submit();
    }
    let first = state.store().events()[0].id;
    let second = state.store().events()[1].id;

    state.click_event(first);
    assert_eq!(state.delete_edited(), Change::EventsChanged);
    assert!(!state.editor().is_open());

    let remaining = state.events_for_day(date(2024, 3, 15));
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second);
}

#[test]
fn close_discards_unsaved_input() {
    let mut state = CalendarState::new(date(2024, 3, 1), EventStore::new());
    state.click_day(date(2024, 3, 15));
    fill(&mut state, "Never saved", "", "");
    assert_eq!(state.close_editor(), Change::Unchanged);
    assert!(state.store().is_empty());
    assert_eq!(state.submit(), Change::Unchanged);
}

#[test]
fn widget_writes_through_on_every_event_change() {
    let config = WidgetConfig::default();
    let mut widget = CalendarWidget::mount(MemoryKvStore::new(), &config, date(2024, 3, 1));
    assert!(widget.notice().is_none());

    widget.change_month(1);
    widget.click_day(date(2024, 4, 2));
    widget.editor_mut().form_mut().expect("editor should be open").name = "Dentist".to_string();
    assert_eq!(widget.submit(), Change::EventsChanged);

    let storage = widget.into_storage();
    let mut remounted = CalendarWidget::mount(storage, &config, date(2024, 3, 1));
    assert_eq!(remounted.state().store().len(), 1);
    let id = remounted.state().store().events()[0].id;
    assert_eq!(
        remounted.state().events_for_day(date(2024, 4, 2))[0].name,
        "Dentist"
    );

    remounted.delete_event(id);
    let storage = remounted.into_storage();
    let reloaded = CalendarWidget::mount(storage, &config, date(2024, 3, 1));
    assert!(reloaded.state().store().is_empty());
}

#[test]
fn set_today_moves_highlight_without_moving_the_month() {
    let mut widget = CalendarWidget::mount(
        MemoryKvStore::new(),
        &WidgetConfig::default(),
        date(2024, 3, 31),
    );
    widget.set_today(date(2024, 4, 1));

    let state = widget.state();
    assert_eq!(state.today(), date(2024, 4, 1));
    assert_eq!(state.cursor().month(), 3);
    assert!(state.month_grid().iter().all(|cell| !cell.is_today));

    widget.change_month(1);
    let grid = widget.state().month_grid();
    let highlighted: Vec<_> = grid.iter().filter(|cell| cell.is_today).collect();
    assert_eq!(highlighted.len(), 1);
    assert_eq!(highlighted[0].date, date(2024, 4, 1));
}
