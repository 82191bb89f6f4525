//! Plain-text rendering of widget state.
//!
//! Styling is optional so output stays stable in tests and pipes.

use calwidget_core::{leading_blanks, CalendarState, DayCell, EditorState, Event, WEEKDAY_LABELS};
use owo_colors::OwoColorize;

const CELL_WIDTH: usize = 6;

/// Month title, weekday header, aligned day cells and the month's events.
pub fn render_month(state: &CalendarState, styled: bool) -> String {
    let cursor = state.cursor();
    let mut lines = Vec::new();

    let width = CELL_WIDTH * WEEKDAY_LABELS.len();
    let title = format!("{:^width$}", format!("< {} >", cursor.title()));
    lines.push(if styled {
        title.bold().to_string()
    } else {
        title
    });
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{label:^CELL_WIDTH$}"))
            .collect::<String>(),
    );

    let blanks = leading_blanks(cursor) as usize;
    let mut row = " ".repeat(CELL_WIDTH * blanks);
    let mut column = blanks;
    let grid = state.month_grid();
    for cell in &grid {
        let has_events = !state.events_for_day(cell.date).is_empty();
        row.push_str(&render_cell(cell, has_events, styled));
        column += 1;
        if column == WEEKDAY_LABELS.len() {
            lines.push(row.trim_end().to_string());
            row = String::new();
            column = 0;
        }
    }
    if !row.trim().is_empty() {
        lines.push(row.trim_end().to_string());
    }

    let listed: Vec<String> = grid
        .iter()
        .flat_map(|cell| {
            state
                .events_for_day(cell.date)
                .into_iter()
                .map(move |event| render_event_line(cell, event))
        })
        .collect();
    if !listed.is_empty() {
        lines.push(String::new());
        lines.extend(listed);
    }

    lines.join("\n")
}

/// One day's events in insertion order, or a placeholder.
pub fn render_day(events: &[&Event]) -> String {
    if events.is_empty() {
        return "no events".to_string();
    }
    events
        .iter()
        .map(|event| {
            let mut line = join_parts(
                &[&format!("#{}", event.id), &event.name, &time_range(event)],
                " ",
            );
            if let Some(description) = event.description() {
                line.push_str(&format!("\n    {description}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The add/edit dialog, or `None` when closed.
pub fn render_editor(editor: &EditorState) -> Option<String> {
    let heading = editor.mode_label()?;
    let form = editor.form()?;
    let date = editor.selected_date()?;
    let submit = editor.submit_label()?;

    let mut actions = vec![format!("[{submit}]")];
    if editor.editing_id().is_some() {
        actions.push("[Delete Event]".to_string());
    }
    actions.push("[Close]".to_string());

    Some(
        [
            format!("{heading} ({date})"),
            format!("  Name:        {}", form.name),
            format!("  Start Time:  {}", form.start_time),
            format!("  End Time:    {}", form.end_time),
            format!("  Description: {}", form.description),
            format!("  {}", actions.join(" ")),
        ]
        .join("\n"),
    )
}

fn render_cell(cell: &DayCell, has_events: bool, styled: bool) -> String {
    let mut text = if cell.is_today {
        format!("[{}]", cell.day())
    } else {
        cell.day().to_string()
    };
    if has_events {
        text.push('*');
    }
    let padded = format!("{text:^CELL_WIDTH$}");
    if styled && cell.is_today {
        padded.yellow().bold().to_string()
    } else {
        padded
    }
}

fn render_event_line(cell: &DayCell, event: &Event) -> String {
    join_parts(
        &[
            &format!("{:>2}", cell.day()),
            &event.name,
            &time_range(event),
            &format!("#{}", event.id),
        ],
        "  ",
    )
}

fn join_parts(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

fn time_range(event: &Event) -> String {
    match (event.start_time.is_empty(), event.end_time.is_empty()) {
        (true, true) => String::new(),
        (false, true) => event.start_time.clone(),
        (true, false) => format!("-{}", event.end_time),
        (false, false) => format!("{}-{}", event.start_time, event.end_time),
    }
}
