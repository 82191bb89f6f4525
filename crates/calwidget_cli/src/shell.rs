//! Line-driven interactive session over one mounted widget.
//!
//! Each line maps to one widget interaction (navigate, click a day, click an
//! event, edit a field, press a dialog button).

use crate::render::{render_day, render_editor, render_month};
use anyhow::{bail, Context, Result};
use calwidget_core::{CalendarWidget, DateCursor, EventId, KeyValueStore};
use chrono::NaiveDate;
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  next | prev              move one month
  goto YYYY-MM             jump to a month
  open DAY|YYYY-MM-DD      add an event on a day
  edit ID                  edit an existing event
  name|start|end|desc TEXT set a dialog field
  save                     save or update the dialog
  delete                   delete the edited event
  close                    close the dialog
  day DAY|YYYY-MM-DD       list one day's events
  show                     redraw the month
  quit";

/// Which dialog field a `Set` command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Start,
    End,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Next,
    Prev,
    GoTo(DateCursor),
    Open(DayRef),
    Edit(EventId),
    Set(Field, String),
    Save,
    Delete,
    Close,
    Day(DayRef),
    Show,
    Help,
    Quit,
}

/// A day given as a day-of-month in the displayed month, or a full date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRef {
    OfMonth(u32),
    Date(NaiveDate),
}

impl DayRef {
    fn resolve(self, cursor: DateCursor) -> Result<NaiveDate> {
        match self {
            Self::Date(date) => Ok(date),
            Self::OfMonth(day) => NaiveDate::from_ymd_opt(cursor.year(), cursor.month(), day)
                .with_context(|| format!("{cursor} has no day {day}")),
        }
    }
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "goto" => ShellCommand::GoTo(rest.parse()?),
        "open" => ShellCommand::Open(parse_day(rest)?),
        "edit" => ShellCommand::Edit(
            rest.parse()
                .with_context(|| format!("invalid event id `{rest}`"))?,
        ),
        "name" => ShellCommand::Set(Field::Name, rest.to_string()),
        "start" => ShellCommand::Set(Field::Start, rest.to_string()),
        "end" => ShellCommand::Set(Field::End, rest.to_string()),
        "desc" | "description" => ShellCommand::Set(Field::Description, rest.to_string()),
        "save" | "update" => ShellCommand::Save,
        "delete" => ShellCommand::Delete,
        "close" | "cancel" => ShellCommand::Close,
        "day" => ShellCommand::Day(parse_day(rest)?),
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => bail!("unknown command `{other}`; type `help`"),
    };
    Ok(Some(command))
}

fn parse_day(value: &str) -> Result<DayRef> {
    if let Ok(day) = value.parse::<u32>() {
        return Ok(DayRef::OfMonth(day));
    }
    value
        .parse::<NaiveDate>()
        .map(DayRef::Date)
        .with_context(|| format!("expected a day number or YYYY-MM-DD, got `{value}`"))
}

/// Runs the session until `quit` or end of input.
///
/// `today` is consulted before every command so the highlight follows the
/// date when a session runs past midnight.
pub fn run<S, R, W, C>(
    widget: &mut CalendarWidget<S>,
    input: R,
    out: &mut W,
    styled: bool,
    today: C,
) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
    C: Fn() -> NaiveDate,
{
    writeln!(out, "{}", render_month(widget.state(), styled))?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        widget.set_today(today());
        if let Err(err) = execute(widget, command, out, styled) {
            writeln!(out, "error: {err:#}")?;
        }
        if let Some(notice) = widget.take_notice() {
            writeln!(out, "warning: {notice}")?;
        }
    }
    Ok(())
}

fn execute<S: KeyValueStore, W: Write>(
    widget: &mut CalendarWidget<S>,
    command: ShellCommand,
    out: &mut W,
    styled: bool,
) -> Result<()> {
    match command {
        ShellCommand::Next => {
            widget.change_month(1);
        }
        ShellCommand::Prev => {
            widget.change_month(-1);
        }
        ShellCommand::GoTo(cursor) => {
            widget.go_to(cursor);
        }
        ShellCommand::Open(day) => {
            let date = day.resolve(widget.state().cursor())?;
            widget.click_day(date);
        }
        ShellCommand::Edit(id) => {
            widget.click_event(id);
            if widget.state().editor().editing_id() != Some(id) {
                bail!("no event with id {id}");
            }
        }
        ShellCommand::Set(field, value) => {
            let form = widget
                .editor_mut()
                .form_mut()
                .context("no dialog is open; use `open` or `edit` first")?;
            match field {
                Field::Name => form.name = value,
                Field::Start => form.start_time = value,
                Field::End => form.end_time = value,
                Field::Description => form.description = value,
            }
        }
        ShellCommand::Save => {
            widget.submit();
        }
        ShellCommand::Delete => {
            widget.delete_edited();
        }
        ShellCommand::Close => {
            widget.close_editor();
        }
        ShellCommand::Day(day) => {
            let date = day.resolve(widget.state().cursor())?;
            writeln!(out, "{}", render_day(&widget.state().events_for_day(date)))?;
            return Ok(());
        }
        ShellCommand::Show => {}
        ShellCommand::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(());
        }
        ShellCommand::Quit => return Ok(()),
    }

    match render_editor(widget.state().editor()) {
        Some(dialog) => writeln!(out, "{dialog}")?,
        None => writeln!(out, "{}", render_month(widget.state(), styled))?,
    }
    Ok(())
}
