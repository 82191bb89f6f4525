//! Terminal host for the calendar widget.
//!
//! Mounts one widget over the SQLite key-value store, forwards a single
//! interaction (or an interactive session) and prints the resulting view.

mod config;
mod render;
mod shell;

use anyhow::{bail, Context, Result};
use calwidget_core::db::open_db;
use calwidget_core::{
    core_version, init_logging, CalendarWidget, Change, DateCursor, EventId, KeyValueStore,
    SqliteKvStore,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use config::CliConfig;
use log::info;
use owo_colors::OwoColorize;
use render::{render_day, render_month};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "calwidget", version = core_version())]
#[command(about = "Month calendar with locally stored events")]
struct Cli {
    /// SQLite file holding saved events
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory for rotating log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Month to display (YYYY-MM); defaults to the current month
    #[arg(long, global = true)]
    month: Option<DateCursor>,

    /// Leave the last saved events in place when every event is deleted
    #[arg(long, global = true)]
    keep_stale_on_empty: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the month grid
    Show,
    /// List the events of one day
    Day { date: NaiveDate },
    /// Add an event to a day
    Add {
        date: NaiveDate,
        name: String,
        #[arg(short, long, default_value = "")]
        start: String,
        #[arg(short, long, default_value = "")]
        end: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Replace the name (and optionally times/description) of an event
    Update {
        id: EventId,
        name: String,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an event by id
    Delete { id: EventId },
    /// Interactive session reading commands from stdin
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::resolve(cli.db, cli.log_dir, cli.log_level, cli.keep_stale_on_empty)?;

    let log_dir = config.log_dir.to_string_lossy();
    init_logging(&config.log_level, &log_dir).map_err(|err| anyhow::anyhow!(err))?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let today = Local::now().date_naive();
    let mut widget = CalendarWidget::mount(SqliteKvStore::new(&conn), &config.widget, today);
    report_notice(&mut widget);
    if let Some(month) = cli.month {
        widget.go_to(month);
    }

    let styled = std::io::stdout().is_terminal();
    let command = cli.command.unwrap_or(Commands::Show);
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&command)
    );

    match command {
        Commands::Show => println!("{}", render_month(widget.state(), styled)),
        Commands::Day { date } => {
            println!("{}", render_day(&widget.state().events_for_day(date)));
        }
        Commands::Add {
            date,
            name,
            start,
            end,
            description,
        } => {
            if cli.month.is_none() {
                widget.go_to(DateCursor::containing(date));
            }
            widget.click_day(date);
            fill_form(&mut widget, name, Some(start), Some(end), Some(description))?;
            if widget.submit() != Change::EventsChanged {
                bail!("event name cannot be empty");
            }
            report_notice(&mut widget);
            let added = widget
                .state()
                .store()
                .events()
                .last()
                .context("added event missing from store")?;
            println!("added #{} on {}", added.id, added.date);
        }
        Commands::Update {
            id,
            name,
            start,
            end,
            description,
        } => {
            widget.click_event(id);
            if widget.state().editor().editing_id() != Some(id) {
                bail!("no event with id {id}");
            }
            fill_form(&mut widget, name, start, end, description)?;
            if widget.submit() != Change::EventsChanged {
                bail!("event name cannot be empty");
            }
            report_notice(&mut widget);
            println!("updated #{id}");
        }
        Commands::Delete { id } => {
            if widget.delete_event(id) == Change::Unchanged {
                println!("no event with id {id}");
            } else {
                report_notice(&mut widget);
                println!("deleted #{id}");
            }
        }
        Commands::Shell => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            shell::run(&mut widget, stdin.lock(), &mut stdout, styled, || {
                Local::now().date_naive()
            })?;
        }
    }

    info!("event=cli_command module=cli status=ok");
    Ok(())
}

fn fill_form<S: KeyValueStore>(
    widget: &mut CalendarWidget<S>,
    name: String,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let form = widget
        .editor_mut()
        .form_mut()
        .context("event dialog did not open")?;
    form.name = name;
    if let Some(start) = start {
        form.start_time = start;
    }
    if let Some(end) = end {
        form.end_time = end;
    }
    if let Some(description) = description {
        form.description = description;
    }
    Ok(())
}

fn report_notice<S: KeyValueStore>(widget: &mut CalendarWidget<S>) {
    if let Some(notice) = widget.take_notice() {
        eprintln!("{} {notice}", "warning:".yellow());
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Show => "show",
        Commands::Day { .. } => "day",
        Commands::Add { .. } => "add",
        Commands::Update { .. } => "update",
        Commands::Delete { .. } => "delete",
        Commands::Shell => "shell",
    }
}
