mod calendar;
mod config;
mod events;
mod holidays;
mod storage;
mod ui;

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::calendar::Cursor;
use crate::config::{load_config, resolve_store_path, Config};
use crate::events::EventStore;
use crate::holidays::{HolidayCache, HolidayFetcher};
use crate::storage::{load_events, save_events};
use crate::ui::{run_calendar, ViewKind};

#[derive(Debug, Parser)]
#[command(name = "kalender", about = "Terminal calendar with Indonesian public holidays")]
struct Cli {
	#[arg(long)]
	store: Option<PathBuf>,
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	Month {
		#[arg(long)]
		month: Option<u32>,
		#[arg(long)]
		year: Option<i32>,
	},
	Year {
		#[arg(long)]
		year: Option<i32>,
	},
	Holidays {
		#[arg(long)]
		year: Option<i32>,
	},
	AddEvent {
		#[arg(long)]
		date: String,
		#[arg(long)]
		text: String,
	},
	DeleteEvent {
		#[arg(long)]
		date: String,
		#[arg(long)]
		index: usize,
	},
	Events {
		#[arg(long)]
		date: Option<String>,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();
	let config = load_config().unwrap_or_else(|err| {
		eprintln!("warning: failed to read config, using defaults: {err}");
		Config::default()
	});
	let store_path = resolve_store_path(cli.store, &config);

	match cli.command.unwrap_or(Command::Month {
		month: None,
		year: None,
	}) {
		Command::Month { month, year } => {
			let cursor = Cursor::from_params(month, year);
			run_calendar(ViewKind::Month, cursor, store_path, config.api_url)
		}
		Command::Year { year } => {
			let cursor = Cursor::from_params(None, year);
			run_calendar(ViewKind::Year, cursor, store_path, config.api_url)
		}
		Command::Holidays { year } => print_holidays(&config.api_url, year),
		Command::AddEvent { date, text } => {
			let date = parse_date(&date)?;
			let mut store = load_store_or_warn(&store_path);
			if store.add_event(date, &text) {
				save_events(&store_path, &store)?;
				println!("added event for {date}");
			} else {
				println!("ignored empty event text");
			}
			Ok(())
		}
		Command::DeleteEvent { date, index } => {
			let date = parse_date(&date)?;
			let mut store = load_store_or_warn(&store_path);
			let removed = store.delete_event(date, index)?;
			save_events(&store_path, &store)?;
			println!("deleted event for {date}: {removed}");
			Ok(())
		}
		Command::Events { date } => {
			print_events(&store_path, date.as_deref())
		}
	}
}

fn print_holidays(api_url: &str, year: Option<i32>) -> Result<(), Box<dyn Error>> {
	let year = year.unwrap_or_else(|| Local::now().year());
	let fetcher = HolidayFetcher::new(api_url.to_string())?;
	let mut cache = HolidayCache::new();
	if let Some(err) = fetcher.populate_year_merged(&mut cache, year) {
		eprintln!("warning: remote holidays unavailable, using local data: {err}");
	}

	let entries = cache.entries_for_year(year);
	if entries.is_empty() {
		println!("no holidays recorded for {year}");
		return Ok(());
	}

	for (date, name) in entries {
		println!("{date}  {name}");
	}

	Ok(())
}

fn print_events(store_path: &Path, date: Option<&str>) -> Result<(), Box<dyn Error>> {
	let store = load_store_or_warn(store_path);

	if let Some(raw) = date {
		let date = parse_date(raw)?;
		let events = store.events_for(date);
		if events.is_empty() {
			println!("no events for {date}");
			return Ok(());
		}
		for (index, event) in events.iter().enumerate() {
			println!("{index:>2}. {event}");
		}
		return Ok(());
	}

	if store.is_empty() {
		println!("no events recorded");
		return Ok(());
	}

	for (date, events) in store.iter() {
		for event in events {
			println!("{date}  {event}");
		}
	}

	Ok(())
}

fn load_store_or_warn(path: &Path) -> EventStore {
	match load_events(path) {
		Ok(store) => store,
		Err(err) => {
			eprintln!("warning: failed to read event store, starting empty: {err}");
			EventStore::new()
		}
	}
}

fn parse_date(input: &str) -> Result<NaiveDate, Box<dyn Error>> {
	Ok(NaiveDate::parse_from_str(input, "%Y-%m-%d")?)
}
