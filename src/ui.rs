use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use chrono::{Datelike, Local, NaiveDate, Weekday};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use crate::calendar::{days_in_month, is_weekend, month_grid, month_name, Cursor, MONTH_NAMES, WEEKDAY_HEADER};
use crate::events::EventStore;
use crate::holidays::{HolidayCache, HolidayFetcher};
use crate::storage::{load_events, save_events};

// Range offered by the year selector; the bundled data covers it.
const YEAR_SELECT_MIN: i32 = 2020;
const YEAR_SELECT_MAX: i32 = 2025;

const FOCUSED_BLOCK_BORDER_COLOR: Color = Color::Yellow;
const INACTIVE_BLOCK_BORDER_COLOR: Color = Color::DarkGray;
const HIGHLIGHT_BACKGROUND_COLOR: Color = Color::Rgb(42, 45, 52);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
	Month,
	Year,
}

pub fn run_calendar(
	view: ViewKind,
	cursor: Cursor,
	store_path: PathBuf,
	api_url: String,
) -> Result<(), Box<dyn Error>> {
	let fetcher = HolidayFetcher::new(api_url)?;
	let mut store = load_events(&store_path).unwrap_or_else(|err| {
		eprintln!("warning: failed to read event store, starting empty: {err}");
		EventStore::new()
	});
	let mut cache = HolidayCache::new();
	let mut app = App::new(view, cursor);

	// Holidays for the starting year load before the first render.
	match app.view {
		ViewKind::Month => ensure_month_holidays(&mut app, &mut cache, &fetcher),
		ViewKind::Year => refresh_year_holidays(&mut app, &mut cache, &fetcher),
	}

	enable_raw_mode()?;
	let mut stdout = io::stdout();
	stdout.execute(EnterAlternateScreen)?;
	let backend = CrosstermBackend::new(stdout);
	let mut terminal = Terminal::new(backend)?;

	let result = run_event_loop(&mut terminal, &mut app, &mut store, &store_path, &mut cache, &fetcher);

	disable_raw_mode()?;
	execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
	terminal.show_cursor()?;

	result
}

fn run_event_loop(
	terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
	app: &mut App,
	store: &mut EventStore,
	store_path: &Path,
	cache: &mut HolidayCache,
	fetcher: &HolidayFetcher,
) -> Result<(), Box<dyn Error>> {
	loop {
		app.clamp_popup_selection(store);
		let view = build_view(app, store, store_path, cache);
		terminal.draw(|frame| draw(frame, app, &view))?;

		if event::poll(StdDuration::from_millis(250))? {
			if let CEvent::Key(key) = event::read()? {
				if key.kind != KeyEventKind::Press {
					continue;
				}

				let should_quit = match &app.mode {
					InputMode::Popup(_) => handle_popup_key(app, key.code, store, store_path),
					InputMode::MonthSelect(_) => handle_month_select_key(app, key.code, cache, fetcher),
					InputMode::Normal => handle_normal_key(app, key.code, cache, fetcher),
				};

				if should_quit {
					break;
				}
			}
		}
	}

	Ok(())
}

fn draw(frame: &mut Frame, app: &App, view: &ViewModel) {
	match view {
		ViewModel::Month(month) => draw_month(frame, app, month),
		ViewModel::Year(year) => draw_year(frame, app, year),
	}

	match &app.mode {
		InputMode::Popup(popup) => {
			if let ViewModel::Month(month) = view {
				render_event_popup(frame, popup, &month.detail);
			}
		}
		InputMode::MonthSelect(select) => render_month_select(frame, select),
		InputMode::Normal => {}
	}
}

fn draw_month(frame: &mut Frame, app: &App, view: &MonthViewModel) {
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Length(10), Constraint::Min(6), Constraint::Length(4)])
		.split(frame.area());

	render_month_grid(frame, layout[0], view);
	render_day_detail(frame, layout[1], &view.detail);
	render_footer(frame, layout[2], app);
}

fn render_month_grid(frame: &mut Frame, area: Rect, view: &MonthViewModel) {
	let mut lines = Vec::new();
	let header = WEEKDAY_HEADER
		.iter()
		.map(|letter| format!("{letter:>2}  "))
		.collect::<String>();
	lines.push(Line::from(Span::styled(
		header,
		Style::default().add_modifier(Modifier::BOLD),
	)));

	for week in &view.weeks {
		let mut spans = Vec::new();
		for cell in week {
			let Some(day) = cell.day else {
				spans.push(Span::raw("    "));
				continue;
			};

			let mut style = Style::default();
			if cell.is_weekend {
				style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
			}
			if cell.is_holiday {
				style = style.fg(Color::LightRed).add_modifier(Modifier::BOLD);
			}
			if cell.is_selected {
				style = Style::default()
					.fg(Color::Black)
					.bg(Color::Yellow)
					.add_modifier(Modifier::BOLD);
			}

			spans.push(Span::styled(format!("{day:>2}"), style));
			spans.push(Span::styled(
				if cell.has_events { "*" } else { " " },
				Style::default().fg(Color::Yellow),
			));
			spans.push(Span::raw(" "));
		}
		lines.push(Line::from(spans));
	}

	let grid = Paragraph::new(lines).block(
		Block::default()
			.borders(Borders::ALL)
			.title(view.title.clone()),
	);
	frame.render_widget(grid, area);
}

fn render_day_detail(frame: &mut Frame, area: Rect, detail: &DayDetail) {
	let mut lines = Vec::new();
	if let Some(holiday) = &detail.holiday {
		lines.push(Line::from(Span::styled(
			format!("Holiday: {holiday}"),
			Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
		)));
	}

	if detail.events.is_empty() {
		lines.push(Line::from("(no events)"));
	} else {
		for event in &detail.events {
			lines.push(Line::from(format!("- {event}")));
		}
	}

	let title = format!(
		"{} {} {}",
		detail.date.day(),
		month_name(detail.date.month()),
		detail.date.year()
	);
	let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
	frame.render_widget(panel, area);
}

fn draw_year(frame: &mut Frame, app: &App, view: &YearViewModel) {
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Length(1),
			Constraint::Min(23),
			Constraint::Length(4),
		])
		.split(frame.area());

	let year_line = Paragraph::new(Line::from(Span::styled(
		format!("Tahun {}", view.year),
		Style::default().add_modifier(Modifier::BOLD),
	)));
	frame.render_widget(year_line, layout[0]);

	let rows = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Ratio(1, 3),
			Constraint::Ratio(1, 3),
			Constraint::Ratio(1, 3),
		])
		.split(layout[1]);

	for (row_index, row_area) in rows.iter().enumerate() {
		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([
				Constraint::Ratio(1, 4),
				Constraint::Ratio(1, 4),
				Constraint::Ratio(1, 4),
				Constraint::Ratio(1, 4),
			])
			.split(*row_area);

		for (column_index, column_area) in columns.iter().enumerate() {
			let month_index = row_index * 4 + column_index;
			if let Some(block) = view.months.get(month_index) {
				render_month_block(frame, *column_area, block);
			}
		}
	}

	render_footer(frame, layout[2], app);
}

fn render_month_block(frame: &mut Frame, area: Rect, block: &MonthBlock) {
	let mut lines = Vec::new();
	let header = WEEKDAY_HEADER
		.iter()
		.map(|letter| format!("{letter:>2} "))
		.collect::<String>();
	lines.push(Line::from(Span::styled(
		header,
		Style::default().add_modifier(Modifier::BOLD),
	)));

	for week in &block.weeks {
		let mut spans = Vec::new();
		for cell in week {
			let Some(day) = cell.day else {
				spans.push(Span::raw("   "));
				continue;
			};

			// Tags stack; the holiday color wins, events only underline.
			let mut style = Style::default();
			if cell.is_saturday || cell.is_sunday {
				style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
			}
			if cell.is_holiday {
				style = style.fg(Color::LightRed).add_modifier(Modifier::BOLD);
			}
			if cell.is_eventday {
				style = style.add_modifier(Modifier::UNDERLINED);
			}

			spans.push(Span::styled(format!("{day:>2}"), style));
			spans.push(Span::raw(" "));
		}
		lines.push(Line::from(spans));
	}

	let panel = Paragraph::new(lines).block(
		Block::default()
			.borders(Borders::ALL)
			.title(block.label.clone())
			.border_style(border_style(block.focused)),
	);
	frame.render_widget(panel, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
	let footer_lines = match &app.mode {
		InputMode::Normal => {
			let keys = match app.view {
				ViewKind::Month => {
					"arrows/hjkl select day | n/N next/prev month | m pick month | y yearly view | Enter events | q quit"
				}
				ViewKind::Year => {
					"arrows/hjkl pick month | +/- change year (2020-2025) | Enter open month | t monthly view | q quit"
				}
			};
			vec![Line::from(keys), Line::from(app.status.clone())]
		}
		InputMode::Popup(_) => vec![
			Line::from("type to compose | Enter save | Up/Down select | Del delete entry | Esc close"),
			Line::from(app.status.clone()),
		],
		InputMode::MonthSelect(_) => vec![
			Line::from("j/k or arrows move | Enter choose | Esc cancel"),
			Line::from(app.status.clone()),
		],
	};

	let footer = Paragraph::new(footer_lines)
		.block(Block::default().borders(Borders::ALL).title("Shortcuts"));
	frame.render_widget(footer, area);
}

fn render_event_popup(frame: &mut Frame, popup: &PopupState, detail: &DayDetail) {
	let area = centered_rect(56, 60, frame.area());
	frame.render_widget(Clear, area);

	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Min(4), Constraint::Length(3)])
		.split(area);

	let items = if detail.events.is_empty() {
		vec![ListItem::new("(no events yet)")]
	} else {
		detail
			.events
			.iter()
			.map(|event| ListItem::new(event.clone()))
			.collect::<Vec<_>>()
	};

	let list = List::new(items)
		.block(
			Block::default()
				.borders(Borders::ALL)
				.title(format!("Events {}", popup.date)),
		)
		.highlight_symbol(">> ")
		.highlight_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR));

	let mut state = ListState::default();
	if !detail.events.is_empty() {
		state.select(Some(popup.selected.min(detail.events.len() - 1)));
	}
	frame.render_stateful_widget(list, layout[0], &mut state);

	let input = Paragraph::new(format!("> {}", popup.input))
		.block(Block::default().borders(Borders::ALL).title("New event"));
	frame.render_widget(input, layout[1]);
}

fn render_month_select(frame: &mut Frame, select: &MonthSelectState) {
	let area = centered_rect(40, 60, frame.area());
	frame.render_widget(Clear, area);

	let items = MONTH_NAMES
		.iter()
		.map(|name| ListItem::new(*name))
		.collect::<Vec<_>>();
	let list = List::new(items)
		.block(Block::default().borders(Borders::ALL).title("Pick month"))
		.highlight_symbol(">> ")
		.highlight_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR));

	let mut state = ListState::default();
	state.select(Some(select.selected.min(MONTH_NAMES.len() - 1)));
	frame.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
	let popup_layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Percentage((100 - percent_y) / 2),
			Constraint::Percentage(percent_y),
			Constraint::Percentage((100 - percent_y) / 2),
		])
		.split(area);
	Layout::default()
		.direction(Direction::Horizontal)
		.constraints([
			Constraint::Percentage((100 - percent_x) / 2),
			Constraint::Percentage(percent_x),
			Constraint::Percentage((100 - percent_x) / 2),
		])
		.split(popup_layout[1])[1]
}

fn border_style(focused: bool) -> Style {
	if focused {
		Style::default()
			.fg(FOCUSED_BLOCK_BORDER_COLOR)
			.add_modifier(Modifier::BOLD)
	} else {
		Style::default().fg(INACTIVE_BLOCK_BORDER_COLOR)
	}
}

fn handle_normal_key(
	app: &mut App,
	code: KeyCode,
	cache: &mut HolidayCache,
	fetcher: &HolidayFetcher,
) -> bool {
	match app.view {
		ViewKind::Month => handle_month_key(app, code, cache, fetcher),
		ViewKind::Year => handle_year_key(app, code, cache, fetcher),
	}
}

fn handle_month_key(
	app: &mut App,
	code: KeyCode,
	cache: &mut HolidayCache,
	fetcher: &HolidayFetcher,
) -> bool {
	match code {
		KeyCode::Char('q') | KeyCode::Esc => true,
		KeyCode::Left | KeyCode::Char('h') => {
			app.move_selected_day(-1);
			false
		}
		KeyCode::Right | KeyCode::Char('l') => {
			app.move_selected_day(1);
			false
		}
		KeyCode::Up | KeyCode::Char('k') => {
			app.move_selected_day(-7);
			false
		}
		KeyCode::Down | KeyCode::Char('j') => {
			app.move_selected_day(7);
			false
		}
		KeyCode::Char('n') | KeyCode::PageDown => {
			navigate(app, 1, cache, fetcher);
			false
		}
		KeyCode::Char('N') | KeyCode::Char('p') | KeyCode::PageUp => {
			navigate(app, -1, cache, fetcher);
			false
		}
		KeyCode::Char('m') => {
			app.mode = InputMode::MonthSelect(MonthSelectState {
				selected: app.cursor.month as usize - 1,
			});
			false
		}
		KeyCode::Char('y') => {
			app.view = ViewKind::Year;
			app.focused_month = app.cursor.month as usize - 1;
			refresh_year_holidays(app, cache, fetcher);
			false
		}
		KeyCode::Enter => {
			if let Some(date) = app.selected_date() {
				app.mode = InputMode::Popup(PopupState {
					date,
					selected: 0,
					input: String::new(),
				});
			}
			false
		}
		_ => false,
	}
}

fn handle_year_key(
	app: &mut App,
	code: KeyCode,
	cache: &mut HolidayCache,
	fetcher: &HolidayFetcher,
) -> bool {
	match code {
		KeyCode::Char('q') | KeyCode::Esc => true,
		KeyCode::Left | KeyCode::Char('h') => {
			app.move_focused_month(-1);
			false
		}
		KeyCode::Right | KeyCode::Char('l') => {
			app.move_focused_month(1);
			false
		}
		KeyCode::Up | KeyCode::Char('k') => {
			app.move_focused_month(-4);
			false
		}
		KeyCode::Down | KeyCode::Char('j') => {
			app.move_focused_month(4);
			false
		}
		KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::PageDown => {
			select_year(app, app.cursor.year + 1, cache, fetcher);
			false
		}
		KeyCode::Char('-') | KeyCode::PageUp => {
			select_year(app, app.cursor.year - 1, cache, fetcher);
			false
		}
		KeyCode::Enter => {
			open_month_view(app, app.focused_month as u32 + 1, cache, fetcher);
			false
		}
		KeyCode::Char('t') => {
			// The mode toggle always lands on January.
			open_month_view(app, 1, cache, fetcher);
			false
		}
		_ => false,
	}
}

fn handle_month_select_key(
	app: &mut App,
	code: KeyCode,
	cache: &mut HolidayCache,
	fetcher: &HolidayFetcher,
) -> bool {
	match code {
		KeyCode::Esc => {
			app.mode = InputMode::Normal;
		}
		KeyCode::Up | KeyCode::Char('k') => {
			if let InputMode::MonthSelect(select) = &mut app.mode {
				select.selected = select.selected.saturating_sub(1);
			}
		}
		KeyCode::Down | KeyCode::Char('j') => {
			if let InputMode::MonthSelect(select) = &mut app.mode {
				select.selected = (select.selected + 1).min(MONTH_NAMES.len() - 1);
			}
		}
		KeyCode::Enter => {
			let select = match std::mem::replace(&mut app.mode, InputMode::Normal) {
				InputMode::MonthSelect(select) => select,
				_ => return false,
			};
			app.cursor.set_month(select.selected as u32 + 1);
			app.clamp_selected_day();
			ensure_month_holidays(app, cache, fetcher);
		}
		_ => {}
	}

	false
}

fn handle_popup_key(app: &mut App, code: KeyCode, store: &mut EventStore, store_path: &Path) -> bool {
	match code {
		KeyCode::Esc => {
			// Closing never persists anything.
			app.mode = InputMode::Normal;
		}
		KeyCode::Up => {
			if let InputMode::Popup(popup) = &mut app.mode {
				popup.selected = popup.selected.saturating_sub(1);
			}
		}
		KeyCode::Down => {
			let len = match &app.mode {
				InputMode::Popup(popup) => store.events_for(popup.date).len(),
				_ => 0,
			};
			if let InputMode::Popup(popup) = &mut app.mode {
				popup.selected = (popup.selected + 1).min(len.saturating_sub(1));
			}
		}
		KeyCode::Backspace => {
			if let InputMode::Popup(popup) = &mut app.mode {
				popup.input.pop();
			}
		}
		KeyCode::Delete => {
			let (date, index) = match &app.mode {
				InputMode::Popup(popup) => (popup.date, popup.selected),
				_ => return false,
			};
			match store.delete_event(date, index) {
				Ok(removed) => {
					app.status = match persist(store_path, store) {
						Ok(()) => format!("deleted event: {removed}"),
						Err(err) => format!("error: {err}"),
					};
				}
				Err(err) => app.status = err,
			}
		}
		KeyCode::Enter => {
			let (date, text) = match &mut app.mode {
				InputMode::Popup(popup) => {
					let text = popup.input.trim().to_string();
					popup.input.clear();
					(popup.date, text)
				}
				_ => return false,
			};
			// Whitespace-only input is silently ignored.
			if !text.is_empty() && store.add_event(date, &text) {
				app.status = match persist(store_path, store) {
					Ok(()) => format!("added event for {date}"),
					Err(err) => format!("error: {err}"),
				};
			}
		}
		KeyCode::Char(value) => {
			if let InputMode::Popup(popup) = &mut app.mode {
				popup.input.push(value);
			}
		}
		_ => {}
	}

	false
}

fn navigate(app: &mut App, delta_months: i32, cache: &mut HolidayCache, fetcher: &HolidayFetcher) {
	app.cursor.shift(delta_months);
	app.clamp_selected_day();
	ensure_month_holidays(app, cache, fetcher);
}

fn select_year(app: &mut App, year: i32, cache: &mut HolidayCache, fetcher: &HolidayFetcher) {
	app.cursor.year = year.clamp(YEAR_SELECT_MIN, YEAR_SELECT_MAX);
	refresh_year_holidays(app, cache, fetcher);
}

fn open_month_view(app: &mut App, month: u32, cache: &mut HolidayCache, fetcher: &HolidayFetcher) {
	app.view = ViewKind::Month;
	app.cursor.set_month(month);
	app.selected_day = 1;
	ensure_month_holidays(app, cache, fetcher);
}

// Month view fetches at most once per year; a failure leaves the cache
// untouched so the next navigation into this year retries.
fn ensure_month_holidays(app: &mut App, cache: &mut HolidayCache, fetcher: &HolidayFetcher) {
	if cache.contains_year(app.cursor.year) {
		return;
	}

	match fetcher.populate_year(cache, app.cursor.year) {
		Ok(()) => {}
		Err(err) => app.status = format!("holiday data unavailable for {}: {err}", app.cursor.year),
	}
}

// Year view refetches on every selection and merges in the bundled data.
fn refresh_year_holidays(app: &mut App, cache: &mut HolidayCache, fetcher: &HolidayFetcher) {
	if let Some(err) = fetcher.populate_year_merged(cache, app.cursor.year) {
		app.status = format!("remote holidays unavailable, using local data: {err}");
	}
}

fn persist(path: &Path, store: &EventStore) -> Result<(), String> {
	save_events(path, store).map_err(|err| err.to_string())
}

fn build_view(app: &App, store: &EventStore, store_path: &Path, cache: &HolidayCache) -> ViewModel {
	match app.view {
		ViewKind::Month => ViewModel::Month(build_month_view(
			app.cursor,
			app.selected_day,
			cache,
			store,
		)),
		ViewKind::Year => {
			// The yearly tables re-read the store from disk on every render.
			let fresh = load_events(store_path).unwrap_or_else(|_| EventStore::new());
			ViewModel::Year(build_year_view(
				app.cursor.year,
				app.focused_month,
				cache,
				&fresh,
			))
		}
	}
}

fn build_month_view(
	cursor: Cursor,
	selected_day: u32,
	cache: &HolidayCache,
	store: &EventStore,
) -> MonthViewModel {
	let weeks = month_grid(cursor.year, cursor.month)
		.into_iter()
		.map(|week| {
			week.into_iter()
				.map(|day| {
					let Some(day) = day else {
						return DayCell::default();
					};
					let date = NaiveDate::from_ymd_opt(cursor.year, cursor.month, day)
						.expect("grid day must be valid");
					DayCell {
						day: Some(day),
						is_weekend: is_weekend(date),
						is_holiday: cache.holiday_name(date).is_some(),
						has_events: store.has_events(date),
						is_selected: day == selected_day,
					}
				})
				.collect::<Vec<_>>()
		})
		.collect::<Vec<_>>();

	let date = NaiveDate::from_ymd_opt(
		cursor.year,
		cursor.month,
		selected_day.min(days_in_month(cursor.year, cursor.month)),
	)
	.expect("selected day must be valid");
	let detail = DayDetail {
		date,
		holiday: cache.holiday_name(date).map(str::to_string),
		events: store.events_for(date).to_vec(),
	};

	MonthViewModel {
		title: cursor.title(),
		weeks,
		detail,
	}
}

fn build_year_view(
	year: i32,
	focused_month: usize,
	cache: &HolidayCache,
	store: &EventStore,
) -> YearViewModel {
	let months = (1..=12u32)
		.map(|month| {
			let weeks = month_grid(year, month)
				.into_iter()
				.map(|week| {
					week.into_iter()
						.map(|day| {
							let Some(day) = day else {
								return YearDayCell::default();
							};
							let date = NaiveDate::from_ymd_opt(year, month, day)
								.expect("grid day must be valid");
							YearDayCell {
								day: Some(day),
								is_sunday: date.weekday() == Weekday::Sun,
								is_saturday: date.weekday() == Weekday::Sat,
								is_holiday: cache.holiday_name(date).is_some(),
								is_eventday: store.has_events(date),
							}
						})
						.collect::<Vec<_>>()
				})
				.collect::<Vec<_>>();

			MonthBlock {
				label: format!("{} {}", month_name(month), year),
				weeks,
				focused: month as usize - 1 == focused_month,
			}
		})
		.collect::<Vec<_>>();

	YearViewModel { year, months }
}

#[derive(Debug, Clone)]
enum InputMode {
	Normal,
	Popup(PopupState),
	MonthSelect(MonthSelectState),
}

#[derive(Debug, Clone)]
struct PopupState {
	date: NaiveDate,
	selected: usize,
	input: String,
}

#[derive(Debug, Clone)]
struct MonthSelectState {
	selected: usize,
}

#[derive(Debug)]
struct App {
	view: ViewKind,
	cursor: Cursor,
	selected_day: u32,
	focused_month: usize,
	mode: InputMode,
	status: String,
}

impl App {
	fn new(view: ViewKind, cursor: Cursor) -> Self {
		let today = Local::now().date_naive();
		let selected_day = if cursor.year == today.year() && cursor.month == today.month() {
			today.day()
		} else {
			1
		};

		Self {
			view,
			cursor,
			selected_day,
			focused_month: cursor.month as usize - 1,
			mode: InputMode::Normal,
			status: "Ready".to_string(),
		}
	}

	fn selected_date(&self) -> Option<NaiveDate> {
		NaiveDate::from_ymd_opt(self.cursor.year, self.cursor.month, self.selected_day)
	}

	fn move_selected_day(&mut self, delta_days: i64) {
		let day_count = days_in_month(self.cursor.year, self.cursor.month) as i64;
		let next = (self.selected_day as i64 + delta_days).clamp(1, day_count);
		self.selected_day = next as u32;
	}

	fn clamp_selected_day(&mut self) {
		let day_count = days_in_month(self.cursor.year, self.cursor.month);
		self.selected_day = self.selected_day.clamp(1, day_count);
	}

	fn move_focused_month(&mut self, delta: i32) {
		let next = self.focused_month as i32 + delta;
		self.focused_month = next.clamp(0, 11) as usize;
	}

	fn clamp_popup_selection(&mut self, store: &EventStore) {
		if let InputMode::Popup(popup) = &mut self.mode {
			let len = store.events_for(popup.date).len();
			popup.selected = popup.selected.min(len.saturating_sub(1));
		}
	}
}

enum ViewModel {
	Month(MonthViewModel),
	Year(YearViewModel),
}

struct MonthViewModel {
	title: String,
	weeks: Vec<Vec<DayCell>>,
	detail: DayDetail,
}

#[derive(Debug, Clone, Default)]
struct DayCell {
	day: Option<u32>,
	is_weekend: bool,
	is_holiday: bool,
	has_events: bool,
	is_selected: bool,
}

struct DayDetail {
	date: NaiveDate,
	holiday: Option<String>,
	events: Vec<String>,
}

struct YearViewModel {
	year: i32,
	months: Vec<MonthBlock>,
}

struct MonthBlock {
	label: String,
	weeks: Vec<Vec<YearDayCell>>,
	focused: bool,
}

#[derive(Debug, Clone, Default)]
struct YearDayCell {
	day: Option<u32>,
	is_sunday: bool,
	is_saturday: bool,
	is_holiday: bool,
	is_eventday: bool,
}
