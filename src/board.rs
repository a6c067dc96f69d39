//! The board: everything a calendar view displays, and the user actions it supports
//!
//! A [`Board`] owns the task store and writes it back to its [`TaskPersistence`] after every mutation.
//! It also tracks the view state (displayed period, search text, drag gesture) and the holidays of the displayed days.

use chrono::NaiveDate;

use crate::cell::{self, DayCell};
use crate::day::DayId;
use crate::drag::{DragEvent, DragOutcome, DragSession};
use crate::holiday::Holiday;
use crate::labels::LabelPicker;
use crate::range::{self, ViewMode};
use crate::search::SearchFilter;
use crate::store::TaskStore;
use crate::task::TaskId;
use crate::traits::{HolidaySource, TaskPersistence};


/// A pending holiday fetch.
///
/// Its result should only be applied if no newer fetch has been started in the meantime,
/// and the displayed period has not changed. [`Board::apply_holidays`] checks that.
#[derive(Clone, Debug, PartialEq)]
pub struct HolidayRequest {
    generation: u64,
    years: Vec<i32>,
}

impl HolidayRequest {
    pub fn generation(&self) -> u64 { self.generation }
    pub fn years(&self) -> &[i32]   { &self.years }

    /// Fetch the holidays of every requested year.
    ///
    /// A failing year is logged and contributes no holiday
    pub async fn run<H: HolidaySource>(self, source: &H) -> HolidayResponse {
        let mut holidays = Vec::new();
        for year in &self.years {
            match source.fetch_holidays(*year).await {
                Ok(fetched) => holidays.extend(fetched),
                Err(err) => log::warn!("Unable to fetch holidays for {}: {}", year, err),
            }
        }
        HolidayResponse { generation: self.generation, holidays }
    }
}

/// The result of a [`HolidayRequest`]
#[derive(Clone, Debug, PartialEq)]
pub struct HolidayResponse {
    generation: u64,
    holidays: Vec<Holiday>,
}

impl HolidayResponse {
    pub fn generation(&self) -> u64      { self.generation }
    pub fn holidays(&self) -> &[Holiday] { &self.holidays }
}


pub struct Board<P, H>
where
    P: TaskPersistence,
    H: HolidaySource,
{
    store: TaskStore,
    persistence: P,
    holiday_source: H,
    label_picker: LabelPicker,

    reference_date: NaiveDate,
    view_mode: ViewMode,
    search_text: String,
    search: SearchFilter,
    drag: DragSession,

    holidays: Vec<Holiday>,
    holiday_generation: u64,
    /// Whether `holidays` does not match the displayed range yet
    holidays_stale: bool,

    /// Non-blocking problems the user should be told about
    warnings: Vec<String>,
}

impl<P, H> Board<P, H>
where
    P: TaskPersistence,
    H: HolidaySource,
{
    /// Create a board that displays the month of `today`, with the tasks `persistence` holds
    pub fn new(mut persistence: P, holiday_source: H, today: NaiveDate) -> Self {
        let store = persistence.load();
        log::info!("Board opened with {} tasks", store.task_count());

        Self {
            store,
            persistence,
            holiday_source,
            label_picker: LabelPicker::new(),
            reference_date: today,
            view_mode: ViewMode::default(),
            search_text: String::new(),
            search: SearchFilter::default(),
            drag: DragSession::new(),
            holidays: Vec::new(),
            holiday_generation: 0,
            holidays_stale: true,
            warnings: Vec::new(),
        }
    }

    /// Replace the label picker, e.g. with a seeded one
    pub fn with_label_picker(mut self, label_picker: LabelPicker) -> Self {
        self.label_picker = label_picker;
        self
    }

    pub fn store(&self) -> &TaskStore           { &self.store }
    pub fn persistence(&self) -> &P             { &self.persistence }
    pub fn persistence_mut(&mut self) -> &mut P { &mut self.persistence }
    pub fn holiday_source(&self) -> &H          { &self.holiday_source }
    pub fn reference_date(&self) -> NaiveDate   { self.reference_date }
    pub fn view_mode(&self) -> ViewMode         { self.view_mode }
    pub fn search_text(&self) -> &str           { &self.search_text }
    pub fn drag(&self) -> &DragSession          { &self.drag }
    pub fn holidays(&self) -> &[Holiday]        { &self.holidays }

    /// e.g. `March 2024` or `Week of March 3, 2024`
    pub fn title(&self) -> String {
        range::title(self.reference_date, self.view_mode)
    }

    /// The days currently displayed
    pub fn days(&self) -> Vec<DayId> {
        range::generate_range(self.reference_date, self.view_mode)
    }

    /// The cells to render: every displayed day, its tasks matching the search, and its holidays
    pub fn day_cells(&self) -> Vec<DayCell> {
        let cells = cell::build_cells(&self.store, &self.search, self.reference_date, self.view_mode);
        cell::attach_holidays(cells, &self.holidays)
    }

    /// Returns and forgets the warnings that happened since the last call
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }


    //
    // Navigation
    //

    /// Move to the next month or week.
    ///
    /// This does not fetch the holidays of the new range: the caller should then call
    /// [`refresh_holidays`](Self::refresh_holidays) (or go through [`begin_holiday_fetch`](Self::begin_holiday_fetch)),
    /// see [`needs_holiday_refresh`](Self::needs_holiday_refresh)
    pub fn next_period(&mut self) {
        let date = range::next_period(self.reference_date, self.view_mode);
        self.set_reference_date(date);
    }

    /// Move to the previous month or week. Same as [`next_period`](Self::next_period), holidays must then be refreshed
    pub fn previous_period(&mut self) {
        let date = range::previous_period(self.reference_date, self.view_mode);
        self.set_reference_date(date);
    }

    /// Display the period that contains `date`. Holidays must then be refreshed, in case the range changed
    pub fn set_reference_date(&mut self, date: NaiveDate) {
        if date == self.reference_date {
            return;
        }
        self.reference_date = date;
        self.range_changed();
    }

    /// Switching to week view moves to the first day of the displayed week.
    ///
    /// Like every navigation, this clears the displayed holidays without fetching new ones:
    /// call [`refresh_holidays`](Self::refresh_holidays) afterwards
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        self.view_mode = mode;
        if mode == ViewMode::Week {
            self.reference_date = range::start_of_week(self.reference_date);
        }
        self.range_changed();
    }

    /// Only show tasks whose text contains `text` (case-insensitive). This is not persisted
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.search = SearchFilter::from_text(text);
    }

    /// Holidays of the previous range are not displayed anymore, and pending fetches are now stale
    fn range_changed(&mut self) {
        self.holidays.clear();
        self.holidays_stale = true;
        self.holiday_generation += 1;
    }

    /// Whether the displayed holidays do not match the displayed range, because the board has just been opened or the range has changed
    /// and no fetch has been applied since
    pub fn needs_holiday_refresh(&self) -> bool {
        self.holidays_stale
    }


    //
    // Task edition
    //

    /// Create a task at the end of a day, with a few random labels.
    /// Returns `None` in case the text is empty
    pub fn add_task(&mut self, text: &str, day: DayId) -> Option<TaskId> {
        let labels = self.label_picker.next_labels();
        let id = self.store.add_task(text, day, labels)?;
        self.persist();
        Some(id)
    }

    pub fn edit_task(&mut self, day: &DayId, id: &TaskId, new_text: &str) -> bool {
        self.persist_if(|store| store.edit_task(day, id, new_text))
    }

    pub fn delete_task(&mut self, day: &DayId, id: &TaskId) -> bool {
        self.persist_if(|store| store.delete_task(day, id).is_some())
    }

    pub fn reorder_day(&mut self, day: &DayId, new_order: &[TaskId]) -> bool {
        self.persist_if(|store| store.reorder_day(day, new_order))
    }

    pub fn move_task(&mut self, id: &TaskId, source: &DayId, target: &DayId) -> bool {
        self.persist_if(|store| store.move_task(id, source, target))
    }

    /// Feed a drag-and-drop event. Drops are applied (and persisted) immediately
    pub fn handle_drag(&mut self, event: DragEvent) -> DragOutcome {
        let outcome = self.drag.handle(event, &mut self.store);
        log::debug!("Drag event: {}", outcome);
        if outcome.is_mutation() {
            self.persist();
        }
        outcome
    }

    fn persist_if<F>(&mut self, mutation: F) -> bool
    where
        F: FnOnce(&mut TaskStore) -> bool,
    {
        let changed = mutation(&mut self.store);
        if changed {
            self.persist();
        }
        changed
    }

    /// Write the store back. Failures do not undo the in-memory change, but are reported as warnings
    fn persist(&mut self) {
        if let Err(err) = self.persistence.save(&self.store) {
            let warning = format!("Unable to save tasks: {}. Recent changes may be lost when leaving.", err);
            log::warn!("{}", warning);
            self.warnings.push(warning);
        }
    }


    //
    // Holidays
    //

    /// Start fetching the holidays of the displayed range. Any previous pending fetch becomes stale
    pub fn begin_holiday_fetch(&mut self) -> HolidayRequest {
        self.holiday_generation += 1;
        HolidayRequest {
            generation: self.holiday_generation,
            years: range::years_covered(self.reference_date, self.view_mode),
        }
    }

    /// Display the fetched holidays, unless the response is stale.
    /// Returns whether they have been applied
    pub fn apply_holidays(&mut self, response: HolidayResponse) -> bool {
        if response.generation != self.holiday_generation {
            log::debug!("Discarding stale holidays (request {}, current {})", response.generation, self.holiday_generation);
            return false;
        }
        self.holidays = response.holidays;
        self.holidays_stale = false;
        true
    }

    /// Fetch and display the holidays of the displayed range.
    /// Failures are logged, and result in days with no holiday
    pub async fn refresh_holidays(&mut self) -> bool {
        let request = self.begin_holiday_fetch();
        let response = request.run(&self.holiday_source).await;
        self.apply_holidays(response)
    }
}
