//! The date-range picker state machine.
//!
//! One tagged union (`PickerState`) instead of a pile of independent
//! booleans, so impossible view combinations cannot be represented. All
//! mutation goes through the event methods on [`RangePicker`]; invalid
//! inputs are ignored the way a disabled button would be, never reported
//! as errors.

use crate::presets::{self, Preset};
use crate::selection::{DateRange, DateSelection, Precision, days_in_month};
use chrono::NaiveDate;

/// Which end of the custom range is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

/// Drill-down level of the active sub-picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    YearSelect,
    MonthSelect,
    DaySelect,
}

/// The whole view state of the picker panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Closed,
    Presets,
    Custom { endpoint: Endpoint, step: Step },
}

/// Stateful range picker: panel state, the two in-progress selections, and
/// the committed range list.
///
/// Selections are built incrementally (year, then month, then day, stopping
/// at any level) and only become a committed [`DateRange`] on
/// [`apply`](Self::apply) or a preset pick. The committed list never holds
/// an inverted range: year picks snap forward and earlier months/days are
/// rejected by the guard predicates, so inversion is unrepresentable rather
/// than validated after the fact.
#[derive(Debug, Default)]
pub struct RangePicker {
    state: PickerState,
    from: DateSelection,
    to: DateSelection,
    committed: Vec<DateRange>,
}

impl RangePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn from_selection(&self) -> &DateSelection {
        &self.from
    }

    pub fn to_selection(&self) -> &DateSelection {
        &self.to
    }

    /// The active range list the date filter stage reads.
    pub fn ranges(&self) -> &[DateRange] {
        &self.committed
    }

    /// Opens the panel on the preset list.
    pub fn open(&mut self) {
        if self.state == PickerState::Closed {
            self.state = PickerState::Presets;
        }
    }

    /// Switches from the preset list to the custom range builder, starting
    /// on the `from` year grid.
    pub fn custom(&mut self) {
        if self.state == PickerState::Presets {
            self.state = PickerState::Custom {
                endpoint: Endpoint::From,
                step: Step::YearSelect,
            };
        }
    }

    /// Switches the custom builder to the other endpoint, resuming at the
    /// drill level that endpoint has reached.
    pub fn edit(&mut self, endpoint: Endpoint) {
        if let PickerState::Custom { .. } = self.state {
            let sel = match endpoint {
                Endpoint::From => &self.from,
                Endpoint::To => &self.to,
            };
            let step = match sel.precision {
                Precision::Unset => Step::YearSelect,
                Precision::Year => Step::MonthSelect,
                Precision::Month | Precision::Day => Step::DaySelect,
            };
            self.state = PickerState::Custom { endpoint, step };
        }
    }

    /// Picks a preset: resolves it against `today`, replaces the committed
    /// list with that single range, and closes the panel.
    pub fn preset(&mut self, preset: Preset, today: NaiveDate) {
        if self.state != PickerState::Presets {
            return;
        }
        self.committed = vec![presets::resolve(preset, today)];
        self.from = DateSelection::default();
        self.to = DateSelection::default();
        self.state = PickerState::Closed;
    }

    /// Selects a year on the active endpoint's year grid.
    ///
    /// Picking a `from` year drags an unset or earlier `to` year along with
    /// it; picking a `to` year earlier than the chosen `from` year snaps it
    /// forward to the `from` year. Either way the range cannot invert.
    pub fn select_year(&mut self, year: i32) {
        let PickerState::Custom { endpoint, step } = self.state else {
            return;
        };
        if step != Step::YearSelect {
            return;
        }
        match endpoint {
            Endpoint::From => {
                self.from = DateSelection::year(year);
                if self.to.year.is_none_or(|y| y < year) {
                    self.to = DateSelection::year(year);
                }
            }
            Endpoint::To => {
                let snapped = match self.from.year {
                    Some(from_year) if year < from_year => from_year,
                    _ => year,
                };
                self.to = DateSelection::year(snapped);
            }
        }
        self.state = PickerState::Custom {
            endpoint,
            step: Step::MonthSelect,
        };
    }

    /// Whether `month` is selectable on the active endpoint's month grid.
    ///
    /// On the `to` side, months earlier than the `from` month within the
    /// same year are disabled.
    pub fn month_enabled(&self, month: u32) -> bool {
        if !(1..=12).contains(&month) {
            return false;
        }
        let PickerState::Custom { endpoint, .. } = self.state else {
            return false;
        };
        if endpoint == Endpoint::To
            && self.to.year == self.from.year
            && self.from.year.is_some()
        {
            if let Some(from_month) = self.from.month {
                return month >= from_month;
            }
        }
        true
    }

    /// Selects a month; ignored when the option is disabled.
    pub fn select_month(&mut self, month: u32) {
        let PickerState::Custom { endpoint, step } = self.state else {
            return;
        };
        if step != Step::MonthSelect || !self.month_enabled(month) {
            return;
        }
        match endpoint {
            Endpoint::From => {
                if let Some(year) = self.from.year {
                    self.from = DateSelection::month(year, month);
                }
            }
            Endpoint::To => {
                if let Some(year) = self.to.year {
                    self.to = DateSelection::month(year, month);
                }
            }
        }
        self.state = PickerState::Custom {
            endpoint,
            step: Step::DaySelect,
        };
    }

    /// Whether `day` is selectable on the active endpoint's day grid.
    ///
    /// Days past the end of the month are disabled; on the `to` side, days
    /// earlier than a day-precision `from` within the same year and month
    /// are disabled too.
    pub fn day_enabled(&self, day: u32) -> bool {
        let PickerState::Custom { endpoint, .. } = self.state else {
            return false;
        };
        let sel = match endpoint {
            Endpoint::From => &self.from,
            Endpoint::To => &self.to,
        };
        let (Some(year), Some(month)) = (sel.year, sel.month) else {
            return false;
        };
        match days_in_month(year, month) {
            Some(max) if day >= 1 && day <= max => {}
            _ => return false,
        }
        if endpoint == Endpoint::To
            && self.to.year == self.from.year
            && self.to.month == self.from.month
        {
            if let Some(from_day) = self.from.day {
                return day >= from_day;
            }
        }
        true
    }

    /// Selects a day, committing the active endpoint at day precision.
    ///
    /// Does not close or advance; the user may revise the pick.
    pub fn select_day(&mut self, day: u32) {
        let PickerState::Custom { endpoint, step } = self.state else {
            return;
        };
        if step != Step::DaySelect || !self.day_enabled(day) {
            return;
        }
        match endpoint {
            Endpoint::From => {
                if let (Some(year), Some(month)) = (self.from.year, self.from.month) {
                    self.from = DateSelection::day(year, month, day);
                }
            }
            Endpoint::To => {
                if let (Some(year), Some(month)) = (self.to.year, self.to.month) {
                    self.to = DateSelection::day(year, month, day);
                }
            }
        }
    }

    /// The "select year only" escape: commits the active endpoint at year
    /// precision, dropping any month or day already drilled into.
    pub fn year_only(&mut self) {
        let PickerState::Custom { endpoint, .. } = self.state else {
            return;
        };
        let sel = match endpoint {
            Endpoint::From => &mut self.from,
            Endpoint::To => &mut self.to,
        };
        if let Some(year) = sel.year {
            *sel = DateSelection::year(year);
        }
        self.state = PickerState::Custom {
            endpoint,
            step: Step::MonthSelect,
        };
    }

    /// Steps the active sub-picker one drill level back, keeping the
    /// coarser part of the selection. Backing out of the year grid returns
    /// to the preset list.
    pub fn back(&mut self) {
        let PickerState::Custom { endpoint, step } = self.state else {
            return;
        };
        let sel = match endpoint {
            Endpoint::From => &mut self.from,
            Endpoint::To => &mut self.to,
        };
        match step {
            Step::DaySelect => {
                if let Some(year) = sel.year {
                    *sel = DateSelection::year(year);
                }
                self.state = PickerState::Custom {
                    endpoint,
                    step: Step::MonthSelect,
                };
            }
            Step::MonthSelect => {
                self.state = PickerState::Custom {
                    endpoint,
                    step: Step::YearSelect,
                };
            }
            Step::YearSelect => {
                self.state = PickerState::Presets;
            }
        }
    }

    /// Resolves both selections into one range, replaces the committed
    /// list, and closes the panel.
    ///
    /// With both endpoints unset there is nothing to commit and the active
    /// list is emptied instead, so "apply with nothing picked" behaves like
    /// a clear.
    pub fn apply(&mut self) {
        if !matches!(self.state, PickerState::Custom { .. }) {
            return;
        }
        if self.from.is_set() || self.to.is_set() {
            self.committed = vec![DateRange::resolve(&self.from, &self.to)];
        } else {
            self.committed.clear();
        }
        self.state = PickerState::Closed;
    }

    /// Discards in-progress selections and closes without touching the
    /// committed list.
    pub fn cancel(&mut self) {
        self.from = DateSelection::default();
        self.to = DateSelection::default();
        self.state = PickerState::Closed;
    }

    /// Empties the committed list and resets both selections.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.from = DateSelection::default();
        self.to = DateSelection::default();
    }
}
