use crate::months::Month;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============ Feed Models ============

/// One completed sale as it arrives from the feed, after date parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Completion date ("Data de Conclusão").
    pub completed_on: NaiveDate,
    /// Salesperson label as typed in the spreadsheet ("Comercial/Capitão").
    pub salesperson_label: String,
}

/// A sale with its derived calendar fields and standardized salesperson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    pub completed_on: NaiveDate,
    pub raw_salesperson: String,
    /// Canonical name, or the raw label when no alias matched.
    pub salesperson: String,
    pub year: i32,
    pub month: Month,
    pub day: u32,
}

impl TransactionRecord {
    pub fn new(raw: RawTransaction, salesperson: String) -> Self {
        let completed_on = raw.completed_on;
        Self {
            completed_on,
            raw_salesperson: raw.salesperson_label,
            salesperson,
            year: completed_on.year(),
            month: Month::of(completed_on),
            day: completed_on.day(),
        }
    }
}

// ============ Filter Models ============

/// Salesperson filter. `All` is the dashboard's "Todos" option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SalespersonFilter {
    #[default]
    All,
    Only(String),
}

impl SalespersonFilter {
    /// Blank, "Todos" and "all" (any case) select everyone.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None => SalespersonFilter::All,
            Some(v) if v.is_empty() => SalespersonFilter::All,
            Some(v) if v.eq_ignore_ascii_case("todos") || v.eq_ignore_ascii_case("all") => {
                SalespersonFilter::All
            }
            Some(v) => SalespersonFilter::Only(v.to_string()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            SalespersonFilter::All => None,
            SalespersonFilter::Only(name) => Some(name.as_str()),
        }
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The filters selected on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub year: i32,
    /// Selected months, deduplicated, in calendar order.
    pub months: BTreeSet<Month>,
    pub salesperson: SalespersonFilter,
    pub date_range: Option<DateRange>,
}

impl FilterSelection {
    pub fn new(year: i32, months: impl IntoIterator<Item = Month>) -> Self {
        Self {
            year,
            months: months.into_iter().collect(),
            salesperson: SalespersonFilter::All,
            date_range: None,
        }
    }

    pub fn with_salesperson(mut self, salesperson: SalespersonFilter) -> Self {
        self.salesperson = salesperson;
        self
    }

    pub fn with_date_range(mut self, date_range: Option<DateRange>) -> Self {
        self.date_range = date_range;
        self
    }
}

// ============ Report Models ============

/// Pass/fail bucket used to color the attainment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttainmentBand {
    /// 100% or more of quota.
    Met,
    /// 80% up to 100%.
    Near,
    /// Under 80%.
    Below,
    /// Nobody set a quota for this salesperson in the period.
    NoQuota,
}

/// Per-salesperson performance for the filtered period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttainmentRow {
    pub salesperson: String,
    pub realized: u64,
    pub quota: u64,
    /// realized / quota × 100, one decimal; 0.0 when quota is 0.
    pub attainment_percent: f64,
    pub met_quota: bool,
    pub band: AttainmentBand,
}

/// Team-level figures ("Meta Total", "Realizado", "Atingimento", "Dias Úteis").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub total_quota: u64,
    pub total_realized: u64,
    pub percent_attained: f64,
    pub business_days: u64,
    /// Quota still to go, never negative.
    pub remaining: u64,
}

/// First and last completion dates available for the date-range picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// Everything the presentation layer needs for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub year: i32,
    pub months: Vec<Month>,
    /// `None` when all salespeople are selected.
    pub salesperson: Option<String>,
    pub summary: TeamSummary,
    pub rows: Vec<AttainmentRow>,
    pub date_bounds: Option<DateBounds>,
}

/// Values offered by the year, month and salesperson selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub months: Vec<Month>,
    pub salespeople: Vec<String>,
}
