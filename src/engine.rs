//! Quota & attainment pipeline shared by the HTTP handlers and the report binary
//!
//! Every filter change recomputes the whole pipeline over the cached snapshot:
//! 1. Standardize salesperson labels (done once, when the feed is loaded)
//! 2. Filter by year, months, date range and salesperson
//! 3. Count realized sales per salesperson
//! 4. Resolve quotas for the selected months
//! 5. Classify attainment
use crate::attainment;
use crate::errors::AppError;
use crate::models::{
    AttainmentRow, DashboardReport, DateBounds, FilterOptions, FilterSelection, RawTransaction,
    SalespersonFilter, TeamSummary, TransactionRecord,
};
use crate::months::Month;
use crate::policy::{NameAliasTable, QuotaPolicy};
use crate::quota::QuotaResolver;
use crate::standardizer::NameStandardizer;
use std::collections::{BTreeMap, BTreeSet};

/// Immutable engine built from the alias table and quota policy.
#[derive(Debug, Clone)]
pub struct QuotaEngine {
    aliases: NameAliasTable,
    standardizer: NameStandardizer,
    policy: QuotaPolicy,
}

impl QuotaEngine {
    pub fn new(aliases: NameAliasTable, policy: QuotaPolicy) -> Result<Self, AppError> {
        let standardizer = NameStandardizer::new(&aliases)?;
        Ok(Self {
            aliases,
            standardizer,
            policy,
        })
    }

    /// Engine configured with the commercial team's tables.
    pub fn commercial_team() -> Result<Self, AppError> {
        Self::new(
            NameAliasTable::commercial_team(),
            QuotaPolicy::commercial_team(),
        )
    }

    pub fn aliases(&self) -> &NameAliasTable {
        &self.aliases
    }

    pub fn policy(&self) -> &QuotaPolicy {
        &self.policy
    }

    pub fn resolver(&self) -> QuotaResolver<'_> {
        QuotaResolver::new(&self.policy)
    }

    pub fn standardize(&self, raw_label: &str) -> String {
        self.standardizer.standardize(raw_label)
    }

    pub fn standardize_records<I>(&self, raw: I) -> Vec<TransactionRecord>
    where
        I: IntoIterator<Item = RawTransaction>,
    {
        raw.into_iter()
            .map(|tx| {
                let salesperson = self.standardize(&tx.salesperson_label);
                TransactionRecord::new(tx, salesperson)
            })
            .collect()
    }

    /// Applies the filters in order: year, months, date range, salesperson.
    ///
    /// The date range only applies when year and months left something to
    /// narrow; otherwise the result stays empty.
    pub fn filter<'r>(
        &self,
        records: &'r [TransactionRecord],
        selection: &FilterSelection,
    ) -> Vec<&'r TransactionRecord> {
        let mut filtered = period_candidates(records, selection.year, &selection.months);

        if let Some(range) = selection.date_range {
            if !filtered.is_empty() {
                filtered.retain(|r| range.contains(r.completed_on));
            }
        }

        if let SalespersonFilter::Only(name) = &selection.salesperson {
            filtered.retain(|r| &r.salesperson == name);
        }

        filtered
    }

    /// Earliest and latest completion dates for the year and months, before
    /// any date-range or salesperson filter.
    pub fn date_bounds(
        &self,
        records: &[TransactionRecord],
        year: i32,
        months: &BTreeSet<Month>,
    ) -> Option<DateBounds> {
        let candidates = period_candidates(records, year, months);
        let first = candidates.iter().map(|r| r.completed_on).min()?;
        let last = candidates.iter().map(|r| r.completed_on).max()?;
        Some(DateBounds { first, last })
    }

    /// Realized sales grouped by standardized salesperson, sorted by name.
    pub fn realized_by_salesperson(&self, filtered: &[&TransactionRecord]) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for record in filtered {
            *counts.entry(record.salesperson.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// One row per salesperson present in the filtered records.
    pub fn attainment_rows(
        &self,
        filtered: &[&TransactionRecord],
        months: &BTreeSet<Month>,
    ) -> Vec<AttainmentRow> {
        let resolver = self.resolver();
        self.realized_by_salesperson(filtered)
            .into_iter()
            .map(|(name, realized)| {
                let quota = resolver.person_quota(&name, months);
                attainment::classify(name, realized, quota)
            })
            .collect()
    }

    pub fn team_summary(&self, total_realized: u64, months: &BTreeSet<Month>) -> TeamSummary {
        let resolver = self.resolver();
        let total_quota = resolver.team_quota(months);

        TeamSummary {
            total_quota,
            total_realized,
            percent_attained: attainment::attainment_percent(total_realized, total_quota),
            business_days: resolver.business_days_in(months),
            remaining: total_quota.saturating_sub(total_realized),
        }
    }

    /// Runs the full pipeline for one filter selection.
    pub fn report(&self, records: &[TransactionRecord], selection: &FilterSelection) -> DashboardReport {
        let filtered = self.filter(records, selection);
        let summary = self.team_summary(filtered.len() as u64, &selection.months);
        let rows = self.attainment_rows(&filtered, &selection.months);

        tracing::debug!(
            "Report for {} {:?}: {} of {} records, {} salespeople",
            selection.year,
            selection.months,
            filtered.len(),
            records.len(),
            rows.len()
        );

        DashboardReport {
            year: selection.year,
            months: selection.months.iter().copied().collect(),
            salesperson: selection.salesperson.name().map(str::to_string),
            summary,
            rows,
            date_bounds: self.date_bounds(records, selection.year, &selection.months),
        }
    }

    /// Years, months and salespeople present anywhere in the snapshot.
    pub fn filter_options(&self, records: &[TransactionRecord]) -> FilterOptions {
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
        let months: BTreeSet<Month> = records.iter().map(|r| r.month).collect();
        let salespeople: BTreeSet<&str> = records.iter().map(|r| r.salesperson.as_str()).collect();

        FilterOptions {
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
            salespeople: salespeople.into_iter().map(str::to_string).collect(),
        }
    }
}

fn period_candidates<'r>(
    records: &'r [TransactionRecord],
    year: i32,
    months: &BTreeSet<Month>,
) -> Vec<&'r TransactionRecord> {
    records
        .iter()
        .filter(|r| r.year == year)
        .filter(|r| months.contains(&r.month))
        .collect()
}
