//! Static quota policy: alias table, daily tiers, business-day table and
//! monthly overrides.
//!
//! These tables are immutable once built and are handed to
//! [`QuotaEngine`](crate::engine::QuotaEngine) at construction time, so tests
//! can swap in their own fixtures.

use crate::months::Month;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Ordered alias → canonical salesperson mapping.
///
/// Order matters: when several aliases match the same raw label, the last one
/// wins (see [`NameStandardizer`](crate::standardizer::NameStandardizer)).
#[derive(Debug, Clone, Default)]
pub struct NameAliasTable {
    entries: Vec<(String, String)>,
}

impl NameAliasTable {
    /// Builds a table from `(alias, canonical)` pairs, keeping their order.
    ///
    /// Blank aliases are dropped since they would match every label.
    pub fn new<I, A, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(alias, canonical)| (alias.into(), canonical.into()))
            .filter(|(alias, canonical)| {
                if alias.trim().is_empty() {
                    tracing::warn!("Ignoring blank alias for '{}'", canonical);
                    false
                } else {
                    true
                }
            })
            .collect();

        Self { entries }
    }

    /// Alias table used by the commercial team's spreadsheet.
    pub fn commercial_team() -> Self {
        Self::new([
            ("Werbet", "Werbet"),
            ("Werker Alencar", "Werbet"),
            ("Werbet Alencar", "Werbet"),
            ("Pamela", "Pamela"),
            ("Pamela Crédita", "Pamela"),
            ("Pamela Cri", "Pamela"),
            ("Pamela Cristina", "Pamela"),
            ("Ana Clara", "Ana Clara"),
            ("Ana Clara Souza", "Ana Clara"),
            ("Danilo", "Danilo"),
            ("Danilo Neder", "Danilo"),
            ("Natalie", "Natalie"),
            ("Natalie Lopes", "Natalie"),
            ("Andressa", "Andressa"),
            ("Rafael", "Rafael"),
            ("Rafael Miguel", "Rafael"),
            ("Thaís", "Thaís"),
            ("Thais Mendonca", "Thaís"),
            ("Thais", "Thaís"),
            ("Thaki", "Thaís"),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every recognized salesperson.
    pub fn canonical_names(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|(_, c)| c.as_str()).collect()
    }
}

/// Daily quota multiplier applied per business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuotaTier {
    #[default]
    Unclassified,
    OnePerDay,
    TwoPerDay,
}

impl QuotaTier {
    pub fn multiplier(self) -> u32 {
        match self {
            QuotaTier::Unclassified => 0,
            QuotaTier::OnePerDay => 1,
            QuotaTier::TwoPerDay => 2,
        }
    }
}

/// Quota tables. Lookups that miss degrade to zero; see
/// [`QuotaResolver`](crate::quota::QuotaResolver).
///
/// Per-person overrides and team totals are independent: nothing checks that
/// a month's overrides add up to its team total.
#[derive(Debug, Clone, Default)]
pub struct QuotaPolicy {
    tiers: HashMap<String, QuotaTier>,
    business_days: HashMap<Month, u32>,
    monthly_overrides: HashMap<Month, HashMap<String, u32>>,
    monthly_team_totals: HashMap<Month, u32>,
}

impl QuotaPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier<I, S>(mut self, tier: QuotaTier, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.tiers.insert(name.into(), tier);
        }
        self
    }

    pub fn with_business_days(mut self, month: Month, days: u32) -> Self {
        self.business_days.insert(month, days);
        self
    }

    pub fn with_override(mut self, month: Month, name: impl Into<String>, quota: u32) -> Self {
        self.monthly_overrides
            .entry(month)
            .or_default()
            .insert(name.into(), quota);
        self
    }

    pub fn with_team_total(mut self, month: Month, total: u32) -> Self {
        self.monthly_team_totals.insert(month, total);
        self
    }

    /// Policy in force for the commercial team (June through September).
    pub fn commercial_team() -> Self {
        const ONE_PER_DAY: [&str; 3] = ["Andressa", "Thaís", "Rafael"];
        const TWO_PER_DAY: [&str; 5] = ["Danilo", "Natalie", "Pamela", "Ana Clara", "Werbet"];
        const CALENDAR: [(Month, u32, u32); 4] = [
            (Month::Junho, 21, 63),
            (Month::Julho, 23, 69),
            (Month::Agosto, 21, 63),
            (Month::Setembro, 22, 66),
        ];

        let mut policy = Self::new()
            .with_tier(QuotaTier::OnePerDay, ONE_PER_DAY)
            .with_tier(QuotaTier::TwoPerDay, TWO_PER_DAY);

        for (month, days, team_total) in CALENDAR {
            policy = policy
                .with_business_days(month, days)
                .with_team_total(month, team_total);
            for name in ONE_PER_DAY {
                policy = policy.with_override(month, name, days);
            }
            for name in TWO_PER_DAY {
                policy = policy.with_override(month, name, days * 2);
            }
        }

        policy
    }

    pub fn tier(&self, name: &str) -> QuotaTier {
        self.tiers.get(name).copied().unwrap_or_default()
    }

    pub fn business_days(&self, month: Month) -> u32 {
        self.business_days.get(&month).copied().unwrap_or(0)
    }

    pub fn override_for(&self, month: Month, name: &str) -> Option<u32> {
        self.monthly_overrides
            .get(&month)
            .and_then(|people| people.get(name))
            .copied()
    }

    pub fn team_total(&self, month: Month) -> u32 {
        self.monthly_team_totals.get(&month).copied().unwrap_or(0)
    }

    /// Months with a business-day entry, in calendar order.
    pub fn known_months(&self) -> Vec<Month> {
        let mut months: Vec<Month> = self.business_days.keys().copied().collect();
        months.sort();
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_aliases_are_dropped() {
        let table = NameAliasTable::new([("", "Ghost"), ("  ", "Ghost"), ("Ana", "Ana")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.canonical_names().into_iter().collect::<Vec<_>>(), vec!["Ana"]);
    }

    #[test]
    fn test_commercial_team_canonical_universe() {
        let table = NameAliasTable::commercial_team();
        let names: Vec<&str> = table.canonical_names().into_iter().collect();
        assert_eq!(
            names,
            vec!["Ana Clara", "Andressa", "Danilo", "Natalie", "Pamela", "Rafael", "Thaís", "Werbet"]
        );
    }

    #[test]
    fn test_commercial_team_overrides_match_team_totals_shape() {
        let policy = QuotaPolicy::commercial_team();
        assert_eq!(policy.business_days(Month::Junho), 21);
        assert_eq!(policy.override_for(Month::Julho, "Danilo"), Some(46));
        assert_eq!(policy.override_for(Month::Julho, "Rafael"), Some(23));
        assert_eq!(policy.team_total(Month::Setembro), 66);
        assert_eq!(policy.team_total(Month::Dezembro), 0);
        assert_eq!(
            policy.known_months(),
            vec![Month::Junho, Month::Julho, Month::Agosto, Month::Setembro]
        );
    }

    #[test]
    fn test_unknown_person_is_unclassified() {
        let policy = QuotaPolicy::commercial_team();
        assert_eq!(policy.tier("Fulano"), QuotaTier::Unclassified);
        assert_eq!(policy.tier("Fulano").multiplier(), 0);
    }
}
