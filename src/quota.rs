use crate::months::Month;
use crate::policy::{QuotaPolicy, QuotaTier};
use serde::Serialize;
use std::collections::BTreeSet;

/// Where a month's quota for a salesperson came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaSource {
    /// Explicit per-person figure for that month.
    Override,
    /// Business days × daily tier.
    Tier,
}

/// Quota for one salesperson in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyQuota {
    pub month: Month,
    pub quota: u32,
    pub source: QuotaSource,
}

/// Read-only quota lookups over a [`QuotaPolicy`].
///
/// No lookup fails: unknown people and months contribute zero.
#[derive(Debug, Clone, Copy)]
pub struct QuotaResolver<'a> {
    policy: &'a QuotaPolicy,
}

impl<'a> QuotaResolver<'a> {
    pub fn new(policy: &'a QuotaPolicy) -> Self {
        Self { policy }
    }

    pub fn tier(&self, name: &str) -> QuotaTier {
        self.policy.tier(name)
    }

    /// Products expected per business day (0, 1 or 2).
    pub fn daily_quota(&self, name: &str) -> u32 {
        self.tier(name).multiplier()
    }

    pub fn monthly_quota(&self, name: &str, month: Month) -> MonthlyQuota {
        match self.policy.override_for(month, name) {
            Some(quota) => MonthlyQuota {
                month,
                quota,
                source: QuotaSource::Override,
            },
            None => MonthlyQuota {
                month,
                quota: self.policy.business_days(month) * self.daily_quota(name),
                source: QuotaSource::Tier,
            },
        }
    }

    pub fn monthly_breakdown(&self, name: &str, months: &BTreeSet<Month>) -> Vec<MonthlyQuota> {
        months
            .iter()
            .map(|&month| self.monthly_quota(name, month))
            .collect()
    }

    /// Total quota for a salesperson across the selected months.
    pub fn person_quota(&self, name: &str, months: &BTreeSet<Month>) -> u64 {
        months
            .iter()
            .map(|&month| u64::from(self.monthly_quota(name, month).quota))
            .sum()
    }

    /// Team target for the selected months.
    ///
    /// Taken from the team totals table, not summed from individual quotas.
    pub fn team_quota(&self, months: &BTreeSet<Month>) -> u64 {
        months
            .iter()
            .map(|&month| u64::from(self.policy.team_total(month)))
            .sum()
    }

    pub fn business_days_in(&self, months: &BTreeSet<Month>) -> u64 {
        months
            .iter()
            .map(|&month| u64::from(self.policy.business_days(month)))
            .sum()
    }
}
