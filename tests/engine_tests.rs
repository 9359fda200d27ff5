/// Scenario tests for the quota & attainment engine
/// Uses the commercial team's compiled-in policy unless a test needs its own fixture
use chrono::NaiveDate;
use sales_quota_api::engine::QuotaEngine;
use sales_quota_api::models::{AttainmentBand, FilterSelection, RawTransaction, SalespersonFilter};
use sales_quota_api::months::Month;
use sales_quota_api::policy::{NameAliasTable, QuotaPolicy, QuotaTier};
use sales_quota_api::quota::{QuotaResolver, QuotaSource};
use std::collections::BTreeSet;

fn months(list: &[Month]) -> BTreeSet<Month> {
    list.iter().copied().collect()
}

fn sale(date: (i32, u32, u32), label: &str) -> RawTransaction {
    RawTransaction {
        completed_on: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        salesperson_label: label.to_string(),
    }
}

#[cfg(test)]
mod quota_scenarios {
    use super::*;

    #[test]
    fn test_andressa_june_quota_from_business_days() {
        // Tier path only: no overrides in this policy
        let policy = QuotaPolicy::new()
            .with_tier(QuotaTier::OnePerDay, ["Andressa"])
            .with_business_days(Month::Junho, 21);
        let resolver = QuotaResolver::new(&policy);

        assert_eq!(resolver.person_quota("Andressa", &months(&[Month::Junho])), 21);
    }

    #[test]
    fn test_andressa_june_quota_commercial_team() {
        let engine = QuotaEngine::commercial_team().unwrap();
        assert_eq!(
            engine
                .resolver()
                .person_quota("Andressa", &months(&[Month::Junho])),
            21
        );
    }

    #[test]
    fn test_ana_clara_june_quota_from_override() {
        let engine = QuotaEngine::commercial_team().unwrap();
        let quota = engine.resolver().monthly_quota("Ana Clara", Month::Junho);

        assert_eq!(quota.quota, 42);
        assert_eq!(quota.source, QuotaSource::Override);
    }

    #[test]
    fn test_override_wins_regardless_of_tier_and_days() {
        let policy = QuotaPolicy::new()
            .with_tier(QuotaTier::TwoPerDay, ["Pamela"])
            .with_business_days(Month::Agosto, 21)
            .with_override(Month::Agosto, "Pamela", 7);
        let resolver = QuotaResolver::new(&policy);

        assert_eq!(resolver.person_quota("Pamela", &months(&[Month::Agosto])), 7);
    }

    #[test]
    fn test_unclassified_person_gets_zero_from_tier_path() {
        let engine = QuotaEngine::commercial_team().unwrap();
        let resolver = engine.resolver();

        assert_eq!(resolver.daily_quota("Visitante"), 0);
        assert_eq!(
            resolver.person_quota("Visitante", &months(&Month::ALL)),
            0
        );
    }

    #[test]
    fn test_quota_sums_across_selected_months() {
        let engine = QuotaEngine::commercial_team().unwrap();
        let all = months(&[Month::Junho, Month::Julho, Month::Agosto, Month::Setembro]);

        assert_eq!(engine.resolver().person_quota("Danilo", &all), 42 + 46 + 42 + 44);
        assert_eq!(engine.resolver().team_quota(&all), 63 + 69 + 63 + 66);
    }
}

#[cfg(test)]
mod report_scenarios {
    use super::*;

    #[test]
    fn test_empty_filtered_set_summary() {
        let engine = QuotaEngine::commercial_team().unwrap();
        let records = engine.standardize_records(vec![sale((2025, 6, 2), "Andressa")]);
        let selection = FilterSelection::new(2026, [Month::Junho, Month::Julho]);

        let report = engine.report(&records, &selection);

        assert!(report.rows.is_empty());
        assert_eq!(report.summary.total_quota, 63 + 69);
        assert_eq!(report.summary.total_realized, 0);
        assert_eq!(report.summary.percent_attained, 0.0);
        assert_eq!(report.summary.remaining, 63 + 69);
        assert_eq!(report.date_bounds, None);
    }

    #[test]
    fn test_realized_without_quota_is_not_met() {
        let engine = QuotaEngine::commercial_team().unwrap();
        let raw: Vec<RawTransaction> = (1..=10).map(|d| sale((2025, 6, d), "Visitante")).collect();
        let records = engine.standardize_records(raw);

        let report = engine.report(&records, &FilterSelection::new(2025, [Month::Junho]));
        let row = &report.rows[0];

        assert_eq!(row.salesperson, "Visitante");
        assert_eq!(row.realized, 10);
        assert_eq!(row.quota, 0);
        assert_eq!(row.attainment_percent, 0.0);
        assert!(!row.met_quota);
        assert_eq!(row.band, AttainmentBand::NoQuota);
    }

    #[test]
    fn test_team_summary_ignores_salesperson_filter() {
        let engine = QuotaEngine::commercial_team().unwrap();
        let records = engine.standardize_records(vec![
            sale((2025, 6, 2), "Danilo Neder"),
            sale((2025, 6, 3), "Natalie Lopes"),
        ]);
        let selection = FilterSelection::new(2025, [Month::Junho])
            .with_salesperson(SalespersonFilter::Only("Danilo".to_string()));

        let report = engine.report(&records, &selection);

        assert_eq!(report.summary.total_realized, 1);
        assert_eq!(report.summary.total_quota, 63);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.salesperson.as_deref(), Some("Danilo"));
    }

    #[test]
    fn test_person_meets_quota() {
        let engine = QuotaEngine::commercial_team().unwrap();
        let raw: Vec<RawTransaction> = (1..=21)
            .map(|d| sale((2025, 6, d), "Rafael Miguel"))
            .collect();
        let records = engine.standardize_records(raw);

        let report = engine.report(&records, &FilterSelection::new(2025, [Month::Junho]));
        let row = &report.rows[0];

        assert_eq!(row.salesperson, "Rafael");
        assert_eq!(row.quota, 21);
        assert_eq!(row.attainment_percent, 100.0);
        assert!(row.met_quota);
        assert_eq!(row.band, AttainmentBand::Met);
    }

    #[test]
    fn test_unlabeled_sales_form_their_own_category() {
        let engine = QuotaEngine::commercial_team().unwrap();
        let records = engine.standardize_records(vec![
            sale((2025, 7, 1), ""),
            sale((2025, 7, 2), "Andressa"),
        ]);

        let report = engine.report(&records, &FilterSelection::new(2025, [Month::Julho]));
        let names: Vec<&str> = report.rows.iter().map(|r| r.salesperson.as_str()).collect();

        assert_eq!(report.summary.total_realized, 2);
        assert_eq!(names, vec!["", "Andressa"]);
    }
}

#[cfg(test)]
mod standardization_scenarios {
    use super::*;

    #[test]
    fn test_canonical_names_are_fixed_points() {
        let engine = QuotaEngine::commercial_team().unwrap();
        for name in engine.aliases().canonical_names() {
            let once = engine.standardize(name);
            assert_eq!(once, name);
            assert_eq!(engine.standardize(&once), once);
        }
    }

    #[test]
    fn test_custom_alias_table_fixture() {
        let aliases = NameAliasTable::new([("Bia", "Beatriz"), ("Beatriz", "Beatriz")]);
        let policy = QuotaPolicy::new()
            .with_tier(QuotaTier::TwoPerDay, ["Beatriz"])
            .with_business_days(Month::Outubro, 22);
        let engine = QuotaEngine::new(aliases, policy).unwrap();

        let records = engine.standardize_records(vec![
            sale((2025, 10, 1), "bia"),
            sale((2025, 10, 2), "Beatriz Lima"),
        ]);
        let report = engine.report(&records, &FilterSelection::new(2025, [Month::Outubro]));

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].realized, 2);
        assert_eq!(report.rows[0].quota, 44);
        assert_eq!(report.summary.total_quota, 0);
        assert_eq!(report.summary.business_days, 22);
    }
}
