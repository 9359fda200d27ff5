use crate::models::{AttainmentBand, AttainmentRow};

/// Share of quota at or above which a salesperson counts as close to target.
const NEAR_THRESHOLD_PERCENT: f64 = 80.0;

/// realized / quota × 100 rounded to one decimal, or 0.0 when quota is 0.
pub fn attainment_percent(realized: u64, quota: u64) -> f64 {
    if quota == 0 {
        return 0.0;
    }
    round_one_decimal(realized as f64 / quota as f64 * 100.0)
}

/// A zero quota is never met, whatever was sold.
pub fn met_quota(realized: u64, quota: u64) -> bool {
    quota > 0 && realized >= quota
}

pub fn band(realized: u64, quota: u64) -> AttainmentBand {
    if quota == 0 {
        return AttainmentBand::NoQuota;
    }
    if realized >= quota {
        return AttainmentBand::Met;
    }
    if attainment_percent(realized, quota) >= NEAR_THRESHOLD_PERCENT {
        AttainmentBand::Near
    } else {
        AttainmentBand::Below
    }
}

pub fn classify(salesperson: impl Into<String>, realized: u64, quota: u64) -> AttainmentRow {
    AttainmentRow {
        salesperson: salesperson.into(),
        realized,
        quota,
        attainment_percent: attainment_percent(realized, quota),
        met_quota: met_quota(realized, quota),
        band: band(realized, quota),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounded_to_one_decimal() {
        assert_eq!(attainment_percent(21, 21), 100.0);
        assert_eq!(attainment_percent(10, 42), 23.8);
        assert_eq!(attainment_percent(1, 3), 33.3);
        assert_eq!(attainment_percent(50, 46), 108.7);
    }

    #[test]
    fn test_zero_quota_sentinel() {
        let row = classify("Fulano", 10, 0);
        assert_eq!(row.attainment_percent, 0.0);
        assert!(!row.met_quota);
        assert_eq!(row.band, AttainmentBand::NoQuota);
    }

    #[test]
    fn test_met_on_exact_quota() {
        let row = classify("Andressa", 21, 21);
        assert!(row.met_quota);
        assert_eq!(row.band, AttainmentBand::Met);
    }

    #[test]
    fn test_bands() {
        assert_eq!(band(34, 42), AttainmentBand::Near); // 81.0%
        assert_eq!(band(33, 42), AttainmentBand::Below); // 78.6%
        assert_eq!(band(0, 42), AttainmentBand::Below);
        assert_eq!(band(60, 42), AttainmentBand::Met);
    }
}
