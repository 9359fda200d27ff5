use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Calendar month, named the way the sales team's spreadsheet names them (pt-BR).
///
/// Ordering follows the calendar, so a `BTreeSet<Month>` iterates Janeiro..Dezembro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    Janeiro = 1,
    Fevereiro = 2,
    Marco = 3,
    Abril = 4,
    Maio = 5,
    Junho = 6,
    Julho = 7,
    Agosto = 8,
    Setembro = 9,
    Outubro = 10,
    Novembro = 11,
    Dezembro = 12,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Janeiro,
        Month::Fevereiro,
        Month::Marco,
        Month::Abril,
        Month::Maio,
        Month::Junho,
        Month::Julho,
        Month::Agosto,
        Month::Setembro,
        Month::Outubro,
        Month::Novembro,
        Month::Dezembro,
    ];

    /// Display name as shown on the dashboard.
    pub fn name(self) -> &'static str {
        match self {
            Month::Janeiro => "Janeiro",
            Month::Fevereiro => "Fevereiro",
            Month::Marco => "Março",
            Month::Abril => "Abril",
            Month::Maio => "Maio",
            Month::Junho => "Junho",
            Month::Julho => "Julho",
            Month::Agosto => "Agosto",
            Month::Setembro => "Setembro",
            Month::Outubro => "Outubro",
            Month::Novembro => "Novembro",
            Month::Dezembro => "Dezembro",
        }
    }

    /// 1-based calendar number.
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        // month0() is always 0..=11
        Self::ALL[date.month0() as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a month name or number is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMonthError(pub String);

impl fmt::Display for ParseMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown month: '{}'", self.0)
    }
}

impl std::error::Error for ParseMonthError {}

impl FromStr for Month {
    type Err = ParseMonthError;

    /// Accepts pt-BR names in any case ("junho", "MARÇO", "Marco") or numbers 1-12.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(number) = trimmed.parse::<u32>() {
            return Self::from_number(number).ok_or_else(|| ParseMonthError(s.to_string()));
        }

        let lowered = trimmed.to_lowercase();
        if lowered == "marco" {
            return Ok(Month::Marco);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().to_lowercase() == lowered)
            .ok_or_else(|| ParseMonthError(s.to_string()))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!("Junho".parse::<Month>().unwrap(), Month::Junho);
        assert_eq!("junho".parse::<Month>().unwrap(), Month::Junho);
        assert_eq!(" SETEMBRO ".parse::<Month>().unwrap(), Month::Setembro);
        assert_eq!("Março".parse::<Month>().unwrap(), Month::Marco);
        assert_eq!("MARÇO".parse::<Month>().unwrap(), Month::Marco);
        assert_eq!("marco".parse::<Month>().unwrap(), Month::Marco);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!("1".parse::<Month>().unwrap(), Month::Janeiro);
        assert_eq!("12".parse::<Month>().unwrap(), Month::Dezembro);
        assert!("0".parse::<Month>().is_err());
        assert!("13".parse::<Month>().is_err());
    }

    #[test]
    fn test_unknown_month_rejected() {
        let err = "June".parse::<Month>().unwrap_err();
        assert_eq!(err.to_string(), "unknown month: 'June'");
    }

    #[test]
    fn test_month_of_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(Month::of(date), Month::Marco);
        assert_eq!(Month::of(date).number(), 3);
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Month::Marco).unwrap();
        assert_eq!(json, "\"Março\"");

        let parsed: Month = serde_json::from_str("\"agosto\"").unwrap();
        assert_eq!(parsed, Month::Agosto);
    }

    #[test]
    fn test_calendar_ordering() {
        let mut months = vec![Month::Setembro, Month::Abril, Month::Junho];
        months.sort();
        assert_eq!(months, vec![Month::Abril, Month::Junho, Month::Setembro]);
    }
}
