use super::error::LookupError;
use holiday_core::Clock;
use std::fmt;

/// A resolved lookup: the year is always concrete once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayQuery {
    pub country: String,
    pub year: i32,
}

impl HolidayQuery {
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            year,
        }
    }

    /// Parses `"CC"` or `"CC,YYYY"`. Both parts are trimmed; a missing year
    /// is taken from `clock`.
    pub fn parse(input: &str, clock: &dyn Clock) -> Result<Self, LookupError> {
        let (country, year) = match input.split_once(',') {
            Some((country, year)) => {
                let year = year
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| LookupError::InvalidFormat)?;
                (country.trim(), year)
            }
            None => (input.trim(), clock.current_year()),
        };

        if country.is_empty() {
            return Err(LookupError::InvalidFormat);
        }

        Ok(Self::new(country, year))
    }
}

impl fmt::Display for HolidayQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.country, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holiday_core::FixedClock;

    #[test]
    fn test_parse_country_and_year() {
        let clock = FixedClock::year(2030);
        assert_eq!(
            HolidayQuery::parse("US,2024", &clock).unwrap(),
            HolidayQuery::new("US", 2024)
        );
        assert_eq!(
            HolidayQuery::parse(" TW , 2025 ", &clock).unwrap(),
            HolidayQuery::new("TW", 2025)
        );
    }

    #[test]
    fn test_missing_year_uses_clock() {
        let clock = FixedClock::year(2031);
        assert_eq!(
            HolidayQuery::parse("JP", &clock).unwrap(),
            HolidayQuery::new("JP", 2031)
        );
    }

    #[test]
    fn test_malformed_input() {
        let clock = FixedClock::year(2024);
        for input in ["US,abcd", "US,", "US,2024,1", ",2024", "  "] {
            assert_eq!(
                HolidayQuery::parse(input, &clock),
                Err(LookupError::InvalidFormat),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(HolidayQuery::new("TW", 2024).to_string(), "TW,2024");
    }
}
