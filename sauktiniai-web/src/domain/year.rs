//! Birth year filter values.

use std::fmt;

use serde::Deserialize;

/// Error returned when parsing an invalid birth year.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid birth year: {reason}")]
pub struct InvalidBirthYear {
    reason: &'static str,
}

/// A four-digit birth year used to filter the list endpoint.
///
/// # Examples
///
/// ```
/// use sauktiniai_web::domain::BirthYear;
///
/// let year = BirthYear::parse("2005").unwrap();
/// assert_eq!(year.to_string(), "2005");
///
/// assert!(BirthYear::parse("05").is_err());
/// assert!(BirthYear::parse("20O5").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthYear(u16);

impl BirthYear {
    /// Parse a birth year from exactly four ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidBirthYear> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidBirthYear {
                reason: "must be exactly 4 digits",
            });
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidBirthYear {
                reason: "must contain only digits",
            });
        }

        if bytes[0] == b'0' {
            return Err(InvalidBirthYear {
                reason: "must not start with 0",
            });
        }

        let value = bytes
            .iter()
            .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
        Ok(BirthYear(value))
    }

    /// Create from a numeric year, if it has four digits.
    pub fn from_year(year: i32) -> Option<Self> {
        if (1000..=9999).contains(&year) {
            Some(BirthYear(year as u16))
        } else {
            None
        }
    }

    /// Returns the numeric year.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for BirthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BirthYear({})", self.0)
    }
}

impl fmt::Display for BirthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for the candidate birth years offered by the year filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct YearRange {
    /// Number of candidate years.
    pub count: u16,

    /// Age of the youngest candidate; the newest year is `current - min_age`.
    pub min_age: u16,
}

impl YearRange {
    /// Candidate years for the given current year, newest first.
    pub fn candidates(&self, current_year: i32) -> Vec<BirthYear> {
        let newest = current_year - i32::from(self.min_age);
        (0..i32::from(self.count))
            .filter_map(|i| BirthYear::from_year(newest - i))
            .collect()
    }

    /// Whether `year` is one of the candidates for the given current year.
    pub fn contains(&self, year: BirthYear, current_year: i32) -> bool {
        let newest = current_year - i32::from(self.min_age);
        let oldest = newest - i32::from(self.count) + 1;
        (oldest..=newest).contains(&i32::from(year.get()))
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            count: 30,
            min_age: 18,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Candidates are strictly descending, consecutive, and all accepted by `contains`
        #[test]
        fn candidates_descend_and_are_contained(
            current in 1100i32..9000,
            count in 1u16..60,
            min_age in 0u16..40,
        ) {
            let range = YearRange { count, min_age };
            let years = range.candidates(current);

            prop_assert_eq!(years.len(), usize::from(count));
            prop_assert_eq!(i32::from(years[0].get()), current - i32::from(min_age));
            for pair in years.windows(2) {
                prop_assert_eq!(pair[0].get(), pair[1].get() + 1);
            }
            for year in &years {
                prop_assert!(range.contains(*year, current));
            }
        }

        /// Any four-digit year without a leading zero parses and displays back unchanged
        #[test]
        fn parse_display_roundtrip(s in "[1-9][0-9]{3}") {
            let year = BirthYear::parse(&s).unwrap();
            prop_assert_eq!(year.to_string(), s);
        }
    }
}
