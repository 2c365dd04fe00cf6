//! Administrative region identifiers.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Smallest valid region identifier.
pub const MIN_REGION_ID: u8 = 1;

/// Largest valid region identifier.
pub const MAX_REGION_ID: u8 = 6;

/// Error returned when parsing an invalid region identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid region: {reason}")]
pub struct InvalidRegion {
    reason: &'static str,
}

/// A valid region identifier (1 through 6).
///
/// The registry groups persons into six fixed administrative regions.
/// Any `RegionId` value is in range by construction.
///
/// # Examples
///
/// ```
/// use sauktiniai_web::domain::RegionId;
///
/// let vilnius = RegionId::parse("6").unwrap();
/// assert_eq!(vilnius.get(), 6);
///
/// assert!(RegionId::parse("0").is_err());
/// assert!(RegionId::parse("7").is_err());
/// assert!(RegionId::parse("six").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u8);

impl RegionId {
    /// Create a region identifier from its numeric value.
    pub fn new(id: u8) -> Result<Self, InvalidRegion> {
        if !(MIN_REGION_ID..=MAX_REGION_ID).contains(&id) {
            return Err(InvalidRegion {
                reason: "must be between 1 and 6",
            });
        }
        Ok(RegionId(id))
    }

    /// Parse a region identifier from its decimal form.
    pub fn parse(s: &str) -> Result<Self, InvalidRegion> {
        let id = s.trim().parse::<u8>().map_err(|_| InvalidRegion {
            reason: "must be a number",
        })?;
        Self::new(id)
    }

    /// Returns the numeric identifier.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All valid identifiers in ascending order.
    pub fn all() -> impl Iterator<Item = RegionId> {
        (MIN_REGION_ID..=MAX_REGION_ID).map(RegionId)
    }
}

impl fmt::Debug for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionId({})", self.0)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RegionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u8::deserialize(deserializer)?;
        RegionId::new(id).map_err(serde::de::Error::custom)
    }
}

/// A named region from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
}
