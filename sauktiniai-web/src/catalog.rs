//! Static catalog data: regions, paging, and the birth year range.
//!
//! The values live in `catalog.json` at the crate root and are compiled
//! into the binary. They are validated once at startup so the rest of the
//! code can rely on every region being present exactly once.

use chrono::Datelike;
use serde::Deserialize;

use crate::domain::{BirthYear, Region, RegionId, YearRange};

/// The catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../catalog.json");

/// Errors from loading or validating catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("region {0} is listed more than once")]
    DuplicateRegion(RegionId),

    #[error("region {0} is missing from the catalog")]
    MissingRegion(RegionId),

    #[error("default region {0} is not in the catalog")]
    UnknownDefault(RegionId),

    #[error("page size must be positive")]
    ZeroPageSize,

    #[error("year range must offer at least one year")]
    EmptyYearRange,
}

/// Declarative lookup data for the view controller.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Regions in display order.
    pub regions: Vec<Region>,

    /// Region selected when a session starts.
    pub default_region: RegionId,

    /// Rows per browse page.
    pub page_size: u32,

    /// Candidate birth years for the year filter.
    pub years: YearRange,
}

impl Catalog {
    /// Load the built-in catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate catalog JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for id in RegionId::all() {
            match self.regions.iter().filter(|r| r.id == id).count() {
                0 => return Err(CatalogError::MissingRegion(id)),
                1 => {}
                _ => return Err(CatalogError::DuplicateRegion(id)),
            }
        }

        if self.region(self.default_region).is_none() {
            return Err(CatalogError::UnknownDefault(self.default_region));
        }
        if self.page_size == 0 {
            return Err(CatalogError::ZeroPageSize);
        }
        if self.years.count == 0 {
            return Err(CatalogError::EmptyYearRange);
        }
        Ok(())
    }

    /// Look up a region by identifier.
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Candidate birth years relative to today, newest first.
    pub fn year_options(&self) -> Vec<BirthYear> {
        self.years.candidates(current_year())
    }

    /// Whether `year` is currently offered by the year filter.
    pub fn offers_year(&self, year: BirthYear) -> bool {
        self.years.contains(year, current_year())
    }
}

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
