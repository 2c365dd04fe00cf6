//! Domain types for the registry lookup.
//!
//! Identifiers and filter values validate on construction, so the view
//! controller and the API client can pass them around without rechecking.

mod page;
mod person;
mod region;
mod year;

pub use page::{PAGE_SIZE, Page, page_count};
pub use person::Person;
pub use region::{InvalidRegion, MAX_REGION_ID, MIN_REGION_ID, Region, RegionId};
pub use year::{BirthYear, InvalidBirthYear, YearRange};
