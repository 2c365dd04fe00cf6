//! The registry API seam shared by the HTTP client and the mock.

use std::future::Future;

use tracing::warn;

use crate::domain::{BirthYear, Page, RegionId};

use super::error::ApiError;
use super::types::{ListResponse, SearchResponse};

/// Displayed when the last-updated timestamp cannot be fetched.
pub const UNKNOWN_LAST_UPDATED: &str = "unknown";

/// Parameters of a ranged list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub region: RegionId,
    /// Row offset
    pub start: u32,
    /// Maximum rows to return (positive)
    pub limit: u32,
    pub year: Option<BirthYear>,
}

impl ListQuery {
    /// The query for one browse page, or `None` if its offset overflows.
    pub fn page(
        region: RegionId,
        page: Page,
        page_size: u32,
        year: Option<BirthYear>,
    ) -> Option<Self> {
        Some(Self {
            region,
            start: page.offset(page_size)?,
            limit: page_size,
            year,
        })
    }
}

/// Read-only access to the registry data API.
///
/// All three calls are independent network reads with no side effects on
/// the caller. Nothing is retried.
pub trait RegistryApi: Send + Sync + 'static {
    /// Fetch one ranged slice of a region's list.
    fn fetch_list(
        &self,
        query: ListQuery,
    ) -> impl Future<Output = Result<ListResponse, ApiError>> + Send;

    /// Free-text search within a region. Callers never pass an empty query.
    fn search(
        &self,
        text: &str,
        region: RegionId,
    ) -> impl Future<Output = Result<SearchResponse, ApiError>> + Send;

    /// Fetch the raw last-updated string.
    fn last_updated(&self) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Fetch the last-updated string for display, degrading to
    /// [`UNKNOWN_LAST_UPDATED`] on any failure.
    fn fetch_last_updated(&self) -> impl Future<Output = String> + Send {
        async move {
            match self.last_updated().await {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    warn!(error = %e, "failed to fetch last-updated timestamp");
                    UNKNOWN_LAST_UPDATED.to_string()
                }
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::PAGE_SIZE;
    use proptest::prelude::*;

    proptest! {
        /// For every region and page, the request offset equals page * 100
        #[test]
        fn list_offset_is_page_times_100(region in 1u8..=6, page in 0u32..100_000) {
            let region = RegionId::new(region).unwrap();
            let query = ListQuery::page(region, Page(page), PAGE_SIZE, None).unwrap();

            prop_assert_eq!(query.start, page * 100);
            prop_assert_eq!(query.limit, 100);
            prop_assert_eq!(query.region, region);
        }

        /// Pages past the last representable offset yield no query at all
        #[test]
        fn overflowing_page_has_no_query(page in (u32::MAX / 100 + 1)..=u32::MAX) {
            let region = RegionId::new(6).unwrap();
            prop_assert!(ListQuery::page(region, Page(page), PAGE_SIZE, None).is_none());
        }
    }
}
