//! The view controller's state record.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::{BirthYear, Page, Person, RegionId};

/// Whether the result list shows a paged browse or a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Browse,
    Search,
}

/// Identifies one issued fetch. Ids increase monotonically per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// All interactive state of one lookup session.
///
/// Only [`update`](super::update) mutates it.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: Mode,
    pub region: RegionId,
    pub page: Page,

    /// The last submitted query (empty in browse mode)
    pub query: String,

    pub year: Option<BirthYear>,

    /// True while the latest issued fetch is outstanding
    pub loading: bool,

    /// Results of the latest completed fetch
    pub persons: Vec<Person>,

    /// Total rows reported for the latest completed fetch
    pub total: u64,

    pub last_updated: Option<String>,

    pub(super) page_size: u32,
    pub(super) next_request: u64,
    pub(super) latest_request: Option<RequestId>,
}

impl ViewState {
    /// Initial state: browsing the catalog's default region, page 0, no filters.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            mode: Mode::Browse,
            region: catalog.default_region,
            page: Page::FIRST,
            query: String::new(),
            year: None,
            loading: false,
            persons: Vec::new(),
            total: 0,
            last_updated: None,
            page_size: catalog.page_size,
            next_request: 0,
            latest_request: None,
        }
    }

    /// Rows per browse page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The most recently issued request, if any.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest_request
    }

    /// Whether the pager is shown: browse mode with more than one page of rows.
    pub fn shows_pager(&self) -> bool {
        self.mode == Mode::Browse && self.total > u64::from(self.page_size)
    }
}
