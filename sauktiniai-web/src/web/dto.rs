//! Form bodies and error responses of the web layer.

use serde::{Deserialize, Serialize};

/// `POST /region`
#[derive(Debug, Deserialize)]
pub struct RegionForm {
    pub region: String,
}

/// `POST /page`
#[derive(Debug, Deserialize)]
pub struct PageForm {
    pub page: String,
}

/// `POST /year`; an empty value clears the filter.
#[derive(Debug, Deserialize)]
pub struct YearForm {
    #[serde(default)]
    pub year: String,
}

/// `POST /search`; an empty query returns to browsing.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
