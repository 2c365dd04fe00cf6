//! Response envelopes of the registry data API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Person;

/// Response of `GET /api/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// Echoed region identifier
    #[serde(default)]
    pub region: u8,

    /// Echoed row offset
    #[serde(default)]
    pub start: u32,

    /// Number of persons in this response
    #[serde(default)]
    pub count: u64,

    /// Matching rows before paging, when the API reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub persons: Vec<Person>,
}

impl ListResponse {
    /// Total to display: the reported total, else the page count.
    pub fn display_total(&self) -> u64 {
        self.total.unwrap_or(self.count)
    }
}

/// Response of `GET /api/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Echoed query text
    #[serde(default)]
    pub query: String,

    /// Echoed region identifier
    #[serde(default)]
    pub region: u8,

    #[serde(default)]
    pub count: u64,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub persons: Vec<Person>,
}

/// Decode `null` (or a missing field) as an empty list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Person>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Person>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
