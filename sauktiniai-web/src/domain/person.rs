//! Registry entries.

use serde::{Deserialize, Serialize};

/// One person from the conscription registry.
///
/// Every field comes from the data API verbatim. Missing fields decode as
/// empty strings; nothing here is parsed or derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    /// Position in the registry ordering (string-typed ordinal).
    #[serde(rename = "pos")]
    pub position: String,

    /// Registry number.
    pub number: String,

    #[serde(rename = "name")]
    pub first_name: String,

    #[serde(rename = "lastname")]
    pub last_name: String,

    /// Birth date as published (usually just a year).
    #[serde(rename = "bdate")]
    pub birth_date: String,

    pub department: String,

    /// Free-text remarks.
    pub info: String,
}

impl Person {
    /// "First Last", as shown in result rows.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
