//! Mock registry for development and testing without the data API.
//!
//! Serves region lists from memory (optionally loaded from
//! `region_{n}.json` files) with the same filtering, slicing and search
//! rules as the real API.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use crate::domain::{Person, RegionId};

use super::error::ApiError;
use super::registry::{ListQuery, RegistryApi};
use super::types::{ListResponse, SearchResponse};

/// A request the mock has received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    List(ListQuery),
    Search { text: String, region: RegionId },
    LastUpdated,
}

#[derive(Default)]
struct MockState {
    regions: RwLock<HashMap<RegionId, Vec<Person>>>,
    last_updated: RwLock<Option<String>>,
    delays: RwLock<HashMap<RegionId, Duration>>,
    failing: AtomicBool,
    calls: Mutex<Vec<RecordedCall>>,
}

/// In-memory registry implementing [`RegistryApi`].
#[derive(Clone, Default)]
pub struct MockRegistry {
    state: Arc<MockState>,
}

impl MockRegistry {
    /// Create a mock from region rows and an optional last-updated string.
    pub fn new(regions: HashMap<RegionId, Vec<Person>>, last_updated: Option<String>) -> Self {
        Self {
            state: Arc::new(MockState {
                regions: RwLock::new(regions),
                last_updated: RwLock::new(last_updated),
                ..MockState::default()
            }),
        }
    }

    /// Load `region_{n}.json` files and `last_updated.txt` from a directory.
    ///
    /// Missing region files are skipped; at least one must exist.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let (regions, last_updated) = load_dir(data_dir.as_ref())?;
        Ok(Self::new(regions, last_updated))
    }

    /// Make every call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay list and search responses for one region.
    pub async fn set_delay(&self, region: RegionId, delay: Duration) {
        self.state.delays.write().await.insert(region, delay);
    }

    /// Requests received so far.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().await.clone()
    }

    /// Regions with loaded rows.
    pub async fn available_regions(&self) -> Vec<RegionId> {
        let mut ids: Vec<RegionId> = self.state.regions.read().await.keys().copied().collect();
        ids.sort();
        ids
    }

    async fn record(&self, call: RecordedCall) {
        self.state.calls.lock().await.push(call);
    }

    /// Common prologue: record, wait out any delay, honour the failure switch.
    async fn enter(&self, call: RecordedCall, region: Option<RegionId>) -> Result<(), ApiError> {
        self.record(call).await;

        if let Some(region) = region {
            let delay = self.state.delays.read().await.get(&region).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
        }

        if self.state.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Unavailable("mock registry set to fail".into()));
        }
        Ok(())
    }
}

impl RegistryApi for MockRegistry {
    async fn fetch_list(&self, query: ListQuery) -> Result<ListResponse, ApiError> {
        self.enter(RecordedCall::List(query), Some(query.region))
            .await?;

        let regions = self.state.regions.read().await;
        let rows = regions.get(&query.region).map(Vec::as_slice).unwrap_or(&[]);

        let filtered: Vec<&Person> = match query.year {
            Some(year) => {
                let year = year.to_string();
                rows.iter().filter(|p| p.birth_date == year).collect()
            }
            None => rows.iter().collect(),
        };

        let total = filtered.len();
        let start = (query.start as usize).min(total);
        let end = start.saturating_add(query.limit as usize).min(total);
        let persons: Vec<Person> = filtered[start..end].iter().map(|p| (*p).clone()).collect();

        Ok(ListResponse {
            region: query.region.get(),
            start: query.start,
            count: persons.len() as u64,
            total: Some(total as u64),
            persons,
        })
    }

    async fn search(&self, text: &str, region: RegionId) -> Result<SearchResponse, ApiError> {
        self.enter(
            RecordedCall::Search {
                text: text.to_string(),
                region,
            },
            Some(region),
        )
        .await?;

        let needle = text.to_lowercase();
        let regions = self.state.regions.read().await;
        let persons: Vec<Person> = regions
            .get(&region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter(|p| matches_search(p, text, &needle))
            .cloned()
            .collect();

        Ok(SearchResponse {
            query: text.to_string(),
            region: region.get(),
            count: persons.len() as u64,
            persons,
        })
    }

    async fn last_updated(&self) -> Result<String, ApiError> {
        self.enter(RecordedCall::LastUpdated, None).await?;

        self.state
            .last_updated
            .read()
            .await
            .clone()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: "no last-updated data".into(),
            })
    }
}

/// Case-insensitive name match, or a literal match on number or birth date.
fn matches_search(person: &Person, text: &str, needle: &str) -> bool {
    person.first_name.to_lowercase().contains(needle)
        || person.last_name.to_lowercase().contains(needle)
        || person.number.contains(text)
        || person.birth_date.contains(text)
}

type LoadedData = (HashMap<RegionId, Vec<Person>>, Option<String>);

fn load_dir(data_dir: &Path) -> Result<LoadedData, ApiError> {
    let mut regions = HashMap::new();

    for region in RegionId::all() {
        let path = data_dir.join(format!("region_{}.json", region.get()));
        if !path.is_file() {
            continue;
        }

        let json = std::fs::read_to_string(&path).map_err(|e| {
            ApiError::Unavailable(format!("failed to read {}: {e}", path.display()))
        })?;
        let persons: Vec<Person> = serde_json::from_str(&json).map_err(|e| ApiError::Json {
            message: format!("{}: {e}", path.display()),
            body: None,
        })?;
        regions.insert(region, persons);
    }

    if regions.is_empty() {
        return Err(ApiError::Unavailable(format!(
            "no region_{{n}}.json files found in {}",
            data_dir.display()
        )));
    }

    let last_updated = std::fs::read_to_string(data_dir.join("last_updated.txt"))
        .ok()
        .map(|s| s.trim().to_string());

    Ok((regions, last_updated))
}
