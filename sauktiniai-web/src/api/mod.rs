//! Registry data API client.
//!
//! The data API exposes three read-only endpoints:
//! - `/api/list`: one ranged page of a region, optionally filtered by birth year
//! - `/api/search`: free-text search within a region, unpaged
//! - `/api/updated`: an opaque last-updated string
//!
//! [`RegistryClient`] talks HTTP; [`MockRegistry`] serves in-memory data
//! with the same semantics.

mod client;
mod error;
mod mock;
mod registry;
mod types;

pub use client::{DEFAULT_BASE_URL, RegistryClient, RegistryConfig};
pub use error::ApiError;
pub use mock::{MockRegistry, RecordedCall};
pub use registry::{ListQuery, RegistryApi, UNKNOWN_LAST_UPDATED};
pub use types::{ListResponse, SearchResponse};
