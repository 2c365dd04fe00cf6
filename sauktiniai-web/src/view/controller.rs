//! Async driver for the reducer.
//!
//! A [`Controller`] owns one session's [`ViewState`]. Dispatching an event
//! runs the reducer under the state lock, then spawns the resulting fetch.
//! The fetch reports back through the same reducer, which drops it if a
//! newer request has been issued in the meantime.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::api::RegistryApi;
use crate::catalog::Catalog;

use super::reducer::{Command, Event, Results, update};
use super::render::ViewModel;
use super::state::ViewState;

/// One session's view controller.
pub struct Controller<A> {
    api: Arc<A>,
    catalog: Arc<Catalog>,
    state: Arc<Mutex<ViewState>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl<A: RegistryApi> Controller<A> {
    /// Create a controller in the initial browse state. Nothing is fetched
    /// until [`start`](Self::start) or an event is dispatched.
    pub fn new(api: Arc<A>, catalog: Arc<Catalog>) -> Self {
        let state = ViewState::new(&catalog);
        Self {
            api,
            catalog,
            state: Arc::new(Mutex::new(state)),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Load the first page and the last-updated timestamp.
    pub async fn start(&self) {
        self.dispatch(Event::Reset).await;

        let api = self.api.clone();
        let state = self.state.clone();
        self.track(tokio::spawn(async move {
            let text = api.fetch_last_updated().await;
            update(&mut *state.lock().await, Event::LastUpdatedLoaded(text));
        }))
        .await;
    }

    /// Apply a user event, spawning whatever fetch it calls for.
    pub async fn dispatch(&self, event: Event) {
        let command = update(&mut *self.state.lock().await, event);
        if let Some(command) = command {
            self.spawn_fetch(command).await;
        }
    }

    async fn spawn_fetch(&self, command: Command) {
        let api = self.api.clone();
        let state = self.state.clone();
        let handle = tokio::spawn(async move {
            let event = run_fetch(&*api, command).await;
            update(&mut *state.lock().await, event);
        });
        self.track(handle).await;
    }

    async fn track(&self, handle: JoinHandle<()>) {
        let mut pending = self.pending.lock().await;
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Wait until every fetch issued so far has completed.
    pub async fn settle(&self) {
        let handles = std::mem::take(&mut *self.pending.lock().await);
        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!(error = %e, "fetch task did not complete");
            }
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// The current render model.
    pub async fn view(&self) -> ViewModel {
        let state = self.state.lock().await;
        ViewModel::build(&state, &self.catalog, &self.catalog.year_options())
    }
}

/// Execute a fetch and turn its outcome into a completion event.
///
/// Failures are logged here and otherwise reported as plain
/// [`Event::FetchFailed`].
async fn run_fetch<A: RegistryApi>(api: &A, command: Command) -> Event {
    let request = command.request();

    let outcome = match command {
        Command::FetchList { query, .. } => api.fetch_list(query).await.map(|r| Results {
            total: r.display_total(),
            persons: r.persons,
        }),
        Command::Search { text, region, .. } => {
            api.search(&text, region).await.map(|r| Results {
                total: r.count.max(r.persons.len() as u64),
                persons: r.persons,
            })
        }
    };

    match outcome {
        Ok(results) => Event::FetchResolved { request, results },
        Err(e) => {
            warn!(request = request.0, error = %e, "registry fetch failed");
            Event::FetchFailed { request }
        }
    }
}
