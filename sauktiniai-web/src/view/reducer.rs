//! Pure state transitions of the view controller.
//!
//! [`update`] applies one [`Event`] to a [`ViewState`] and returns the
//! fetch the caller must run, if any. Every issued fetch carries a fresh
//! [`RequestId`]; completions for anything but the latest id are dropped,
//! so a slow response can never overwrite a newer one.

use tracing::debug;

use crate::api::ListQuery;
use crate::domain::{BirthYear, Page, Person, RegionId};

use super::state::{Mode, RequestId, ViewState};

/// Rows delivered by a successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Results {
    pub persons: Vec<Person>,
    pub total: u64,
}

/// Something that happened: a user action or a fetch completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A region button was clicked.
    RegionChanged(RegionId),
    /// A pager button was clicked.
    PageChanged(Page),
    /// The year filter was set or cleared.
    YearChanged(Option<BirthYear>),
    /// The search form was submitted.
    QuerySubmitted(String),
    /// The title was clicked (also used to start a session).
    Reset,
    FetchResolved { request: RequestId, results: Results },
    FetchFailed { request: RequestId },
    LastUpdatedLoaded(String),
}

/// A fetch the caller must perform, then report back as
/// [`Event::FetchResolved`] or [`Event::FetchFailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchList {
        request: RequestId,
        query: ListQuery,
    },
    Search {
        request: RequestId,
        text: String,
        region: RegionId,
    },
}

impl Command {
    pub fn request(&self) -> RequestId {
        match self {
            Command::FetchList { request, .. } | Command::Search { request, .. } => *request,
        }
    }
}

/// Apply `event` to `state`, returning the fetch to run, if any.
pub fn update(state: &mut ViewState, event: Event) -> Option<Command> {
    match event {
        Event::RegionChanged(region) => {
            state.region = region;
            clear_filters(state);
            issue_list(state)
        }

        Event::PageChanged(page) => {
            if state.mode == Mode::Search || page == state.page {
                return None;
            }
            if page.offset(state.page_size).is_none() {
                debug!(page = page.0, "ignoring page beyond the last addressable offset");
                return None;
            }
            state.page = page;
            issue_list(state)
        }

        Event::YearChanged(year) => {
            state.year = year;
            state.page = Page::FIRST;
            match state.mode {
                Mode::Browse => issue_list(state),
                Mode::Search => None,
            }
        }

        Event::QuerySubmitted(text) => {
            if text.trim().is_empty() {
                clear_filters(state);
                return issue_list(state);
            }
            state.mode = Mode::Search;
            state.query = text.clone();
            let request = begin_request(state);
            Some(Command::Search {
                request,
                text,
                region: state.region,
            })
        }

        Event::Reset => {
            clear_filters(state);
            issue_list(state)
        }

        Event::FetchResolved { request, results } => {
            if is_stale(state, request) {
                return None;
            }
            state.persons = results.persons;
            state.total = results.total;
            state.loading = false;
            None
        }

        Event::FetchFailed { request } => {
            if is_stale(state, request) {
                return None;
            }
            state.persons.clear();
            state.total = 0;
            state.loading = false;
            None
        }

        Event::LastUpdatedLoaded(text) => {
            state.last_updated = Some(text);
            None
        }
    }
}

/// Back to browse mode at page 0 with no query and no year filter.
fn clear_filters(state: &mut ViewState) {
    state.mode = Mode::Browse;
    state.page = Page::FIRST;
    state.query.clear();
    state.year = None;
}

fn begin_request(state: &mut ViewState) -> RequestId {
    state.next_request += 1;
    let request = RequestId(state.next_request);
    state.latest_request = Some(request);
    state.loading = true;
    request
}

/// `None` only if the current page has no addressable offset, which
/// `PageChanged` never lets into the state.
fn issue_list(state: &mut ViewState) -> Option<Command> {
    let query = ListQuery::page(state.region, state.page, state.page_size, state.year)?;
    let request = begin_request(state);
    Some(Command::FetchList { request, query })
}

fn is_stale(state: &ViewState, request: RequestId) -> bool {
    let stale = state.latest_request != Some(request);
    if stale {
        debug!(
            request = request.0,
            latest = ?state.latest_request.map(|r| r.0),
            "dropping stale fetch result"
        );
    }
    stale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn initial() -> ViewState {
        ViewState::new(&Catalog::builtin().unwrap())
    }

    fn region(id: u8) -> RegionId {
        RegionId::new(id).unwrap()
    }

    fn year(s: &str) -> BirthYear {
        BirthYear::parse(s).unwrap()
    }

    fn rows(n: usize) -> Vec<Person> {
        (1..=n)
            .map(|i| Person {
                position: i.to_string(),
                ..Person::default()
            })
            .collect()
    }

    fn list_query(command: &Command) -> ListQuery {
        match command {
            Command::FetchList { query, .. } => *query,
            other => panic!("expected list fetch, got {other:?}"),
        }
    }

    #[test]
    fn initial_state() {
        let state = initial();

        assert_eq!(state.mode, Mode::Browse);
        assert_eq!(state.region, region(6));
        assert_eq!(state.page, Page::FIRST);
        assert!(state.query.is_empty());
        assert_eq!(state.year, None);
        assert_eq!(state.latest_request(), None);
    }

    #[test]
    fn reset_fetches_first_page_of_vilnius() {
        let mut state = initial();
        let command = update(&mut state, Event::Reset).unwrap();

        let query = list_query(&command);
        assert_eq!(query.region, region(6));
        assert_eq!(query.start, 0);
        assert_eq!(query.limit, 100);
        assert_eq!(query.year, None);
        assert!(state.loading);
    }

    #[test]
    fn page_change_fetches_offset() {
        let mut state = initial();
        update(&mut state, Event::Reset);

        let command = update(&mut state, Event::PageChanged(Page(3))).unwrap();

        assert_eq!(list_query(&command).start, 300);
        assert_eq!(state.page, Page(3));
    }

    #[test]
    fn overflowing_page_is_ignored() {
        let mut state = initial();
        let first = update(&mut state, Event::Reset).unwrap();

        assert_eq!(update(&mut state, Event::PageChanged(Page(u32::MAX))), None);

        assert_eq!(state.page, Page::FIRST);
        assert_eq!(state.latest_request(), Some(first.request()));

        let last = Page(u32::MAX / 100);
        let command = update(&mut state, Event::PageChanged(last)).unwrap();
        assert_eq!(list_query(&command).start % 100, 0);
    }

    #[test]
    fn same_page_does_not_refetch() {
        let mut state = initial();
        assert_eq!(update(&mut state, Event::PageChanged(Page::FIRST)), None);
    }

    #[test]
    fn region_change_resets_page_and_filters() {
        let mut state = initial();
        update(&mut state, Event::PageChanged(Page(4)));
        update(&mut state, Event::YearChanged(Some(year("2006"))));
        update(&mut state, Event::PageChanged(Page(2)));

        let command = update(&mut state, Event::RegionChanged(region(2))).unwrap();

        let query = list_query(&command);
        assert_eq!(query.region, region(2));
        assert_eq!(query.start, 0);
        assert_eq!(query.year, None);
        assert_eq!(state.page, Page::FIRST);
    }

    #[test]
    fn year_change_resets_page() {
        let mut state = initial();
        update(&mut state, Event::PageChanged(Page(5)));

        let command = update(&mut state, Event::YearChanged(Some(year("2005")))).unwrap();

        let query = list_query(&command);
        assert_eq!(query.start, 0);
        assert_eq!(query.year, Some(year("2005")));
        assert_eq!(state.page, Page::FIRST);
    }

    #[test]
    fn search_scoped_to_current_region() {
        let mut state = initial();
        update(&mut state, Event::RegionChanged(region(3)));

        let command = update(&mut state, Event::QuerySubmitted("Jonaitis".into())).unwrap();

        match command {
            Command::Search { text, region: r, .. } => {
                assert_eq!(text, "Jonaitis");
                assert_eq!(r, region(3));
            }
            other => panic!("expected search, got {other:?}"),
        }
        assert_eq!(state.mode, Mode::Search);
        assert_eq!(state.query, "Jonaitis");
    }

    #[test]
    fn whitespace_query_returns_to_browse() {
        let mut state = initial();
        update(&mut state, Event::QuerySubmitted("Jonaitis".into()));
        update(&mut state, Event::YearChanged(Some(year("2006"))));

        let command = update(&mut state, Event::QuerySubmitted("   ".into())).unwrap();

        let query = list_query(&command);
        assert_eq!(query.start, 0);
        assert_eq!(query.year, None);
        assert_eq!(state.mode, Mode::Browse);
        assert!(state.query.is_empty());
    }

    #[test]
    fn search_mode_ignores_paging_and_defers_year() {
        let mut state = initial();
        update(&mut state, Event::QuerySubmitted("Jonaitis".into()));

        assert_eq!(update(&mut state, Event::PageChanged(Page(1))), None);
        assert_eq!(
            update(&mut state, Event::YearChanged(Some(year("2006")))),
            None
        );
        assert_eq!(state.year, Some(year("2006")));
        assert_eq!(state.mode, Mode::Search);
    }

    #[test]
    fn reset_leaves_search_mode() {
        let mut state = initial();
        update(&mut state, Event::RegionChanged(region(4)));
        update(&mut state, Event::QuerySubmitted("Jonaitis".into()));

        let command = update(&mut state, Event::Reset).unwrap();

        let query = list_query(&command);
        assert_eq!(query.region, region(4));
        assert_eq!(state.mode, Mode::Browse);
        assert!(state.query.is_empty());
    }

    #[test]
    fn resolved_fetch_fills_results() {
        let mut state = initial();
        let command = update(&mut state, Event::Reset).unwrap();

        update(
            &mut state,
            Event::FetchResolved {
                request: command.request(),
                results: Results {
                    persons: rows(100),
                    total: 250,
                },
            },
        );

        assert!(!state.loading);
        assert_eq!(state.persons.len(), 100);
        assert_eq!(state.total, 250);
        assert!(state.shows_pager());
    }

    #[test]
    fn failed_fetch_clears_results() {
        let mut state = initial();
        let first = update(&mut state, Event::Reset).unwrap();
        update(
            &mut state,
            Event::FetchResolved {
                request: first.request(),
                results: Results {
                    persons: rows(3),
                    total: 3,
                },
            },
        );

        let second = update(&mut state, Event::PageChanged(Page(1))).unwrap();
        update(
            &mut state,
            Event::FetchFailed {
                request: second.request(),
            },
        );

        assert!(state.persons.is_empty());
        assert_eq!(state.total, 0);
        assert!(!state.loading);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = initial();
        let slow = update(&mut state, Event::RegionChanged(region(1))).unwrap();
        let fast = update(&mut state, Event::RegionChanged(region(2))).unwrap();
        assert!(fast.request() > slow.request());

        update(
            &mut state,
            Event::FetchResolved {
                request: fast.request(),
                results: Results {
                    persons: rows(2),
                    total: 2,
                },
            },
        );
        update(
            &mut state,
            Event::FetchResolved {
                request: slow.request(),
                results: Results {
                    persons: rows(50),
                    total: 50,
                },
            },
        );

        assert_eq!(state.persons.len(), 2);
        assert_eq!(state.total, 2);
        assert!(!state.loading);
    }

    #[test]
    fn stale_failure_keeps_loading_for_latest() {
        let mut state = initial();
        let old = update(&mut state, Event::Reset).unwrap();
        update(&mut state, Event::PageChanged(Page(1)));

        update(&mut state, Event::FetchFailed { request: old.request() });

        assert!(state.loading);
    }

    #[test]
    fn pager_hidden_in_search_mode() {
        let mut state = initial();
        let command = update(&mut state, Event::QuerySubmitted("Jonaitis".into())).unwrap();
        update(
            &mut state,
            Event::FetchResolved {
                request: command.request(),
                results: Results {
                    persons: rows(500),
                    total: 500,
                },
            },
        );

        assert!(!state.shows_pager());
    }

    #[test]
    fn last_updated_is_stored() {
        let mut state = initial();
        assert_eq!(
            update(&mut state, Event::LastUpdatedLoaded("2026-10-01".into())),
            None
        );
        assert_eq!(state.last_updated.as_deref(), Some("2026-10-01"));
    }
}
