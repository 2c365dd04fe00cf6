//! Render model: everything a template needs, derived from [`ViewState`].

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::{BirthYear, Person, page_count};

use super::state::{Mode, ViewState};

/// Shown when a fetch yields no rows (or fails).
pub const NOTHING_FOUND: &str = "Nieko nerasta";

/// A region selector button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionTab {
    pub id: u8,
    pub name: String,
    pub selected: bool,
}

/// An entry of the year filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearOption {
    pub value: String,
    pub selected: bool,
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRow {
    pub position: String,
    pub name: String,
    pub info: Option<String>,
    pub birth_date: String,
}

impl PersonRow {
    fn from_person(person: &Person) -> Self {
        Self {
            position: person.position.clone(),
            name: person.full_name(),
            info: (!person.info.is_empty()).then(|| person.info.clone()),
            birth_date: person.birth_date.clone(),
        }
    }
}

/// Prev/next pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerView {
    /// "{page} / {pages}", one-based
    pub label: String,
    pub prev_page: u32,
    pub next_page: u32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// The complete render model of one session.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub mode: Mode,
    pub loading: bool,
    pub last_updated: Option<String>,
    pub regions: Vec<RegionTab>,
    pub query: String,
    pub year: Option<String>,
    pub years: Vec<YearOption>,

    /// "{shown} iš {total} įrašų" in browse mode, "Rasta: {n}" in search mode
    pub summary: Option<String>,

    pub rows: Vec<PersonRow>,

    /// Set when a completed fetch produced no rows
    pub empty_message: Option<&'static str>,

    pub pager: Option<PagerView>,
}

impl ViewModel {
    /// Derive the render model, offering `year_options` in the year filter.
    pub fn build(state: &ViewState, catalog: &Catalog, year_options: &[BirthYear]) -> Self {
        let regions = catalog
            .regions
            .iter()
            .map(|r| RegionTab {
                id: r.id.get(),
                name: r.name.clone(),
                selected: r.id == state.region,
            })
            .collect();

        let years = year_options
            .iter()
            .map(|y| YearOption {
                value: y.to_string(),
                selected: state.year == Some(*y),
            })
            .collect();

        let (summary, rows, empty_message, pager) = if state.loading {
            (None, Vec::new(), None, None)
        } else {
            let rows: Vec<PersonRow> = state.persons.iter().map(PersonRow::from_person).collect();
            let summary = match state.mode {
                Mode::Browse => format!("{} iš {} įrašų", rows.len(), state.total),
                Mode::Search => format!("Rasta: {}", rows.len()),
            };
            let empty_message = rows.is_empty().then_some(NOTHING_FOUND);
            (Some(summary), rows, empty_message, pager(state))
        };

        Self {
            mode: state.mode,
            loading: state.loading,
            last_updated: state.last_updated.clone(),
            regions,
            query: state.query.clone(),
            year: state.year.map(|y| y.to_string()),
            years,
            summary,
            rows,
            empty_message,
            pager,
        }
    }

    /// Whether the results fragment should keep polling.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the search-mode layout applies.
    pub fn is_search(&self) -> bool {
        self.mode == Mode::Search
    }
}

fn pager(state: &ViewState) -> Option<PagerView> {
    if !state.shows_pager() {
        return None;
    }

    let page_size = state.page_size();
    let pages = page_count(state.total, page_size);
    Some(PagerView {
        label: format!("{} / {}", state.page.0 + 1, pages),
        prev_page: state.page.prev().map_or(0, |p| p.0),
        next_page: state.page.next().0,
        prev_disabled: state.page.is_first(),
        next_disabled: state.page.is_last(state.total, page_size),
    })
}
