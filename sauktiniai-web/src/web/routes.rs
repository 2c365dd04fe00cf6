//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::api::RegistryApi;
use crate::domain::{BirthYear, InvalidBirthYear, InvalidRegion, Page, RegionId};
use crate::view::Event;

use super::dto::*;
use super::session::{Session, session_id};
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<A: RegistryApi>(state: AppState<A>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page::<A>))
        .route("/health", get(health))
        .route("/results", get(results::<A>))
        .route("/region", post(select_region::<A>))
        .route("/page", post(select_page::<A>))
        .route("/year", post(select_year::<A>))
        .route("/search", post(search::<A>))
        .route("/reset", post(reset::<A>))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Full page for the caller's session.
async fn index_page<A: RegistryApi>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(session_id(&headers)).await;
    let view = session.controller.view().await;
    let page = render(IndexTemplate { view })?;
    Ok(with_cookie(page, &session, &state))
}

/// Results fragment, or the whole view model as JSON.
async fn results<A: RegistryApi>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(session_id(&headers)).await;
    let view = session.controller.view().await;

    let response = if wants_html(&headers) {
        render(ResultsTemplate { view })?
    } else {
        Json(view).into_response()
    };
    Ok(with_cookie(response, &session, &state))
}

async fn select_region<A: RegistryApi>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    Form(form): Form<RegionForm>,
) -> Result<Response, AppError> {
    let region = RegionId::parse(&form.region)?;
    apply(&state, &headers, Event::RegionChanged(region)).await
}

async fn select_page<A: RegistryApi>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    Form(form): Form<PageForm>,
) -> Result<Response, AppError> {
    let page = form
        .page
        .trim()
        .parse::<u32>()
        .map(Page)
        .map_err(|_| AppError::BadRequest {
            message: format!("Invalid page: {}", form.page),
        })?;
    if page.offset(state.catalog.page_size).is_none() {
        return Err(AppError::BadRequest {
            message: format!("Page {} is out of range", page.0),
        });
    }
    apply(&state, &headers, Event::PageChanged(page)).await
}

async fn select_year<A: RegistryApi>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    Form(form): Form<YearForm>,
) -> Result<Response, AppError> {
    let year = match form.year.trim() {
        "" => None,
        raw => {
            let year = BirthYear::parse(raw)?;
            if !state.catalog.offers_year(year) {
                return Err(AppError::BadRequest {
                    message: format!("Birth year {year} is not offered"),
                });
            }
            Some(year)
        }
    };
    apply(&state, &headers, Event::YearChanged(year)).await
}

async fn search<A: RegistryApi>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    apply(&state, &headers, Event::QuerySubmitted(form.q)).await
}

async fn reset<A: RegistryApi>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    apply(&state, &headers, Event::Reset).await
}

/// Dispatch `event` to the caller's session.
///
/// htmx requests get the re-rendered `#app` fragment straight away, with
/// the results polling until the fetch lands. Plain form posts wait for
/// the fetch, then redirect back to the page.
async fn apply<A: RegistryApi>(
    state: &AppState<A>,
    headers: &HeaderMap,
    event: Event,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(session_id(headers)).await;
    session.controller.dispatch(event).await;

    let response = if is_htmx(headers) {
        let view = session.controller.view().await;
        render(AppTemplate { view })?
    } else {
        session.controller.settle().await;
        Redirect::to("/").into_response()
    };
    Ok(with_cookie(response, &session, state))
}

fn render(template: impl Template) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Bind the browser to a freshly created session.
fn with_cookie<A: RegistryApi>(
    mut response: Response,
    session: &Session<A>,
    state: &AppState<A>,
) -> Response {
    if !session.created {
        return response;
    }
    match HeaderValue::from_str(&session.cookie(state.sessions.ttl())) {
        Ok(value) => {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        Err(e) => warn!(error = %e, "session cookie is not a valid header"),
    }
    response
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// Check if request accepts HTML.
fn wants_html(headers: &HeaderMap) -> bool {
    is_htmx(headers)
        || headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains("text/html"))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<InvalidRegion> for AppError {
    fn from(e: InvalidRegion) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InvalidBirthYear> for AppError {
    fn from(e: InvalidBirthYear) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
