//! Askama templates for the web frontend.

use askama::Template;

use crate::view::ViewModel;

/// Full page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: ViewModel,
}

/// The `#app` fragment returned to htmx after an event.
#[derive(Template)]
#[template(path = "app.html")]
pub struct AppTemplate {
    pub view: ViewModel,
}

/// The results fragment, which polls itself while loading.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub view: ViewModel,
}
