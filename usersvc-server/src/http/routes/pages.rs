//! Static HTML pages for manual use of the API

use axum::{response::Html, routing::get, Router};

const INDEX_HTML: &str = include_str!("../../../static/index.html");
const MANAGE_USERS_HTML: &str = include_str!("../../../static/manage_users.html");

/// GET /
async fn index() -> Html<&'static str> {
    tracing::debug!("serving index page");
    Html(INDEX_HTML)
}

/// GET /manage-users
async fn manage_users() -> Html<&'static str> {
    tracing::debug!("serving manage-users page");
    Html(MANAGE_USERS_HTML)
}

/// Page routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/manage-users", get(manage_users))
}
