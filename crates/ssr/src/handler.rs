//! Catch-all render handler.
//!
//! Maps every [`RenderOutcome`] and [`RenderError`] onto exactly one
//! response. Status codes come from the pure tables in `hut_core`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use hut_core::{
    render_document, render_error_to_status_code, render_location,
    render_outcome_to_status_code, serialize_state, DocumentParts, DocumentShell, HutConfig,
    Location, RenderError, RenderOutcome, RenderResult, TitleProvider,
};

/// Everything the handler needs, shared across requests.
pub(crate) struct Site {
    pub config: Arc<HutConfig>,
    pub shell: Arc<DocumentShell>,
    pub title: TitleProvider,
}

/// Render whatever the request asks for.
pub(crate) async fn render_site(State(site): State<Arc<Site>>, uri: Uri) -> Response {
    let location = Location::parse(
        uri.path_and_query()
            .map(|path_and_query| path_and_query.as_str())
            .unwrap_or_else(|| uri.path()),
    );

    match render_location(&site.config, &location).await {
        Ok(outcome) => respond(&site, &location, outcome),
        Err(err) => error_response(&location, &err),
    }
}

fn respond(site: &Site, location: &Location, outcome: RenderOutcome) -> Response {
    let status = status_code(render_outcome_to_status_code(&outcome));

    match outcome {
        RenderOutcome::Rendered(result) => match document(site, &result) {
            Ok(document) => {
                tracing::debug!(path = %location.pathname, "Rendered");
                (status, Html(document)).into_response()
            }
            Err(err) => error_response(location, &err),
        },
        RenderOutcome::Redirect { from, to } => {
            tracing::info!(from = %from, to = %to, "Redirecting");
            (
                status,
                [(header::LOCATION, to.clone())],
                format!("Moved: {from} => {to}"),
            )
                .into_response()
        }
        RenderOutcome::NotFound { path } => {
            tracing::warn!(path = %path, "No route matched");
            (status, format!("Bad route: {path}")).into_response()
        }
    }
}

fn document(site: &Site, result: &RenderResult) -> Result<String, RenderError> {
    let state_json = serialize_state(&result.state)?;
    let title = site.title.title(&result.props, &result.state);

    Ok(render_document(
        &site.shell,
        &DocumentParts {
            title: &title,
            mount_point: site.config.mount_point(),
            markup: &result.markup,
            initial_state_var: site.config.initial_state_var(),
            state_json: &state_json,
        },
    ))
}

fn error_response(location: &Location, err: &RenderError) -> Response {
    tracing::error!(path = %location.pathname, error = %err, "Render failed");
    (
        status_code(render_error_to_status_code(err)),
        format!("Error: {err}"),
    )
        .into_response()
}

fn status_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
