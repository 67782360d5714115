//! The render pipeline shared by every transport.
//!
//! `match -> populate -> render`, with no I/O of its own: the server maps the
//! [`RenderOutcome`] onto an HTTP response.

use std::sync::Arc;

use futures_util::future::try_join_all;
use serde_json::Value;

use crate::config::HutConfig;
use crate::error::RenderError;
use crate::routing::{routing_context, Location, RouteMatch, RouteProps};
use crate::store::{ActionError, Store};
use crate::view::render_to_string;

/// A successful render.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub markup: String,
    /// State after population, as the client will receive it.
    pub state: Value,
    pub props: Arc<RouteProps>,
}

/// Every non-error way a render can end.
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Rendered(RenderResult),
    Redirect { from: String, to: String },
    NotFound { path: String },
}

/// Dispatch the actions of every component on the matched branch.
///
/// Actions are started in branch order, and in declaration order within a
/// component, then awaited together. The first failure is returned.
pub async fn populate_store(store: &Store, props: &RouteProps) -> Result<(), ActionError> {
    let pending: Vec<_> = props
        .components()
        .flat_map(|component| component.actions())
        .map(|action| store.dispatch(action(props)))
        .collect();

    try_join_all(pending).await?;
    Ok(())
}

/// Match `location`, populate a fresh store and render the branch.
pub async fn render_location(
    config: &HutConfig,
    location: &Location,
) -> Result<RenderOutcome, RenderError> {
    let props = match config.routes().resolve(location).await? {
        RouteMatch::NotFound => {
            return Ok(RenderOutcome::NotFound {
                path: location.pathname.clone(),
            })
        }
        RouteMatch::Redirect { from, to } => return Ok(RenderOutcome::Redirect { from, to }),
        RouteMatch::Matched(props) => Arc::new(props),
    };

    let store = config.create_store(None);
    populate_store(&store, &props).await?;

    let element = config.wrap_with_provider(&store, routing_context(props.clone()));
    let markup = render_to_string(&element);

    Ok(RenderOutcome::Rendered(RenderResult {
        markup,
        state: store.state(),
        props,
    }))
}
