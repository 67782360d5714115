//! Page-load bootstrap.

use std::sync::Arc;

use hut_core::{
    populate_store, render_to_string, routing_context, HutConfig, Location, RouteMatch,
    RouteProps, Store,
};

use crate::error::{ClientError, Result};
use crate::history::History;
use crate::page::Page;

/// Redirects followed during one resolution before giving up.
const MAX_REDIRECTS: usize = 10;

/// Boots the application on a page rendered by the server.
pub struct HutClient {
    config: Arc<HutConfig>,
    history: Option<Box<dyn History>>,
}

impl HutClient {
    pub fn new(config: impl Into<Arc<HutConfig>>) -> Self {
        Self {
            config: config.into(),
            history: None,
        }
    }

    /// Use `history` instead of the page's own.
    pub fn with_history(mut self, history: impl History + 'static) -> Self {
        self.history = Some(Box::new(history));
        self
    }

    /// Rehydrate the store and mount the routed tree.
    ///
    /// With server state present the store is used as is; without it the
    /// matched route's actions run first, as they would on the server.
    pub async fn run<P: Page>(self, page: P) -> Result<Mounted<P>> {
        let initial_state = page.global(self.config.initial_state_var())?;
        let hydrated = initial_state.is_some();
        let store = self.config.create_store(initial_state);
        let history = match self.history {
            Some(history) => history,
            None => page.history(),
        };

        tracing::debug!(
            mount_point = self.config.mount_point(),
            hydrated,
            "Bootstrapping client"
        );

        let mut mounted = Mounted {
            config: self.config,
            store,
            history,
            page,
            props: None,
        };
        mounted.render(!hydrated).await?;
        Ok(mounted)
    }
}

/// A running client.
pub struct Mounted<P> {
    config: Arc<HutConfig>,
    store: Store,
    history: Box<dyn History>,
    page: P,
    props: Option<Arc<RouteProps>>,
}

impl<P: Page> Mounted<P> {
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn location(&self) -> Location {
        self.history.location()
    }

    /// Props of the currently rendered route, if any matched.
    pub fn props(&self) -> Option<&RouteProps> {
        self.props.as_deref()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Push `path` onto the history, populate for the new route and re-mount.
    pub async fn navigate(&mut self, path: &str) -> Result<()> {
        self.history.push(path)?;
        self.render(true).await
    }

    async fn render(&mut self, populate: bool) -> Result<()> {
        let mut location = self.history.location();

        for _ in 0..=MAX_REDIRECTS {
            match self.config.routes().resolve(&location).await? {
                RouteMatch::Redirect { from, to } => {
                    tracing::debug!(from = %from, to = %to, "Redirecting");
                    self.history.replace(&to)?;
                    location = self.history.location();
                }
                RouteMatch::NotFound => {
                    tracing::warn!(path = %location.pathname, "No route matched");
                    self.props = None;
                    return self.page.mount(self.config.mount_point(), "");
                }
                RouteMatch::Matched(props) => {
                    let props = Arc::new(props);
                    if populate {
                        populate_store(&self.store, &props).await?;
                    }

                    let element = self
                        .config
                        .wrap_with_provider(&self.store, routing_context(props.clone()));
                    self.page
                        .mount(self.config.mount_point(), &render_to_string(&element))?;
                    self.props = Some(props);
                    return Ok(());
                }
            }
        }

        Err(ClientError::RedirectLoop(location.pathname))
    }
}
