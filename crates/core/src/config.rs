//! Shared configuration.
//!
//! One [`HutConfig`] is built at startup and handed to both the server
//! renderer and the client bootstrap.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{HutError, Result};
use crate::routing::{RouteEntry, RouteTable};
use crate::store::{default_reducer, reducer, Action, Reducer, Store, StoreMiddleware};
use crate::view::Element;

/// Default global variable holding the serialized state.
pub const DEFAULT_INITIAL_STATE_VAR: &str = "initialState";

/// Default id of the element the application is mounted into.
pub const DEFAULT_MOUNT_POINT: &str = "app";

/// Immutable configuration shared by the server and the client.
#[derive(Clone)]
pub struct HutConfig {
    initial_state_var: String,
    mount_point: String,
    routes: RouteTable,
    reducer: Reducer,
    store_middleware: Vec<Arc<dyn StoreMiddleware>>,
}

impl HutConfig {
    pub fn builder() -> HutConfigBuilder {
        HutConfigBuilder::default()
    }

    /// Name of the `window` global carrying the serialized state.
    pub fn initial_state_var(&self) -> &str {
        &self.initial_state_var
    }

    /// Id of the element the application renders into.
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Create a fresh store from the configured reducer and middleware.
    ///
    /// Every call returns an independent store.
    pub fn create_store(&self, initial_state: Option<Value>) -> Store {
        Store::new(
            self.reducer.clone(),
            self.store_middleware.clone(),
            initial_state,
        )
    }

    /// Make `store` available to every component in `element`.
    pub fn wrap_with_provider(&self, store: &Store, element: Element) -> Element {
        Element::provider(store.clone(), element)
    }
}

impl Default for HutConfig {
    fn default() -> Self {
        Self {
            initial_state_var: DEFAULT_INITIAL_STATE_VAR.to_string(),
            mount_point: DEFAULT_MOUNT_POINT.to_string(),
            routes: RouteTable::default(),
            reducer: default_reducer(),
            store_middleware: Vec::new(),
        }
    }
}

impl fmt::Debug for HutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HutConfig")
            .field("initial_state_var", &self.initial_state_var)
            .field("mount_point", &self.mount_point)
            .field("routes", &self.routes)
            .field("store_middleware", &self.store_middleware.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`HutConfig`]; validation happens in [`build`](Self::build).
pub struct HutConfigBuilder {
    initial_state_var: String,
    mount_point: String,
    routes: Vec<RouteEntry>,
    reducer: Reducer,
    store_middleware: Vec<Arc<dyn StoreMiddleware>>,
}

impl Default for HutConfigBuilder {
    fn default() -> Self {
        Self {
            initial_state_var: DEFAULT_INITIAL_STATE_VAR.to_string(),
            mount_point: DEFAULT_MOUNT_POINT.to_string(),
            routes: Vec::new(),
            reducer: default_reducer(),
            store_middleware: Vec::new(),
        }
    }
}

impl HutConfigBuilder {
    pub fn with_initial_state_var(mut self, name: impl Into<String>) -> Self {
        self.initial_state_var = name.into();
        self
    }

    pub fn with_mount_point(mut self, id: impl Into<String>) -> Self {
        self.mount_point = id.into();
        self
    }

    /// Replace the route entries.
    pub fn with_routes(mut self, routes: impl IntoIterator<Item = RouteEntry>) -> Self {
        self.routes = routes.into_iter().collect();
        self
    }

    /// Append one route entry.
    pub fn with_route(mut self, route: impl Into<RouteEntry>) -> Self {
        self.routes.push(route.into());
        self
    }

    pub fn with_reducer<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Value>, &Action) -> Value + Send + Sync + 'static,
    {
        self.reducer = reducer(f);
        self
    }

    /// Append a store middleware; middleware runs in the order added.
    pub fn with_store_middleware<M>(mut self, middleware: M) -> Self
    where
        M: StoreMiddleware + 'static,
    {
        self.store_middleware.push(Arc::new(middleware));
        self
    }

    /// Validate names and compile the route table.
    pub fn build(self) -> Result<HutConfig> {
        if !is_js_identifier(&self.initial_state_var) {
            return Err(HutError::InvalidConfig(format!(
                "initial state variable {:?} is not a JavaScript identifier",
                self.initial_state_var
            )));
        }

        if self.mount_point.is_empty() {
            return Err(HutError::InvalidConfig(
                "mount point cannot be empty".to_string(),
            ));
        }
        if self
            .mount_point
            .chars()
            .any(|c| matches!(c, '"' | '\'' | '<' | '>'))
        {
            return Err(HutError::InvalidConfig(format!(
                "mount point {:?} contains quotes or angle brackets",
                self.mount_point
            )));
        }

        let routes = RouteTable::new(self.routes)?;

        Ok(HutConfig {
            initial_state_var: self.initial_state_var,
            mount_point: self.mount_point,
            routes,
            reducer: self.reducer,
            store_middleware: self.store_middleware,
        })
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
