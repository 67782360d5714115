//! Pure rendering harness logic - no sockets, no threads, no side effects.
//!
//! This crate provides everything the server renderer and the client
//! bootstrap share:
//! - [`HutConfig`] - the immutable shared configuration
//! - [`Store`] - the unidirectional state container
//! - [`RouteTable`] - route matching, redirects and entry hooks
//! - [`Element`] and [`render_to_string`] - the component tree and its markup
//! - [`render_document`] - the HTML document handed to the browser
//! - [`render_location`] - the request-independent render pipeline
//!
//! # Example
//!
//! ```
//! use hut_core::{component, HutConfig, Location, RenderOutcome, Route, Tag};
//!
//! let home = component("Home", |_props| Tag::new("div").attr("class", "home").into());
//!
//! let config = HutConfig::builder()
//!     .with_mount_point("root")
//!     .with_route(Route::new("/").component(home))
//!     .build()
//!     .unwrap();
//!
//! let outcome = futures_util::FutureExt::now_or_never(hut_core::render_location(
//!     &config,
//!     &Location::parse("/"),
//! ))
//! .unwrap()
//! .unwrap();
//!
//! let RenderOutcome::Rendered(result) = outcome else {
//!     panic!("expected a render");
//! };
//! assert!(result.markup.contains(r#"class="home""#));
//! ```

mod config;
mod document;
mod error;
mod http_mapping;
mod render;
pub mod routing;
pub mod store;
pub mod view;

pub use config::{HutConfig, HutConfigBuilder, DEFAULT_INITIAL_STATE_VAR, DEFAULT_MOUNT_POINT};
pub use document::{
    render_document, serialize_state, DocumentParts, DocumentShell, TitleProvider,
};
pub use error::{HutError, RenderError, Result};
pub use http_mapping::{render_error_to_status_code, render_outcome_to_status_code};
pub use render::{populate_store, render_location, RenderOutcome, RenderResult};
pub use routing::{
    routing_context, EnterHook, Location, PathPattern, Redirect, Route, RouteEntry, RouteError,
    RouteMatch, RouteProps, RouteTable, Transition,
};
pub use store::{
    default_reducer, reducer, Action, ActionError, Dispatch, Next, Reducer, Store,
    StoreMiddleware,
};
pub use view::{
    component, html_escape, render_to_string, ActionCreator, Component, ComponentRef, Element,
    FnComponent, Props, Tag, HYDRATION_ATTR,
};
