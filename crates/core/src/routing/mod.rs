//! Route matching, redirects and entry hooks.

mod context;
mod error;
mod location;
mod pattern;
mod props;
mod table;

pub use context::routing_context;
pub use error::RouteError;
pub use location::Location;
pub use pattern::PathPattern;
pub use props::RouteProps;
pub use table::{EnterHook, Redirect, Route, RouteEntry, RouteMatch, RouteTable, Transition};
