//! Props produced by a successful route match.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::view::ComponentRef;

use super::{Location, Route};

/// The matched location, its params and the branch of routes it went
/// through, outermost first.
#[derive(Clone, Default)]
pub struct RouteProps {
    pub location: Location,
    pub params: BTreeMap<String, String>,
    pub branch: Vec<Arc<Route>>,
}

impl RouteProps {
    pub fn new(
        location: Location,
        params: BTreeMap<String, String>,
        branch: Vec<Arc<Route>>,
    ) -> Self {
        Self {
            location,
            params,
            branch,
        }
    }

    /// Props for a bare path with no params or matched routes.
    pub fn for_path(url: &str) -> Self {
        Self {
            location: Location::parse(url),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.location.query.get(name).map(String::as_str)
    }

    /// Components along the branch, outermost first.
    pub fn components(&self) -> impl Iterator<Item = &ComponentRef> {
        self.branch.iter().filter_map(|route| route.component_ref())
    }
}

impl fmt::Debug for RouteProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let branch: Vec<&str> = self
            .branch
            .iter()
            .map(|route| route.path().unwrap_or("<pathless>"))
            .collect();
        f.debug_struct("RouteProps")
            .field("location", &self.location)
            .field("params", &self.params)
            .field("branch", &branch)
            .finish()
    }
}
