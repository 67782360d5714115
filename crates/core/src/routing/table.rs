//! Route descriptors and the compiled route table.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::view::ComponentRef;

use super::pattern::{join, PathPattern};
use super::{Location, RouteError, RouteProps};

/// Outcome of an entry hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Continue,
    /// Send the request elsewhere instead of rendering.
    Redirect(String),
}

/// Hook run before a matched route renders.
///
/// Hooks may wait (e.g. for a session lookup) and may redirect.
pub type EnterHook =
    Arc<dyn Fn(&RouteProps) -> BoxFuture<'static, Result<Transition, RouteError>> + Send + Sync>;

/// A route descriptor.
///
/// ```
/// use hut_core::{component, Route, Tag};
///
/// let users = Route::new("/users")
///     .component(component("Users", |props| Tag::new("section").child(props.children()).into()))
///     .child(Route::new(":id").component(component("User", |_| Tag::new("article").into())));
/// ```
#[derive(Clone, Default)]
pub struct Route {
    path: Option<String>,
    component: Option<ComponentRef>,
    children: Vec<RouteEntry>,
    index: Option<Box<Route>>,
    on_enter: Option<EnterHook>,
}

impl Route {
    /// A route matching `path`, absolute or relative to its parent.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// A route that matches only through its children, typically a layout.
    pub fn pathless() -> Self {
        Self::default()
    }

    pub fn component(mut self, component: impl Into<ComponentRef>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn child(mut self, entry: impl Into<RouteEntry>) -> Self {
        self.children.push(entry.into());
        self
    }

    pub fn children(mut self, entries: impl IntoIterator<Item = RouteEntry>) -> Self {
        self.children.extend(entries);
        self
    }

    /// Route rendered inside this one when the location matches it exactly.
    pub fn index(mut self, route: Route) -> Self {
        self.index = Some(Box::new(route));
        self
    }

    /// Run `hook` before rendering whenever this route is on the matched branch.
    pub fn on_enter<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(&RouteProps) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Transition, RouteError>> + Send + 'static,
    {
        self.on_enter = Some(Arc::new(move |props| Box::pin(hook(props))));
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn component_ref(&self) -> Option<&ComponentRef> {
        self.component.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("component", &self.component.as_ref().map(|c| c.name().to_string()))
            .field("children", &self.children)
            .field("index", &self.index)
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

/// Permanent redirect from one pattern to another.
///
/// Params captured by `from` fill the matching params of `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}

impl Redirect {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RouteEntry {
    Route(Route),
    Redirect(Redirect),
}

impl From<Route> for RouteEntry {
    fn from(route: Route) -> Self {
        Self::Route(route)
    }
}

impl From<Redirect> for RouteEntry {
    fn from(redirect: Redirect) -> Self {
        Self::Redirect(redirect)
    }
}

/// Result of resolving a location.
#[derive(Debug, Clone)]
pub enum RouteMatch {
    Matched(RouteProps),
    Redirect { from: String, to: String },
    NotFound,
}

#[derive(Debug)]
enum Compiled {
    Route(CompiledRoute),
    Redirect { from: PathPattern, to: PathPattern },
}

#[derive(Debug)]
struct CompiledRoute {
    route: Arc<Route>,
    /// `None` for pathless routes.
    pattern: Option<PathPattern>,
    index: Option<Arc<Route>>,
    children: Vec<Compiled>,
}

/// Matched branch before entry hooks run.
enum Found {
    Branch {
        branch: Vec<Arc<Route>>,
        params: std::collections::BTreeMap<String, String>,
    },
    Redirect(String),
}

/// Compiled, immutable route configuration.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Arc<Vec<Compiled>>,
}

impl RouteTable {
    /// Compile entries, resolving relative child paths against their parents.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        let compiled = compile(&entries, "/")?;
        Ok(Self {
            entries: Arc::new(compiled),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the branch for a location and run its entry hooks.
    ///
    /// Entries are tried in declaration order and children before their
    /// parent. Hooks run outermost first; the first redirect wins.
    pub async fn resolve(&self, location: &Location) -> Result<RouteMatch, RouteError> {
        let (branch, params) = match find(&self.entries, location) {
            None => return Ok(RouteMatch::NotFound),
            Some(Found::Redirect(to)) => {
                return Ok(RouteMatch::Redirect {
                    from: location.pathname.clone(),
                    to,
                })
            }
            Some(Found::Branch { branch, params }) => (branch, params),
        };

        let props = RouteProps::new(location.clone(), params, branch);

        for route in &props.branch {
            let Some(hook) = &route.on_enter else {
                continue;
            };
            if let Transition::Redirect(to) = hook(&props).await? {
                return Ok(RouteMatch::Redirect {
                    from: location.pathname.clone(),
                    to,
                });
            }
        }

        Ok(RouteMatch::Matched(props))
    }
}

fn compile(entries: &[RouteEntry], base: &str) -> Result<Vec<Compiled>, RouteError> {
    entries
        .iter()
        .map(|entry| match entry {
            RouteEntry::Redirect(redirect) => Ok(Compiled::Redirect {
                from: PathPattern::parse(&join(base, &redirect.from))?,
                to: PathPattern::parse(&join(base, &redirect.to))?,
            }),
            RouteEntry::Route(route) => {
                let full = join(base, route.path.as_deref().unwrap_or_default());
                let pattern = match route.path {
                    Some(_) => Some(PathPattern::parse(&full)?),
                    None => None,
                };
                Ok(Compiled::Route(CompiledRoute {
                    route: Arc::new(route.clone()),
                    pattern,
                    index: route.index.as_deref().cloned().map(Arc::new),
                    children: compile(&route.children, &full)?,
                }))
            }
        })
        .collect()
}

fn find(entries: &[Compiled], location: &Location) -> Option<Found> {
    entries.iter().find_map(|entry| match entry {
        Compiled::Redirect { from, to } => {
            let params = from.match_path(&location.pathname)?;
            // A target missing params falls back to its literal text.
            let target = to
                .format(&params)
                .unwrap_or_else(|_| to.source().to_string());
            Some(Found::Redirect(target))
        }
        Compiled::Route(compiled) => find_in_route(compiled, location),
    })
}

fn find_in_route(compiled: &CompiledRoute, location: &Location) -> Option<Found> {
    if let Some(found) = find(&compiled.children, location) {
        return Some(match found {
            Found::Branch { mut branch, params } => {
                branch.insert(0, compiled.route.clone());
                Found::Branch { branch, params }
            }
            redirect => redirect,
        });
    }

    let params = compiled.pattern.as_ref()?.match_path(&location.pathname)?;
    let mut branch = vec![compiled.route.clone()];
    branch.extend(compiled.index.clone());
    Some(Found::Branch { branch, params })
}
