//! Components and the props they render with.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::routing::RouteProps;
use crate::store::{Dispatch, Store};

use super::Element;

/// Shared reference to a component.
pub type ComponentRef = Arc<dyn Component>;

/// Function producing the dispatch that populates state for a route.
pub type ActionCreator = Arc<dyn Fn(&RouteProps) -> Dispatch + Send + Sync>;

/// A renderable unit of the tree.
///
/// Rendering is synchronous and must not block: any data the component needs
/// is loaded beforehand by its [`actions`](Component::actions), which the
/// server dispatches before rendering.
pub trait Component: Send + Sync {
    /// Name used in logs and debug output.
    fn name(&self) -> &str;

    fn render(&self, props: &Props<'_>) -> Element;

    /// Dispatches that populate the store before this component renders.
    fn actions(&self) -> &[ActionCreator] {
        &[]
    }
}

/// Everything a component sees while rendering.
pub struct Props<'a> {
    pub route: &'a RouteProps,
    /// Element of the nested route, if this component is not the leaf.
    pub children: Option<&'a Element>,
    /// Store of the nearest provider above this component.
    pub store: Option<&'a Store>,
}

impl Props<'_> {
    /// Route param by name (e.g. `id` for `/users/:id`).
    pub fn param(&self, name: &str) -> Option<&str> {
        self.route.param(name)
    }

    /// Query string value by name.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.route.query(name)
    }

    /// Snapshot of the provided store's state.
    pub fn state(&self) -> Option<Value> {
        self.store.map(Store::state)
    }

    /// The nested route's element, or nothing.
    pub fn children(&self) -> Element {
        self.children.cloned().unwrap_or_default()
    }
}

/// A component backed by a render closure.
pub struct FnComponent<F> {
    name: String,
    render: F,
    actions: Vec<ActionCreator>,
}

/// Build a component from a name and a render closure.
///
/// ```
/// use hut_core::{component, Tag};
///
/// let foo = component("Foo", |_props| Tag::new("div").attr("class", "foo").into());
/// ```
pub fn component<F>(name: impl Into<String>, render: F) -> FnComponent<F>
where
    F: Fn(&Props<'_>) -> Element + Send + Sync,
{
    FnComponent {
        name: name.into(),
        render,
        actions: Vec::new(),
    }
}

impl<F> FnComponent<F>
where
    F: Fn(&Props<'_>) -> Element + Send + Sync + 'static,
{
    /// Attach an action creator; actions dispatch in the order they are added.
    pub fn with_action<A>(mut self, action: A) -> Self
    where
        A: Fn(&RouteProps) -> Dispatch + Send + Sync + 'static,
    {
        self.actions.push(Arc::new(action));
        self
    }

    pub fn into_ref(self) -> ComponentRef {
        Arc::new(self)
    }
}

impl<F> Component for FnComponent<F>
where
    F: Fn(&Props<'_>) -> Element + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &Props<'_>) -> Element {
        (self.render)(props)
    }

    fn actions(&self) -> &[ActionCreator] {
        &self.actions
    }
}

impl<F> From<FnComponent<F>> for ComponentRef
where
    F: Fn(&Props<'_>) -> Element + Send + Sync + 'static,
{
    fn from(component: FnComponent<F>) -> Self {
        Arc::new(component)
    }
}

impl<F> fmt::Debug for FnComponent<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComponent")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Action;
    use crate::view::Tag;

    #[test]
    fn test_fn_component_renders_and_keeps_actions_in_order() {
        let foo = component("Foo", |props| {
            Tag::new("div")
                .attr_opt("data-id", props.param("id"))
                .into()
        })
        .with_action(|_| Action::new("first").into())
        .with_action(|_| Action::new("second").into());

        assert_eq!(foo.name(), "Foo");
        assert_eq!(foo.actions().len(), 2);

        let route = RouteProps::for_path("/users/7").with_param("id", "7");
        let kinds: Vec<String> = foo
            .actions()
            .iter()
            .map(|creator| match creator(&route) {
                Dispatch::Action(action) => action.kind,
                Dispatch::Task(_) => "task".to_string(),
            })
            .collect();
        assert_eq!(kinds, vec!["first", "second"]);

        let rendered = foo.render(&Props {
            route: &route,
            children: None,
            store: None,
        });
        let Element::Tag(tag) = rendered else {
            panic!("expected a tag");
        };
        assert_eq!(tag.get_attr("data-id"), Some("7"));
    }

    #[test]
    fn test_props_children_defaults_to_empty() {
        let route = RouteProps::for_path("/");
        let props = Props {
            route: &route,
            children: None,
            store: None,
        };
        assert!(props.children().is_empty());
        assert!(props.state().is_none());
    }
}
