//! The component tree.

use std::fmt;
use std::sync::Arc;

use crate::routing::RouteProps;
use crate::store::Store;

use super::ComponentRef;

/// A node of the component tree.
///
/// Components and providers are resolved lazily by
/// [`render_to_string`](super::render_to_string), so the tree stays cheap to
/// build and clone.
#[derive(Clone, Default)]
pub enum Element {
    /// Renders nothing.
    #[default]
    Empty,
    Text(String),
    Tag(Tag),
    Fragment(Vec<Element>),
    /// A component invoked with route props and optional nested children.
    Component {
        component: ComponentRef,
        props: Arc<RouteProps>,
        children: Option<Box<Element>>,
    },
    /// Makes `store` available to every component below `child`.
    Provider { store: Store, child: Box<Element> },
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn fragment(children: impl IntoIterator<Item = Element>) -> Self {
        Self::Fragment(children.into_iter().collect())
    }

    /// A component element, optionally wrapping the element of a nested route.
    pub fn component(
        component: ComponentRef,
        props: Arc<RouteProps>,
        children: Option<Element>,
    ) -> Self {
        Self::Component {
            component,
            props,
            children: children.map(Box::new),
        }
    }

    pub fn provider(store: Store, child: Element) -> Self {
        Self::Provider {
            store,
            child: Box::new(child),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Tag(tag) => fmt::Debug::fmt(tag, f),
            Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
            Self::Component {
                component,
                children,
                ..
            } => f
                .debug_struct("Component")
                .field("name", &component.name())
                .field("children", children)
                .finish(),
            Self::Provider { child, .. } => f.debug_struct("Provider").field("child", child).finish(),
        }
    }
}

impl From<Tag> for Element {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Element {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An HTML element with attributes and children.
#[derive(Debug, Clone)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value of the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set an attribute only when a value is present.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }
}
