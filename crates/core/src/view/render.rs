//! Synchronous string rendering.

use crate::store::Store;

use super::escape::html_escape;
use super::{Element, Props, Tag};

/// Attribute carrying each element's position in the rendered tree.
///
/// The client uses it to recognise server markup when hydrating.
pub const HYDRATION_ATTR: &str = "data-hut-id";

/// Root position; children append `.<index>`.
const ROOT_ID: &str = ".0";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Render a tree to markup.
///
/// Components are invoked top-down; a component sees the store of the
/// nearest [`Element::Provider`] above it.
pub fn render_to_string(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, ROOT_ID, None, &mut out);
    out
}

fn write_element(element: &Element, id: &str, store: Option<&Store>, out: &mut String) {
    match element {
        Element::Empty => {}
        Element::Text(text) => out.push_str(&html_escape(text)),
        Element::Tag(tag) => write_tag(tag, id, store, out),
        Element::Fragment(children) => {
            for (index, child) in children.iter().enumerate() {
                write_element(child, &format!("{id}.{index}"), store, out);
            }
        }
        Element::Component {
            component,
            props,
            children,
        } => {
            let rendered = component.render(&Props {
                route: props,
                children: children.as_deref(),
                store,
            });
            write_element(&rendered, id, store, out);
        }
        Element::Provider { store, child } => write_element(child, id, Some(store), out),
    }
}

fn write_tag(tag: &Tag, id: &str, store: Option<&Store>, out: &mut String) {
    out.push('<');
    out.push_str(&tag.name);
    out.push_str(&format!(r#" {HYDRATION_ATTR}="{id}""#));
    for (name, value) in &tag.attrs {
        out.push_str(&format!(r#" {name}="{}""#, html_escape(value)));
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag.name.as_str()) {
        return;
    }

    for (index, child) in tag.children.iter().enumerate() {
        write_element(child, &format!("{id}.{index}"), store, out);
    }

    out.push_str("</");
    out.push_str(&tag.name);
    out.push('>');
}
