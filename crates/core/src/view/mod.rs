//! Component tree and markup rendering.

mod component;
mod element;
mod escape;
mod render;

pub use component::{component, ActionCreator, Component, ComponentRef, FnComponent, Props};
pub use element::{Element, Tag};
pub use escape::html_escape;
pub use render::{render_to_string, HYDRATION_ATTR};
