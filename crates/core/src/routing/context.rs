use std::sync::Arc;

use crate::view::Element;

use super::RouteProps;

/// Nest the components of a matched branch, outermost first.
///
/// Each component receives the element of the next one as its children;
/// routes without a component pass their children straight through.
pub fn routing_context(props: Arc<RouteProps>) -> Element {
    props
        .branch
        .iter()
        .rev()
        .filter_map(|route| route.component_ref())
        .fold(Element::Empty, |inner, component| {
            let children = (!inner.is_empty()).then_some(inner);
            Element::component(component.clone(), props.clone(), children)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Location, Route, RouteMatch, RouteTable};
    use crate::view::{component, render_to_string, Tag};

    #[tokio::test]
    async fn test_routing_context_nests_branch() {
        let table = RouteTable::new(vec![Route::new("/users")
            .component(component("Users", |props| {
                Tag::new("section").child(props.children()).into()
            }))
            .child(Route::pathless().child(Route::new(":id").component(component(
                "User",
                |props| Tag::new("p").child(props.param("id").unwrap_or_default()).into(),
            ))))
            .into()])
        .unwrap();

        let RouteMatch::Matched(props) = table.resolve(&Location::parse("/users/9")).await.unwrap()
        else {
            panic!("expected a match");
        };
        let tree = routing_context(Arc::new(props));

        assert_eq!(
            render_to_string(&tree),
            r#"<section data-hut-id=".0"><p data-hut-id=".0.0">9</p></section>"#
        );
    }

    #[test]
    fn test_empty_branch_renders_nothing() {
        let tree = routing_context(Arc::new(RouteProps::for_path("/")));
        assert!(tree.is_empty());
    }
}
