//! The demo site: a small team directory.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use hut_core::{
    component, Action, ActionError, Dispatch, Element, HutConfig, HutError, Redirect, Route,
    Tag, TitleProvider,
};
use hut_ssr::{set_header, HutServer, ServerOptions};
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::mock_data::{find_member, MEMBERS};

const SITE_NAME: &str = "Hut";

/// Build the server for the demo site.
pub fn create_server(config: &Config, options: ServerOptions) -> Result<HutServer, HutError> {
    let options = options.with_middleware(set_header(
        HeaderName::from_static("x-powered-by"),
        HeaderValue::from_static("hut"),
    ));

    Ok(HutServer::new(create_config(config)?, options))
}

/// Shared configuration: routes, reducer and names.
pub fn create_config(config: &Config) -> Result<HutConfig, HutError> {
    let delay = config.load_delay();

    HutConfig::builder()
        .with_mount_point(config.mount_point.clone())
        .with_initial_state_var(config.initial_state_var.clone())
        .with_reducer(site_reducer)
        .with_route(Redirect::new("/team", "/members"))
        .with_route(Redirect::new("/team/:id", "/members/:id"))
        .with_route(
            Route::new("/")
                .component(layout())
                .index(Route::pathless().component(home()))
                .child(
                    Route::new("members")
                        .component(members(delay))
                        .child(Route::new(":id").component(member(delay))),
                ),
        )
        .build()
}

/// Title showing the selected member, if any.
pub fn title() -> TitleProvider {
    TitleProvider::dynamic(|_props, state| match state["member"]["name"].as_str() {
        Some(name) => format!("{name} | {SITE_NAME}"),
        None => SITE_NAME.to_string(),
    })
}

fn site_reducer(state: Option<&Value>, action: &Action) -> Value {
    // Anything other than an object is replaced by the default shape.
    let mut state = match state {
        Some(Value::Object(state)) => state.clone(),
        _ => Map::from_iter([
            ("members".to_string(), json!([])),
            ("member".to_string(), Value::Null),
        ]),
    };

    match action.kind.as_str() {
        "members/loaded" => {
            let members = action.get("members").cloned().unwrap_or_else(|| json!([]));
            state.insert("members".to_string(), members);
        }
        "member/loaded" => {
            let member = action.get("member").cloned().unwrap_or(Value::Null);
            state.insert("member".to_string(), member);
        }
        _ => {}
    }

    Value::Object(state)
}

fn layout() -> hut_core::ComponentRef {
    component("Layout", |props| {
        Tag::new("div")
            .attr("class", "site")
            .child(
                Tag::new("nav")
                    .child(Tag::new("a").attr("href", "/").child("Home"))
                    .child(Tag::new("a").attr("href", "/members").child("Members")),
            )
            .child(Tag::new("main").child(props.children()))
            .into()
    })
    .into_ref()
}

fn home() -> hut_core::ComponentRef {
    component("Home", |_| {
        Tag::new("h1").attr("class", "home").child("Welcome").into()
    })
    .into_ref()
}

fn members(delay: Duration) -> hut_core::ComponentRef {
    component("Members", |props| {
        let state = props.state().unwrap_or_default();
        let items = state["members"]
            .as_array()
            .map(|members| {
                members
                    .iter()
                    .map(|member| {
                        let href = format!("/members/{}", member["id"]);
                        let name = member["name"].as_str().unwrap_or_default().to_string();
                        Tag::new("li")
                            .child(Tag::new("a").attr("href", href).child(name))
                            .into()
                    })
                    .collect::<Vec<Element>>()
            })
            .unwrap_or_default();

        Tag::new("section")
            .attr("class", "members")
            .child(Tag::new("ul").children(items))
            .child(props.children())
            .into()
    })
    .with_action(move |_| {
        Dispatch::task(move |store| async move {
            tokio::time::sleep(delay).await;
            store.dispatch_action(Action::new("members/loaded").with("members", json!(MEMBERS)));
            Ok(())
        })
    })
    .into_ref()
}

fn member(delay: Duration) -> hut_core::ComponentRef {
    component("Member", |props| {
        let state = props.state().unwrap_or_default();
        let member = &state["member"];

        Tag::new("article")
            .attr("class", "member")
            .child(Tag::new("h2").child(member["name"].as_str().unwrap_or_default()))
            .child(Tag::new("p").child(member["role"].as_str().unwrap_or_default()))
            .into()
    })
    .with_action(move |props| {
        let id = props.param("id").unwrap_or_default().to_string();
        Dispatch::task(move |store| async move {
            tokio::time::sleep(delay).await;
            let member = id
                .parse()
                .ok()
                .and_then(find_member)
                .ok_or_else(|| ActionError::rejected(format!("No member with id {id}")))?;
            store.dispatch_action(Action::new("member/loaded").with("member", json!(member)));
            Ok(())
        })
    })
    .into_ref()
}
