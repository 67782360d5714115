//! Listener lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use hut_core::{DocumentShell, HutConfig};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower_http::trace::TraceLayer;

use crate::error::{Result, SsrError};
use crate::handler::{render_site, Site};
use crate::middleware;
use crate::options::ServerOptions;

struct Running {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

/// Server-side renderer bound to one configuration.
///
/// Every request that reaches the server is rendered; there are no other
/// routes. Put static file serving in front of it, or in a middleware.
pub struct HutServer {
    config: Arc<HutConfig>,
    options: ServerOptions,
    shell: Arc<DocumentShell>,
    running: Option<Running>,
}

impl HutServer {
    /// Create a server. Script and style tags are built here, once.
    pub fn new(config: HutConfig, options: ServerOptions) -> Self {
        let shell = DocumentShell::new(&options.scripts, &options.styles);

        Self {
            config: Arc::new(config),
            options,
            shell: Arc::new(shell),
            running: None,
        }
    }

    pub fn config(&self) -> &HutConfig {
        &self.config
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }

    /// The fully layered application, without a listener.
    pub fn router(&self) -> Router {
        let site = Arc::new(Site {
            config: self.config.clone(),
            shell: self.shell.clone(),
            title: self.options.title.clone(),
        });

        let router = Router::new().fallback(render_site).with_state(site);

        middleware::apply(router, &self.options.middleware).layer(TraceLayer::new_for_http())
    }

    /// Bind the listener and start serving in the background.
    ///
    /// Resolves once the socket is listening, with the bound address.
    pub async fn run(&mut self) -> Result<SocketAddr> {
        if self.running.is_some() {
            return Err(SsrError::AlreadyRunning);
        }

        let addr = self.options.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| SsrError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| SsrError::Bind { addr, source })?;

        let (shutdown, signal) = oneshot::channel::<()>();
        let app = self.router();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    // A dropped sender also stops the server.
                    let _ = signal.await;
                })
                .await
        });

        tracing::info!("listening on {}", local_addr);

        self.running = Some(Running {
            addr: local_addr,
            shutdown,
            task,
        });

        Ok(local_addr)
    }

    /// Stop accepting connections and wait for the server task to finish.
    pub async fn stop(&mut self) -> Result<()> {
        let running = self.running.take().ok_or(SsrError::NotRunning)?;

        // The receiver only goes away if the task already ended.
        let _ = running.shutdown.send(());

        running
            .task
            .await
            .map_err(|e| SsrError::Serve(e.to_string()))?
            .map_err(|e| SsrError::Serve(e.to_string()))?;

        tracing::info!(addr = %running.addr, "Server stopped");
        Ok(())
    }

    /// Address of the running listener.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.addr)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{HeaderName, HeaderValue, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use hut_core::{component, Redirect, Route, Tag, TitleProvider, Transition};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::set_header;

    const MOUNT_POINT: &str = "mount";
    const INITIAL_STATE: &str = "zzz";

    fn test_config() -> HutConfig {
        let foo = component("Foo", |_| Tag::new("div").attr("class", "foo").into()).into_ref();
        let bar = component("Bar", |_| Tag::new("div").attr("class", "bar").into());
        let params = component("Params", |props| {
            Tag::new("div")
                .attr_opt("data-a", props.param("a"))
                .attr_opt("data-b", props.query("b"))
                .into()
        });

        HutConfig::builder()
            .with_mount_point(MOUNT_POINT)
            .with_initial_state_var(INITIAL_STATE)
            .with_reducer(|_, _| json!(42))
            .with_route(Route::new("/foo").component(foo.clone()))
            .with_route(Route::new("/bar").component(bar))
            .with_route(Redirect::new("/phoo", "/foo"))
            .with_route(Route::new("/async").component(foo).on_enter(|_| async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(Transition::Continue)
            }))
            .with_route(Route::new("/params(/:a)").component(params))
            .build()
            .unwrap()
    }

    fn test_options() -> ServerOptions {
        ServerOptions::default()
            .with_port(0)
            .with_scripts(["/a.js", "/b.js"])
            .with_styles(["/a.css", "/b.css"])
            .with_title(TitleProvider::dynamic(|_, _| "Sweet Title".to_string()))
            .with_middleware(set_header(
                HeaderName::from_static("x-poo"),
                HeaderValue::from_static("true"),
            ))
    }

    fn test_server() -> HutServer {
        HutServer::new(test_config(), test_options())
    }

    async fn get(path: &str) -> Response {
        test_server()
            .router()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_unregistered_path_returns_404() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Bad route: /");
    }

    #[tokio::test]
    async fn test_foo_renders_foo_only() {
        let response = get("/foo").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/html; charset=utf-8"
        );

        let html = body_text(response).await;
        assert_eq!(html.matches(r#"class="foo""#).count(), 1);
        assert!(!html.contains(r#"class="bar""#));
    }

    #[tokio::test]
    async fn test_bar_renders_bar_only() {
        let html = body_text(get("/bar").await).await;
        assert_eq!(html.matches(r#"class="bar""#).count(), 1);
        assert!(!html.contains(r#"class="foo""#));
    }

    #[tokio::test]
    async fn test_redirect_returns_302() {
        let response = get("/phoo").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()["location"], "/foo");
        assert_eq!(body_text(response).await, "Moved: /phoo => /foo");
    }

    #[tokio::test]
    async fn test_redirect_location_is_the_target_path() {
        let response = get("/phoo?x=1").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()["location"], "/foo");
        assert_eq!(body_text(response).await, "Moved: /phoo => /foo");
    }

    #[tokio::test]
    async fn test_async_route_renders_after_delay() {
        let response = get("/async").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert_eq!(html.matches(r#"class="foo""#).count(), 1);
        assert!(!html.contains(r#"class="bar""#));
    }

    #[tokio::test]
    async fn test_app_is_the_only_child_of_the_mount_point() {
        let html = body_text(get("/foo").await).await;
        assert!(html.contains(
            r#"<section id="mount"><div data-hut-id=".0" class="foo"></div></section>"#
        ));
    }

    #[tokio::test]
    async fn test_body_holds_app_and_serialized_state_only() {
        let html = body_text(get("/foo").await).await;

        let body = html
            .split_once("<body>")
            .and_then(|(_, rest)| rest.split_once("</body>"))
            .map(|(body, _)| body)
            .unwrap();
        assert_eq!(
            body,
            concat!(
                "\n",
                r#"  <section id="mount"><div data-hut-id=".0" class="foo"></div></section>"#,
                "\n",
                "  <script>window.zzz = 42</script>",
                "\n"
            )
        );
    }

    #[tokio::test]
    async fn test_scripts_and_styles_in_head() {
        let html = body_text(get("/foo").await).await;
        let head = html.split_once("</head>").map(|(head, _)| head).unwrap();

        for src in ["/a.js", "/b.js"] {
            let tag = format!(r#"<script type="text/javascript" src="{src}" defer></script>"#);
            assert_eq!(head.matches(&tag).count(), 1, "{src}");
        }
        for href in ["/a.css", "/b.css"] {
            let tag = format!(r#"<link rel="stylesheet" type="text/css" href="{href}">"#);
            assert_eq!(head.matches(&tag).count(), 1, "{href}");
        }
    }

    #[tokio::test]
    async fn test_title_provider_sets_title() {
        let html = body_text(get("/foo").await).await;
        assert!(html.contains("<title>Sweet Title</title>"));
    }

    #[tokio::test]
    async fn test_middleware_runs_on_every_response() {
        for path in ["/foo", "/", "/phoo"] {
            let response = get(path).await;
            assert_eq!(response.headers()["x-poo"], "true", "{path}");
        }
    }

    #[tokio::test]
    async fn test_params_and_query_reach_component() {
        let response = get("/params/1?b=2").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(r#"data-a="1""#));
        assert!(html.contains(r#"data-b="2""#));

        let html = body_text(get("/params").await).await;
        assert!(!html.contains("data-a"));
    }

    #[tokio::test]
    async fn test_population_failure_returns_500() {
        let failing = component("Failing", |_| Tag::new("div").into()).with_action(|_| {
            hut_core::Dispatch::task(|_| async {
                Err(hut_core::ActionError::rejected("upstream unavailable"))
            })
        });
        let config = HutConfig::builder()
            .with_route(Route::new("/fail").component(failing))
            .build()
            .unwrap();

        let response = HutServer::new(config, ServerOptions::default())
            .router()
            .oneshot(Request::builder().uri("/fail").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Error: upstream unavailable");
    }

    #[tokio::test]
    async fn test_run_serves_until_stopped() {
        let mut server = test_server();
        let addr = server.run().await.unwrap();
        assert_eq!(server.local_addr(), Some(addr));

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        let response = client
            .get(format!("http://{addr}/foo"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.headers()["x-poo"], "true");
        assert!(response.text().await.unwrap().contains("window.zzz = 42"));

        let response = client
            .get(format!("http://{addr}/phoo"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::FOUND);
        drop(client);

        server.stop().await.unwrap();
        assert_eq!(server.local_addr(), None);
        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_run_twice_and_stop_twice() {
        let mut server = test_server();
        server.run().await.unwrap();
        assert!(matches!(server.run().await, Err(SsrError::AlreadyRunning)));

        server.stop().await.unwrap();
        assert!(matches!(server.stop().await, Err(SsrError::NotRunning)));
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let mut server = HutServer::new(test_config(), test_options().with_port(port));
        match server.run().await {
            Err(SsrError::Bind { addr, .. }) => assert_eq!(addr, format!("127.0.0.1:{port}")),
            other => panic!("expected a bind error, got {other:?}"),
        }
    }
}
