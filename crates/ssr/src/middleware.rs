//! Ordered HTTP middleware chain.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures_util::future::BoxFuture;

/// A link in the HTTP middleware chain.
///
/// Receives the request and the rest of the chain; calling `next.run(req)`
/// continues towards the renderer.
pub type HttpMiddleware =
    Arc<dyn Fn(Request, Next) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wrap an async closure as an [`HttpMiddleware`].
pub fn middleware_fn<F, Fut>(f: F) -> HttpMiddleware
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |request, next| Box::pin(f(request, next)))
}

/// Middleware setting a response header on every response.
pub fn set_header(name: HeaderName, value: HeaderValue) -> HttpMiddleware {
    middleware_fn(move |request, next| {
        let name = name.clone();
        let value = value.clone();
        async move {
            let mut response = next.run(request).await;
            response.headers_mut().insert(name, value);
            response
        }
    })
}

/// Layer `middleware` onto `router` so that the first entry runs outermost.
pub(crate) fn apply(router: Router, middleware: &[HttpMiddleware]) -> Router {
    middleware.iter().rev().fold(router, |router, link| {
        let link = link.clone();
        router.layer(from_fn(move |request: Request, next: Next| {
            let link = link.clone();
            async move { link(request, next).await }
        }))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::{body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn recorder(log: Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> HttpMiddleware {
        middleware_fn(move |request, next| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(name);
                next.run(request).await
            }
        })
    }

    #[tokio::test]
    async fn test_first_registered_runs_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = vec![recorder(log.clone(), "first"), recorder(log.clone(), "second")];
        let app = apply(Router::new().route("/", get(|| async { "ok" })), &chain);

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_set_header_applies_to_fallback() {
        let app = apply(
            Router::new().fallback(|| async { (StatusCode::NOT_FOUND, "nope") }),
            &[set_header(
                HeaderName::from_static("x-poo"),
                HeaderValue::from_static("true"),
            )],
        );

        let response = app
            .oneshot(axum::http::Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-poo"], "true");
    }
}
