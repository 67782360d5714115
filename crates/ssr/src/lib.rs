//! Server Renderer - Imperative Shell.
//!
//! This crate owns the HTTP side of rendering: the listener lifecycle, the
//! HTTP middleware chain and the mapping of render outcomes to responses.
//! Everything it renders comes from pure functions in `hut_core`.
//!
//! # Architecture
//!
//! - **Functional Core** (`hut_core`): route matching, state population,
//!   markup and document assembly
//! - **Imperative Shell** (this crate): sockets, axum, tracing
//!
//! # Example
//!
//! ```no_run
//! use axum::http::{HeaderName, HeaderValue};
//! use hut_core::{component, HutConfig, Route, Tag};
//! use hut_ssr::{set_header, HutServer, ServerOptions};
//!
//! # async fn run() -> hut_ssr::Result<()> {
//! let config = HutConfig::builder()
//!     .with_route(Route::new("/").component(component("Home", |_| Tag::new("h1").child("hi").into())))
//!     .build()?;
//!
//! let options = ServerOptions::default()
//!     .with_port(8080)
//!     .with_script("/client.js")
//!     .with_title("Home")
//!     .with_middleware(set_header(
//!         HeaderName::from_static("x-powered-by"),
//!         HeaderValue::from_static("hut"),
//!     ));
//!
//! let mut server = HutServer::new(config, options);
//! let addr = server.run().await?;
//! println!("listening on {addr}");
//! server.stop().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod middleware;
mod options;
mod server;

// Re-export core types for convenience
pub use hut_core::{HutConfig, TitleProvider};

pub use error::{Result, SsrError};
pub use middleware::{middleware_fn, set_header, HttpMiddleware};
pub use options::{ServerOptions, DEFAULT_HOST, DEFAULT_PORT};
pub use server::HutServer;
