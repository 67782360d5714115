//! Server-only options.

use std::fmt;

use hut_core::TitleProvider;

use crate::middleware::HttpMiddleware;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Options the server needs on top of the shared [`hut_core::HutConfig`].
#[derive(Clone)]
pub struct ServerOptions {
    pub host: String,
    /// `0` binds an ephemeral port.
    pub port: u16,
    /// HTTP middleware, first entry outermost.
    pub middleware: Vec<HttpMiddleware>,
    pub title: TitleProvider,
    /// Script URLs included in every document, in order.
    pub scripts: Vec<String>,
    /// Stylesheet URLs included in every document, in order.
    pub styles: Vec<String>,
}

impl ServerOptions {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_middleware(mut self, middleware: HttpMiddleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn with_title(mut self, title: impl Into<TitleProvider>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_script(mut self, url: impl Into<String>) -> Self {
        self.scripts.push(url.into());
        self
    }

    pub fn with_scripts(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scripts.extend(urls.into_iter().map(Into::into));
        self
    }

    pub fn with_style(mut self, url: impl Into<String>) -> Self {
        self.styles.push(url.into());
        self
    }

    pub fn with_styles(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.styles.extend(urls.into_iter().map(Into::into));
        self
    }

    /// `host:port` as passed to the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            middleware: Vec::new(),
            title: TitleProvider::default(),
            scripts: Vec::new(),
            styles: Vec::new(),
        }
    }
}

impl fmt::Debug for ServerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("middleware", &self.middleware.len())
            .field("title", &self.title)
            .field("scripts", &self.scripts)
            .field("styles", &self.styles)
            .finish()
    }
}
