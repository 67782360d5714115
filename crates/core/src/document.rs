//! HTML document assembly.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{HutError, Result};
use crate::routing::RouteProps;
use crate::view::html_escape;

/// Script and style tags, built once and reused for every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentShell {
    scripts: String,
    styles: String,
}

impl DocumentShell {
    pub fn new<S, T>(scripts: S, styles: T) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let scripts = scripts
            .into_iter()
            .map(|url| {
                format!(
                    r#"<script type="text/javascript" src="{}" defer></script>"#,
                    html_escape(url.as_ref())
                )
            })
            .collect();
        let styles = styles
            .into_iter()
            .map(|url| {
                format!(
                    r#"<link rel="stylesheet" type="text/css" href="{}">"#,
                    html_escape(url.as_ref())
                )
            })
            .collect();

        Self { scripts, styles }
    }

    pub fn scripts(&self) -> &str {
        &self.scripts
    }

    pub fn styles(&self) -> &str {
        &self.styles
    }
}

/// Source of the document title.
#[derive(Clone)]
pub enum TitleProvider {
    Static(String),
    /// Computed per request from the matched route and the populated state.
    Dynamic(Arc<dyn Fn(&RouteProps, &Value) -> String + Send + Sync>),
}

impl TitleProvider {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&RouteProps, &Value) -> String + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    pub fn title(&self, props: &RouteProps, state: &Value) -> String {
        match self {
            Self::Static(title) => title.clone(),
            Self::Dynamic(f) => f(props, state),
        }
    }
}

impl Default for TitleProvider {
    fn default() -> Self {
        Self::Static(String::new())
    }
}

impl From<&str> for TitleProvider {
    fn from(title: &str) -> Self {
        Self::Static(title.to_string())
    }
}

impl From<String> for TitleProvider {
    fn from(title: String) -> Self {
        Self::Static(title)
    }
}

impl fmt::Debug for TitleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(title) => f.debug_tuple("Static").field(title).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Per-request pieces of a document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentParts<'a> {
    pub title: &'a str,
    pub mount_point: &'a str,
    pub markup: &'a str,
    pub initial_state_var: &'a str,
    /// Output of [`serialize_state`].
    pub state_json: &'a str,
}

/// Assemble the full HTML document.
pub fn render_document(shell: &DocumentShell, parts: &DocumentParts<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head>
  <meta char-set="utf-8">
  <meta name="viewport" content="width=device-width, user-scalable=no">
  {scripts}{styles}
  <title>{title}</title>
</head><body>
  <section id="{mount_point}">{markup}</section>
  <script>window.{initial_state_var} = {state_json}</script>
</body></html>"#,
        scripts = shell.scripts,
        styles = shell.styles,
        title = html_escape(parts.title),
        mount_point = html_escape(parts.mount_point),
        markup = parts.markup,
        initial_state_var = parts.initial_state_var,
        state_json = parts.state_json,
    )
}

/// Serialize state for embedding in an inline script.
///
/// Characters that could close the script element or break JavaScript
/// parsing are written as unicode escapes; the result is still valid JSON.
pub fn serialize_state(state: &Value) -> Result<String> {
    let json =
        serde_json::to_string(state).map_err(|e| HutError::Serialization(e.to_string()))?;

    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}
