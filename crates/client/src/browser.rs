//! DOM-backed [`Page`] and [`History`].

use hut_core::Location;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::error::{ClientError, Result};
use crate::history::History;
use crate::page::Page;

/// The document the browser is showing.
#[derive(Debug, Clone)]
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(dom_unavailable)?;
        let document = window.document().ok_or_else(dom_unavailable)?;
        Ok(Self { window, document })
    }
}

impl Page for BrowserPage {
    fn global(&self, name: &str) -> Result<Option<Value>> {
        let value = js_sys::Reflect::get(&self.window, &JsValue::from_str(name)).map_err(js_error)?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }

        let json = String::from(js_sys::JSON::stringify(&value).map_err(js_error)?);
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| ClientError::InvalidInitialState {
                var: name.to_string(),
                reason: e.to_string(),
            })
    }

    fn mount(&mut self, mount_point: &str, markup: &str) -> Result<()> {
        let element = self
            .document
            .get_element_by_id(mount_point)
            .ok_or_else(|| ClientError::MountPointMissing(mount_point.to_string()))?;
        element.set_inner_html(markup);
        Ok(())
    }

    fn history(&self) -> Box<dyn History> {
        Box::new(BrowserHistory {
            window: self.window.clone(),
        })
    }
}

/// `window.history` and `window.location`.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    window: Window,
}

impl History for BrowserHistory {
    fn location(&self) -> Location {
        let location = self.window.location();
        let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        Location::parse(&format!("{pathname}{search}"))
    }

    fn push(&mut self, path: &str) -> Result<()> {
        self.window
            .history()
            .map_err(js_error)?
            .push_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(js_error)
    }

    fn replace(&mut self, path: &str) -> Result<()> {
        self.window
            .history()
            .map_err(js_error)?
            .replace_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(js_error)
    }
}

fn dom_unavailable() -> ClientError {
    ClientError::Dom("DOM is not available".to_string())
}

fn js_error(value: JsValue) -> ClientError {
    ClientError::Dom(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}
