//! The host page the client runs in.

use serde_json::Value;

use crate::error::Result;
use crate::history::History;

/// Access to the document the server produced.
pub trait Page {
    /// Read a `window` global as JSON. `Ok(None)` when it is not set.
    fn global(&self, name: &str) -> Result<Option<Value>>;

    /// Replace the contents of the element with id `mount_point`.
    fn mount(&mut self, mount_point: &str, markup: &str) -> Result<()>;

    /// The page's own session history.
    fn history(&self) -> Box<dyn History>;
}
