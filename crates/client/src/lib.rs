//! hut_client - client bootstrap for server-rendered pages.
//!
//! Reads the state the server serialized into the page, rebuilds the store
//! from it, resolves the current location against the shared route table and
//! mounts the rendered tree into the mount point.
//!
//! The host is abstracted behind [`Page`] and [`History`]; the `browser`
//! feature provides DOM-backed implementations.

mod bootstrap;
#[cfg(feature = "browser")]
mod browser;
mod error;
mod history;
mod page;

pub use bootstrap::{HutClient, Mounted};
#[cfg(feature = "browser")]
pub use browser::{BrowserHistory, BrowserPage};
pub use error::{ClientError, Result};
pub use history::{History, MemoryHistory};
pub use page::Page;
