//! Navigation history.

use hut_core::Location;

use crate::error::Result;

/// Session history the router is bound to.
pub trait History {
    /// The current entry.
    fn location(&self) -> Location;

    /// Add an entry and make it current.
    fn push(&mut self, path: &str) -> Result<()>;

    /// Overwrite the current entry.
    fn replace(&mut self, path: &str) -> Result<()>;
}

/// In-memory history, for tests and non-browser hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Step back one entry. Returns `false` at the first entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        Location::parse(&self.entries[self.index])
    }

    fn push(&mut self, path: &str) -> Result<()> {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
        Ok(())
    }

    fn replace(&mut self, path: &str) -> Result<()> {
        self.entries[self.index] = path.to_string();
        Ok(())
    }
}
