//! Store middleware chain.

use std::sync::Arc;

use super::{Action, Store};

/// A link in the dispatch chain of a [`Store`].
///
/// Middleware sees every plain action before the reducer does. It may
/// rewrite the action, dispatch other actions through the store, or swallow
/// it by not calling [`Next::run`].
pub trait StoreMiddleware: Send + Sync {
    fn handle(&self, store: &Store, action: Action, next: Next<'_>) -> Action;
}

impl<F> StoreMiddleware for F
where
    F: for<'a> Fn(&Store, Action, Next<'a>) -> Action + Send + Sync,
{
    fn handle(&self, store: &Store, action: Action, next: Next<'_>) -> Action {
        self(store, action, next)
    }
}

/// The rest of the chain after the current middleware.
pub struct Next<'a> {
    store: &'a Store,
    rest: &'a [Arc<dyn StoreMiddleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(store: &'a Store, chain: &'a [Arc<dyn StoreMiddleware>]) -> Self {
        Self { store, rest: chain }
    }

    /// Hand the action to the next middleware, or to the reducer at the end
    /// of the chain.
    pub fn run(self, action: Action) -> Action {
        match self.rest.split_first() {
            Some((head, rest)) => head.handle(self.store, action, Next::new(self.store, rest)),
            None => {
                self.store.reduce(&action);
                action
            }
        }
    }
}
