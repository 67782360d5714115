//! Unidirectional state container.
//!
//! A [`Store`] owns one JSON state tree and changes it only through a
//! [`Reducer`]. Cloning a store clones the handle; all clones see the same
//! state, which lets action tasks keep dispatching after an `.await`.

mod action;
mod error;
mod middleware;

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use futures_util::future::{self, BoxFuture};
use serde_json::Value;

pub use action::{Action, Dispatch, TaskFuture};
pub use error::ActionError;
pub use middleware::{Next, StoreMiddleware};

/// Pure function mapping `(previous state, action)` to the next state.
///
/// The previous state is `None` only for the init action of a store created
/// without an initial state; the reducer supplies its default there.
pub type Reducer = Arc<dyn Fn(Option<&Value>, &Action) -> Value + Send + Sync>;

/// Wrap a closure as a [`Reducer`].
pub fn reducer<F>(f: F) -> Reducer
where
    F: Fn(Option<&Value>, &Action) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Reducer used when none is configured: keeps the state it is given and
/// starts from an empty array.
pub fn default_reducer() -> Reducer {
    reducer(|state, _action| state.cloned().unwrap_or_else(|| Value::Array(Vec::new())))
}

struct StoreInner {
    state: RwLock<Value>,
    reducer: Reducer,
    middleware: Vec<Arc<dyn StoreMiddleware>>,
}

/// Handle to a state container.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Create a store and run the init action through the reducer.
    pub fn new(
        reducer: Reducer,
        middleware: Vec<Arc<dyn StoreMiddleware>>,
        initial_state: Option<Value>,
    ) -> Self {
        let state = reducer(initial_state.as_ref(), &Action::init());

        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(state),
                reducer,
                middleware,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> Value {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Borrow the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run a plain action through the middleware chain and the reducer.
    ///
    /// Returns the action as it left the chain.
    pub fn dispatch_action(&self, action: Action) -> Action {
        Next::new(self, &self.inner.middleware).run(action)
    }

    /// Dispatch an action or a task.
    ///
    /// Plain actions are applied before this returns and yield a future that
    /// is already complete. Tasks are started lazily; the returned future
    /// drives them.
    pub fn dispatch(&self, dispatch: impl Into<Dispatch>) -> BoxFuture<'static, Result<(), ActionError>> {
        match dispatch.into() {
            Dispatch::Action(action) => {
                self.dispatch_action(action);
                Box::pin(future::ready(Ok(())))
            }
            Dispatch::Task(task) => task(self.clone()),
        }
    }

    /// Whether two handles point at the same container.
    pub fn ptr_eq(&self, other: &Store) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn reduce(&self, action: &Action) {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let next = (self.inner.reducer)(Some(&guard), action);
        *guard = next;
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state())
            .field("middleware", &self.inner.middleware.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn counter() -> Reducer {
        reducer(|state, action| {
            let count = state.and_then(Value::as_i64).unwrap_or(0);
            match action.kind.as_str() {
                "increment" => json!(count + 1),
                "add" => json!(count + action.get("by").and_then(Value::as_i64).unwrap_or(0)),
                _ => json!(count),
            }
        })
    }

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl StoreMiddleware for Recorder {
        fn handle(&self, _store: &Store, action: Action, next: Next<'_>) -> Action {
            self.0.lock().unwrap().push(action.kind.clone());
            next.run(action)
        }
    }

    struct Doubler;

    impl StoreMiddleware for Doubler {
        fn handle(&self, _store: &Store, action: Action, next: Next<'_>) -> Action {
            if action.is("increment") {
                next.run(Action::new("add").with("by", 2))
            } else {
                next.run(action)
            }
        }
    }

    #[test]
    fn test_default_reducer_starts_with_empty_array() {
        let store = Store::new(default_reducer(), Vec::new(), None);
        assert_eq!(store.state(), json!([]));
    }

    #[test]
    fn test_default_reducer_keeps_initial_state() {
        let store = Store::new(default_reducer(), Vec::new(), Some(json!({"a": 1})));
        assert_eq!(store.state(), json!({"a": 1}));

        store.dispatch_action(Action::new("anything"));
        assert_eq!(store.state(), json!({"a": 1}));
    }

    #[test]
    fn test_constant_reducer_overrides_initial_state() {
        let store = Store::new(reducer(|_, _| json!(42)), Vec::new(), Some(json!("ignored")));
        assert_eq!(store.state(), json!(42));
    }

    #[test]
    fn test_dispatch_action_reduces() {
        let store = Store::new(counter(), Vec::new(), Some(json!(5)));
        store.dispatch_action(Action::new("increment"));
        store.dispatch_action(Action::new("increment"));
        assert_eq!(store.state(), json!(7));
    }

    #[test]
    fn test_middleware_runs_in_order_before_reducer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let middleware: Vec<Arc<dyn StoreMiddleware>> =
            vec![Arc::new(Recorder(seen.clone())), Arc::new(Doubler)];
        let store = Store::new(counter(), middleware, None);

        let out = store.dispatch_action(Action::new("increment"));

        assert_eq!(store.state(), json!(2));
        assert!(out.is("add"));
        assert_eq!(*seen.lock().unwrap(), vec!["increment".to_string()]);
    }

    #[test]
    fn test_init_action_bypasses_middleware() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _store = Store::new(counter(), vec![Arc::new(Recorder(seen.clone()))], None);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new(counter(), Vec::new(), None);
        let handle = store.clone();
        handle.dispatch_action(Action::new("increment"));

        assert_eq!(store.state(), json!(1));
        assert!(store.ptr_eq(&handle));
    }

    #[tokio::test]
    async fn test_dispatch_plain_action_resolves_immediately() {
        let store = Store::new(counter(), Vec::new(), None);
        let pending = store.dispatch(Action::new("increment"));

        // Applied before the future is polled.
        assert_eq!(store.state(), json!(1));
        pending.await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_task_can_dispatch_after_await() {
        let store = Store::new(counter(), Vec::new(), None);

        store
            .dispatch(Dispatch::task(|store| async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                store.dispatch_action(Action::new("add").with("by", 10));
                Ok(())
            }))
            .await
            .unwrap();

        assert_eq!(store.state(), json!(10));
    }

    #[tokio::test]
    async fn test_dispatch_task_rejection() {
        let store = Store::new(counter(), Vec::new(), None);

        let result = store
            .dispatch(Dispatch::task(|_store| async {
                Err(ActionError::rejected("no such user"))
            }))
            .await;

        assert_eq!(result, Err(ActionError::rejected("no such user")));
    }
}
