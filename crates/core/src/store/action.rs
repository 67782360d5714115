//! Actions and dispatchable units.

use std::fmt;
use std::future::Future;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ActionError, Store};

/// Future returned by an asynchronous dispatch.
pub type TaskFuture = BoxFuture<'static, Result<(), ActionError>>;

/// A plain action: a `type` tag plus arbitrary payload fields.
///
/// Serializes to the flat object shape reducers expect, e.g.
/// `{"type": "user/loaded", "id": 7}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Action {
    /// Type tag of the action dispatched when a store is created.
    pub const INIT: &'static str = "@@hut/INIT";

    /// Create an action with an empty payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// The action every reducer sees first.
    pub fn init() -> Self {
        Self::new(Self::INIT)
    }

    /// Add a payload field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Get a payload field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// Something that can be handed to [`Store::dispatch`].
///
/// Plain actions run through the middleware chain and the reducer right away.
/// Tasks receive a handle to the store and may dispatch any number of actions
/// before they resolve; the render pipeline waits for all of them.
pub enum Dispatch {
    Action(Action),
    Task(Box<dyn FnOnce(Store) -> TaskFuture + Send>),
}

impl Dispatch {
    /// Wrap an async closure as a task.
    pub fn task<F, Fut>(task: F) -> Self
    where
        F: FnOnce(Store) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        Self::Task(Box::new(move |store| Box::pin(task(store))))
    }
}

impl From<Action> for Dispatch {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Self::Task(_) => f.write_str("Task(..)"),
        }
    }
}
