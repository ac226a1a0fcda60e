//! Application store: one explicit container for every state slice.
//!
//! The store is built once at startup (optionally rehydrated from a
//! [`Persistor`]) and handed to the UI, which owns it for the rest of the
//! process. All mutation goes through [`Store::dispatch`]; each intent is
//! routed to its slice reducer, and a slice that actually changed is
//! mirrored to durable storage when the persistence whitelist names it.

pub mod friend;
pub mod map;
pub mod mvi;
pub mod quest;
pub mod user;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::User;
use crate::persist::Persistor;
use crate::store::friend::{FriendIntent, FriendReducer, FriendState};
use crate::store::map::{MapIntent, MapReducer, ViewportPatch, ViewportState};
use crate::store::mvi::Reducer;
use crate::store::quest::{QuestIntent, QuestReducer, QuestState};
use crate::store::user::{UserIntent, UserReducer, UserState};

/// Name of a top-level slice. The lowercase form is the persistence key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slice {
    User,
    Map,
    Quest,
    Friend,
}

impl Slice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Map => "map",
            Self::Quest => "quest",
            Self::Friend => "friend",
        }
    }

    pub fn all() -> &'static [Slice] {
        &[Self::User, Self::Map, Self::Quest, Self::Friend]
    }

    /// Parse a persistence key. Unknown keys return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "map" => Some(Self::Map),
            "quest" => Some(Self::Quest),
            "friend" => Some(Self::Friend),
            _ => None,
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The whole client state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub user: UserState,
    pub map: ViewportState,
    pub quest: QuestState,
    pub friend: FriendState,
}

impl AppState {
    /// Initial state with the given map viewport.
    pub fn with_viewport(viewport: ViewportState) -> Self {
        Self {
            map: viewport,
            ..Self::default()
        }
    }

    /// Serialize one slice to its persisted JSON form.
    pub fn slice_value(&self, slice: Slice) -> serde_json::Result<Value> {
        match slice {
            Slice::User => serde_json::to_value(&self.user),
            Slice::Map => {
                let patch = ViewportPatch::finite(self.map);
                if patch != ViewportPatch::full(self.map) {
                    tracing::warn!(viewport = ?self.map, "Non-finite viewport fields left out of snapshot");
                }
                serde_json::to_value(patch)
            }
            Slice::Quest => serde_json::to_value(&self.quest),
            Slice::Friend => serde_json::to_value(&self.friend),
        }
    }

    /// Replace one slice from its persisted JSON form.
    ///
    /// The map slice is merged field by field, so a field missing from the
    /// snapshot keeps its current value. On error the slice is left untouched.
    pub fn restore_slice(&mut self, slice: Slice, value: Value) -> serde_json::Result<()> {
        match slice {
            Slice::User => self.user = serde_json::from_value(value)?,
            Slice::Map => {
                let patch: ViewportPatch = serde_json::from_value(value)?;
                self.map = MapReducer::reduce(self.map, MapIntent::SetPosition(patch));
            }
            Slice::Quest => self.quest = serde_json::from_value(value)?,
            Slice::Friend => self.friend = serde_json::from_value(value)?,
        }
        Ok(())
    }
}

/// An intent addressed to one slice.
#[derive(Debug, Clone)]
pub enum Action {
    User(UserIntent),
    Map(MapIntent),
    Quest(QuestIntent),
    Friend(FriendIntent),
}

impl Action {
    pub fn slice(&self) -> Slice {
        match self {
            Self::User(_) => Slice::User,
            Self::Map(_) => Slice::Map,
            Self::Quest(_) => Slice::Quest,
            Self::Friend(_) => Slice::Friend,
        }
    }
}

impl From<UserIntent> for Action {
    fn from(intent: UserIntent) -> Self {
        Self::User(intent)
    }
}

impl From<MapIntent> for Action {
    fn from(intent: MapIntent) -> Self {
        Self::Map(intent)
    }
}

impl From<QuestIntent> for Action {
    fn from(intent: QuestIntent) -> Self {
        Self::Quest(intent)
    }
}

impl From<FriendIntent> for Action {
    fn from(intent: FriendIntent) -> Self {
        Self::Friend(intent)
    }
}

/// Runs a slice reducer in place and reports whether the slice changed.
macro_rules! reduce_slice {
    ($state:expr, $field:ident, $reducer:ty, $intent:expr) => {{
        let before = $state.$field.clone();
        $state.$field = <$reducer>::reduce(std::mem::take(&mut $state.$field), $intent);
        !crate::store::mvi::SliceState::same_as(&before, &$state.$field)
    }};
}

pub struct Store {
    state: AppState,
    default_viewport: ViewportState,
    persistor: Option<Persistor>,
    /// Incremented on every logout. Request outcomes carry the epoch they
    /// were issued in so late replies from a previous session are dropped.
    session_epoch: u64,
}

impl Store {
    /// Session-only store starting from defaults.
    pub fn new(default_viewport: ViewportState) -> Self {
        Self {
            state: AppState::with_viewport(default_viewport),
            default_viewport,
            persistor: None,
            session_epoch: 0,
        }
    }

    /// Store seeded from the persistor's snapshot before anything reads it.
    pub fn with_persistor(default_viewport: ViewportState, persistor: Persistor) -> Self {
        let mut state = AppState::with_viewport(default_viewport);
        let outcome = persistor.rehydrate(&mut state);
        tracing::info!(outcome = %outcome, "Store rehydrated");
        Self {
            state,
            default_viewport,
            persistor: Some(persistor),
            session_epoch: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn viewport(&self) -> ViewportState {
        self.state.map
    }

    pub fn default_viewport(&self) -> ViewportState {
        self.default_viewport
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.user.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.user.is_authenticated()
    }

    pub fn session_epoch(&self) -> u64 {
        self.session_epoch
    }

    /// Apply an intent. Returns `true` when the target slice changed.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> bool {
        let action = action.into();
        let slice = action.slice();
        let is_logout = matches!(action, Action::User(UserIntent::Logout));

        let changed = match action {
            Action::User(intent) => reduce_slice!(self.state, user, UserReducer, intent),
            Action::Map(intent) => reduce_slice!(self.state, map, MapReducer, intent),
            Action::Quest(intent) => reduce_slice!(self.state, quest, QuestReducer, intent),
            Action::Friend(intent) => reduce_slice!(self.state, friend, FriendReducer, intent),
        };

        if let Some(persistor) = self.persistor.as_mut() {
            if is_logout {
                persistor.purge(Slice::User, &self.state);
            } else if changed && persistor.is_persisted(slice) {
                persistor.persist(&self.state, slice);
            }
        }

        if is_logout {
            self.session_epoch += 1;
            tracing::info!(epoch = self.session_epoch, "Session cleared");
        }

        changed
    }

    /// Merge a partial viewport update.
    pub fn set_position(&mut self, patch: ViewportPatch) -> bool {
        self.dispatch(MapIntent::SetPosition(patch))
    }

    /// Restore the configured default viewport.
    pub fn reset_position(&mut self) -> bool {
        self.dispatch(MapIntent::Reset {
            default: self.default_viewport,
        })
    }

    /// Clear the session and every slice that belonged to it.
    ///
    /// The map slice is kept: it describes the device, not the account.
    pub fn logout(&mut self) {
        self.dispatch(UserIntent::Logout);
        self.dispatch(QuestIntent::Reset);
        self.dispatch(FriendIntent::Reset);
    }

    /// Drain pending persistence writes. Called once at shutdown.
    pub fn flush(&mut self) {
        if let Some(persistor) = self.persistor.as_mut() {
            persistor.flush();
        }
    }
}
