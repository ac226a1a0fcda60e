//! The dispatch boundary between request outcomes and the store.
//!
//! Every async result is converted here: successes become slice intents,
//! failures become an `error` field plus a toast, and a 401 forces a
//! logout. Outcomes from an earlier session epoch never reach the store.

use crate::api::ApiError;
use crate::notify::Toast;
use crate::session::Route;
use crate::store::friend::FriendIntent;
use crate::store::quest::QuestIntent;
use crate::store::user::UserIntent;
use crate::store::{Slice, Store};
use crate::worker::{ApiCommand, ApiOutcome};

/// Side effects the UI applies after an outcome was settled.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Effects {
    pub toasts: Vec<Toast>,
    /// Route to push once the store is updated.
    pub navigate: Option<Route>,
    /// The session ended on a 401; the token must go and the guard must run.
    pub forced_logout: bool,
    /// The outcome belonged to a previous session and was dropped.
    pub stale: bool,
}

impl Effects {
    fn toast(toast: Toast) -> Self {
        Self {
            toasts: vec![toast],
            ..Self::default()
        }
    }
}

/// Mark the request's slice as loading.
pub fn begin(store: &mut Store, command: &ApiCommand) {
    match command.slice() {
        Slice::User => store.dispatch(UserIntent::RequestStarted),
        Slice::Friend => store.dispatch(FriendIntent::RequestStarted),
        Slice::Quest => store.dispatch(QuestIntent::RequestStarted),
        Slice::Map => false,
    };
}

/// Apply an outcome issued in session `epoch`.
pub fn settle(store: &mut Store, epoch: u64, outcome: ApiOutcome) -> Effects {
    if epoch != store.session_epoch() {
        tracing::debug!(
            issued = epoch,
            current = store.session_epoch(),
            "Dropping outcome from previous session"
        );
        return Effects {
            stale: true,
            ..Effects::default()
        };
    }

    match outcome {
        ApiOutcome::SignedIn(Ok(user)) | ApiOutcome::SignedUp(Ok(user)) => {
            tracing::info!(user = %user.id, "Signed in");
            store.dispatch(UserIntent::Authenticated { user });
            Effects {
                toasts: vec![Toast::success("Signed in successfully!")],
                navigate: Some(Route::Home),
                ..Effects::default()
            }
        }
        ApiOutcome::SignedIn(Err(err)) => fail(store, Slice::User, err, "Could not sign in"),
        ApiOutcome::SignedUp(Err(err)) => fail(store, Slice::User, err, "Could not sign up"),

        ApiOutcome::AvatarUpdated(Ok(envelope)) => {
            store.dispatch(UserIntent::Updated {
                user: envelope.data,
            });
            Effects::toast(Toast::success(
                envelope.message.unwrap_or_else(|| "Avatar updated".to_string()),
            ))
        }
        ApiOutcome::AvatarUpdated(Err(err)) => {
            fail(store, Slice::User, err, "Could not update avatar")
        }

        ApiOutcome::FriendsLoaded(Ok(envelope)) => {
            store.dispatch(FriendIntent::Loaded {
                friends: envelope.data,
            });
            Effects::toast(Toast::success(
                envelope
                    .message
                    .unwrap_or_else(|| "Friends list loaded".to_string()),
            ))
        }
        ApiOutcome::FriendsLoaded(Err(err)) => {
            fail(store, Slice::Friend, err, "Could not load friends")
        }

        ApiOutcome::FriendAdded(Ok(envelope)) => {
            store.dispatch(FriendIntent::Added {
                friend: envelope.data,
            });
            Effects::toast(Toast::success(
                envelope.message.unwrap_or_else(|| "Friend added".to_string()),
            ))
        }
        ApiOutcome::FriendAdded(Err(err)) => fail(store, Slice::Friend, err, "Could not add friend"),

        ApiOutcome::UserQuestsLoaded(Ok(envelope)) => {
            store.dispatch(FriendIntent::UserQuestsLoaded {
                quests: envelope.data,
            });
            Effects::default()
        }
        ApiOutcome::UserQuestsLoaded(Err(err)) => fail(
            store,
            Slice::Friend,
            err,
            "Could not load user achievements",
        ),

        ApiOutcome::QuestRolled(Ok(envelope)) => {
            store.dispatch(QuestIntent::Rolled {
                quest: envelope.data,
            });
            Effects::default()
        }
        ApiOutcome::QuestRolled(Err(err)) => fail(store, Slice::Quest, err, "Failed to roll new quest"),

        ApiOutcome::CurrentQuestLoaded(Ok(envelope)) => {
            store.dispatch(QuestIntent::CurrentLoaded {
                quest: envelope.data,
            });
            Effects::default()
        }
        ApiOutcome::CurrentQuestLoaded(Err(err)) => {
            fail(store, Slice::Quest, err, "Could not load current quest")
        }

        ApiOutcome::CompletedQuestsLoaded(Ok(envelope)) => {
            store.dispatch(QuestIntent::CompletedLoaded {
                completions: envelope.data,
            });
            Effects::default()
        }
        ApiOutcome::CompletedQuestsLoaded(Err(err)) => {
            fail(store, Slice::Quest, err, "Could not load completed quests")
        }

        ApiOutcome::QuestCompleted(Ok(envelope)) => {
            let completion = envelope.data;
            store.dispatch(QuestIntent::Completed {
                completion: completion.clone(),
            });
            store.dispatch(UserIntent::QuestCompleted { completion });
            Effects::toast(Toast::success(
                envelope.message.unwrap_or_else(|| "Quest completed!".to_string()),
            ))
        }
        ApiOutcome::QuestCompleted(Err(err)) => {
            fail(store, Slice::Quest, err, "Could not complete quest")
        }
    }
}

fn fail(store: &mut Store, slice: Slice, err: ApiError, fallback: &str) -> Effects {
    let message = err.user_message(fallback);
    tracing::warn!(slice = %slice, error = %err, "Request failed");

    if err.is_unauthorized() {
        let had_session = store.is_authenticated();
        store.logout();
        let toast = if had_session {
            Toast::error("Session expired, please sign in again")
        } else {
            // Rejected credentials: the sign-in screen shows the server's reason.
            store.dispatch(UserIntent::Failed {
                message: message.clone(),
            });
            Toast::error(message)
        };
        return Effects {
            toasts: vec![toast],
            forced_logout: true,
            ..Effects::default()
        };
    }

    match slice {
        Slice::User => store.dispatch(UserIntent::Failed {
            message: message.clone(),
        }),
        Slice::Friend => store.dispatch(FriendIntent::Failed {
            message: message.clone(),
        }),
        Slice::Quest => store.dispatch(QuestIntent::Failed {
            message: message.clone(),
        }),
        Slice::Map => false,
    };
    Effects::toast(Toast::error(message))
}
