use crate::model::{Friend, QuestCompletion};
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum FriendIntent {
    RequestStarted,
    Loaded { friends: Vec<Friend> },
    /// The friend record as returned by the service, avatar already resolved.
    Added { friend: Friend },
    UserQuestsLoaded { quests: Vec<QuestCompletion> },
    ClearSelectedUserQuests,
    Failed { message: String },
    Reset,
}

impl Intent for FriendIntent {}
