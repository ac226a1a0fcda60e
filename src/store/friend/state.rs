use serde::{Deserialize, Serialize};

use crate::model::{Friend, QuestCompletion};
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendState {
    #[serde(default)]
    pub friends: Vec<Friend>,
    #[serde(default)]
    pub selected_user_quests: Vec<QuestCompletion>,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub error: Option<String>,
}

impl SliceState for FriendState {}
