use serde::{Deserialize, Serialize};

use crate::model::{Quest, QuestCompletion};
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestState {
    #[serde(default)]
    pub current_quest: Option<Quest>,
    #[serde(default)]
    pub completed: Vec<QuestCompletion>,
    /// Whether the "new quest" popup on the map screen is showing.
    #[serde(skip)]
    pub task_popup_open: bool,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub error: Option<String>,
}

impl SliceState for QuestState {}
