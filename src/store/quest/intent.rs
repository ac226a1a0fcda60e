use crate::model::{Quest, QuestCompletion};
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum QuestIntent {
    RequestStarted,
    /// A random quest was issued; show it in the popup.
    Rolled { quest: Quest },
    /// The user's active quest, if any.
    CurrentLoaded { quest: Option<Quest> },
    CompletedLoaded { completions: Vec<QuestCompletion> },
    /// Photo proof accepted; the active quest is done.
    Completed { completion: QuestCompletion },
    Failed { message: String },
    ClosePopup,
    /// Back to the initial slice (logout).
    Reset,
}

impl Intent for QuestIntent {}
