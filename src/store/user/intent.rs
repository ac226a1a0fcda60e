use crate::model::{QuestCompletion, User};
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum UserIntent {
    /// Sign-in, sign-up or profile update is in flight.
    RequestStarted,
    /// Sign-in or sign-up succeeded.
    Authenticated { user: User },
    /// The service returned an updated user record (e.g. new avatar).
    Updated { user: User },
    /// A quest completion was accepted; mirror it into the profile.
    QuestCompleted { completion: QuestCompletion },
    Failed { message: String },
    /// Clear the session. Also issued for a forced logout on 401.
    Logout,
}

impl Intent for UserIntent {}
