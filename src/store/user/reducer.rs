use crate::store::mvi::Reducer;

use super::intent::UserIntent;
use super::state::UserState;

pub struct UserReducer;

impl Reducer for UserReducer {
    type State = UserState;
    type Intent = UserIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            UserIntent::RequestStarted => UserState {
                loading: true,
                error: None,
                ..state
            },
            UserIntent::Authenticated { user } | UserIntent::Updated { user } => UserState {
                current_user: Some(user),
                loading: false,
                error: None,
            },
            UserIntent::QuestCompleted { completion } => match state.current_user {
                Some(mut user) => {
                    user.completed_quests.push(completion);
                    UserState {
                        current_user: Some(user),
                        ..state
                    }
                }
                None => state,
            },
            UserIntent::Failed { message } => UserState {
                loading: false,
                error: Some(message),
                ..state
            },
            UserIntent::Logout => UserState::default(),
        }
    }
}
