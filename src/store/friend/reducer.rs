use crate::store::mvi::Reducer;

use super::intent::FriendIntent;
use super::state::FriendState;

pub struct FriendReducer;

impl Reducer for FriendReducer {
    type State = FriendState;
    type Intent = FriendIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FriendIntent::RequestStarted => FriendState {
                loading: true,
                error: None,
                ..state
            },
            FriendIntent::Loaded { friends } => FriendState {
                friends,
                loading: false,
                error: None,
                ..state
            },
            FriendIntent::Added { friend } => {
                let mut friends = state.friends;
                friends.push(friend);
                FriendState {
                    friends,
                    loading: false,
                    error: None,
                    ..state
                }
            }
            FriendIntent::UserQuestsLoaded { quests } => FriendState {
                selected_user_quests: quests,
                loading: false,
                error: None,
                ..state
            },
            FriendIntent::ClearSelectedUserQuests => FriendState {
                selected_user_quests: Vec::new(),
                ..state
            },
            FriendIntent::Failed { message } => FriendState {
                loading: false,
                error: Some(message),
                ..state
            },
            FriendIntent::Reset => FriendState::default(),
        }
    }
}
