use crate::store::mvi::Reducer;

use super::intent::QuestIntent;
use super::state::QuestState;

pub struct QuestReducer;

impl Reducer for QuestReducer {
    type State = QuestState;
    type Intent = QuestIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            QuestIntent::RequestStarted => QuestState {
                loading: true,
                error: None,
                ..state
            },
            QuestIntent::Rolled { quest } => QuestState {
                current_quest: Some(quest),
                task_popup_open: true,
                loading: false,
                error: None,
                ..state
            },
            QuestIntent::CurrentLoaded { quest } => QuestState {
                current_quest: quest,
                loading: false,
                error: None,
                ..state
            },
            QuestIntent::CompletedLoaded { completions } => QuestState {
                completed: completions,
                loading: false,
                error: None,
                ..state
            },
            QuestIntent::Completed { completion } => {
                let mut completed = state.completed;
                completed.push(completion);
                QuestState {
                    current_quest: None,
                    completed,
                    task_popup_open: false,
                    loading: false,
                    error: None,
                }
            }
            QuestIntent::Failed { message } => QuestState {
                loading: false,
                error: Some(message),
                ..state
            },
            QuestIntent::ClosePopup => QuestState {
                task_popup_open: false,
                ..state
            },
            QuestIntent::Reset => QuestState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, Quest, QuestCompletion};

    fn quest(id: &str) -> Quest {
        Quest {
            id: id.to_string(),
            country: "Italy".to_string(),
            city: "Rome".to_string(),
            coordinates: Coordinates {
                longitude: 12.4924,
                latitude: 41.8902,
                zoom: 14.0,
            },
            description: "Find the Colosseum".to_string(),
            photo_url: String::new(),
            coupon: String::new(),
            completion_date: None,
        }
    }

    #[test]
    fn rolled_opens_popup() {
        let next = QuestReducer::reduce(QuestState::default(), QuestIntent::Rolled { quest: quest("q1") });
        assert!(next.task_popup_open);
        assert_eq!(next.current_quest.unwrap().id, "q1");
    }

    #[test]
    fn close_popup_keeps_quest() {
        let state = QuestReducer::reduce(QuestState::default(), QuestIntent::Rolled { quest: quest("q1") });
        let next = QuestReducer::reduce(state, QuestIntent::ClosePopup);
        assert!(!next.task_popup_open);
        assert!(next.current_quest.is_some());
    }

    #[test]
    fn completed_clears_current_and_records_completion() {
        let state = QuestReducer::reduce(QuestState::default(), QuestIntent::Rolled { quest: quest("q1") });
        let completion = QuestCompletion {
            id: "c1".to_string(),
            country: "Italy".to_string(),
            city: "Rome".to_string(),
            description: String::new(),
            comment: "done".to_string(),
            photo_url: String::new(),
            images: vec!["/uploads/1.jpg".to_string()],
            coupon: "ROME10".to_string(),
            completion_date: None,
        };
        let next = QuestReducer::reduce(state, QuestIntent::Completed { completion });
        assert!(next.current_quest.is_none());
        assert_eq!(next.completed.len(), 1);
    }

    #[test]
    fn failure_keeps_current_quest() {
        let state = QuestReducer::reduce(QuestState::default(), QuestIntent::Rolled { quest: quest("q1") });
        let next = QuestReducer::reduce(
            state,
            QuestIntent::Failed {
                message: "offline".to_string(),
            },
        );
        assert!(next.current_quest.is_some());
        assert_eq!(next.error.as_deref(), Some("offline"));
    }
}
