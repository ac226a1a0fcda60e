use serde::{Deserialize, Serialize};

use crate::model::User;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    #[serde(default)]
    pub current_user: Option<User>,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub error: Option<String>,
}

impl SliceState for UserState {}

impl UserState {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.current_user.as_ref().map(|user| user.id.as_str())
    }
}
