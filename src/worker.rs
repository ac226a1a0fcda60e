//! Runs REST commands on the tokio runtime and hands the outcomes back to
//! the UI thread as [`AppEvent::Api`] events.
//!
//! Each command is spawned as its own task, so a slow request never blocks
//! another one. Nothing is cancelled when the user leaves a screen; the
//! dispatcher drops outcomes that belong to an earlier session instead.

use std::sync::mpsc::Sender;

use tokio::runtime::Handle;

use crate::api::{ApiClient, ApiError, Envelope};
use crate::model::{Credentials, Friend, Quest, QuestCompletion, User};
use crate::store::Slice;
use crate::ui::events::AppEvent;
use crate::upload::UploadFile;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCommand {
    SignIn(Credentials),
    /// Register, then upload the avatar for the new account.
    SignUp {
        credentials: Credentials,
        avatar: UploadFile,
    },
    UpdateAvatar {
        user_id: String,
        avatar: UploadFile,
    },
    FetchFriends {
        user_id: String,
    },
    AddFriend {
        user_id: String,
        username: String,
    },
    /// Achievements of another user, shown from the friends list.
    FetchUserQuests {
        user_id: String,
    },
    RollQuest {
        user_id: String,
    },
    FetchCurrentQuest {
        user_id: String,
    },
    FetchCompletedQuests {
        user_id: String,
    },
    CompleteQuest {
        user_id: String,
        images: Vec<UploadFile>,
        description: String,
    },
}

impl ApiCommand {
    /// Slice whose loading and error fields track this request.
    pub fn slice(&self) -> Slice {
        match self {
            Self::SignIn(_) | Self::SignUp { .. } | Self::UpdateAvatar { .. } => Slice::User,
            Self::FetchFriends { .. } | Self::AddFriend { .. } | Self::FetchUserQuests { .. } => {
                Slice::Friend
            }
            Self::RollQuest { .. }
            | Self::FetchCurrentQuest { .. }
            | Self::FetchCompletedQuests { .. }
            | Self::CompleteQuest { .. } => Slice::Quest,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SignIn(_) => "sign_in",
            Self::SignUp { .. } => "sign_up",
            Self::UpdateAvatar { .. } => "update_avatar",
            Self::FetchFriends { .. } => "fetch_friends",
            Self::AddFriend { .. } => "add_friend",
            Self::FetchUserQuests { .. } => "fetch_user_quests",
            Self::RollQuest { .. } => "roll_quest",
            Self::FetchCurrentQuest { .. } => "fetch_current_quest",
            Self::FetchCompletedQuests { .. } => "fetch_completed_quests",
            Self::CompleteQuest { .. } => "complete_quest",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    SignedIn(Result<User, ApiError>),
    SignedUp(Result<User, ApiError>),
    AvatarUpdated(Result<Envelope<User>, ApiError>),
    FriendsLoaded(Result<Envelope<Vec<Friend>>, ApiError>),
    FriendAdded(Result<Envelope<Friend>, ApiError>),
    UserQuestsLoaded(Result<Envelope<Vec<QuestCompletion>>, ApiError>),
    QuestRolled(Result<Envelope<Quest>, ApiError>),
    CurrentQuestLoaded(Result<Envelope<Option<Quest>>, ApiError>),
    CompletedQuestsLoaded(Result<Envelope<Vec<QuestCompletion>>, ApiError>),
    QuestCompleted(Result<Envelope<QuestCompletion>, ApiError>),
}

pub async fn execute(client: &ApiClient, command: ApiCommand) -> ApiOutcome {
    match command {
        ApiCommand::SignIn(credentials) => ApiOutcome::SignedIn(client.sign_in(&credentials).await),
        ApiCommand::SignUp {
            credentials,
            avatar,
        } => ApiOutcome::SignedUp(sign_up(client, &credentials, &avatar).await),
        ApiCommand::UpdateAvatar { user_id, avatar } => {
            ApiOutcome::AvatarUpdated(client.update_avatar(&user_id, &avatar).await)
        }
        ApiCommand::FetchFriends { user_id } => {
            ApiOutcome::FriendsLoaded(client.fetch_friends(&user_id).await)
        }
        ApiCommand::AddFriend { user_id, username } => {
            ApiOutcome::FriendAdded(client.add_friend(&user_id, &username).await)
        }
        ApiCommand::FetchUserQuests { user_id } => {
            ApiOutcome::UserQuestsLoaded(client.completed_quests(&user_id).await)
        }
        ApiCommand::RollQuest { user_id } => {
            ApiOutcome::QuestRolled(client.random_quest(&user_id).await)
        }
        ApiCommand::FetchCurrentQuest { user_id } => {
            ApiOutcome::CurrentQuestLoaded(client.current_quest(&user_id).await)
        }
        ApiCommand::FetchCompletedQuests { user_id } => {
            ApiOutcome::CompletedQuestsLoaded(client.completed_quests(&user_id).await)
        }
        ApiCommand::CompleteQuest {
            user_id,
            images,
            description,
        } => ApiOutcome::QuestCompleted(
            client
                .complete_quest(&user_id, &images, &description)
                .await,
        ),
    }
}

/// The account exists once `/signup` succeeds, so a failed avatar upload
/// is logged and the session continues without it.
async fn sign_up(
    client: &ApiClient,
    credentials: &Credentials,
    avatar: &UploadFile,
) -> Result<User, ApiError> {
    let user = client.sign_up(credentials).await?;
    match client.update_avatar(&user.id, avatar).await {
        Ok(envelope) => Ok(envelope.data),
        Err(err) => {
            tracing::warn!(user = %user.id, error = %err, "Avatar upload after sign-up failed");
            Ok(user)
        }
    }
}

/// Where the UI sends requests. [`ApiWorker`] is the real one.
pub trait RequestSink {
    fn submit(&self, epoch: u64, command: ApiCommand);

    /// Forget credentials after a logout.
    fn end_session(&self);
}

pub struct ApiWorker {
    handle: Handle,
    client: ApiClient,
    events: Sender<AppEvent>,
}

impl ApiWorker {
    pub fn new(handle: Handle, client: ApiClient, events: Sender<AppEvent>) -> Self {
        Self {
            handle,
            client,
            events,
        }
    }
}

impl RequestSink for ApiWorker {
    /// Spawn `command`; its outcome arrives later tagged with `epoch`.
    fn submit(&self, epoch: u64, command: ApiCommand) {
        let client = self.client.clone();
        let events = self.events.clone();
        let name = command.name();
        tracing::debug!(command = name, epoch, "Request submitted");
        self.handle.spawn(async move {
            let outcome = execute(&client, command).await;
            if events.send(AppEvent::Api { epoch, outcome }).is_err() {
                tracing::debug!(command = name, "UI gone, outcome dropped");
            }
        });
    }

    fn end_session(&self) {
        self.client.clear_token();
    }
}
