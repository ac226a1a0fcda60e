//! Typed wrappers for every quest-service endpoint.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::envelope::{error_message, Envelope};
use super::error::ApiError;
use super::token::SecureString;
use crate::config::ApiConfig;
use crate::model::{AuthResponse, Credentials, Friend, Quest, QuestCompletion, User};
use crate::upload::UploadFile;

/// REST client. Cheap to clone; clones share the connection pool, the
/// cookie jar and the access token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    static_url: String,
    token: Arc<RwLock<Option<SecureString>>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            static_url: config.static_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn set_token(&self, token: Option<SecureString>) {
        *self.token.write() = token.filter(|t| !t.is_empty());
    }

    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    /// Prefix a server-relative path with the static base URL.
    /// Absolute URLs and empty strings are returned unchanged.
    pub fn resolve_static(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.static_url, path)
        } else {
            format!("{}/{}", self.static_url, path)
        }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.authenticate("/signin", credentials).await
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.authenticate("/signup", credentials).await
    }

    pub async fn update_avatar(&self, user_id: &str, avatar: &UploadFile) -> Result<Envelope<User>, ApiError> {
        let form = Form::new().part("avatar", file_part(avatar).await?);
        let request = self
            .client
            .put(self.url(&format!("/users/{}/avatar", user_id)))
            .multipart(form);
        self.send(request).await
    }

    pub async fn fetch_friends(&self, user_id: &str) -> Result<Envelope<Vec<Friend>>, ApiError> {
        let request = self.client.get(self.url(&format!("/users/{}/friends", user_id)));
        let mut envelope: Envelope<Vec<Friend>> = self.send(request).await?;
        for friend in &mut envelope.data {
            friend.avatar = self.resolve_static(&friend.avatar);
        }
        Ok(envelope)
    }

    pub async fn add_friend(&self, user_id: &str, username: &str) -> Result<Envelope<Friend>, ApiError> {
        let request = self
            .client
            .post(self.segments_url(&["users", user_id, "add-friend", username])?);
        let mut envelope: Envelope<Friend> = self.send(request).await?;
        envelope.data.avatar = self.resolve_static(&envelope.data.avatar);
        Ok(envelope)
    }

    pub async fn random_quest(&self, user_id: &str) -> Result<Envelope<Quest>, ApiError> {
        let request = self.client.get(self.url(&format!("/quests/{}/random", user_id)));
        self.send(request).await
    }

    /// The active quest, or `None` when the user has none.
    pub async fn current_quest(&self, user_id: &str) -> Result<Envelope<Option<Quest>>, ApiError> {
        let request = self.client.get(self.url(&format!("/quests/{}/current", user_id)));
        self.send(request).await
    }

    pub async fn completed_quests(&self, user_id: &str) -> Result<Envelope<Vec<QuestCompletion>>, ApiError> {
        let request = self.client.get(self.url(&format!("/quests/{}/all", user_id)));
        self.send(request).await
    }

    /// Submit photo proof. Each photo is sent as a repeated `images` part.
    pub async fn complete_quest(
        &self,
        user_id: &str,
        images: &[UploadFile],
        description: &str,
    ) -> Result<Envelope<QuestCompletion>, ApiError> {
        let mut form = Form::new();
        for image in images {
            form = form.part("images", file_part(image).await?);
        }
        form = form.text("description", description.to_string());

        let request = self
            .client
            .post(self.url(&format!("/quests/{}/complete", user_id)))
            .multipart(form);
        self.send(request).await
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> Result<User, ApiError> {
        let request = self.client.post(self.url(path)).json(credentials);
        let auth: AuthResponse = self.send(request).await?;
        self.set_token(auth.access_token.map(SecureString::new));
        Ok(auth.user)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Base URL extended with percent-encoded path segments, for paths that
    /// carry user-typed text.
    fn segments_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Connection(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Connection(format!("Base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match self.token.read().as_ref() {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        };
        let response = request.send().await?;
        decode(response).await
    }
}

async fn file_part(file: &UploadFile) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| ApiError::Upload(format!("{}: {}", file.name, e)))?;
    Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str(&file.mime)
        .map_err(|e| ApiError::Upload(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Unexpected response body");
            ApiError::Decode(e.to_string())
        });
    }

    let message = error_message(&body);
    tracing::debug!(url = %url, status = status.as_u16(), message = ?message, "Request failed");
    if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized { message })
    } else {
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
