mod common;

use common::mock_service::{MockResponse, MockService};
use common::{write_jpeg, write_png};
use questmap::api::{ApiClient, ApiError, SecureString};
use questmap::config::ApiConfig;
use questmap::model::Credentials;
use questmap::upload::{inspect_image, UploadLimits};
use questmap::worker::{execute, ApiCommand, ApiOutcome};
use serde_json::json;
use tempfile::TempDir;

fn client_for(service: &MockService) -> ApiClient {
    let config = ApiConfig {
        base_url: service.api_url(),
        static_url: service.static_url(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config).unwrap()
}

fn credentials() -> Credentials {
    Credentials {
        username: "anna".to_string(),
        password: "secret".to_string(),
    }
}

fn auth_body(token: &str) -> MockResponse {
    MockResponse::json(
        &json!({
            "user": {"_id": "u1", "username": "anna"},
            "accessToken": token
        })
        .to_string(),
    )
}

#[tokio::test]
async fn sign_in_stores_token_for_later_requests() {
    let service = MockService::start().await;
    service.enqueue(auth_body("tok-123")).await;
    service.enqueue(MockResponse::data(json!([]))).await;
    let client = client_for(&service);

    let user = client.sign_in(&credentials()).await.unwrap();
    assert_eq!(user.id, "u1");
    assert!(client.has_token());

    client.fetch_friends("u1").await.unwrap();

    let requests = service.captured_requests().await;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/signin");
    assert!(requests[0].header("authorization").is_none());
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"username": "anna", "password": "secret"}));

    assert_eq!(requests[1].path, "/api/users/u1/friends");
    assert_eq!(requests[1].header("authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
async fn cleared_token_is_not_sent() {
    let service = MockService::start().await;
    service.enqueue(MockResponse::data(json!(null))).await;
    let client = client_for(&service);
    client.set_token(Some(SecureString::new("tok")));
    client.clear_token();

    client.current_quest("u1").await.unwrap();
    let requests = service.captured_requests().await;
    assert!(requests[0].header("authorization").is_none());
}

#[tokio::test]
async fn error_envelope_message_is_surfaced() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::error(404, "User bob not found"))
        .await;
    let client = client_for(&service);

    let err = client.add_friend("u1", "bob").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 404,
            message: Some("User bob not found".to_string()),
        }
    );
    assert_eq!(err.user_message("Could not add friend"), "User bob not found");

    let requests = service.captured_requests().await;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/users/u1/add-friend/bob");
}

#[tokio::test]
async fn friend_name_is_encoded_as_one_path_segment() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::data(json!({
            "_id": "f1",
            "userId": "u2",
            "username": "bo/b?x#y",
            "avatar": ""
        })))
        .await;
    let client = client_for(&service);

    client.add_friend("u1", "bo/b?x#y").await.unwrap();

    let requests = service.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/users/u1/add-friend/bo%2Fb%3Fx%23y");
}

#[tokio::test]
async fn non_json_error_falls_back() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::raw(502, "<html>Bad Gateway</html>"))
        .await;
    let client = client_for(&service);

    let err = client.random_quest("u1").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 502,
            message: None
        }
    );
    assert_eq!(err.user_message("Failed to roll new quest"), "Failed to roll new quest");
}

#[tokio::test]
async fn unauthorized_is_distinct() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::error(401, "Token expired"))
        .await;
    let client = client_for(&service);

    let err = client.completed_quests("u1").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let service = MockService::start().await;
    service.enqueue(MockResponse::json(r#"{"nothing": true}"#)).await;
    let client = client_for(&service);

    let err = client.random_quest("u1").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn current_quest_may_be_absent() {
    let service = MockService::start().await;
    service.enqueue(MockResponse::data(json!(null))).await;
    let client = client_for(&service);

    let envelope = client.current_quest("u1").await.unwrap();
    assert!(envelope.data.is_none());
    let requests = service.captured_requests().await;
    assert_eq!(requests[0].path, "/api/quests/u1/current");
}

#[tokio::test]
async fn friend_avatars_are_resolved_against_static_url() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::data(json!([
            {"_id": "f1", "userId": "u2", "username": "bob", "avatar": "/uploads/bob.png"},
            {"_id": "f2", "userId": "u3", "username": "eve", "avatar": "https://cdn.example/eve.png"}
        ])))
        .await;
    let client = client_for(&service);

    let friends = client.fetch_friends("u1").await.unwrap().data;
    assert_eq!(
        friends[0].avatar,
        format!("{}/uploads/bob.png", service.static_url())
    );
    assert_eq!(friends[1].avatar, "https://cdn.example/eve.png");
}

#[tokio::test]
async fn completion_sends_each_photo_as_images_part() {
    let dir = TempDir::new().unwrap();
    let limits = UploadLimits::default();
    let first = inspect_image(write_jpeg(dir.path(), "one.jpg", 2048), &limits).unwrap();
    let second = inspect_image(write_png(dir.path(), "two.png", 1024), &limits).unwrap();

    let service = MockService::start().await;
    service
        .enqueue(MockResponse::json(
            &json!({
                "data": {"_id": "c1", "country": "Italy", "city": "Rome"},
                "message": "Quest completed!"
            })
            .to_string(),
        ))
        .await;
    let client = client_for(&service);

    let envelope = client
        .complete_quest("u1", &[first, second], "Found it")
        .await
        .unwrap();
    assert_eq!(envelope.data.id, "c1");
    assert_eq!(envelope.message.as_deref(), Some("Quest completed!"));

    let request = &service.captured_requests().await[0];
    assert_eq!(request.path, "/api/quests/u1/complete");
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    let body = request.body_text();
    assert_eq!(body.matches("name=\"images\"").count(), 2);
    assert!(body.contains("filename=\"one.jpg\""));
    assert!(body.contains("filename=\"two.png\""));
    assert!(body.contains("Content-Type: image/jpeg"));
    assert!(body.contains("name=\"description\""));
    assert!(body.contains("Found it"));
}

#[tokio::test]
async fn vanished_upload_file_fails_before_sending() {
    let dir = TempDir::new().unwrap();
    let path = write_png(dir.path(), "gone.png", 64);
    let avatar = inspect_image(&path, &UploadLimits::default()).unwrap();
    std::fs::remove_file(&path).unwrap();

    let service = MockService::start().await;
    let client = client_for(&service);
    let err = client.update_avatar("u1", &avatar).await.unwrap_err();

    assert!(matches!(err, ApiError::Upload(_)));
    assert!(service.captured_requests().await.is_empty());
}

#[tokio::test]
async fn sign_up_command_uploads_avatar_after_registering() {
    let dir = TempDir::new().unwrap();
    let avatar = inspect_image(write_png(dir.path(), "me.png", 128), &UploadLimits::default())
        .unwrap();

    let service = MockService::start().await;
    service.enqueue(auth_body("tok-9")).await;
    service
        .enqueue(MockResponse::data(
            json!({"_id": "u1", "username": "anna", "avatar": "/uploads/me.png"}),
        ))
        .await;
    let client = client_for(&service);

    let outcome = execute(
        &client,
        ApiCommand::SignUp {
            credentials: credentials(),
            avatar,
        },
    )
    .await;

    let ApiOutcome::SignedUp(Ok(user)) = outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert_eq!(user.avatar, "/uploads/me.png");

    let requests = service.captured_requests().await;
    assert_eq!(requests[0].path, "/api/signup");
    assert_eq!(requests[1].method, "PUT");
    assert_eq!(requests[1].path, "/api/users/u1/avatar");
    assert_eq!(requests[1].header("authorization"), Some("Bearer tok-9"));
    assert!(requests[1].body_text().contains("name=\"avatar\""));
}

#[tokio::test]
async fn sign_up_survives_failed_avatar_upload() {
    let dir = TempDir::new().unwrap();
    let avatar = inspect_image(write_png(dir.path(), "me.png", 128), &UploadLimits::default())
        .unwrap();

    let service = MockService::start().await;
    service.enqueue(auth_body("tok-9")).await;
    service.enqueue(MockResponse::error(500, "Disk full")).await;
    let client = client_for(&service);

    let outcome = execute(
        &client,
        ApiCommand::SignUp {
            credentials: credentials(),
            avatar,
        },
    )
    .await;

    assert!(matches!(outcome, ApiOutcome::SignedUp(Ok(ref user)) if user.id == "u1"));
}
