//! Integration tests for the typed endpoints against a wiremock server.

mod common;

use common::{seed_tokens, stack};
use securesocial::error::{NetworkError, SocialError};
use securesocial::models::{
    ActivityAction, CommentRequest, LoginRequest, OtpRequest, PostRequest, RegisterRequest,
};
use securesocial::traits::CredentialStore;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Account
// ============================================================================

#[tokio::test]
async fn test_login_persists_tokens_and_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "alice@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A1",
            "refreshToken": "R1",
            "userId": "u-1",
            "username": "alice",
            "email": "alice@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);

    let response = stack
        .client
        .auth()
        .login(&LoginRequest {
            email: "alice@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.username, "alice");
    assert_eq!(
        stack.tokens().await,
        (Some("A1".to_string()), Some("R1".to_string()))
    );

    let user = stack.client.auth().current_user().await.unwrap().unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn test_failed_login_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);

    let err = stack
        .client
        .auth()
        .login(&LoginRequest {
            email: "alice@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.inner(),
        SocialError::Network(NetworkError::HttpStatus { status: 400, message }) if message == "Invalid credentials"
    ));
    assert_eq!(stack.tokens().await, (None, None));
}

#[tokio::test]
async fn test_register_verify_and_resend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OTP sent"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/verify-otp"))
        .and(body_json(json!({ "email": "alice@example.com", "otp": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Verified"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/resend-otp"))
        .and(query_param("email", "alice+test@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Resent"))
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);
    let auth = stack.client.auth();

    let message = auth
        .register(&RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(message, "OTP sent");

    let message = auth
        .verify_otp(&OtpRequest {
            email: "alice@example.com".to_string(),
            otp: "123456".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(message, "Verified");

    let message = auth.resend_otp("alice+test@example.com").await.unwrap();
    assert_eq!(message, "Resent");
}

#[tokio::test]
async fn test_check_username_taken() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/check-username"))
        .and(query_param("username", "bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "available": false })))
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);

    assert!(!stack.client.auth().check_username("bob").await.unwrap());
}

#[tokio::test]
async fn test_logout_clears_credentials_file() {
    let server = MockServer::start().await;
    let stack = stack(&server.uri(), false);
    seed_tokens(&stack, "A1", "R1").await;

    stack.client.auth().logout().await.unwrap();

    assert_eq!(stack.tokens().await, (None, None));
    assert!(stack.store.get_user_info().await.unwrap().is_none());
}

// ============================================================================
// Posts
// ============================================================================

fn post_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Hello",
        "content": "first post",
        "tag": "rust",
        "createdAt": 1700000000000i64,
        "authorName": "alice",
        "likeCount": 2,
        "viewCount": 9
    })
}

#[tokio::test]
async fn test_create_and_fetch_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .and(header("authorization", "Bearer A1"))
        .and(body_json(json!({
            "title": "Hello",
            "content": "first post",
            "id": null,
            "tag": "rust"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1")))
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);
    seed_tokens(&stack, "A1", "R1").await;
    let posts = stack.client.posts();

    let created = posts
        .create_post(&PostRequest::new("Hello", "rust", "first post"))
        .await
        .unwrap();
    assert_eq!(created.id, "p1");

    let fetched = posts.post("p1").await.unwrap();
    assert_eq!(fetched.author_name, "alice");
    assert_eq!(fetched.like_count, 2);
}

#[tokio::test]
async fn test_path_segments_are_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/tag/c%2B%2B%20tips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);
    seed_tokens(&stack, "A1", "R1").await;

    let posts = stack.client.posts().posts_by_tag("c++ tips").await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_my_posts_and_missing_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/myPosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p9",
            "title": "Mine",
            "content": "x",
            "tag": "misc",
            "createdAt": 0,
            "likeCount": 0,
            "viewCount": 0,
            "commentCount": 3
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Post not found"))
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);
    seed_tokens(&stack, "A1", "R1").await;
    let posts = stack.client.posts();

    let mine = posts.my_posts().await.unwrap();
    assert_eq!(mine[0].comment_count, 3);

    let err = posts.post("nope").await.unwrap_err();
    assert!(!err.requires_reauth());
    assert!(!err.is_retryable());
    assert_eq!(err.context().unwrap().operation, "posts.get");
}

#[tokio::test]
async fn test_like_unlike_and_likes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/p1/like"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Post liked"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/p1/unlike"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Post unliked"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts/p1/likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "username": "bob", "postId": "p1", "likedAt": 1700000000000i64 }
        ])))
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);
    seed_tokens(&stack, "A1", "R1").await;
    let posts = stack.client.posts();

    assert_eq!(posts.like("p1").await.unwrap(), "Post liked");
    assert_eq!(posts.unlike("p1").await.unwrap(), "Post unliked");

    let likes = posts.likes("p1").await.unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].username, "bob");
}

#[tokio::test]
async fn test_comments_round_trip() {
    let server = MockServer::start().await;
    let comment = json!({
        "comment": "nice",
        "createdAt": 1,
        "id": "c1",
        "username": "bob",
        "postId": "p1"
    });
    Mock::given(method("GET"))
        .and(path("/api/posts/p1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([comment.clone()])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/posts/p1/comment"))
        .and(body_json(json!({ "comment": "nice" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/p1/comment/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Comment deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);
    seed_tokens(&stack, "A1", "R1").await;
    let posts = stack.client.posts();

    let created = posts
        .create_comment(
            "p1",
            &CommentRequest {
                comment: "nice".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, "c1");

    let comments = posts.comments("p1").await.unwrap();
    assert_eq!(comments[0].comment, "nice");

    assert_eq!(
        posts.delete_comment("p1", "c1").await.unwrap(),
        "Comment deleted"
    );
}

// ============================================================================
// Activity
// ============================================================================

#[tokio::test]
async fn test_activity_log() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activity-log"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "userId": "u", "action": "LOGIN", "createdAt": 1, "details": null },
            { "id": "2", "userId": "u", "action": "POST", "createdAt": 2, "details": "p1" },
            { "id": "3", "userId": "u", "action": "SHARE", "createdAt": 3 }
        ])))
        .mount(&server)
        .await;

    let stack = stack(&server.uri(), false);
    seed_tokens(&stack, "A1", "R1").await;

    let entries = stack.client.activity().activity_log().await.unwrap();

    let actions: Vec<_> = entries.iter().map(|e| e.action.clone()).collect();
    assert_eq!(
        actions,
        vec![
            ActivityAction::Login,
            ActivityAction::Post,
            ActivityAction::Other("SHARE".to_string())
        ]
    );
    assert_eq!(entries[1].details.as_deref(), Some("p1"));
}
