//! HTTP-level integration tests for the password-reset flow.
//!
//! The reset token is seeded directly through the repository (in
//! production it is only ever delivered by email or log line).

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, post_json};
use sqlx::PgPool;
use timeclock_api::auth::jwt::hash_token;
use timeclock_api::auth::password::hash_password;
use timeclock_db::models::password_reset::CreatePasswordReset;
use timeclock_db::models::user::CreateUser;
use timeclock_db::repositories::{PasswordResetRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_test_user(pool: &PgPool, email: &str) -> (i64, String) {
    let password = "original_password_1";
    let hashed = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hashed,
            role: "employee".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");
    (user.id, password.to_string())
}

/// Seed a reset token for the user and return the plaintext.
async fn seed_reset_token(pool: &PgPool, user_id: i64) -> String {
    let plaintext = format!("reset-token-for-{user_id}");
    PasswordResetRepo::create(
        pool,
        &CreatePasswordReset {
            user_id,
            token_hash: hash_token(&plaintext),
            expires_at: Utc::now() + Duration::hours(1),
        },
    )
    .await
    .expect("token creation should succeed");
    plaintext
}

// ---------------------------------------------------------------------------
// Request reset
// ---------------------------------------------------------------------------

/// The request endpoint answers 200 whether or not the account exists.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_request_reset_does_not_reveal_accounts(pool: PgPool) {
    create_test_user(&pool, "known@x.com").await;
    let app = common::build_test_app(pool);

    let known = post_json(
        app.clone(),
        "/api/reset-password",
        serde_json::json!({ "email": "known@x.com" }),
    )
    .await;
    let unknown = post_json(
        app,
        "/api/reset-password",
        serde_json::json!({ "email": "unknown@x.com" }),
    )
    .await;

    assert_eq!(known.status(), StatusCode::OK);
    assert_eq!(unknown.status(), StatusCode::OK);
    let known = body_json(known).await;
    let unknown = body_json(unknown).await;
    assert_eq!(known["message"], unknown["message"]);
}

/// A malformed email is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_request_reset_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/reset-password",
        serde_json::json!({ "email": "not-an-email" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Requesting a reset stores a token for the account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_request_reset_stores_token(pool: PgPool) {
    let (user_id, _password) = create_test_user(&pool, "stored@x.com").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/reset-password",
        serde_json::json!({ "email": "stored@x.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM password_reset_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count.0, 1);
}

// ---------------------------------------------------------------------------
// Update password
// ---------------------------------------------------------------------------

/// Consuming a valid token changes the password and burns the token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_password_flow(pool: PgPool) {
    let (user_id, old_password) = create_test_user(&pool, "rotate@x.com").await;
    let token = seed_reset_token(&pool, user_id).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/update-password",
        serde_json::json!({ "token": &token, "newPassword": "brand_new_password_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old password no longer logs in; the new one does.
    let response = post_json(
        app.clone(),
        "/api/login",
        serde_json::json!({ "email": "rotate@x.com", "password": old_password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        app.clone(),
        "/api/login",
        serde_json::json!({ "email": "rotate@x.com", "password": "brand_new_password_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The token is single-use.
    let response = post_json(
        app,
        "/api/update-password",
        serde_json::json!({ "token": &token, "newPassword": "another_password_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A weak new password is rejected before the token is consumed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_password_weak(pool: PgPool) {
    let (user_id, _password) = create_test_user(&pool, "weak@x.com").await;
    let token = seed_reset_token(&pool, user_id).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/update-password",
        serde_json::json!({ "token": &token, "newPassword": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The token survives the failed attempt.
    let response = post_json(
        app,
        "/api/update-password",
        serde_json::json!({ "token": &token, "newPassword": "long_enough_now_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// An unknown or expired token is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_password_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/update-password",
        serde_json::json!({ "token": "no-such-token", "newPassword": "long_enough_now_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An expired token is rejected even when unused.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_password_expired_token(pool: PgPool) {
    let (user_id, _password) = create_test_user(&pool, "late@x.com").await;
    let plaintext = "expired-reset-token";
    PasswordResetRepo::create(
        &pool,
        &CreatePasswordReset {
            user_id,
            token_hash: hash_token(plaintext),
            expires_at: Utc::now() - Duration::minutes(5),
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/update-password",
        serde_json::json!({ "token": plaintext, "newPassword": "long_enough_now_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A password update revokes the user's existing sessions.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_password_revokes_sessions(pool: PgPool) {
    let (user_id, old_password) = create_test_user(&pool, "revoke@x.com").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app.clone(),
        "/api/login",
        serde_json::json!({ "email": "revoke@x.com", "password": old_password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let login_json = body_json(response).await;
    let refresh_token = login_json["refreshToken"].as_str().unwrap().to_string();

    let token = seed_reset_token(&pool, user_id).await;
    let response = post_json(
        app.clone(),
        "/api/update-password",
        serde_json::json!({ "token": &token, "newPassword": "brand_new_password_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The pre-reset refresh token is dead.
    let response = post_json(
        app,
        "/api/refresh",
        serde_json::json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
