mod common;

use common::{sample_user, spawn_app};

#[tokio::test]
async fn register_creates_the_account() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app.register(&sample_user()).await;

    assert_eq!(201, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["data"]["uid"], "KB100200");
    assert_eq!(body["data"]["username"], "ravi_kumar");
    assert_eq!(body["data"]["email"], "ravi@example.com");
    assert_eq!(body["data"]["role"], "Customer");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("passwordHash").is_none());

    let saved = sqlx::query_as::<_, (String, f64, bool)>(
        "SELECT username, balance, is_first_login FROM users WHERE email = $1",
    )
    .bind("ravi@example.com")
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to fetch saved user.");

    assert_eq!(saved.0, "ravi_kumar");
    assert_eq!(saved.1, 100_000.0);
    assert!(saved.2);
}

#[tokio::test]
async fn register_rejects_taken_identities_in_order() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };

    assert_eq!(201, app.register(&sample_user()).await.status().as_u16());

    // Same email again.
    let response = app.register(&sample_user()).await;
    assert_eq!(409, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Email already registered");

    // Fresh email, same username.
    let mut user = sample_user();
    user["email"] = serde_json::json!("other@example.com");
    user["uid"] = serde_json::json!("KB100201");
    let response = app.register(&user).await;
    assert_eq!(409, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Username already taken");

    // Fresh email and username, same uid.
    let mut user = sample_user();
    user["email"] = serde_json::json!("third@example.com");
    user["username"] = serde_json::json!("someone_else");
    let response = app.register(&user).await;
    assert_eq!(409, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "UID already taken");
}

#[tokio::test]
async fn register_validates_the_payload() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let mut user = sample_user();
    user["email"] = serde_json::json!("not-an-email");
    user["password"] = serde_json::json!("short");

    let response = app.register(&user).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    assert!(body.get("errors").is_some());
}

#[tokio::test]
async fn login_sets_the_session_cookie() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register(&sample_user()).await;

    let response = app.login("ravi@example.com", "S3curePass!x").await;

    assert_eq!(200, response.status().as_u16());

    let raw_cookie = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("kodbank_token="))
        .map(|value| value.to_string())
        .expect("no session cookie set");
    assert!(raw_cookie.contains("HttpOnly"));
    assert!(raw_cookie.contains("SameSite=Strict"));

    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["isFirstLogin"], true);
    assert_eq!(body["data"]["uid"], "KB100200");

    let token_rows = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM user_tokens")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count tokens.");
    assert_eq!(token_rows.0, 1);
}

#[tokio::test]
async fn login_rejects_bad_credentials_identically() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register(&sample_user()).await;

    for (email, password) in [
        ("nobody@example.com", "S3curePass!x"),
        ("ravi@example.com", "wrong-password"),
    ] {
        let response = app.login(email, password).await;
        assert_eq!(401, response.status().as_u16());
        let body: serde_json::Value = response.json().await.expect("body is not json");
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn first_login_flag_clears_after_the_first_login() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register(&sample_user()).await;

    let first: serde_json::Value = app
        .login("ravi@example.com", "S3curePass!x")
        .await
        .json()
        .await
        .expect("body is not json");
    assert_eq!(first["data"]["isFirstLogin"], true);

    let second: serde_json::Value = app
        .login("ravi@example.com", "S3curePass!x")
        .await
        .json()
        .await
        .expect("body is not json");
    assert_eq!(second["data"]["isFirstLogin"], false);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let cookie = app.authenticated_cookie().await;

    let response = app
        .api_client
        .post(format!("{}/api/auth/logout", app.address))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Logged out successfully");
    assert_eq!(body["data"], serde_json::Value::Null);

    // The revoked session no longer opens protected routes.
    let response = app.get_authed("/api/user/balance", &cookie).await;
    assert_eq!(401, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Invalid or expired session");
}

#[tokio::test]
async fn logout_without_a_session_still_succeeds() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app
        .api_client
        .post(format!("{}/api/auth/logout", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Logged out successfully");
}
