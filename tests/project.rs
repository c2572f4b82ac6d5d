mod common;

use common::{spawn_app, TestApp};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn create_project(app: &TestApp, cookie: &str, body: serde_json::Value) -> serde_json::Value {
    app.post_json_authed("/api/ai/projects", cookie, &body)
        .await
        .json()
        .await
        .expect("body is not json")
}

#[tokio::test]
async fn a_bare_name_gets_the_default_icon_and_color() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let cookie = app.authenticated_cookie().await;

    let response = app
        .post_json_authed(
            "/api/ai/projects",
            &cookie,
            &serde_json::json!({"name": "  Household  "}),
        )
        .await;

    assert_eq!(201, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Project created");
    assert_eq!(body["data"]["name"], "Household");
    assert_eq!(body["data"]["icon"], "Folder");
    assert_eq!(body["data"]["color"], "#feba01");
    assert!(body["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn blank_project_names_are_rejected() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let cookie = app.authenticated_cookie().await;

    for bad in [
        serde_json::json!({"name": "   "}),
        serde_json::json!({"icon": "Star"}),
    ] {
        let response = app.post_json_authed("/api/ai/projects", &cookie, &bad).await;
        assert_eq!(400, response.status().as_u16());
        let body: serde_json::Value = response.json().await.expect("body is not json");
        assert_eq!(body["message"], "Project name is required");
    }
}

#[tokio::test]
async fn off_list_icons_and_bad_colors_fall_back_to_defaults() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let cookie = app.authenticated_cookie().await;

    let body = create_project(
        &app,
        &cookie,
        serde_json::json!({"name": "Travel", "icon": "Rocket", "color": "bright-red"}),
    )
    .await;

    assert_eq!(body["data"]["icon"], "Folder");
    assert_eq!(body["data"]["color"], "#feba01");

    let body = create_project(
        &app,
        &cookie,
        serde_json::json!({"name": "Reading", "icon": "BookOpen", "color": "#00FF7f"}),
    )
    .await;

    assert_eq!(body["data"]["icon"], "BookOpen");
    assert_eq!(body["data"]["color"], "#00FF7f");
}

#[tokio::test]
async fn projects_list_oldest_first() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let cookie = app.authenticated_cookie().await;

    create_project(&app, &cookie, serde_json::json!({"name": "First"})).await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    create_project(&app, &cookie, serde_json::json!({"name": "Second"})).await;

    let response = app.get_authed("/api/ai/projects", &cookie).await;
    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Projects retrieved");
    let projects = body["data"]["projects"]
        .as_array()
        .expect("no projects array");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "First");
    assert_eq!(projects[1]["name"], "Second");
}

#[tokio::test]
async fn updates_are_partial_and_ignore_invalid_fields() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let cookie = app.authenticated_cookie().await;

    let created = create_project(
        &app,
        &cookie,
        serde_json::json!({"name": "Budget", "icon": "Star", "color": "#112233"}),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("no project id");

    // Valid color, off-list icon: only the color changes.
    let response = app
        .put_json_authed(
            &format!("/api/ai/projects/{}", id),
            &cookie,
            &serde_json::json!({"icon": "Spaceship", "color": "#445566"}),
        )
        .await;
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Project updated");

    let saved = sqlx::query_as::<_, (String, String, String)>(
        "SELECT name, icon, color FROM projects WHERE id = $1",
    )
    .bind(uuid::Uuid::parse_str(id).expect("bad id"))
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to fetch the project.");
    assert_eq!(saved.0, "Budget");
    assert_eq!(saved.1, "Star");
    assert_eq!(saved.2, "#445566");

    // A no-op body still succeeds.
    let response = app
        .put_json_authed(
            &format!("/api/ai/projects/{}", id),
            &cookie,
            &serde_json::json!({}),
        )
        .await;
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn missing_projects_are_not_found() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let cookie = app.authenticated_cookie().await;
    let ghost = uuid::Uuid::new_v4();

    let response = app
        .put_json_authed(
            &format!("/api/ai/projects/{}", ghost),
            &cookie,
            &serde_json::json!({"name": "Ghost"}),
        )
        .await;
    assert_eq!(404, response.status().as_u16());

    let response = app
        .delete_authed(&format!("/api/ai/projects/{}", ghost), &cookie)
        .await;
    assert_eq!(404, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Project not found");
}

#[tokio::test]
async fn deleting_a_project_detaches_its_conversations() {
    let app = match spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let cookie = app.authenticated_cookie().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "Filed."})),
        )
        .mount(&app.ai_server)
        .await;

    let created = create_project(&app, &cookie, serde_json::json!({"name": "Doomed"})).await;
    let project_id = created["data"]["id"].as_str().expect("no project id");

    let form = reqwest::multipart::Form::new()
        .text("message", "Put this in the doomed project")
        .text("projectId", project_id.to_string());
    let chat: serde_json::Value = app
        .chat_form(&cookie, form)
        .await
        .json()
        .await
        .expect("body is not json");
    let conversation_id = chat["data"]["conversationId"]
        .as_str()
        .expect("no conversation id");

    let response = app
        .delete_authed(&format!("/api/ai/projects/{}", project_id), &cookie)
        .await;
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("body is not json");
    assert_eq!(body["message"], "Project deleted");

    // The conversation survives, unassigned.
    let saved = sqlx::query_as::<_, (Option<uuid::Uuid>,)>(
        "SELECT project_id FROM conversations WHERE id = $1",
    )
    .bind(uuid::Uuid::parse_str(conversation_id).expect("bad id"))
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to fetch the conversation.");
    assert_eq!(saved.0, None);
}
