mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_then_fetch_own_profile() -> Result<()> {
    let app = common::TestApp::new();
    let (user_id, token) = app.user("Ada").await;

    let body = json!({
        "status": "Developer",
        "skills": "node, express, mongo",
        "company": "Acme",
        "githubusername": "ada",
        "twitter": "https://twitter.com/ada"
    });
    let created = app.send(Method::POST, "/api/profile", Some(&token), Some(body)).await?;
    assert_eq!(created.status, StatusCode::OK);
    let profile = &created.json["profile"];
    assert_eq!(profile["user"], json!(user_id.to_string()));
    assert_eq!(profile["skills"], json!(["node", "express", "mongo"]));
    assert_eq!(profile["social"], json!({ "twitter": "https://twitter.com/ada" }));

    let me = app.get("/api/profile/me", Some(&token)).await?;
    assert_eq!(me.status, StatusCode::OK);
    let mine = &me.json["profile"];
    assert_eq!(mine["id"], profile["id"]);
    assert_eq!(mine["company"], "Acme");
    assert_eq!(mine["status"], "Developer");
    assert_eq!(mine["skills"], profile["skills"]);
    assert_eq!(mine["user"]["name"], "Ada");
    assert_eq!(mine["user"]["avatar"], "//gravatar/Ada");
    Ok(())
}

#[tokio::test]
async fn second_post_updates_in_place() -> Result<()> {
    let app = common::TestApp::new();
    let (_, token) = app.user("Grace").await;

    let first = json!({
        "status": "Developer",
        "skills": "cobol",
        "company": "Navy",
        "bio": "Compilers",
        "youtube": "https://youtube.com/grace"
    });
    let created = app.send(Method::POST, "/api/profile", Some(&token), Some(first)).await?;

    let second = json!({ "status": "Admiral", "skills": "cobol, fortran", "linkedin": "https://linkedin.com/grace" });
    let updated = app.send(Method::POST, "/api/profile", Some(&token), Some(second)).await?;
    assert_eq!(updated.status, StatusCode::OK);

    let profile = &updated.json["profile"];
    assert_eq!(profile["id"], created.json["profile"]["id"]);
    assert_eq!(profile["status"], "Admiral");
    assert_eq!(profile["skills"], json!(["cobol", "fortran"]));
    assert_eq!(profile["company"], "Navy");
    assert_eq!(profile["bio"], "Compilers");
    assert_eq!(profile["social"]["youtube"], "https://youtube.com/grace");
    assert_eq!(profile["social"]["linkedin"], "https://linkedin.com/grace");

    let all = app.get("/api/profile", None).await?;
    assert_eq!(all.json["profiles"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn missing_required_fields_are_listed() -> Result<()> {
    let app = common::TestApp::new();
    let (_, token) = app.user("Linus").await;

    let res = app
        .send(Method::POST, "/api/profile", Some(&token), Some(json!({ "company": "Acme", "skills": " " })))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let errors = res.json["errors"].as_array().cloned().unwrap_or_default();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], json!({ "value": null, "msg": "Status is required", "param": "status", "location": "body" }));
    assert_eq!(errors[1]["msg"], "Skills is required");

    // Nothing was written
    let me = app.get("/api/profile/me", Some(&token)).await?;
    assert_eq!(me.status, StatusCode::BAD_REQUEST);

    // An empty body is validated the same way
    let res = app.send(Method::POST, "/api/profile", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json["errors"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn loosely_typed_fields_are_coerced() -> Result<()> {
    let app = common::TestApp::new();
    let (_, token) = app.user("Ken").await;

    let body = json!({ "status": " Developer ", "skills": ["rust", "go"], "company": 42 });
    let res = app.send(Method::POST, "/api/profile", Some(&token), Some(body)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let profile = &res.json["profile"];
    assert_eq!(profile["skills"], json!(["rust", "go"]));
    assert_eq!(profile["status"], " Developer ");
    assert_eq!(profile["company"], "42");
    Ok(())
}

#[tokio::test]
async fn token_without_user_record_can_create_profile() -> Result<()> {
    let app = common::TestApp::new();
    let owner = Uuid::new_v4();
    let token = common::token_for(owner);

    let created = app.create_profile(&token).await?;
    assert_eq!(created.status, StatusCode::OK);

    // No user row to join, so the owner stays a bare id
    let me = app.get("/api/profile/me", Some(&token)).await?;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json["profile"]["user"], json!(owner.to_string()));
    Ok(())
}

#[tokio::test]
async fn me_without_profile_is_400() -> Result<()> {
    let app = common::TestApp::new();
    let (_, token) = app.user("Nobody").await;

    let res = app.get("/api/profile/me", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json, json!({ "msg": "There is no profile for this user" }));
    Ok(())
}

#[tokio::test]
async fn lists_profiles_with_owners() -> Result<()> {
    let app = common::TestApp::new();
    let (_, ada) = app.user("Ada").await;
    let (_, grace) = app.user("Grace").await;
    app.create_profile(&ada).await?;
    app.create_profile(&grace).await?;

    let res = app.get("/api/profile", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    let mut names: Vec<String> = res.json["profiles"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|p| p["user"]["name"].as_str().map(str::to_string))
        .collect();
    names.sort();
    assert_eq!(names, vec!["Ada", "Grace"]);
    Ok(())
}

#[tokio::test]
async fn profile_by_user_id() -> Result<()> {
    let app = common::TestApp::new();
    let (user_id, token) = app.user("Ada").await;
    app.create_profile(&token).await?;

    let res = app.get(&format!("/api/profile/user/{}", user_id), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    // Bare profile, not wrapped
    assert_eq!(res.json["status"], "Developer");
    assert_eq!(res.json["user"]["name"], "Ada");

    let res = app.get(&format!("/api/profile/user/{}", Uuid::new_v4()), None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json["msg"], "There is no profile for this user");
    Ok(())
}

#[tokio::test]
async fn malformed_user_id_is_profile_not_found() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/api/profile/user/5d1234-not-an-id", None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json, json!({ "msg": "Profile not found" }));
    Ok(())
}

#[tokio::test]
async fn delete_removes_profile_and_user() -> Result<()> {
    let app = common::TestApp::new();
    let (user_id, token) = app.user("Ada").await;
    app.create_profile(&token).await?;

    let res = app.send(Method::DELETE, "/api/profile", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json, json!({ "msg": "User deleted" }));
    assert!(!app.store.user_exists(user_id).await);

    let me = app.get("/api/profile/me", Some(&token)).await?;
    assert_eq!(me.status, StatusCode::BAD_REQUEST);
    assert_eq!(me.json["msg"], "There is no profile for this user");

    let all = app.get("/api/profile", None).await?;
    assert_eq!(all.json, json!({ "profiles": [] }));
    Ok(())
}
