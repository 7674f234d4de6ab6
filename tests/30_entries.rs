mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{read, TestServer};

#[tokio::test]
async fn entries_require_authentication() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = server.get("/entries", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = server.get("/entries", Some("not.a.token")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn create_and_fetch_entry() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token, _) = server.signed_in_user().await?;

    let created = server
        .create_entry(&token, "First light", "Coffee on the balcony.")
        .await?;
    assert_eq!(created["title"], "First light");
    assert_eq!(created["content"], "Coffee on the balcony.");
    assert!(created["feedback"].is_null());
    assert_eq!(created["createdAt"], created["modifiedAt"]);
    assert!(created.get("ownerId").is_none());

    let id = created["id"].as_i64().unwrap_or_default();
    let (status, body) = server.get(&format!("/entries/{id}"), Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    Ok(())
}

#[tokio::test]
async fn list_is_newest_first_and_scoped_to_owner() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, alice, _) = server.signed_in_user().await?;
    let (_, bob, _) = server.signed_in_user().await?;

    let first = server.create_entry(&alice, "one", "first").await?;
    let second = server.create_entry(&alice, "two", "second").await?;
    server.create_entry(&bob, "bob's", "not yours").await?;

    let (status, body) = server.get("/entries", Some(&alice)).await?;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], second["id"]);
    assert_eq!(entries[1]["id"], first["id"]);
    Ok(())
}

#[tokio::test]
async fn other_accounts_entries_are_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, alice, _) = server.signed_in_user().await?;
    let (_, bob, _) = server.signed_in_user().await?;

    let entry = server.create_entry(&alice, "private", "mine").await?;
    let path = format!("/entries/{}", entry["id"]);

    let (status, _) = server.get(&path, Some(&bob)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let res = server
        .client
        .patch(server.url(&path))
        .bearer_auth(&bob)
        .json(&json!({ "title": "hijacked" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.client.delete(server.url(&path)).bearer_auth(&bob).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Still intact for the owner
    let (status, body) = server.get(&path, Some(&alice)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "private");
    Ok(())
}

#[tokio::test]
async fn create_validates_title_and_content() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token, _) = server.signed_in_user().await?;

    let (status, body) = server
        .post_json("/entries", json!({ "title": "   ", "content": "x" }), Some(&token))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["title"].is_string());

    let (status, _) = server
        .post_json("/entries", json!({ "title": "a".repeat(256), "content": "x" }), Some(&token))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .post_json("/entries", json!({ "title": "t" }), Some(&token))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["content"].is_string());
    Ok(())
}

#[tokio::test]
async fn client_supplied_feedback_is_ignored() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token, _) = server.signed_in_user().await?;

    let (status, body) = server
        .post_json(
            "/entries",
            json!({ "title": "t", "content": "c", "feedback": "self-praise" }),
            Some(&token),
        )
        .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["feedback"].is_null());
    Ok(())
}

#[tokio::test]
async fn put_and_patch_update_fields() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token, _) = server.signed_in_user().await?;
    let entry = server.create_entry(&token, "draft", "rough notes").await?;
    let path = format!("/entries/{}", entry["id"]);

    let res = server
        .client
        .patch(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "title": "edited" }))
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "edited");
    assert_eq!(body["data"]["content"], "rough notes");
    assert_eq!(body["data"]["createdAt"], entry["createdAt"]);

    // PUT needs both fields
    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "title": "only title" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "title": "final", "content": "clean copy" }))
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "final");
    assert_eq!(body["data"]["content"], "clean copy");

    // PATCH with nothing to change
    let res = server
        .client
        .patch(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_removes_entry() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token, _) = server.signed_in_user().await?;
    let entry = server.create_entry(&token, "temp", "gone soon").await?;
    let path = format!("/entries/{}", entry["id"]);

    let res = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let (status, _) = server.get(&path, Some(&token)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let res = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_and_non_numeric_ids_are_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token, _) = server.signed_in_user().await?;

    let (status, _) = server.get("/entries/999999", Some(&token)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.get("/entries/abc", Some(&token)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
