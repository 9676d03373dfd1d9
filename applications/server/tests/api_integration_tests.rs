/// API integration tests
/// Tests complete HTTP request/response cycles with a real database
mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use serde_json::{json, Value};

fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().unwrap()
}

/// Create a performer and `count` tracks through the API
async fn seed_tracks(app: &TestApp, token: &str, count: usize) -> Vec<i64> {
    let (status, performer) = app
        .post("/api/performers", Some(token), json!({ "name": "The Testers" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut ids = Vec::with_capacity(count);
    for i in 1..=count {
        let (status, track) = app
            .post(
                "/api/tracks",
                Some(token),
                json!({ "title": format!("Track {i}"), "performer_id": id_of(&performer) }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(id_of(&track));
    }
    ids
}

async fn create_playlist(app: &TestApp, token: &str, title: &str) -> i64 {
    let (status, playlist) = app
        .post("/api/playlists", Some(token), json!({ "title": title }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    id_of(&playlist)
}

fn positions(view: &Value) -> Vec<(i64, i64)> {
    view["tracks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| (m["track_id"].as_i64().unwrap(), m["position"].as_i64().unwrap()))
        .collect()
}

// ============================================================================
// Health and authentication
// ============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::new().await;
    app.create_user(fixtures::TEST_USERNAME, fixtures::TEST_PASSWORD)
        .await;

    let (status, tokens) = app
        .post(
            "/api/auth/token",
            None,
            json!({ "username": fixtures::TEST_USERNAME, "password": fixtures::TEST_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tokens["token_type"], "Bearer");

    let access_token = tokens["access_token"].as_str().unwrap();
    let (status, me) = app.get("/api/users/me", Some(access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], fixtures::TEST_USERNAME);

    let (status, refreshed) = app
        .post(
            "/api/auth/refresh",
            None,
            json!({ "refresh_token": tokens["refresh_token"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(refreshed["access_token"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.create_user(fixtures::TEST_USERNAME, "correctpassword").await;

    let (status, body) = app
        .post(
            "/api/auth/token",
            None,
            json!({ "username": fixtures::TEST_USERNAME, "password": "wrongpassword" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/auth/token",
            None,
            json!({ "username": "nonexistent", "password": "password" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/tracks", Some("not-a-jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "authentication_failed");
}

#[tokio::test]
async fn test_anonymous_can_browse_but_not_write() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/tracks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = app
        .post("/api/playlists", None, json!({ "title": "Nope" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "authentication_required");

    let (status, _) = app.get("/api/performers", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_register_and_duplicate_username() {
    let app = TestApp::new().await;
    let body = json!({
        "username": "newbie",
        "email": "newbie@example.com",
        "password": "hunter22",
    });

    let (status, user) = app.post("/api/users", None, body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["username"], "newbie");
    assert!(user.get("password_hash").is_none());

    let (status, err) = app.post("/api/users", None, body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], "uniqueness_violation");
}

#[tokio::test]
async fn test_set_password_requires_current_password() {
    let app = TestApp::new().await;
    let user = app.create_user("changer", "old-password").await;
    let token = app.auth_service.create_access_token(user.id).unwrap();

    let (status, _) = app
        .post(
            "/api/users/set_password",
            Some(&token),
            json!({ "current_password": "wrong", "new_password": "new-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/users/set_password",
            Some(&token),
            json!({ "current_password": "old-password", "new_password": "new-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .post(
            "/api/auth/token",
            None,
            json!({ "username": "changer", "password": "new-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_users_cannot_delete_each_other() {
    let app = TestApp::new().await;
    let (alice, _) = app.signed_in("alice").await;
    let (_, bob_token) = app.signed_in("bob").await;

    let (status, _) = app
        .delete(&format!("/api/users/{}", alice.id), Some(&bob_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&format!("/api/users/{}", alice.id), Some(&bob_token)).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Memberships
// ============================================================================

#[tokio::test]
async fn test_playlist_membership_flow() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in("owner").await;
    let tracks = seed_tracks(&app, &token, 3).await;
    let playlist = create_playlist(&app, &token, "Road Trip").await;
    let uri = format!("/api/playlists/{playlist}/tracks");

    let (status, view) = app
        .post(&uri, Some(&token), json!({ "tracks": tracks }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        positions(&view),
        vec![(tracks[0], 1), (tracks[1], 2), (tracks[2], 3)]
    );

    let (status, report) = app
        .delete(&uri, Some(&token), Some(json!({ "tracks": [tracks[1], 999] })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        report["outcomes"],
        json!([
            { "track_id": tracks[1], "status": "removed", "position": 2 },
            { "track_id": 999, "status": "membership_not_found" },
        ])
    );

    let (status, playlist) = app
        .get(&format!("/api/playlists/{playlist}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(positions(&playlist), vec![(tracks[0], 1), (tracks[2], 2)]);
}

#[tokio::test]
async fn test_duplicate_membership_is_conflict() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in("owner").await;
    let tracks = seed_tracks(&app, &token, 2).await;
    let playlist = create_playlist(&app, &token, "Mix").await;
    let uri = format!("/api/playlists/{playlist}/tracks");

    app.post(&uri, Some(&token), json!({ "tracks": [tracks[0]] }))
        .await;
    let (status, body) = app
        .post(&uri, Some(&token), json!({ "tracks": [tracks[1], tracks[0]] }))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "duplicate_membership");

    // Nothing from the failed batch was kept
    let (_, view) = app.get(&format!("/api/playlists/{playlist}"), None).await;
    assert_eq!(positions(&view), vec![(tracks[0], 1)]);
}

#[tokio::test]
async fn test_overlong_title_is_bad_request() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in("owner").await;

    let (status, body) = app
        .post("/api/playlists", Some(&token), json!({ "title": "x".repeat(129) }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn test_non_owner_cannot_change_members() {
    let app = TestApp::new().await;
    let (_, owner_token) = app.signed_in("owner").await;
    let (_, other_token) = app.signed_in("other").await;
    let tracks = seed_tracks(&app, &owner_token, 1).await;
    let playlist = create_playlist(&app, &owner_token, "Private").await;

    let (status, body) = app
        .post(
            &format!("/api/playlists/{playlist}/tracks"),
            Some(&other_token),
            json!({ "tracks": tracks }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "permission_denied");
}

#[tokio::test]
async fn test_anonymous_add_members_needs_authentication() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in("owner").await;
    let tracks = seed_tracks(&app, &token, 1).await;
    let playlist = create_playlist(&app, &token, "Mix").await;

    let (status, _) = app
        .post(
            &format!("/api/playlists/{playlist}/tracks"),
            None,
            json!({ "tracks": tracks }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_album_created_with_ordered_tracks() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in("owner").await;
    let tracks = seed_tracks(&app, &token, 3).await;

    let (status, performers) = app.get("/api/performers", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let performer_id = performers[0]["id"].as_i64().unwrap();

    let (status, album) = app
        .post(
            "/api/albums",
            Some(&token),
            json!({
                "title": "Greatest Hits",
                "release_date": "2001-09-11",
                "performer_id": performer_id,
                "track_ids": [tracks[2], tracks[0]],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(positions(&album), vec![(tracks[2], 1), (tracks[0], 2)]);

    // The performer view lists album positions per track
    let (_, performer) = app
        .get(&format!("/api/performers/{performer_id}"), Some(&token))
        .await;
    let first = &performer["tracks"][0];
    assert_eq!(first["id"].as_i64().unwrap(), tracks[0]);
    assert_eq!(first["albums"][0]["position"], 2);

    let (status, _) = app
        .get(&format!("/api/albums/{}", id_of(&album) + 100), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_track_favorite_flow() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in("fan").await;
    let tracks = seed_tracks(&app, &token, 1).await;
    let uri = format!("/api/tracks/{}/favorite", tracks[0]);

    let (status, summary) = app.post(&uri, Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(summary["title"], "Track 1");
    assert_eq!(summary["author"], "The Testers");

    let (status, body) = app.post(&uri, Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "already_favorited");

    let (status, list) = app.get("/api/tracks/favorites", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = app.delete(&uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.delete(&uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_favorited");
}

#[tokio::test]
async fn test_favorite_unknown_playlist_is_not_found() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in("fan").await;

    let (status, body) = app
        .post("/api/playlists/4242/favorite", Some(&token), json!({}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_favorites_list_requires_authentication() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/albums/favorites", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
