//! Integration tests for the catalog slices
//!
//! Tests user, performer, track, album and playlist operations including:
//! - Creation with initial tracks
//! - Ownership checks on delete
//! - Position repair when a track is deleted
//! - Uniqueness rules


use chrono::NaiveDate;
use melody_core::{types::*, MelodyError, StorageContext};
use melody_storage::{albums, performers, playlists, tracks, users, LocalStorageContext};
use test_helpers::*;

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password_hash: "$2b$12$hash".to_string(),
    }
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_create_and_find_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = users::create(pool, new_user("ella")).await.unwrap();
    assert_eq!(user.username, "ella");
    assert_eq!(user.email, "ella@example.com");

    let found = users::find_by_username(pool, "ella").await.unwrap().unwrap();
    assert_eq!(found, user);

    let hash = users::get_password_hash(pool, user.id).await.unwrap();
    assert_eq!(hash.as_deref(), Some("$2b$12$hash"));

    assert!(users::find_by_username(pool, "nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_uniqueness_violation() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    users::create(pool, new_user("ella")).await.unwrap();

    let mut again = new_user("ella");
    again.email = "other@example.com".to_string();
    let err = users::create(pool, again).await.unwrap_err();

    assert!(matches!(err, MelodyError::UniquenessViolation(_)));
    assert_eq!(users::get_all(pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_users_can_only_delete_themselves() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;

    let err = users::delete(pool, &Caller::user(bob), alice).await.unwrap_err();
    assert!(matches!(err, MelodyError::PermissionDeniedWithContext(_)));

    users::delete(pool, &Caller::user(alice), alice).await.unwrap();
    assert!(users::get_by_id(pool, alice).await.unwrap().is_none());
    assert!(users::get_password_hash(pool, alice).await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_password_hash_replaces_credentials() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "ella").await;
    users::set_password_hash(pool, &Caller::user(user), "new-hash")
        .await
        .unwrap();

    let hash = users::get_password_hash(pool, user).await.unwrap();
    assert_eq!(hash.as_deref(), Some("new-hash"));
}

// ============================================================================
// Performers and tracks
// ============================================================================

#[tokio::test]
async fn test_create_performer_and_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let caller = Caller::user(create_test_user(pool, "curator").await);

    let performer = performers::create(
        pool,
        &caller,
        CreatePerformer {
            name: "Miles Davis".to_string(),
        },
    )
    .await
    .unwrap();

    let track = tracks::create(
        pool,
        &caller,
        CreateTrack {
            title: "So What".to_string(),
            performer_id: performer.id,
            album_ids: vec![],
        },
    )
    .await
    .unwrap();

    assert_eq!(track.title, "So What");
    assert_eq!(track.author.name, "Miles Davis");
    assert!(track.albums.is_empty());

    let view = performers::get_view(pool, performer.id).await.unwrap().unwrap();
    assert_eq!(view.tracks.len(), 1);
    assert_eq!(view.tracks[0].id, track.id);
}

#[tokio::test]
async fn test_create_with_unknown_performer() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let caller = Caller::user(create_test_user(pool, "curator").await);

    let err = tracks::create(
        pool,
        &caller,
        CreateTrack {
            title: "Orphan".to_string(),
            performer_id: 404,
            album_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MelodyError::PerformerNotFound(404)));

    let err = albums::create(
        pool,
        &caller,
        CreateAlbum {
            title: "Orphans".to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            performer_id: 404,
            track_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MelodyError::PerformerNotFound(404)));

    assert!(tracks::get_all(pool).await.unwrap().is_empty());
    assert!(albums::get_all(pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overlong_text_is_invalid_input() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let caller = Caller::user(owner);
    let performer = create_test_performer(pool, "Performer").await;
    let long_title = "t".repeat(MAX_TITLE_LEN + 1);

    let err = performers::create(
        pool,
        &caller,
        CreatePerformer {
            name: "n".repeat(MAX_NAME_LEN + 1),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MelodyError::InvalidInput(_)));

    let err = tracks::create(
        pool,
        &caller,
        CreateTrack {
            title: long_title.clone(),
            performer_id: performer,
            album_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MelodyError::InvalidInput(_)));

    let err = albums::create(
        pool,
        &caller,
        CreateAlbum {
            title: long_title.clone(),
            release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            performer_id: performer,
            track_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MelodyError::InvalidInput(_)));

    let err = playlists::create(
        pool,
        &caller,
        CreatePlaylist {
            title: long_title,
            description: None,
            track_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MelodyError::InvalidInput(_)));

    let err = users::create(pool, new_user(&"u".repeat(MAX_USERNAME_LEN + 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, MelodyError::InvalidInput(_)));

    // A title at the limit is fine
    tracks::create(
        pool,
        &caller,
        CreateTrack {
            title: "t".repeat(MAX_TITLE_LEN),
            performer_id: performer,
            album_ids: vec![],
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_check_constraint_maps_to_invalid_input() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let err = sqlx::query("INSERT INTO performers (name) VALUES (?)")
        .bind("n".repeat(MAX_NAME_LEN + 1))
        .execute(pool)
        .await
        .unwrap_err();

    let err = MelodyError::from(err);
    assert!(matches!(err, MelodyError::InvalidInput(_)));
    assert_eq!(err.code(), "invalid_input");
}

#[tokio::test]
async fn test_duplicate_track_title_per_performer() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let caller = Caller::user(create_test_user(pool, "curator").await);
    let performer = create_test_performer(pool, "Performer").await;
    let other = create_test_performer(pool, "Other").await;

    let create = |performer_id| CreateTrack {
        title: "Intro".to_string(),
        performer_id,
        album_ids: vec![],
    };

    tracks::create(pool, &caller, create(performer)).await.unwrap();

    let err = tracks::create(pool, &caller, create(performer)).await.unwrap_err();
    assert!(matches!(err, MelodyError::DuplicateTrack { performer_id, .. } if performer_id == performer));

    // Same title by another performer is fine
    tracks::create(pool, &caller, create(other)).await.unwrap();
}

#[tokio::test]
async fn test_create_track_appends_to_albums() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let performer = create_test_performer(pool, "Performer").await;
    let first = create_test_track(pool, "First", performer).await;
    let album = create_test_album(pool, "Album", performer, owner).await;
    sqlx::query("INSERT INTO album_tracks (album_id, track_id, position) VALUES (?, ?, 1)")
        .bind(album)
        .bind(first)
        .execute(pool)
        .await
        .unwrap();

    let track = tracks::create(
        pool,
        &Caller::user(owner),
        CreateTrack {
            title: "Second".to_string(),
            performer_id: performer,
            album_ids: vec![album],
        },
    )
    .await
    .unwrap();

    assert_eq!(track.albums.len(), 1);
    assert_eq!(track.albums[0].id, album);
    assert_eq!(track.albums[0].position, 2);
}

#[tokio::test]
async fn test_create_track_into_foreign_album_rolls_back() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let stranger = create_test_user(pool, "stranger").await;
    let performer = create_test_performer(pool, "Performer").await;
    let album = create_test_album(pool, "Album", performer, owner).await;

    let err = tracks::create(
        pool,
        &Caller::user(stranger),
        CreateTrack {
            title: "Sneaky".to_string(),
            performer_id: performer,
            album_ids: vec![album],
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MelodyError::PermissionDenied { .. }));
    assert!(tracks::get_all(pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_track_closes_gaps_everywhere() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let caller = Caller::user(owner);
    let performer = create_test_performer(pool, "Performer").await;
    let ids = create_test_tracks(pool, performer, 3).await;
    let [t1, t2, t3] = [ids[0], ids[1], ids[2]];

    let album = ContainerRef::album(create_test_album(pool, "Album", performer, owner).await);
    let playlist = ContainerRef::playlist(create_test_playlist(pool, "Mix", owner).await);

    melody_storage::memberships::add_members(pool, &caller, album, &[t1, t2, t3])
        .await
        .unwrap();
    melody_storage::memberships::add_members(pool, &caller, playlist, &[t2, t3, t1])
        .await
        .unwrap();

    tracks::delete(pool, &caller, t2).await.unwrap();

    assert_eq!(membership_rows(pool, album).await, vec![(t1, 1), (t3, 2)]);
    assert_eq!(membership_rows(pool, playlist).await, vec![(t3, 1), (t1, 2)]);
    assert!(tracks::get_view(pool, t2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_unknown_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let caller = Caller::user(create_test_user(pool, "owner").await);

    let err = tracks::delete(pool, &caller, 12).await.unwrap_err();
    assert!(matches!(err, MelodyError::TrackNotFound(12)));
}

// ============================================================================
// Albums and playlists
// ============================================================================

#[tokio::test]
async fn test_create_album_with_initial_tracks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let performer = create_test_performer(pool, "Performer").await;
    let ids = create_test_tracks(pool, performer, 3).await;
    let release_date = NaiveDate::from_ymd_opt(1959, 8, 17).unwrap();

    let album = albums::create(
        pool,
        &Caller::user(owner),
        CreateAlbum {
            title: "Kind of Blue".to_string(),
            release_date,
            performer_id: performer,
            track_ids: vec![ids[2], ids[0]],
        },
    )
    .await
    .unwrap();

    assert_eq!(album.title, "Kind of Blue");
    assert_eq!(album.release_date, release_date);
    assert_eq!(album.created_by, owner);
    let members: Vec<(TrackId, Position)> = album.tracks.iter().map(|m| (m.track_id, m.position)).collect();
    assert_eq!(members, vec![(ids[2], 1), (ids[0], 2)]);

    let summaries = albums::get_all(pool).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].track_count, Some(2));
}

#[tokio::test]
async fn test_create_album_with_unknown_track_rolls_back() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let performer = create_test_performer(pool, "Performer").await;

    let err = albums::create(
        pool,
        &Caller::user(owner),
        CreateAlbum {
            title: "Ghost".to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            performer_id: performer,
            track_ids: vec![404],
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MelodyError::TrackNotFound(404)));
    assert!(albums::get_all(pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_only_owner_deletes_album() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let stranger = create_test_user(pool, "stranger").await;
    let performer = create_test_performer(pool, "Performer").await;
    let album = create_test_album(pool, "Album", performer, owner).await;

    let err = albums::delete(pool, &Caller::user(stranger), album).await.unwrap_err();
    assert!(matches!(err, MelodyError::PermissionDenied { .. }));
    assert!(albums::get_view(pool, album).await.unwrap().is_some());

    albums::delete(pool, &Caller::user(owner), album).await.unwrap();
    assert!(albums::get_view(pool, album).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_playlist_validates_description() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;

    let err = playlists::create(
        pool,
        &Caller::user(owner),
        CreatePlaylist {
            title: "Wordy".to_string(),
            description: Some("x".repeat(MAX_DESCRIPTION_LEN + 1)),
            track_ids: vec![],
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MelodyError::InvalidInput(_)));
    assert!(playlists::get_all(pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_playlist_and_list_summaries() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let other = create_test_user(pool, "other").await;
    let performer = create_test_performer(pool, "Performer").await;
    let ids = create_test_tracks(pool, performer, 2).await;
    create_test_playlist(pool, "Someone Else's", other).await;

    let playlist = playlists::create(
        pool,
        &Caller::user(owner),
        CreatePlaylist {
            title: "Sunday".to_string(),
            description: Some("slow songs".to_string()),
            track_ids: ids.clone(),
        },
    )
    .await
    .unwrap();

    assert_eq!(playlist.created_by, owner);
    assert_eq!(playlist.description.as_deref(), Some("slow songs"));
    assert_eq!(playlist.tracks.len(), 2);

    let all = playlists::get_all(pool).await.unwrap();
    assert_eq!(all.len(), 2);
    let summary = all.iter().find(|s| s.id == playlist.id).unwrap();
    assert_eq!(summary.author.as_deref(), Some("owner"));
    assert_eq!(summary.track_count, Some(2));
}

#[tokio::test]
async fn test_deleting_user_removes_owned_containers() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner").await;
    let performer = create_test_performer(pool, "Performer").await;
    let album = create_test_album(pool, "Album", performer, owner).await;
    let playlist = create_test_playlist(pool, "Mix", owner).await;

    users::delete(pool, &Caller::user(owner), owner).await.unwrap();

    assert!(albums::get_view(pool, album).await.unwrap().is_none());
    assert!(playlists::get_view(pool, playlist).await.unwrap().is_none());
    assert!(performers::get_by_id(pool, performer).await.unwrap().is_some());
}

// ============================================================================
// Storage context
// ============================================================================

#[tokio::test]
async fn test_storage_context_round_trip() {
    let test_db = TestDb::new().await;
    let storage = LocalStorageContext::new(test_db.pool().clone());

    let user = storage.create_user(new_user("dj")).await.unwrap();
    let caller = Caller::user(user.id);

    let performer = storage
        .create_performer(
            &caller,
            CreatePerformer {
                name: "Daft Punk".to_string(),
            },
        )
        .await
        .unwrap();
    let track = storage
        .create_track(
            &caller,
            CreateTrack {
                title: "One More Time".to_string(),
                performer_id: performer.id,
                album_ids: vec![],
            },
        )
        .await
        .unwrap();
    let playlist = storage
        .create_playlist(
            &caller,
            CreatePlaylist {
                title: "Party".to_string(),
                description: None,
                track_ids: vec![],
            },
        )
        .await
        .unwrap();

    let view = storage
        .add_members(&caller, ContainerRef::playlist(playlist.id), &[track.id])
        .await
        .unwrap();
    assert_eq!(view.position_of(track.id), Some(1));

    storage
        .toggle_favorite(
            &caller,
            FavoriteTarget::new(FavoriteKind::Playlist, playlist.id),
            FavoriteAction::Add,
        )
        .await
        .unwrap();
    let favorites = storage
        .list_favorites(&caller, FavoriteKind::Playlist)
        .await
        .unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].track_count, Some(1));

    let report = storage
        .remove_members(&caller, ContainerRef::playlist(playlist.id), &[track.id])
        .await
        .unwrap();
    assert!(report.is_complete());
}
