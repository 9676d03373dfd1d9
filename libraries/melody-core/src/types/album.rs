//! Album types

use super::limits::{require_text, MAX_TITLE_LEN};
use super::{AlbumId, MemberView, PerformerId, PerformerRef, TrackId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Data for creating a new album
///
/// `track_ids` become the album's initial members at positions 1..=N.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub title: String,
    pub release_date: NaiveDate,
    pub performer_id: PerformerId,
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

impl CreateAlbum {
    pub fn validate(&self) -> crate::Result<()> {
        require_text("title", &self.title, MAX_TITLE_LEN)
    }
}

/// Album with its ordered tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumView {
    pub id: AlbumId,
    pub title: String,
    pub release_date: NaiveDate,
    pub author: PerformerRef,
    pub created_by: UserId,
    pub tracks: Vec<MemberView>,
}
