/// Playlist domain types
use super::limits::{check_len, require_text, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use super::{MemberView, PlaylistId, TrackId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

impl CreatePlaylist {
    /// Check field limits before touching storage
    pub fn validate(&self) -> crate::Result<()> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;
        match &self.description {
            Some(description) => check_len("description", description, MAX_DESCRIPTION_LEN),
            None => Ok(()),
        }
    }
}

/// Playlist with its ordered tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistView {
    pub id: PlaylistId,
    pub title: String,
    pub description: Option<String>,
    pub created_by: UserId,
    pub created_on: NaiveDate,
    pub tracks: Vec<MemberView>,
}
