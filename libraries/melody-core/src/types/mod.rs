mod album;
mod caller;
mod favorite;
mod ids;
mod limits;
mod membership;
mod performer;
mod playlist;
mod track;
mod user;

pub use album::{AlbumView, CreateAlbum};
pub use caller::Caller;
pub use favorite::{FavoriteAction, FavoriteKind, FavoriteTarget, FavoriteView, Summary};
pub use ids::{AlbumId, PerformerId, PlaylistId, Position, TrackId, UserId};
pub use membership::{
    ContainerKind, ContainerRef, ContainerView, MemberView, RemovalOutcome, RemovalReport,
    RemovalStatus,
};
pub use performer::{CreatePerformer, Performer, PerformerRef, PerformerTrack, PerformerView};
pub use limits::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_PERSONAL_NAME_LEN, MAX_TITLE_LEN, MAX_USERNAME_LEN,
};
pub use playlist::{CreatePlaylist, PlaylistView};
pub use track::{CreateTrack, Track, TrackAlbumRef, TrackView};
pub use user::{CreateUser, User};
