//! Endpoint wrappers for the ShengHang backend
//!
//! Each submodule binds one backend area (users, music catalogue, song lists,
//! favorites, comments, play history, administration) to fixed paths and HTTP
//! methods. Wrappers borrow a [`Dispatcher`](crate::client::Dispatcher) and
//! return the backend's JSON payload unchanged; callers interpret its shape.

pub mod admin;
pub mod comment;
pub mod favorite;
pub mod music;
pub mod play_history;
pub mod songlist;
pub mod user;

pub use admin::AdminApi;
pub use comment::{CommentAction, CommentApi};
pub use favorite::FavoriteApi;
pub use music::MusicApi;
pub use play_history::{simulated_play_duration, PlayHistoryApi, PlayTarget};
pub use songlist::SonglistApi;
pub use user::UserApi;

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of catalogue item a favorite or comment refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Song,
    Album,
    Songlist,
}

impl TargetKind {
    /// Wire name used by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Song => "song",
            TargetKind::Album => "album",
            TargetKind::Songlist => "songlist",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "song" => Ok(TargetKind::Song),
            "album" => Ok(TargetKind::Album),
            "songlist" | "playlist" => Ok(TargetKind::Songlist),
            other => Err(format!(
                "Invalid target kind: '{}'. Valid kinds: song, album, songlist",
                other
            )),
        }
    }
}

/// Merges `extra` into an object body, as filters accompanying a fixed field
///
/// Non-object `extra` values are ignored.
pub(crate) fn merge_object(mut base: Map<String, Value>, extra: Value) -> Value {
    if let Value::Object(extra) = extra {
        base.extend(extra);
    }
    Value::Object(base)
}
