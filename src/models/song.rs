use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::StoreError;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Song {
    pub group: String,
    pub song: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

impl Song {
    /// A fresh record: only the lookup fields are filled in.
    pub fn new(group: &str, song: &str, release_date: &str) -> Self {
        Song {
            group: group.to_string(),
            song: song.to_string(),
            release_date: release_date.to_string(),
            text: String::new(),
            link: String::new(),
        }
    }

    pub fn set(&mut self, field: SongField, value: String) {
        match field {
            SongField::Group => self.group = value,
            SongField::Song => self.song = value,
            SongField::ReleaseDate => self.release_date = value,
            SongField::Text => self.text = value,
            SongField::Link => self.link = value,
        }
    }
}

/// Column selector for filters and single-field updates.
///
/// Names coming from the URL are parsed into this enum, so only the
/// identifiers returned by [`SongField::column`] ever reach SQL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SongField {
    Group,
    Song,
    ReleaseDate,
    Text,
    Link,
}

impl SongField {
    pub fn column(self) -> &'static str {
        match self {
            SongField::Group => "\"group\"",
            SongField::Song => "song",
            SongField::ReleaseDate => "release_date",
            SongField::Text => "text",
            SongField::Link => "link",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SongField::Group => "group",
            SongField::Song => "song",
            SongField::ReleaseDate => "release_date",
            SongField::Text => "text",
            SongField::Link => "link",
        }
    }
}

impl FromStr for SongField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(SongField::Group),
            "song" => Ok(SongField::Song),
            // "date" is what older clients send
            "release_date" | "releaseDate" | "date" => Ok(SongField::ReleaseDate),
            "text" => Ok(SongField::Text),
            "link" => Ok(SongField::Link),
            other => Err(StoreError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for SongField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateSongQuery {
    #[serde(default, alias = "date", alias = "releaseDate")]
    pub release_date: Option<String>,
}
