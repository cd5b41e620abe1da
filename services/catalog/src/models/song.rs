use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::SongError;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Song {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

/// Create body as received. Every field is optional here so a missing field
/// surfaces as a validation error instead of a decode rejection.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct SongDraft {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
}

/// A song that passed validation and is ready to insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct SongPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListSongsQuery {
    pub genre: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

impl SongDraft {
    pub fn validate(self) -> Result<NewSong, SongError> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("artist", &self.artist),
            ("album", &self.album),
            ("genre", &self.genre),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect();

        match (self.title, self.artist, self.album, self.genre) {
            (Some(title), Some(artist), Some(album), Some(genre)) if missing.is_empty() => {
                Ok(NewSong {
                    title,
                    artist,
                    album,
                    genre,
                })
            }
            _ => Err(SongError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            ))),
        }
    }
}

impl SongPatch {
    /// Supplied fields must not be blank; omitted fields are fine.
    pub fn validate(&self) -> Result<(), SongError> {
        let blank: Vec<&str> = [
            ("title", &self.title),
            ("artist", &self.artist),
            ("album", &self.album),
            ("genre", &self.genre),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_some() && is_blank(value))
        .map(|(name, _)| name)
        .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(SongError::Validation(format!(
                "field(s) cannot be empty: {}",
                blank.join(", ")
            )))
        }
    }

    pub fn apply_to(self, song: &mut Song) {
        if let Some(title) = self.title {
            song.title = title;
        }
        if let Some(artist) = self.artist {
            song.artist = artist;
        }
        if let Some(album) = self.album {
            song.album = album;
        }
        if let Some(genre) = self.genre {
            song.genre = genre;
        }
    }
}

impl ListSongsQuery {
    /// Builds the query from raw `key=value` pairs. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let genre = pairs
            .into_iter()
            .find(|(key, _)| key == "genre")
            .map(|(_, value)| value);
        ListSongsQuery { genre }
    }

    /// An empty `?genre=` means no filter.
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }
}
