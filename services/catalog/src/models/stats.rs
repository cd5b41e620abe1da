use serde::{Deserialize, Serialize};

/// Catalog-wide aggregates returned by `GET /api/songs/stats`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SongStatistics {
    pub total_songs: i64,
    pub total_artists: i64,
    pub total_albums: i64,
    pub total_genres: i64,
    pub songs_by_genre: Vec<GroupCount>,
    pub songs_by_artist: Vec<ArtistSummary>,
    pub songs_by_album: Vec<GroupCount>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GroupCount {
    #[serde(rename = "_id")]
    pub id: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ArtistSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub songs: i64,
    /// Distinct albums by this artist.
    pub albums: i64,
}

impl From<(String, i64)> for GroupCount {
    fn from((id, count): (String, i64)) -> Self {
        GroupCount { id, count }
    }
}

impl From<(String, i64, i64)> for ArtistSummary {
    fn from((id, songs, albums): (String, i64, i64)) -> Self {
        ArtistSummary { id, songs, albums }
    }
}
