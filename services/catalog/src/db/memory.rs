use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::SongStore;
use crate::error::SongError;
use crate::models::{ArtistSummary, GroupCount, NewSong, Song, SongPatch, SongStatistics};

/// In-process store with the same semantics as the Postgres backend.
/// Songs are kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    songs: RwLock<Vec<Song>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn genre_matches(genre: &str, filter: &str) -> bool {
    genre.to_lowercase().contains(&filter.to_lowercase())
}

#[async_trait]
impl SongStore for MemoryStore {
    async fn insert(&self, song: NewSong) -> Result<Song, SongError> {
        let created = Song {
            id: Uuid::new_v4(),
            title: song.title,
            artist: song.artist,
            album: song.album,
            genre: song.genre,
        };
        self.songs.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_all(&self, genre: Option<&str>) -> Result<Vec<Song>, SongError> {
        let songs = self.songs.read().await;
        Ok(songs
            .iter()
            .filter(|song| genre.is_none_or(|g| genre_matches(&song.genre, g)))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Song>, SongError> {
        let songs = self.songs.read().await;
        Ok(songs.iter().find(|song| song.id == id).cloned())
    }

    async fn update(&self, id: Uuid, patch: SongPatch) -> Result<Option<Song>, SongError> {
        let mut songs = self.songs.write().await;
        Ok(songs.iter_mut().find(|song| song.id == id).map(|song| {
            patch.apply_to(song);
            song.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, SongError> {
        let mut songs = self.songs.write().await;
        let before = songs.len();
        songs.retain(|song| song.id != id);
        Ok(songs.len() < before)
    }

    async fn aggregate_statistics(&self) -> Result<SongStatistics, SongError> {
        let songs = self.songs.read().await;

        let mut by_genre: BTreeMap<&str, i64> = BTreeMap::new();
        let mut by_album: BTreeMap<&str, i64> = BTreeMap::new();
        let mut by_artist: BTreeMap<&str, (i64, BTreeSet<&str>)> = BTreeMap::new();

        for song in songs.iter() {
            *by_genre.entry(&song.genre).or_default() += 1;
            *by_album.entry(&song.album).or_default() += 1;
            let (count, albums) = by_artist.entry(&song.artist).or_default();
            *count += 1;
            albums.insert(&song.album);
        }

        Ok(SongStatistics {
            total_songs: songs.len() as i64,
            total_artists: by_artist.len() as i64,
            total_albums: by_album.len() as i64,
            total_genres: by_genre.len() as i64,
            songs_by_genre: by_genre
                .into_iter()
                .map(|(genre, count)| GroupCount::from((genre.to_string(), count)))
                .collect(),
            songs_by_artist: by_artist
                .into_iter()
                .map(|(artist, (songs, albums))| {
                    ArtistSummary::from((artist.to_string(), songs, albums.len() as i64))
                })
                .collect(),
            songs_by_album: by_album
                .into_iter()
                .map(|(album, count)| GroupCount::from((album.to_string(), count)))
                .collect(),
        })
    }
}
