use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{SongError, parse_song_id};
use crate::models::{NewSong, Song, SongDraft, SongPatch, SongStatistics};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::Database;

/// Persistence for the song catalog.
///
/// Backends implement the typed primitives. The provided methods take raw
/// request input, validate it and parse ids before any backend call, so every
/// backend rejects bad input the same way.
#[async_trait]
pub trait SongStore: Send + Sync {
    async fn insert(&self, song: NewSong) -> Result<Song, SongError>;

    /// Insertion order. `genre` is a case-insensitive substring match.
    async fn find_all(&self, genre: Option<&str>) -> Result<Vec<Song>, SongError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Song>, SongError>;

    /// Returns `None` when no song has this id.
    async fn update(&self, id: Uuid, patch: SongPatch) -> Result<Option<Song>, SongError>;

    /// Returns whether a song was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, SongError>;

    async fn aggregate_statistics(&self) -> Result<SongStatistics, SongError>;

    async fn create(&self, draft: SongDraft) -> Result<Song, SongError> {
        let song = draft.validate()?;
        self.insert(song).await
    }

    async fn update_by_id(&self, id: &str, patch: SongPatch) -> Result<Song, SongError> {
        let id = parse_song_id(id)?;
        patch.validate()?;
        self.update(id, patch).await?.ok_or(SongError::NotFound(id))
    }

    /// Deleting an id that matches nothing still succeeds.
    async fn delete_by_id(&self, id: &str) -> Result<bool, SongError> {
        let id = parse_song_id(id)?;
        self.delete(id).await
    }
}

/// Which backend `main` should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(anyhow::anyhow!("unknown STORE backend: {}", other)),
        }
    }
}
