use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::debug;
use uuid::Uuid;

use super::SongStore;
use crate::error::SongError;
use crate::models::{ArtistSummary, GroupCount, NewSong, Song, SongPatch, SongStatistics};

const SONG_COLUMNS: &str = "id, title, artist, album, genre";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl SongStore for Database {
    async fn insert(&self, song: NewSong) -> Result<Song, SongError> {
        let created = sqlx::query_as::<_, Song>(&format!(
            "INSERT INTO songs (id, title, artist, album, genre, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {SONG_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(song.title)
        .bind(song.artist)
        .bind(song.album)
        .bind(song.genre)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        debug!("inserted song {}", created.id);
        Ok(created)
    }

    async fn find_all(&self, genre: Option<&str>) -> Result<Vec<Song>, SongError> {
        // strpos keeps the filter literal; LIKE would treat % and _ as wildcards
        let songs = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs
             WHERE $1::text IS NULL OR strpos(lower(genre), lower($1::text)) > 0
             ORDER BY created_at, id"
        ))
        .bind(genre)
        .fetch_all(&self.pool)
        .await?;

        Ok(songs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Song>, SongError> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(song)
    }

    async fn update(&self, id: Uuid, patch: SongPatch) -> Result<Option<Song>, SongError> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "UPDATE songs SET
                title = COALESCE($2, title),
                artist = COALESCE($3, artist),
                album = COALESCE($4, album),
                genre = COALESCE($5, genre)
             WHERE id = $1
             RETURNING {SONG_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.artist)
        .bind(patch.album)
        .bind(patch.genre)
        .fetch_optional(&self.pool)
        .await?;

        Ok(song)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, SongError> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn aggregate_statistics(&self) -> Result<SongStatistics, SongError> {
        // One snapshot for all four queries so the totals agree with the groups
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let (total_songs, total_artists, total_albums, total_genres) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                "SELECT COUNT(*), COUNT(DISTINCT artist), COUNT(DISTINCT album), COUNT(DISTINCT genre)
                 FROM songs",
            )
            .fetch_one(&mut *tx)
            .await?;

        let songs_by_genre = sqlx::query_as::<_, (String, i64)>(
            r#"SELECT genre, COUNT(*) FROM songs GROUP BY genre ORDER BY genre COLLATE "C""#,
        )
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(GroupCount::from)
        .collect();

        let songs_by_artist = sqlx::query_as::<_, (String, i64, i64)>(
            r#"SELECT artist, COUNT(*), COUNT(DISTINCT album) FROM songs
               GROUP BY artist ORDER BY artist COLLATE "C""#,
        )
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(ArtistSummary::from)
        .collect();

        let songs_by_album = sqlx::query_as::<_, (String, i64)>(
            r#"SELECT album, COUNT(*) FROM songs GROUP BY album ORDER BY album COLLATE "C""#,
        )
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(GroupCount::from)
        .collect();

        tx.commit().await?;

        Ok(SongStatistics {
            total_songs,
            total_artists,
            total_albums,
            total_genres,
            songs_by_genre,
            songs_by_artist,
            songs_by_album,
        })
    }
}
