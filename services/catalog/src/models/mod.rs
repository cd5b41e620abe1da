pub mod song;
pub mod stats;

pub use song::{ListSongsQuery, NewSong, Song, SongDraft, SongPatch};
pub use stats::{ArtistSummary, GroupCount, SongStatistics};
