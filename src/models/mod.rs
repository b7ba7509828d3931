pub mod song;

pub use song::{CreateSongQuery, Song, SongField};
