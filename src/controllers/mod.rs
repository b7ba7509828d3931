pub mod page;
pub mod root;
pub mod song;
pub use page::song_page;
pub use root::RootController;
pub use song::SongController;
