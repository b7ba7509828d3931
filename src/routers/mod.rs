pub mod root;
pub mod song;
pub use root::{health_check_route, root_route};
pub use song::{
    create_song_route, delete_song_route, get_song_route, list_songs_route, search_songs_route,
    song_page_route, update_song_route,
};
