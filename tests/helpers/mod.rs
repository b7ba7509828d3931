//! Shared setup for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use muslib::Database;

/// Test helper: fresh in-memory database with the songs table created
///
/// One connection only: every connection to `sqlite::memory:` opens its own
/// empty database.
pub async fn setup_test_db() -> Database {
    let database = Database::connect_with("sqlite::memory:", 1)
        .await
        .expect("Should open in-memory database");
    database.migrate().await.expect("Should create songs table");
    database
}

/// File-backed database removed again on drop
pub struct SharedTestDb {
    pub database: Database,
    path: PathBuf,
}

impl Drop for SharedTestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// Test helper: database file shared by `connections` pooled connections,
/// so concurrent store calls really run side by side
pub async fn setup_shared_test_db(connections: u32) -> SharedTestDb {
    static NEXT: AtomicUsize = AtomicUsize::new(0);

    let path = std::env::temp_dir().join(format!(
        "muslib-test-{}-{}.db",
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    ));
    let url = format!("sqlite://{}?mode=rwc", path.display());

    let database = Database::connect_with(&url, connections)
        .await
        .expect("Should open database file");
    database.migrate().await.expect("Should create songs table");
    SharedTestDb { database, path }
}

/// Test helper: url-safe base64 without padding, as clients send links
pub fn encode_link(link: &str) -> String {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    URL_SAFE_NO_PAD.encode(link)
}
