use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use sqlx::{AnyConnection, AnyPool, any::AnyPoolOptions, migrate::Migrator};
use tracing::{debug, instrument};

use crate::error::{Result, StoreError};
use crate::lyrics::format_lyrics;
use crate::models::song::{Song, SongField};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const COLUMNS: &str = r#""group", song, release_date, text, link"#;

// Clients may or may not pad link payloads.
const LINK_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    Postgres,
    Sqlite,
}

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
    backend: Backend,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with(database_url, 5).await
    }

    /// `database_url` picks the driver: `postgres://` or `sqlite:`.
    pub async fn connect_with(database_url: &str, max_connections: u32) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let backend = if database_url.starts_with("postgres") {
            Backend::Postgres
        } else {
            Backend::Sqlite
        };

        Ok(Self { pool, backend })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Creates the `songs` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn list_all(&self) -> Result<Vec<Song>> {
        let sql = format!("SELECT {COLUMNS} FROM songs");
        let songs = sqlx::query_as::<_, Song>(&sql)
            .fetch_all(&self.pool)
            .await?;
        debug!(rows = songs.len(), "listed songs");
        Ok(songs)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn list_by(&self, field: SongField, value: &str) -> Result<Vec<Song>> {
        let sql = format!("SELECT {COLUMNS} FROM songs WHERE {} = $1", field.column());
        let songs = sqlx::query_as::<_, Song>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        if songs.is_empty() {
            return Err(StoreError::NotFound);
        }
        debug!(rows = songs.len(), "filtered songs");
        Ok(songs)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get_one(&self, group: &str, song: &str) -> Result<Song> {
        let sql = format!(r#"SELECT {COLUMNS} FROM songs WHERE "group" = $1 AND song = $2 LIMIT 1"#);
        sqlx::query_as::<_, Song>(&sql)
            .bind(group)
            .bind(song)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Find-or-create on (group, song, release_date). The flag is true when
    /// a new row was inserted.
    ///
    /// The existence check and the insert are one statement. Postgres also
    /// takes a transaction-scoped advisory lock on the key, since under READ
    /// COMMITTED two such statements can both see no row.
    #[instrument(skip(self), level = "debug")]
    pub async fn create(&self, group: &str, song: &str, release_date: &str) -> Result<(Song, bool)> {
        let (found, created) = match self.backend {
            Backend::Postgres => {
                let mut tx = self.pool.begin().await?;
                sqlx::query("SELECT 1 AS locked FROM pg_advisory_xact_lock(hashtext($1))")
                    .bind(format!("{group}\u{1f}{song}\u{1f}{release_date}"))
                    .execute(&mut *tx)
                    .await?;
                let created = insert_if_absent(&mut tx, group, song, release_date).await?;
                let found = find_exact(&mut tx, group, song, release_date).await?;
                tx.commit().await?;
                (found, created)
            }
            Backend::Sqlite => {
                // SQLite holds the write lock for the whole statement.
                let mut conn = self.pool.acquire().await?;
                let created = insert_if_absent(&mut conn, group, song, release_date).await?;
                (find_exact(&mut conn, group, song, release_date).await?, created)
            }
        };

        if created {
            debug!("inserted song");
        } else {
            debug!("song already stored");
        }
        Ok((found, created))
    }

    /// Loads the song, changes one field and writes the row back.
    ///
    /// Links arrive url-safe base64 encoded and are stored decoded; lyrics
    /// go through [`format_lyrics`].
    #[instrument(skip(self, value), level = "debug")]
    pub async fn update(&self, group: &str, song: &str, field: SongField, value: &str) -> Result<Song> {
        let current = self.get_one(group, song).await?;

        let value = match field {
            SongField::Link => decode_link(value)?,
            SongField::Text => format_lyrics(value),
            _ => value.to_string(),
        };

        let mut updated = current.clone();
        updated.set(field, value);
        self.replace(&current, &updated).await?;
        Ok(updated)
    }

    /// Overwrites rows still equal to `old` with `new`.
    ///
    /// Fails with [`StoreError::Conflict`] when no row matches `old` any
    /// more, i.e. someone else wrote the song after `old` was read.
    pub async fn replace(&self, old: &Song, new: &Song) -> Result<u64> {
        let result = sqlx::query(
            r#"UPDATE songs
               SET "group" = $1, song = $2, release_date = $3, text = $4, link = $5
               WHERE "group" = $6 AND song = $7 AND release_date = $8 AND text = $9 AND link = $10"#,
        )
        .bind(&new.group)
        .bind(&new.song)
        .bind(&new.release_date)
        .bind(&new.text)
        .bind(&new.link)
        .bind(&old.group)
        .bind(&old.song)
        .bind(&old.release_date)
        .bind(&old.text)
        .bind(&old.link)
        .execute(&self.pool)
        .await?;

        match result.rows_affected() {
            0 => Err(StoreError::Conflict),
            n => {
                debug!(rows = n, "rewrote song");
                Ok(n)
            }
        }
    }

    /// Deletes every row for (group, song). Nothing to delete is not an error.
    #[instrument(skip(self), level = "debug")]
    pub async fn remove(&self, group: &str, song: &str) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM songs WHERE "group" = $1 AND song = $2"#)
            .bind(group)
            .bind(song)
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "deleted songs");
        Ok(result.rows_affected())
    }
}

async fn insert_if_absent(
    conn: &mut AnyConnection,
    group: &str,
    song: &str,
    release_date: &str,
) -> Result<bool> {
    let sql = format!(
        r#"INSERT INTO songs ({COLUMNS})
           SELECT $1, $2, $3, '', ''
           WHERE NOT EXISTS (
               SELECT 1 FROM songs WHERE "group" = $1 AND song = $2 AND release_date = $3
           )"#
    );
    let result = sqlx::query(&sql)
        .bind(group)
        .bind(song)
        .bind(release_date)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn find_exact(
    conn: &mut AnyConnection,
    group: &str,
    song: &str,
    release_date: &str,
) -> Result<Song> {
    let sql = format!(
        r#"SELECT {COLUMNS} FROM songs WHERE "group" = $1 AND song = $2 AND release_date = $3 LIMIT 1"#
    );
    // Only a delete racing the create can leave nothing behind.
    sqlx::query_as::<_, Song>(&sql)
        .bind(group)
        .bind(song)
        .bind(release_date)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(StoreError::Conflict)
}

fn decode_link(value: &str) -> Result<String> {
    let bytes = LINK_ENGINE
        .decode(value)
        .map_err(|e| StoreError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}
