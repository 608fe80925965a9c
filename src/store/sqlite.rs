use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{KapitelError, Result};
use crate::domain::{PlayerColors, PlayerSettings, PlayerType};
use crate::store::SettingsStore;

const SETTINGS_COLUMNS: &str = "id, name, feed_url, color_background, color_text, \
     color_primary, color_secondary, list_height, sort_ascending, show_first_post, \
     player_type, created_at, updated_at";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock_conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| KapitelError::Other(format!("migration failed: {e}")))?;

        Ok(())
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            KapitelError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn row_to_settings(row: &Row<'_>) -> rusqlite::Result<PlayerSettings> {
        Ok(PlayerSettings {
            id: row.get(0)?,
            name: row.get(1)?,
            feed_url: row.get(2)?,
            colors: PlayerColors {
                background: row.get(3)?,
                text: row.get(4)?,
                primary: row.get(5)?,
                secondary: row.get(6)?,
            },
            list_height: row.get(7)?,
            sort_ascending: row.get::<_, i32>(8)? != 0,
            show_first_post: row.get::<_, i32>(9)? != 0,
            player_type: row
                .get::<_, String>(10)
                .map(|s| PlayerType::parse(&s).unwrap_or_default())?,
            created_at: row
                .get::<_, String>(11)
                .ok()
                .and_then(|s| Self::parse_datetime(&s))
                .unwrap_or_else(Utc::now),
            updated_at: row
                .get::<_, String>(12)
                .ok()
                .and_then(|s| Self::parse_datetime(&s))
                .unwrap_or_else(Utc::now),
        })
    }
}

impl SettingsStore for SqliteStore {
    fn get(&self, id: &str) -> Result<Option<PlayerSettings>> {
        let conn = self.lock_conn()?;

        let result = conn
            .query_row(
                &format!("SELECT {SETTINGS_COLUMNS} FROM settings WHERE id = ?1"),
                params![id],
                Self::row_to_settings,
            )
            .optional()?;

        Ok(result)
    }

    /// Upsert: saving an existing id overwrites everything but `created_at`.
    fn put(&self, settings: &PlayerSettings) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            "INSERT INTO settings (id, name, feed_url, color_background, color_text,
                 color_primary, color_secondary, list_height, sort_ascending,
                 show_first_post, player_type, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             ON CONFLICT(id) DO UPDATE SET
                 name = ?2, feed_url = ?3, color_background = ?4, color_text = ?5,
                 color_primary = ?6, color_secondary = ?7, list_height = ?8,
                 sort_ascending = ?9, show_first_post = ?10, player_type = ?11,
                 updated_at = ?13",
            params![
                settings.id,
                settings.name,
                settings.feed_url,
                settings.colors.background,
                settings.colors.text,
                settings.colors.primary,
                settings.colors.secondary,
                settings.list_height,
                settings.sort_ascending as i32,
                settings.show_first_post as i32,
                settings.player_type.as_str(),
                settings.created_at.to_rfc3339(),
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM settings WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<PlayerSettings>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM settings ORDER BY name, id"
        ))?;

        let settings = stmt
            .query_map([], Self::row_to_settings)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(settings)
    }
}
