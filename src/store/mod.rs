pub mod sqlite;

use crate::app::Result;
use crate::domain::PlayerSettings;

pub use sqlite::SqliteStore;

/// CRUD persistence for named player configurations.
///
/// The feed pipeline never touches the store; callers read a
/// [`PlayerSettings`] here and hand its `feed_url` to the pipeline.
pub trait SettingsStore {
    fn get(&self, id: &str) -> Result<Option<PlayerSettings>>;
    fn put(&self, settings: &PlayerSettings) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
    fn list(&self) -> Result<Vec<PlayerSettings>>;
}
