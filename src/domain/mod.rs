pub mod chapter;
pub(crate) mod raw_item;
pub mod settings;

pub use chapter::Chapter;
pub(crate) use raw_item::RawFeedItem;
pub use settings::{PlayerColors, PlayerSettings, PlayerType};
