pub mod error;
pub(crate) mod extractor;
pub mod fetcher;
pub mod normalizer;
pub mod pipeline;

pub use error::{FeedError, FeedErrorKind};
pub use fetcher::{Fetcher, HttpFetcher};
pub use normalizer::Normalizer;
pub use pipeline::{FeedPipeline, RetryPolicy, MAX_RETRIES, RETRY_DELAY};
