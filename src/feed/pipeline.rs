use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::domain::Chapter;
use crate::feed::extractor::extract_chapters;
use crate::feed::{FeedError, Fetcher, Normalizer};

/// Maximum fetch-and-process cycles per call.
pub const MAX_RETRIES: u32 = 3;
/// Base backoff delay; doubled on each subsequent retry.
pub const RETRY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            base_delay: RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff: `base_delay * 2^failed_attempt`, clamped so
    /// oversized `max_retries` configurations never overflow.
    fn backoff(&self, failed_attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(failed_attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Orchestrates one feed URL into a chapter list: fetch with timeout,
/// retry with backoff, normalize, extract.
///
/// Each call is atomic from the caller's perspective: a chapter list on
/// success (possibly empty), a single [`FeedError`] after retries are
/// exhausted, never partial results. Calls share nothing but read-only
/// configuration, so any number may run concurrently; cancelling one
/// never affects another.
pub struct FeedPipeline {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    retry: RetryPolicy,
}

impl FeedPipeline {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_policy(fetcher, RetryPolicy::default())
    }

    pub fn with_policy(fetcher: Arc<dyn Fetcher + Send + Sync>, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            retry,
        }
    }

    /// Fetch and fully process one feed URL with a fresh cancellation token.
    pub async fn fetch_chapters(&self, url: &str) -> Result<Vec<Chapter>, FeedError> {
        self.fetch_chapters_with_cancel(url, &CancellationToken::new())
            .await
    }

    /// Fetch and fully process one feed URL. Cancelling the token aborts
    /// the in-flight attempt and any backoff sleep immediately; the call
    /// fails fast as a cancellation without further retries.
    pub async fn fetch_chapters_with_cancel(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Chapter>, FeedError> {
        if url.is_empty() {
            return Err(FeedError::Unknown {
                message: "feed URL is empty".into(),
                source: None,
            });
        }

        let mut attempt = 0;
        loop {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(FeedError::cancelled()),
                result = self.attempt(url) => result,
            };

            match result {
                Ok(chapters) => {
                    tracing::info!(%url, count = chapters.len(), "feed processed");
                    return Ok(chapters);
                }
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts {
                        tracing::warn!(%url, %err, "giving up after {attempt} attempts");
                        return Err(err);
                    }

                    let delay = self.retry.backoff(attempt - 1);
                    tracing::debug!(%url, %err, ?delay, "attempt {attempt} failed, retrying");
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(FeedError::cancelled()),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }

    /// One fetch-and-process cycle.
    async fn attempt(&self, url: &str) -> Result<Vec<Chapter>, FeedError> {
        let body = self.fetcher.fetch(url).await?;
        let items = self.normalizer.normalize(&body)?;
        Ok(extract_chapters(items))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::time::Instant;

    use super::*;
    use crate::feed::FeedErrorKind;

    const FEED_BODY: &str = r#"<rss version="2.0"><channel>
      <item>
        <title>Day 1</title>
        <enclosure url="http://x/a.mp3"/>
        <media:content url="http://x/a.jpg"/>
      </item>
      <item>
        <title>No audio</title>
        <description>dropped</description>
      </item>
    </channel></rss>"#;

    /// Replays a queue of canned responses, counting attempts.
    struct ScriptedFetcher {
        responses: Mutex<VecDeque<Result<Vec<u8>, FeedError>>>,
        calls: AtomicU32,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<Vec<u8>, FeedError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted fetcher ran out of responses")
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: MAX_RETRIES,
            base_delay: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_backoff_clamps_instead_of_overflowing() {
        let policy = RetryPolicy::default();
        // 2^40 does not fit in u32; a huge configured retry count must
        // clamp the delay rather than panic.
        assert!(policy.backoff(40) >= policy.backoff(10));
    }

    #[tokio::test]
    async fn test_success_first_attempt() {
        let fetcher = ScriptedFetcher::new(vec![Ok(FEED_BODY.as_bytes().to_vec())]);
        let pipeline = FeedPipeline::new(fetcher.clone());

        let chapters = pipeline.fetch_chapters("http://feed").await.unwrap();

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Day 1");
        assert_eq!(chapters[0].audio_src, "http://x/a.mp3");
        assert_eq!(chapters[0].image.as_deref(), Some("http://x/a.jpg"));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_feed_is_valid_success() {
        let body = br#"<rss version="2.0"><channel><title>Empty</title></channel></rss>"#;
        let fetcher = ScriptedFetcher::new(vec![Ok(body.to_vec())]);
        let pipeline = FeedPipeline::new(fetcher);

        let chapters = pipeline.fetch_chapters("http://feed").await.unwrap();
        assert!(chapters.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_after_backoff() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(FeedError::network("HTTP 503", Some(503))),
            Err(FeedError::network("HTTP 503", Some(503))),
            Ok(FEED_BODY.as_bytes().to_vec()),
        ]);
        let pipeline = FeedPipeline::new(fetcher.clone());

        let start = Instant::now();
        let chapters = pipeline.fetch_chapters("http://feed").await.unwrap();

        assert_eq!(chapters.len(), 1);
        assert_eq!(fetcher.calls(), 3);
        // Two backoff delays before success: 1000ms * 2^0 + 1000ms * 2^1.
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_exhaustion_propagates_last_kind() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(FeedError::network("HTTP 500", Some(500))),
            Err(FeedError::network("HTTP 500", Some(500))),
            Err(FeedError::network("HTTP 500", Some(500))),
        ]);
        let pipeline = FeedPipeline::with_policy(fetcher.clone(), fast_policy());

        let err = pipeline.fetch_chapters("http://feed").await.unwrap_err();

        assert_eq!(err.kind(), FeedErrorKind::Network);
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn test_malformed_xml_surfaces_as_parse_error() {
        let bad = b"<rss><channel><item></channel></rss>".to_vec();
        let fetcher = ScriptedFetcher::new(vec![
            Ok(bad.clone()),
            Ok(bad.clone()),
            Ok(bad),
        ]);
        let pipeline = FeedPipeline::with_policy(fetcher.clone(), fast_policy());

        let err = pipeline.fetch_chapters("http://feed").await.unwrap_err();

        assert_eq!(err.kind(), FeedErrorKind::Parse);
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn test_cancellation_fails_fast_without_retry() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(FeedError::network("HTTP 500", Some(500))),
            Ok(FEED_BODY.as_bytes().to_vec()),
        ]);
        let pipeline = FeedPipeline::new(fetcher.clone());

        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = pipeline
            .fetch_chapters_with_cancel("http://feed", &cancel)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FeedErrorKind::Timeout);
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_aborts_backoff_sleep() {
        let fetcher = ScriptedFetcher::new(vec![Err(FeedError::network("HTTP 500", Some(500)))]);
        let pipeline = FeedPipeline::new(fetcher.clone());

        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let err = pipeline
            .fetch_chapters_with_cancel("http://feed", &cancel)
            .await
            .unwrap_err();

        // Only the first attempt ran; the 1000ms backoff was interrupted.
        assert_eq!(err.kind(), FeedErrorKind::Timeout);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_idempotent_across_calls() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(FEED_BODY.as_bytes().to_vec()),
            Ok(FEED_BODY.as_bytes().to_vec()),
        ]);
        let pipeline = FeedPipeline::new(fetcher);

        let first = pipeline.fetch_chapters("http://feed").await.unwrap();
        let second = pipeline.fetch_chapters("http://feed").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_url_rejected() {
        let fetcher = ScriptedFetcher::new(vec![]);
        let pipeline = FeedPipeline::new(fetcher.clone());

        let err = pipeline.fetch_chapters("").await.unwrap_err();

        assert_eq!(err.kind(), FeedErrorKind::Unknown);
        assert_eq!(fetcher.calls(), 0);
    }
}
