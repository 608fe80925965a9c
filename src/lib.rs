//! # Kapitel
//!
//! The core of a customizable, embeddable audio-chapter player sourced
//! from an RSS 2.0 feed.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Extractor → Chapter[]
//!                                       ↑
//!              SettingsStore ── PlayerSettings (feed URL, appearance)
//! ```
//!
//! - [`feed`]: the ingestion pipeline — fetch with timeout, retry with
//!   exponential backoff, tolerant XML normalization, chapter extraction
//! - [`store`]: SQLite persistence for player configurations
//! - [`embed`]: presentation helpers (sort order, initial chapter, embed codes)
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a player configuration
//! kapitel add "Advent" https://example.com/tag/advent/feed
//!
//! # Fetch a feed and inspect its chapters
//! kapitel fetch https://example.com/tag/advent/feed
//!
//! # Print embed codes for a third-party page
//! kapitel embed <id> --base-url https://player.example.com/
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires together the store and the
/// feed pipeline from configuration.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/kapitel/config.toml`:
/// proxy base URL, request timeout, retry policy.
pub mod config;

/// Core domain models.
///
/// - [`Chapter`](domain::Chapter): one playable feed item
/// - [`PlayerSettings`](domain::PlayerSettings): a named player configuration
pub mod domain;

/// Presentation helpers for the embed surface: display order,
/// initial-chapter selection, iframe/script snippet generation.
pub mod embed;

/// The feed ingestion pipeline.
///
/// - [`Fetcher`](feed::Fetcher): async trait over the network seam
/// - [`Normalizer`](feed::Normalizer): tolerant RSS 2.0 → item list
/// - [`FeedPipeline`](feed::FeedPipeline): retry/backoff/cancellation
/// - [`FeedError`](feed::FeedError): NETWORK / TIMEOUT / PARSE / UNKNOWN
pub mod feed;

/// SQLite persistence layer.
///
/// - [`SettingsStore`](store::SettingsStore): CRUD trait
/// - [`SqliteStore`](store::SqliteStore): rusqlite implementation
pub mod store;
