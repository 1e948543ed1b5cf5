//! Yahoo Fantasy Sports Client Library
//!
//! A Rust client for the Yahoo Fantasy Sports API, built around two generic
//! subsystems: a response-normalization and object-mapping engine, and a
//! TTL-based fetch cache.
//!
//! ## Features
//!
//! - **Shape normalization**: Yahoo's JSON is converted from XML, so
//!   repeated elements arrive as an object or an array depending on count,
//!   and scalars are sometimes wrapped as `{"$": value}`. The parse engine
//!   hides both irregularities.
//! - **Declarative entity mapping**: each resource declares a field table
//!   (key, shape, required flag); one generic mapper populates them all.
//! - **TTL fetch cache**: repeated lookups of slow-moving data (teams,
//!   standings, draft results) are served from a pluggable cache store
//!   (in-memory LRU, JSON files, or sqlite) until their TTL lapses.
//! - **Resource hierarchy**: leagues, teams, players, rosters, standings,
//!   weekly scoreboards, draft results, and transactions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yahoo_fantasy::{cache::SqliteStore, CachedFetcher, League, YahooTransport};
//!
//! # async fn example() -> yahoo_fantasy::Result<()> {
//! let fetcher = CachedFetcher::new(YahooTransport::new()?, SqliteStore::new()?);
//!
//! let league = League::load(&fetcher, "423.l.12345").await?;
//! for team in league.teams(&fetcher).await? {
//!     println!("{}", team.name.as_deref().unwrap_or("unnamed"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Private leagues need an OAuth bearer token:
//! ```bash
//! export YAHOO_ACCESS_TOKEN=...
//! ```

pub mod api;
pub mod cache;
pub mod error;
pub mod resources;

// Re-export commonly used types
pub use api::{Endpoint, Transport, YahooTransport};
pub use cache::{CacheEntry, CacheStore, CachedFetcher, Clock, SystemClock, DEFAULT_TTL};
pub use error::{Result, YahooError};
pub use resources::{League, Player, Roster, Standings, Team, Transaction, Week};

pub const ACCESS_TOKEN_ENV_VAR: &str = "YAHOO_ACCESS_TOKEN";
