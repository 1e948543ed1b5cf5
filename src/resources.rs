//! Domain resources of the Yahoo fantasy hierarchy.
//!
//! Every resource is a thin consumer of the two core subsystems: fetches go
//! through [`crate::cache::CachedFetcher`] and parsing goes through the
//! field-table mapper in [`crate::api::parse`].

pub mod draft_result;
pub mod league;
pub mod player;
pub mod roster;
pub mod standings;
pub mod team;
pub mod transaction;
pub mod week;

pub use draft_result::DraftResult;
pub use league::League;
pub use player::{Player, PlayerName, PlayerStat};
pub use roster::Roster;
pub use standings::{OutcomeTotals, Standings, TeamStandings};
pub use team::{Manager, Team};
pub use transaction::Transaction;
pub use week::{Matchup, Week};
