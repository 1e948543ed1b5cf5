//! Week and matchup resources from the league scoreboard.

use tracing::debug;

use crate::api::parse::{
    coerce_bool, coerce_str, coerce_u32, from_fragment, list_at, pluck, FieldSpec, FieldValue,
    ResponseSchema,
};
use crate::api::{Endpoint, Transport};
use crate::cache::{CacheStore, CachedFetcher, Clock, DEFAULT_TTL};
use crate::error::Result;
use crate::resources::Team;

/// One head-to-head matchup in a week's scoreboard.
#[derive(Debug, Clone, Default)]
pub struct Matchup {
    pub week: Option<u32>,
    pub status: Option<String>,
    pub is_playoffs: Option<bool>,
    pub is_consolation: Option<bool>,
    pub is_tied: Option<bool>,
    pub winner_team_key: Option<String>,
    pub teams: Vec<Team>,
}

const MATCHUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("week"),
    FieldSpec::scalar("status"),
    FieldSpec::scalar("is_playoffs"),
    FieldSpec::scalar("is_consolation"),
    FieldSpec::scalar("is_tied"),
    FieldSpec::scalar("winner_team_key"),
    FieldSpec::nested("teams"),
];

impl ResponseSchema for Matchup {
    fn fields() -> &'static [FieldSpec] {
        MATCHUP_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        match (key, value) {
            ("week", FieldValue::Scalar(v)) => self.week = coerce_u32(v),
            ("status", FieldValue::Scalar(v)) => self.status = coerce_str(v),
            ("is_playoffs", FieldValue::Scalar(v)) => self.is_playoffs = coerce_bool(v),
            ("is_consolation", FieldValue::Scalar(v)) => self.is_consolation = coerce_bool(v),
            ("is_tied", FieldValue::Scalar(v)) => self.is_tied = coerce_bool(v),
            ("winner_team_key", FieldValue::Scalar(v)) => self.winner_team_key = coerce_str(v),
            ("teams", FieldValue::Fragment(node)) => {
                self.teams = list_at(node, "team")
                    .into_iter()
                    .map(Team::from_fragment)
                    .collect::<Result<_>>()?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// One scoring week of a league, holding its matchups once synced.
#[derive(Debug, Clone)]
pub struct Week {
    pub league_key: String,
    pub week_num: u32,
    pub matchups: Vec<Matchup>,
}

impl Week {
    pub fn new(league_key: impl Into<String>, week_num: u32) -> Self {
        Self {
            league_key: league_key.into(),
            week_num,
            matchups: Vec::new(),
        }
    }

    /// Fetch this week's scoreboard and populate [`Week::matchups`].
    pub async fn sync<T, S, C>(&mut self, fetcher: &CachedFetcher<T, S, C>) -> Result<()>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        debug!(league_key = %self.league_key, week = self.week_num, "looking up scoreboard");
        let body = fetcher
            .fetch(
                &format!("weeks.{}.{}", self.league_key, self.week_num),
                &Endpoint::new(format!(
                    "league/{}/scoreboard;week={}",
                    self.league_key, self.week_num
                )),
                DEFAULT_TTL,
            )
            .await?;

        let container = pluck(
            &body,
            &["fantasy_content", "league", "scoreboard", "matchups"],
        )?;
        self.matchups = list_at(container, "matchup")
            .into_iter()
            .map(from_fragment::<Matchup>)
            .collect::<Result<_>>()?;
        Ok(())
    }
}
