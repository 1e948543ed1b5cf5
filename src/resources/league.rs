//! League resource: the root of the fantasy hierarchy.

use tracing::debug;

use crate::api::parse::{
    coerce_str, coerce_u32, from_fragment, list_at, map_response, pluck, FieldSpec, FieldValue,
    ResponseSchema,
};
use crate::api::{Endpoint, Transport};
use crate::cache::{CacheStore, CachedFetcher, Clock, DEFAULT_TTL};
use crate::error::{Result, YahooError};
use crate::resources::{DraftResult, Standings, Team, Transaction, Week};

/// A fantasy league for one game season.
///
/// Only `league_key` is required at construction; the remaining metadata is
/// populated by the mapper from whichever endpoints touched the league.
#[derive(Debug, Clone, Default)]
pub struct League {
    pub league_key: String,
    pub league_id: Option<String>,
    pub name: Option<String>,
    pub draft_status: Option<String>,
    pub num_teams: Option<u32>,
    pub scoring_type: Option<String>,
    pub league_type: Option<String>,
    pub renew: Option<String>,
    pub current_week: Option<u32>,
    pub start_week: Option<u32>,
    pub end_week: Option<u32>,
    pub season: Option<u32>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("league_id"),
    FieldSpec::scalar("name"),
    FieldSpec::scalar("draft_status"),
    FieldSpec::scalar("num_teams"),
    FieldSpec::scalar("scoring_type"),
    FieldSpec::scalar("league_type"),
    FieldSpec::scalar("renew"),
    FieldSpec::scalar("current_week"),
    FieldSpec::scalar("start_week"),
    FieldSpec::scalar("end_week"),
    FieldSpec::scalar("season"),
];

impl ResponseSchema for League {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        if let FieldValue::Scalar(v) = value {
            match key {
                "league_id" => self.league_id = coerce_str(v),
                "name" => self.name = coerce_str(v),
                "draft_status" => self.draft_status = coerce_str(v),
                "num_teams" => self.num_teams = coerce_u32(v),
                "scoring_type" => self.scoring_type = coerce_str(v),
                "league_type" => self.league_type = coerce_str(v),
                "renew" => self.renew = coerce_str(v),
                "current_week" => self.current_week = coerce_u32(v),
                "start_week" => self.start_week = coerce_u32(v),
                "end_week" => self.end_week = coerce_u32(v),
                "season" => self.season = coerce_u32(v),
                _ => {}
            }
        }
        Ok(())
    }
}

impl League {
    pub fn new(league_key: impl Into<String>) -> Self {
        Self {
            league_key: league_key.into(),
            ..Self::default()
        }
    }

    /// Fetch the league metadata and build a populated `League`.
    pub async fn load<T, S, C>(
        fetcher: &CachedFetcher<T, S, C>,
        league_key: &str,
    ) -> Result<League>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        debug!(league_key, "looking up league metadata");
        let body = fetcher
            .fetch(
                &format!("league.{}.meta", league_key),
                &Endpoint::new(format!("league/{}/metadata", league_key)),
                DEFAULT_TTL,
            )
            .await?;

        let fragment = pluck(&body, &["fantasy_content", "league"])?;
        let mut league = League::new(league_key);
        map_response(&mut league, fragment, false)?;
        Ok(league)
    }

    /// List the teams in this league.
    pub async fn teams<T, S, C>(&self, fetcher: &CachedFetcher<T, S, C>) -> Result<Vec<Team>>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        debug!(league_key = %self.league_key, "looking up teams");
        let body = fetcher
            .fetch(
                &format!("teams.{}", self.league_key),
                &Endpoint::new(format!("league/{}/teams", self.league_key)),
                DEFAULT_TTL,
            )
            .await?;

        let container = pluck(&body, &["fantasy_content", "league", "teams"])?;
        list_at(container, "team")
            .into_iter()
            .map(Team::from_fragment)
            .collect()
    }

    /// Find a team by key, if it exists in this league.
    pub async fn get_team<T, S, C>(
        &self,
        fetcher: &CachedFetcher<T, S, C>,
        team_key: &str,
    ) -> Result<Option<Team>>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        Ok(self
            .teams(fetcher)
            .await?
            .into_iter()
            .find(|t| t.team_key == team_key))
    }

    /// Current league standings, one entry per team.
    pub async fn standings<T, S, C>(
        &self,
        fetcher: &CachedFetcher<T, S, C>,
    ) -> Result<Vec<Standings>>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        debug!(league_key = %self.league_key, "looking up standings");
        let body = fetcher
            .fetch(
                &format!("standings.{}", self.league_key),
                &Endpoint::new(format!("league/{}/standings", self.league_key)),
                DEFAULT_TTL,
            )
            .await?;

        let container = pluck(&body, &["fantasy_content", "league", "standings", "teams"])?;
        list_at(container, "team")
            .into_iter()
            .map(from_fragment::<Standings>)
            .collect()
    }

    /// Sync one [`Week`] per scoring period between start and end week.
    ///
    /// Requires the league metadata to carry start/end weeks; a league that
    /// was never synced (or is not week-based) cannot answer this.
    pub async fn weeks<T, S, C>(&self, fetcher: &CachedFetcher<T, S, C>) -> Result<Vec<Week>>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        let (start, end) = match (self.start_week, self.end_week) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(YahooError::StaleConfiguration {
                    message: format!(
                        "league {} has no start/end week; load the league metadata first \
                         (is it a head-to-head league?)",
                        self.league_key
                    ),
                })
            }
        };

        debug!(league_key = %self.league_key, start, end, "looking up weeks");
        let mut out = Vec::new();
        for week_num in start..=end {
            let mut week = Week::new(&self.league_key, week_num);
            week.sync(fetcher).await?;
            out.push(week);
        }
        Ok(out)
    }

    /// Draft results for every team in the league, in team order.
    pub async fn draft_results<T, S, C>(
        &self,
        fetcher: &CachedFetcher<T, S, C>,
    ) -> Result<Vec<DraftResult>>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        let mut results = Vec::new();
        for team in self.teams(fetcher).await? {
            debug!(team_key = %team.team_key, "looking up draft results");
            let body = fetcher
                .fetch(
                    &format!("draftresults.{}", team.team_key),
                    &Endpoint::new(format!("team/{}/draftresults;out=players", team.team_key)),
                    DEFAULT_TTL,
                )
                .await?;

            let container = pluck(&body, &["fantasy_content", "team", "draft_results"])?;
            for frag in list_at(container, "draft_result") {
                results.push(from_fragment::<DraftResult>(frag)?);
            }
        }
        Ok(results)
    }

    /// League transactions (adds, drops, trades), most recent first as
    /// returned by the API.
    pub async fn transactions<T, S, C>(
        &self,
        fetcher: &CachedFetcher<T, S, C>,
    ) -> Result<Vec<Transaction>>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        debug!(league_key = %self.league_key, "looking up transactions");
        let body = fetcher
            .fetch(
                &format!("transactions.{}", self.league_key),
                &Endpoint::new(format!("league/{}/transactions", self.league_key)),
                DEFAULT_TTL,
            )
            .await?;

        let container = pluck(&body, &["fantasy_content", "league", "transactions"])?;
        list_at(container, "transaction")
            .into_iter()
            .map(from_fragment::<Transaction>)
            .collect()
    }
}
