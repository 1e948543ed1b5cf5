//! Player resource and per-period statistics.

use serde_json::Value;
use tracing::debug;

use crate::api::parse::{
    coerce_f64, coerce_str, coerce_u32, from_fragment, get_value, list_at, pluck, FieldSpec,
    FieldValue, ResponseSchema,
};
use crate::api::{Endpoint, Transport};
use crate::cache::{CacheStore, CachedFetcher, Clock, DEFAULT_TTL};
use crate::error::{Result, YahooError};

/// A player's name as the API reports it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerName {
    pub first: Option<String>,
    pub last: Option<String>,
    pub full: Option<String>,
}

const NAME_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("first"),
    FieldSpec::scalar("last"),
    FieldSpec::scalar("full"),
];

impl ResponseSchema for PlayerName {
    fn fields() -> &'static [FieldSpec] {
        NAME_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        if let FieldValue::Scalar(v) = value {
            match key {
                "first" => self.first = coerce_str(v),
                "last" => self.last = coerce_str(v),
                "full" => self.full = coerce_str(v),
                _ => {}
            }
        }
        Ok(())
    }
}

/// One stat line from a player's stats response. Values stay strings; what
/// a stat id means is a lookup-table concern outside this crate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStat {
    pub stat_id: Option<u32>,
    pub value: Option<String>,
}

const STAT_FIELDS: &[FieldSpec] = &[FieldSpec::scalar("stat_id"), FieldSpec::scalar("value")];

impl ResponseSchema for PlayerStat {
    fn fields() -> &'static [FieldSpec] {
        STAT_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        if let FieldValue::Scalar(v) = value {
            match key {
                "stat_id" => self.stat_id = coerce_u32(v),
                "value" => self.value = coerce_str(v),
                _ => {}
            }
        }
        Ok(())
    }
}

/// A player, as it appears on rosters, teams, and transactions.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub player_key: Option<String>,
    pub player_id: Option<u32>,
    pub name: Option<PlayerName>,
    pub display_position: Option<String>,
    pub editorial_team_abbr: Option<String>,
    pub uniform_number: Option<String>,
    pub status: Option<String>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("player_key"),
    FieldSpec::scalar("player_id").required(),
    FieldSpec::nested("name").required(),
    FieldSpec::scalar("display_position"),
    FieldSpec::scalar("editorial_team_abbr"),
    FieldSpec::scalar("uniform_number"),
    FieldSpec::scalar("status"),
];

impl ResponseSchema for Player {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        match (key, value) {
            ("player_key", FieldValue::Scalar(v)) => self.player_key = coerce_str(v),
            ("player_id", FieldValue::Scalar(v)) => self.player_id = coerce_u32(v),
            ("name", FieldValue::Fragment(node)) => {
                self.name = Some(from_fragment::<PlayerName>(node)?)
            }
            ("display_position", FieldValue::Scalar(v)) => self.display_position = coerce_str(v),
            ("editorial_team_abbr", FieldValue::Scalar(v)) => {
                self.editorial_team_abbr = coerce_str(v)
            }
            ("uniform_number", FieldValue::Scalar(v)) => self.uniform_number = coerce_str(v),
            ("status", FieldValue::Scalar(v)) => self.status = coerce_str(v),
            _ => {}
        }
        Ok(())
    }
}

impl Player {
    /// Build a player from a `player` response fragment.
    pub fn from_fragment(fragment: &Value) -> Result<Self> {
        from_fragment(fragment)
    }

    /// This player's stat lines for a week, or the whole season with
    /// `week = None`.
    pub async fn stats<T, S, C>(
        &self,
        fetcher: &CachedFetcher<T, S, C>,
        league_key: &str,
        week: Option<u32>,
    ) -> Result<Vec<PlayerStat>>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        let player_data = self.fetch_stats(fetcher, league_key, week).await?;
        let container = pluck(&player_data, &["player_stats", "stats"])?;
        list_at(container, "stat")
            .into_iter()
            .map(from_fragment::<PlayerStat>)
            .collect()
    }

    /// This player's fantasy points for a week, or the whole season with
    /// `week = None`.
    pub async fn points<T, S, C>(
        &self,
        fetcher: &CachedFetcher<T, S, C>,
        league_key: &str,
        week: Option<u32>,
    ) -> Result<f64>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        let player_data = self.fetch_stats(fetcher, league_key, week).await?;
        let total = get_value(pluck(&player_data, &["player_points", "total"])?)?;
        coerce_f64(total)
            .ok_or_else(|| YahooError::malformed("player_points total is not numeric"))
    }

    /// Fetch the stats endpoint for this player and return its `player`
    /// fragment.
    async fn fetch_stats<T, S, C>(
        &self,
        fetcher: &CachedFetcher<T, S, C>,
        league_key: &str,
        week: Option<u32>,
    ) -> Result<Value>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        let player_key = self.player_key.as_deref().ok_or_else(|| {
            YahooError::StaleConfiguration {
                message: "player has no player_key; it was mapped from a fragment without one"
                    .to_string(),
            }
        })?;
        let player_id = self.player_id.ok_or_else(|| YahooError::StaleConfiguration {
            message: "player has no player_id; it was mapped from a fragment without one"
                .to_string(),
        })?;

        let (key_part, filter) = match week {
            Some(n) => (n.to_string(), format!(";type=week;week={}", n)),
            None => ("season".to_string(), String::new()),
        };

        debug!(player_key, week = %key_part, "looking up player stats");
        let body = fetcher
            .fetch(
                &format!("player.{}.stats.{}.{}", player_id, league_key, key_part),
                &Endpoint::new(format!(
                    "league/{}/players;player_keys={}/stats{}",
                    league_key, player_key, filter
                )),
                DEFAULT_TTL,
            )
            .await?;

        let container = pluck(&body, &["fantasy_content", "league", "players"])?;
        let player_data = list_at(container, "player")
            .into_iter()
            .next()
            .ok_or_else(|| YahooError::malformed("stats response contains no player"))?;
        Ok(player_data.clone())
    }
}
