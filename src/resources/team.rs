//! Team resource and its managers.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::api::parse::{
    coerce_str, coerce_u32, from_fragment, list_at, map_response, pluck, FieldSpec, FieldValue,
    ResponseSchema,
};
use crate::api::{Endpoint, Transport};
use crate::cache::{CacheStore, CachedFetcher, Clock, DEFAULT_TTL};
use crate::error::Result;
use crate::resources::{Player, Roster};

/// One of a team's managers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manager {
    pub manager_id: Option<u32>,
    pub nickname: Option<String>,
    pub guid: Option<String>,
}

const MANAGER_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("manager_id"),
    FieldSpec::scalar("nickname"),
    FieldSpec::scalar("guid"),
];

impl ResponseSchema for Manager {
    fn fields() -> &'static [FieldSpec] {
        MANAGER_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        if let FieldValue::Scalar(v) = value {
            match key {
                "manager_id" => self.manager_id = coerce_u32(v),
                "nickname" => self.nickname = coerce_str(v),
                "guid" => self.guid = coerce_str(v),
                _ => {}
            }
        }
        Ok(())
    }
}

/// A fantasy team within a league.
#[derive(Debug, Clone, Default)]
pub struct Team {
    pub team_key: String,
    pub team_id: Option<u32>,
    pub name: Option<String>,
    pub waiver_priority: Option<u32>,
    pub number_of_moves: Option<u32>,
    pub number_of_trades: Option<u32>,
    pub draft_position: Option<u32>,
    pub managers: Vec<Manager>,
}

const TEAM_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("team_key").required(),
    FieldSpec::scalar("team_id"),
    FieldSpec::scalar("name"),
    FieldSpec::scalar("waiver_priority"),
    FieldSpec::scalar("number_of_moves"),
    FieldSpec::scalar("number_of_trades"),
    FieldSpec::scalar("draft_position"),
    FieldSpec::nested("managers").required(),
];

impl ResponseSchema for Team {
    fn fields() -> &'static [FieldSpec] {
        TEAM_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        match (key, value) {
            ("team_key", FieldValue::Scalar(v)) => {
                self.team_key = coerce_str(v).unwrap_or_default()
            }
            ("team_id", FieldValue::Scalar(v)) => self.team_id = coerce_u32(v),
            ("name", FieldValue::Scalar(v)) => self.name = coerce_str(v),
            ("waiver_priority", FieldValue::Scalar(v)) => self.waiver_priority = coerce_u32(v),
            ("number_of_moves", FieldValue::Scalar(v)) => self.number_of_moves = coerce_u32(v),
            ("number_of_trades", FieldValue::Scalar(v)) => self.number_of_trades = coerce_u32(v),
            ("draft_position", FieldValue::Scalar(v)) => self.draft_position = coerce_u32(v),
            // `managers` is a container holding one-or-many `manager` nodes.
            ("managers", FieldValue::Fragment(node)) => {
                self.managers = list_at(node, "manager")
                    .into_iter()
                    .map(from_fragment::<Manager>)
                    .collect::<Result<_>>()?;
            }
            _ => {}
        }
        Ok(())
    }
}

impl Team {
    /// Build a team from a `team` response fragment.
    pub fn from_fragment(fragment: &Value) -> Result<Self> {
        from_fragment(fragment)
    }

    /// Shortcut to the first manager; teams can have several.
    pub fn manager(&self) -> Option<&Manager> {
        self.managers.first()
    }

    /// Current players on this team.
    pub async fn players<T, S, C>(&self, fetcher: &CachedFetcher<T, S, C>) -> Result<Vec<Player>>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        debug!(team_key = %self.team_key, "looking up current players on team");
        let body = fetcher
            .fetch(
                &format!("team.{}.players", self.team_key),
                &Endpoint::new(format!("team/{}/players", self.team_key)),
                DEFAULT_TTL,
            )
            .await?;

        let container = pluck(&body, &["fantasy_content", "team", "players"])?;
        list_at(container, "player")
            .into_iter()
            .map(Player::from_fragment)
            .collect()
    }

    /// Fetch this team's roster for a given week.
    ///
    /// With `week = None` the live roster is fetched; live rosters must
    /// never be served stale, so that variant bypasses the cache with a
    /// zero TTL. The returned [`Roster`] retains the raw fragment for
    /// response keys the schema does not model.
    pub async fn roster<T, S, C>(
        &self,
        fetcher: &CachedFetcher<T, S, C>,
        week: Option<u32>,
    ) -> Result<Roster>
    where
        T: Transport,
        S: CacheStore,
        C: Clock,
    {
        let (key_part, path, ttl) = match week {
            Some(n) => (
                n.to_string(),
                format!("team/{}/roster;week={}", self.team_key, n),
                DEFAULT_TTL,
            ),
            None => (
                "live".to_string(),
                format!("team/{}/roster", self.team_key),
                Duration::ZERO,
            ),
        };

        debug!(team_key = %self.team_key, week = %key_part, "looking up roster");
        let body = fetcher
            .fetch(
                &format!("team.{}.roster.{}", self.team_key, key_part),
                &Endpoint::new(path),
                ttl,
            )
            .await?;

        let fragment = pluck(&body, &["fantasy_content", "team", "roster"])?;
        let mut roster = Roster::new(week);
        map_response(&mut roster, fragment, true)?;
        Ok(roster)
    }
}
