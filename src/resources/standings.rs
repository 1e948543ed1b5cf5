//! Standings resource: where each team sits in the league.

use crate::api::parse::{
    coerce_f64, coerce_str, coerce_u32, from_fragment, FieldSpec, FieldValue, ResponseSchema,
};
use crate::error::Result;

/// Win/loss record totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeTotals {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
    pub percentage: Option<f64>,
}

const OUTCOME_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("wins"),
    FieldSpec::scalar("losses"),
    FieldSpec::scalar("ties"),
    FieldSpec::scalar("percentage"),
];

impl ResponseSchema for OutcomeTotals {
    fn fields() -> &'static [FieldSpec] {
        OUTCOME_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        if let FieldValue::Scalar(v) = value {
            match key {
                "wins" => self.wins = coerce_u32(v),
                "losses" => self.losses = coerce_u32(v),
                "ties" => self.ties = coerce_u32(v),
                "percentage" => self.percentage = coerce_f64(v),
                _ => {}
            }
        }
        Ok(())
    }
}

/// The standings block nested under a team in the standings response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStandings {
    pub rank: Option<u32>,
    pub playoff_seed: Option<u32>,
    pub outcome_totals: Option<OutcomeTotals>,
    pub points_for: Option<f64>,
    pub points_against: Option<f64>,
}

const TEAM_STANDINGS_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("rank"),
    FieldSpec::scalar("playoff_seed"),
    FieldSpec::nested("outcome_totals"),
    FieldSpec::scalar("points_for"),
    FieldSpec::scalar("points_against"),
];

impl ResponseSchema for TeamStandings {
    fn fields() -> &'static [FieldSpec] {
        TEAM_STANDINGS_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        match (key, value) {
            ("rank", FieldValue::Scalar(v)) => self.rank = coerce_u32(v),
            ("playoff_seed", FieldValue::Scalar(v)) => self.playoff_seed = coerce_u32(v),
            ("outcome_totals", FieldValue::Fragment(node)) => {
                self.outcome_totals = Some(from_fragment::<OutcomeTotals>(node)?)
            }
            ("points_for", FieldValue::Scalar(v)) => self.points_for = coerce_f64(v),
            ("points_against", FieldValue::Scalar(v)) => self.points_against = coerce_f64(v),
            _ => {}
        }
        Ok(())
    }
}

/// One team's entry in the league standings.
#[derive(Debug, Clone, Default)]
pub struct Standings {
    pub team_key: String,
    pub name: Option<String>,
    pub standings: Option<TeamStandings>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("team_key").required(),
    FieldSpec::scalar("name"),
    FieldSpec::nested("team_standings").required(),
];

impl ResponseSchema for Standings {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        match (key, value) {
            ("team_key", FieldValue::Scalar(v)) => self.team_key = coerce_str(v).unwrap_or_default(),
            ("name", FieldValue::Scalar(v)) => self.name = coerce_str(v),
            ("team_standings", FieldValue::Fragment(node)) => {
                self.standings = Some(from_fragment::<TeamStandings>(node)?)
            }
            _ => {}
        }
        Ok(())
    }
}
