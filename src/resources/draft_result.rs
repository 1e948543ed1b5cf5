//! Draft result resource: one pick of a league's draft.

use crate::api::parse::{coerce_str, coerce_u32, FieldSpec, FieldValue, ResponseSchema};
use crate::error::Result;

/// One draft pick. `cost` is only present for auction drafts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftResult {
    pub pick: Option<u32>,
    pub round: Option<u32>,
    pub cost: Option<u32>,
    pub team_key: Option<String>,
    pub player_key: Option<String>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("pick"),
    FieldSpec::scalar("round"),
    FieldSpec::scalar("cost"),
    FieldSpec::scalar("team_key"),
    FieldSpec::scalar("player_key"),
];

impl ResponseSchema for DraftResult {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        if let FieldValue::Scalar(v) = value {
            match key {
                "pick" => self.pick = coerce_u32(v),
                "round" => self.round = coerce_u32(v),
                "cost" => self.cost = coerce_u32(v),
                "team_key" => self.team_key = coerce_str(v),
                "player_key" => self.player_key = coerce_str(v),
                _ => {}
            }
        }
        Ok(())
    }
}
