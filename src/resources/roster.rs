//! Roster resource: a team's lineup for one week (or live).

use serde_json::Value;

use crate::api::parse::{
    coerce_bool, coerce_str, coerce_u32, from_fragment, list_at, FieldSpec, FieldValue,
    ResponseSchema,
};
use crate::error::Result;
use crate::resources::Player;

/// A team's roster. Mapped with `retain_raw`, so the untouched response
/// fragment stays reachable through [`Roster::raw`].
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// The requested week; overwritten by the response's own `week` when
    /// present, `None` for a live roster.
    pub week: Option<u32>,
    pub coverage_type: Option<String>,
    pub is_editable: Option<bool>,
    pub players: Vec<Player>,
    raw: Option<Value>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("coverage_type"),
    FieldSpec::scalar("week"),
    FieldSpec::scalar("is_editable"),
    FieldSpec::nested("players"),
];

impl ResponseSchema for Roster {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        match (key, value) {
            ("coverage_type", FieldValue::Scalar(v)) => self.coverage_type = coerce_str(v),
            ("week", FieldValue::Scalar(v)) => self.week = coerce_u32(v),
            ("is_editable", FieldValue::Scalar(v)) => self.is_editable = coerce_bool(v),
            ("players", FieldValue::Fragment(node)) => {
                self.players = list_at(node, "player")
                    .into_iter()
                    .map(from_fragment::<Player>)
                    .collect::<Result<_>>()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn set_raw(&mut self, fragment: &Value) {
        self.raw = Some(fragment.clone());
    }
}

impl Roster {
    pub fn new(week: Option<u32>) -> Self {
        Self {
            week,
            ..Self::default()
        }
    }

    /// The untouched roster fragment, for response keys not modeled by the
    /// field table.
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }
}
