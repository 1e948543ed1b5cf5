//! Transaction resource: adds, drops, and trades.

use crate::api::parse::{
    coerce_i64, coerce_str, coerce_u32, from_fragment, list_at, FieldSpec, FieldValue,
    ResponseSchema,
};
use crate::error::Result;
use crate::resources::Player;

/// One league transaction and the players it moved.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub transaction_key: String,
    pub transaction_id: Option<u32>,
    /// Response key `type`: `add`, `drop`, `add/drop`, `trade`, ...
    pub transaction_type: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<i64>,
    pub players: Vec<Player>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("transaction_key").required(),
    FieldSpec::scalar("transaction_id"),
    FieldSpec::scalar("type"),
    FieldSpec::scalar("status"),
    FieldSpec::scalar("timestamp"),
    FieldSpec::nested("players"),
];

impl ResponseSchema for Transaction {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        match (key, value) {
            ("transaction_key", FieldValue::Scalar(v)) => {
                self.transaction_key = coerce_str(v).unwrap_or_default()
            }
            ("transaction_id", FieldValue::Scalar(v)) => self.transaction_id = coerce_u32(v),
            ("type", FieldValue::Scalar(v)) => self.transaction_type = coerce_str(v),
            ("status", FieldValue::Scalar(v)) => self.status = coerce_str(v),
            ("timestamp", FieldValue::Scalar(v)) => self.timestamp = coerce_i64(v),
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
}
