//! Stock, sales and audit-log records.

use serde::{Deserialize, Serialize};

/// On-hand quantity of a named item.
///
/// Rows at zero stock keep existing in storage; listings simply omit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Unique item key, 1-8 ASCII letters.
    pub name: String,
    /// Non-negative on-hand quantity.
    pub amount: i64,
}

/// Kind of mutation recorded in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    /// Stock was added.
    Add,
    /// Stock was sold.
    Sale,
}

impl LogAction {
    /// Storage representation, matching the `event_log.action` CHECK.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sale => "sale",
        }
    }

    /// Parses the storage representation back into an action.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add" => Some(Self::Add),
            "sale" => Some(Self::Sale),
            _ => None,
        }
    }
}

/// Immutable audit record describing one stock mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Monotonic storage-assigned id.
    pub id: i64,
    pub name: String,
    pub action: LogAction,
    pub amount: i64,
    /// Storage-assigned creation time, unix epoch milliseconds.
    pub created_at_ms: i64,
}

/// Result of a completed add/sell operation.
///
/// Carries the quantity just moved, not the new on-hand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockMovement {
    pub name: String,
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::{LogAction, StockMovement};

    #[test]
    fn log_action_db_mapping_roundtrips() {
        for action in [LogAction::Add, LogAction::Sale] {
            assert_eq!(LogAction::parse(action.as_db_str()), Some(action));
        }
        assert_eq!(LogAction::parse("restock"), None);
    }

    #[test]
    fn wire_serialization_shapes() {
        let movement = StockMovement {
            name: "aaa".to_string(),
            amount: 5,
        };
        assert_eq!(
            serde_json::to_value(&movement).unwrap(),
            serde_json::json!({ "name": "aaa", "amount": 5 })
        );
        assert_eq!(
            serde_json::to_value(LogAction::Sale).unwrap(),
            serde_json::json!("sale")
        );
    }
}
