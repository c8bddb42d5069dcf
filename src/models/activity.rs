use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// What an activity-log entry records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    Login,
    Like,
    Post,
    /// An action this client does not know about.
    Other(String),
}

impl ActivityAction {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityAction::Login => "LOGIN",
            ActivityAction::Like => "LIKE",
            ActivityAction::Post => "POST",
            ActivityAction::Other(raw) => raw,
        }
    }
}

impl From<&str> for ActivityAction {
    fn from(raw: &str) -> Self {
        match raw {
            "LOGIN" => ActivityAction::Login,
            "LIKE" => ActivityAction::Like,
            "POST" => ActivityAction::Post,
            other => ActivityAction::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for ActivityAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ActivityAction::from(raw.as_str()))
    }
}

/// One entry of `GET activity-log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    pub user_id: String,
    pub action: ActivityAction,
    pub created_at: i64,
    #[serde(default)]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_actions() {
        for (raw, action) in [
            ("LOGIN", ActivityAction::Login),
            ("LIKE", ActivityAction::Like),
            ("POST", ActivityAction::Post),
        ] {
            let parsed: ActivityAction = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(parsed, action);
        }
    }

    #[test]
    fn test_unknown_action_kept() {
        let entry: ActivityLogEntry = serde_json::from_value(json!({
            "id": "1",
            "userId": "u",
            "action": "COMMENT",
            "createdAt": 5
        }))
        .unwrap();

        assert_eq!(entry.action, ActivityAction::Other("COMMENT".to_string()));
        assert_eq!(entry.action.to_string(), "COMMENT");
        assert_eq!(entry.details, None);
    }
}
