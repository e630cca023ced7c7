//! Database models
//!
//! Data structures representing database tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User record in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    // Never serialized into API responses; handlers expose UserInfo-style
    // views instead of this record.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
}

/// Workflow status of an item
///
/// The wire and storage representation uses the Spanish labels the service
/// has always exposed; the closed set doubles as input validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En progreso")]
    InProgress,
    #[serde(rename = "Completado")]
    Completed,
}

impl ItemStatus {
    /// Storage representation, identical to the wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "Pendiente",
            ItemStatus::InProgress => "En progreso",
            ItemStatus::Completed => "Completado",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Pendiente" => Ok(ItemStatus::Pending),
            "En progreso" => Ok(ItemStatus::InProgress),
            "Completado" => Ok(ItemStatus::Completed),
            other => Err(format!("unknown item status: {}", other)),
        }
    }
}

/// Item record in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub status: ItemStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            ItemStatus::Pending,
            ItemStatus::InProgress,
            ItemStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!("Archivado".parse::<ItemStatus>().is_err());
        assert!("pendiente".parse::<ItemStatus>().is_err());
        assert!("".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_wire_labels() {
        let json = serde_json::to_string(&ItemStatus::InProgress).unwrap();
        assert_eq!(json, "\"En progreso\"");

        let parsed: ItemStatus = serde_json::from_str("\"Completado\"").unwrap();
        assert_eq!(parsed, ItemStatus::Completed);

        assert!(serde_json::from_str::<ItemStatus>("\"Done\"").is_err());
    }

    #[test]
    fn test_user_password_hash_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            is_active: true,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }
}
