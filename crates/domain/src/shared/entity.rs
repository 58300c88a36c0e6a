use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier of records owned by the external appointment store.
///
/// The scheduler never interprets the inner value, it only compares it
/// and uses it to derive dedup keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ID(String);

impl ID {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_string(&self) -> String {
        self.0.clone()
    }

    pub fn inner(self) -> String {
        self.0
    }
}

impl Default for ID {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidIDError {
    #[error("ID: {0} is malformed")]
    Malformed(String),
}

impl FromStr for ID {
    type Err = InvalidIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Ids end up inside query strings and notification tags
        if trimmed.is_empty() || trimmed.contains(|c: char| c.is_whitespace() || c == ',') {
            return Err(InvalidIDError::Malformed(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Serialize for ID {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ID {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IDVisitor;

        impl<'de> Visitor<'de> for IDVisitor {
            type Value = ID;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A valid string id representation")
            }

            fn visit_str<E>(self, value: &str) -> Result<ID, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<ID>()
                    .map_err(|_| E::custom(format!("Malformed id: {}", value)))
            }

            // Some stores hand out numeric primary keys
            fn visit_u64<E>(self, value: u64) -> Result<ID, E>
            where
                E: serde::de::Error,
            {
                Ok(ID(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<ID, E>
            where
                E: serde::de::Error,
            {
                Ok(ID(value.to_string()))
            }
        }

        deserializer.deserialize_any(IDVisitor)
    }
}
