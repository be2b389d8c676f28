//! Per-owner composition sessions and the submissions that drive them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::letter::{Field, FieldName, Step};

/// Caller-supplied key that scopes a session (a chat user id, for example).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for OwnerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Owner-keyed working copy of the letter template.
///
/// Each field is written exactly once, by the step that collects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub owner: OwnerId,
    /// Template fields in order, with collected values.
    pub fields: Vec<Field>,
    pub step: Step,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn field(&self, name: FieldName) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: FieldName) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}

/// What the channel delivered for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Submission {
    /// Leave the field absent.
    Skip,
    /// Literal field content, stored verbatim.
    Text(String),
}

impl Submission {
    /// Classify raw channel input. Only an exact match of the skip sentinel
    /// counts as a skip; everything else is literal content.
    pub fn from_input(raw: &str, skip_sentinel: &str) -> Self {
        if raw == skip_sentinel {
            Submission::Skip
        } else {
            Submission::Text(raw.to_string())
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Submission::Skip)
    }
}
