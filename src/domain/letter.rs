use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Opaque letter identifier
///
/// The API sends ids as JSON numbers, but nothing on the client relies on that,
/// so both numbers and strings are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LetterId(String);

impl LetterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for LetterId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for LetterId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self::from(n),
            RawId::Text(s) => Self(s),
        })
    }
}

/// A letter as returned by the API
///
/// The client only ever holds a read-only copy fetched for the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    pub id: LetterId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub delivery_date: DateTime<Utc>,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Letter {
    pub fn is_pending(&self) -> bool {
        !self.is_delivered
    }
}

/// Body of `GET /api/letters`: either a bare array or `{"letters": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LettersPayload {
    Bare(Vec<Letter>),
    Wrapped { letters: Vec<Letter> },
}

impl LettersPayload {
    pub fn into_letters(self) -> Vec<Letter> {
        match self {
            LettersPayload::Bare(letters) | LettersPayload::Wrapped { letters } => letters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewLetterError {
    #[error("Title is required.")]
    MissingTitle,
    #[error("Content is required.")]
    MissingContent,
    #[error("Delivery date must be in the future.")]
    DeliveryDateNotInFuture,
    #[error("{0} is not a valid delivery date.")]
    InvalidDate(NaiveDate),
}

/// A letter to be scheduled with `POST /api/letters`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLetter {
    pub title: String,
    pub content: String,
    pub delivery_date: DateTime<Utc>,
}

impl NewLetter {
    /// Validate and build a new letter. `delivery_date` must be strictly after `now`.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        delivery_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, NewLetterError> {
        let title = title.into().trim().to_string();
        let content = content.into();

        if title.is_empty() {
            return Err(NewLetterError::MissingTitle);
        }
        if content.trim().is_empty() {
            return Err(NewLetterError::MissingContent);
        }
        if delivery_date <= now {
            return Err(NewLetterError::DeliveryDateNotInFuture);
        }

        Ok(Self {
            title,
            content,
            delivery_date,
        })
    }
}

/// Noon on `date` in `tz`, which is how a bare calendar date is scheduled.
pub fn delivery_instant<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
) -> Result<DateTime<Utc>, NewLetterError> {
    date.and_hms_opt(12, 0, 0)
        .and_then(|noon| tz.from_local_datetime(&noon).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or(NewLetterError::InvalidDate(date))
}
