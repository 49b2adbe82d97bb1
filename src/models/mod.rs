use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{value::RawValue, Map, Value};
use thiserror::Error;

pub const USERNAME_MAX_CHARS: usize = 80;
pub const RANK_MAX_CHARS: usize = 50;

/// Row from the `players` table, also the JSON shape returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i32,
    pub username: String,
    pub rank: String,
    pub kd_ratio: f64,
}

/// Validated body of `POST /players`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub username: String,
    pub rank: String,
    pub kd_ratio: f64,
}

/// Validated body of `PUT /players/{id}`. `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerChanges {
    pub rank: Option<String>,
    pub kd_ratio: Option<f64>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Client input errors. The `Display` text is sent back verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: username, rank, kd_ratio")]
    MissingFields,
    #[error("Missing data")]
    MissingData,
    #[error("Username must be a non-empty string")]
    InvalidUsername,
    #[error("Username must be at most 80 characters")]
    UsernameTooLong,
    #[error("Rank must be a string")]
    InvalidRank,
    #[error("Rank must be at most 50 characters")]
    RankTooLong,
    #[error("kd_ratio must be a valid number")]
    InvalidKdRatio,
}

/// Parses a request body. Empty or malformed bodies come back as `None`.
///
/// `Value` cannot hold numbers outside the `f64` range, so an object with
/// such a field is kept and the field reads as `null`. It then fails the
/// same type check any other non-representable value would.
pub fn parse_json_body(body: &[u8]) -> Option<Value> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return Some(value);
    }

    let fields: BTreeMap<String, Box<RawValue>> = serde_json::from_slice(body).ok()?;
    let fields = fields
        .into_iter()
        .map(|(key, raw)| {
            let value = serde_json::from_str(raw.get()).unwrap_or(Value::Null);
            (key, value)
        })
        .collect();

    Some(Value::Object(fields))
}

impl NewPlayer {
    /// Validates a create request body. Rules are checked in order and the
    /// first failure is returned.
    pub fn from_json(body: Option<&Value>) -> Result<Self, ValidationError> {
        let fields = body
            .and_then(Value::as_object)
            .filter(|fields| {
                ["username", "rank", "kd_ratio"]
                    .iter()
                    .all(|key| fields.contains_key(*key))
            })
            .ok_or(ValidationError::MissingFields)?;

        let username = fields["username"]
            .as_str()
            .map(str::trim)
            .filter(|username| !username.is_empty())
            .ok_or(ValidationError::InvalidUsername)?;

        let kd_ratio = parse_kd_ratio(&fields["kd_ratio"])?;

        if username.chars().count() > USERNAME_MAX_CHARS {
            return Err(ValidationError::UsernameTooLong);
        }

        let rank = parse_rank(&fields["rank"])?;

        Ok(Self {
            username: username.to_string(),
            rank,
            kd_ratio,
        })
    }
}

impl PlayerChanges {
    /// Validates an update request body. Keys other than `rank` and
    /// `kd_ratio` are ignored.
    pub fn from_json(body: Option<&Value>) -> Result<Self, ValidationError> {
        let fields: &Map<String, Value> = body
            .and_then(Value::as_object)
            .filter(|fields| !fields.is_empty())
            .ok_or(ValidationError::MissingData)?;

        let rank = fields.get("rank").map(parse_rank).transpose()?;
        let kd_ratio = fields.get("kd_ratio").map(parse_kd_ratio).transpose()?;

        Ok(Self { rank, kd_ratio })
    }

    pub fn is_empty(&self) -> bool {
        self.rank.is_none() && self.kd_ratio.is_none()
    }
}

fn parse_rank(value: &Value) -> Result<String, ValidationError> {
    let rank = value.as_str().ok_or(ValidationError::InvalidRank)?;
    if rank.chars().count() > RANK_MAX_CHARS {
        return Err(ValidationError::RankTooLong);
    }
    Ok(rank.to_string())
}

/// Accepts JSON numbers and numeric strings. Non-finite values are
/// rejected since they cannot be written back out as JSON.
fn parse_kd_ratio(value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|kd_ratio| kd_ratio.is_finite())
        .ok_or(ValidationError::InvalidKdRatio)
}
