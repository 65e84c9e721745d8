use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::db::models::{GlobalAverage, TemperatureReading};

/// Accepted layout for `AddTemperatureRequest::date`, e.g. `01-15-2024 10:00:00`.
pub const DATE_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("date {value:?} does not match format MM-DD-YYYY HH:MM:SS")]
    MalformedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("date must be a string in format MM-DD-YYYY HH:MM:SS, got null")]
    NullDate,

    #[error("temperature {value} is out of range for a REAL column")]
    TemperatureOutOfRange { value: serde_json::Number },
}

/// Request body for `POST /api/room`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRoomResponse {
    pub id: i32,
    pub message: String,
}

/// Request body for `POST /api/temperature`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddTemperatureRequest {
    /// Kept as sent so the confirmation message echoes it verbatim.
    #[schema(value_type = f64)]
    pub temperature: serde_json::Number,
    /// Id of an existing room.
    pub room: i32,
    /// `MM-DD-YYYY HH:MM:SS`, interpreted as UTC. Defaults to now when
    /// absent; an explicit `null` is rejected.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "01-15-2024 10:00:00")]
    pub date: Option<Option<String>>,
}

/// Maps a present field to `Some`, leaving `None` (via `default`) for an
/// absent one, so `null` and "missing" stay distinguishable.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl AddTemperatureRequest {
    pub fn into_reading(self) -> Result<TemperatureReading, RequestError> {
        let date = match self.date {
            Some(Some(raw)) => parse_date(&raw)?,
            Some(None) => return Err(RequestError::NullDate),
            None => Utc::now().naive_utc(),
        };
        Ok(TemperatureReading {
            room_id: self.room,
            temperature: to_real(&self.temperature)?,
            date,
        })
    }
}

/// Narrows to `REAL`, failing where PostgreSQL's float8 to real cast would:
/// overflow to infinity or underflow of a non-zero value to zero.
fn to_real(number: &serde_json::Number) -> Result<f32, RequestError> {
    let out_of_range = || RequestError::TemperatureOutOfRange {
        value: number.clone(),
    };
    let value = number.as_f64().ok_or_else(out_of_range)?;
    let real = value as f32;
    if !real.is_finite() || (real == 0.0 && value != 0.0) {
        return Err(out_of_range());
    }
    Ok(real)
}

pub fn parse_date(raw: &str) -> Result<NaiveDateTime, RequestError> {
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT).map_err(|source| {
        RequestError::MalformedDate {
            value: raw.to_owned(),
            source,
        }
    })
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GlobalAverageDto {
    /// Mean of all readings rounded to two decimals; `null` with no readings.
    pub average: Option<f64>,
    /// Number of distinct calendar days with at least one reading.
    pub days: i64,
}

impl From<GlobalAverage> for GlobalAverageDto {
    fn from(g: GlobalAverage) -> Self {
        Self {
            average: g.average.map(round2),
            days: g.days,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
