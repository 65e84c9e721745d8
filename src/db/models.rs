use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Room {
    pub id: i32,
    pub name: String,
}

/// Row of the `temperatures` table. `date` is a UTC wall-clock timestamp
/// stored without a time zone.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub room_id: i32,
    /// Degrees, stored as `REAL`.
    pub temperature: f32,
    pub date: NaiveDateTime,
}

/// Aggregate over every stored reading.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct GlobalAverage {
    /// `None` when no readings exist.
    pub average: Option<f64>,
    /// Number of distinct calendar dates among all readings.
    pub days: i64,
}
