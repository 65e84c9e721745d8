use sqlx::{Postgres, Transaction};

use super::models::{GlobalAverage, Room, TemperatureReading};

const CREATE_ROOMS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS rooms (id SERIAL PRIMARY KEY, name TEXT)";

const CREATE_TEMPERATURES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS temperatures (
        room_id     INTEGER,
        temperature REAL,
        date        TIMESTAMP,
        FOREIGN KEY (room_id) REFERENCES rooms (id) ON DELETE CASCADE
    )
"#;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("room {room_id} does not exist")]
    ForeignKeyViolation { room_id: i32 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Tx<'a> = Transaction<'a, Postgres>;

pub async fn create_rooms_table(tx: &mut Tx<'_>) -> Result<(), StoreError> {
    sqlx::query(CREATE_ROOMS_TABLE).execute(&mut **tx).await?;
    Ok(())
}

/// `temperatures` references `rooms`, so the parent table is created first.
pub async fn create_temperatures_table(tx: &mut Tx<'_>) -> Result<(), StoreError> {
    create_rooms_table(tx).await?;
    sqlx::query(CREATE_TEMPERATURES_TABLE)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn insert_room(tx: &mut Tx<'_>, name: &str) -> Result<Room, StoreError> {
    let room = sqlx::query_as::<_, Room>("INSERT INTO rooms (name) VALUES ($1) RETURNING id, name")
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;
    Ok(room)
}

pub async fn insert_temperature(
    tx: &mut Tx<'_>,
    reading: &TemperatureReading,
) -> Result<(), StoreError> {
    sqlx::query("INSERT INTO temperatures (room_id, temperature, date) VALUES ($1, $2, $3)")
        .bind(reading.room_id)
        .bind(reading.temperature)
        .bind(reading.date)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            let fk = e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());
            if fk {
                StoreError::ForeignKeyViolation {
                    room_id: reading.room_id,
                }
            } else {
                StoreError::Database(e)
            }
        })?;
    Ok(())
}

/// Unrounded mean of every reading plus the count of distinct dates.
pub async fn global_average(tx: &mut Tx<'_>) -> Result<GlobalAverage, StoreError> {
    let avg = sqlx::query_as::<_, GlobalAverage>(
        r#"
        SELECT AVG(temperature)::DOUBLE PRECISION AS average,
               COUNT(DISTINCT DATE(date))         AS days
        FROM temperatures
        "#,
    )
    .fetch_one(&mut **tx)
    .await?;
    Ok(avg)
}
