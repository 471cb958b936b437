use crate::domain::{models::guest::{Guest, RsvpDecision, RsvpStatus}, ports::GuestRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteGuestRepo {
    pool: SqlitePool,
}

impl SqliteGuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for SqliteGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, event_id, email, rsvp_status, token_hash, created_at, responded_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id, event_id, email, rsvp_status, token_hash, created_at, responded_at",
        )
            .bind(&guest.id)
            .bind(&guest.event_id)
            .bind(&guest.email)
            .bind(guest.rsvp_status.as_str())
            .bind(&guest.token_hash)
            .bind(guest.created_at)
            .bind(guest.responded_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            "SELECT id, event_id, email, rsvp_status, token_hash, created_at, responded_at FROM guests WHERE token_hash = ?",
        )
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            "SELECT id, event_id, email, rsvp_status, token_hash, created_at, responded_at FROM guests WHERE event_id = ? ORDER BY created_at ASC, rowid ASC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn record_decision(&self, id: &str, decision: RsvpDecision, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE guests SET rsvp_status = ?, responded_at = ? WHERE id = ? AND rsvp_status = ?"
        )
            .bind(RsvpStatus::from(decision).as_str())
            .bind(at)
            .bind(id)
            .bind(RsvpStatus::Pending.as_str())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() == 1)
    }
}
