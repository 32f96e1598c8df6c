//! SQLite database operations
//!
//! All database access goes through this module.
//! Newspapers are stored as whole JSON documents; the settings table is
//! a flat key-value store.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite, SqlitePool};
use std::path::Path;

use super::models::*;
use crate::error::AppError;

/// Database connection pool wrapper.
pub struct Database {
    pool: Pool<Sqlite>,
}

/// Raw newspaper row before the JSON document column is decoded.
#[derive(Debug, sqlx::FromRow)]
struct NewspaperRow {
    id: String,
    created_at: DateTime<Utc>,
    grade_level: String,
    data: String,
}

impl TryFrom<NewspaperRow> for SavedNewspaper {
    type Error = AppError;

    fn try_from(row: NewspaperRow) -> Result<Self, Self::Error> {
        let data: NewspaperData = serde_json::from_str(&row.data).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "corrupt newspaper document {}: {}",
                row.id,
                e
            ))
        })?;

        Ok(SavedNewspaper {
            id: row.id,
            created_at: row.created_at,
            grade_level: row.grade_level,
            data,
        })
    }
}

impl Database {
    /// Connect to SQLite database
    ///
    /// Creates the file (and parent directory) if missing and runs the
    /// embedded migrations.
    ///
    /// # Arguments
    /// * `path` - Path to SQLite database file
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        // Create connection string
        let connection_string = format!("sqlite:{}?mode=rwc", path.display());

        // Create connection pool
        let pool = SqlitePool::connect(&connection_string).await?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!("Database connected and migrated successfully");

        Ok(Self { pool })
    }

    // =========================================================================
    // Newspapers
    // =========================================================================

    /// Insert or replace a newspaper snapshot
    pub async fn save_newspaper(&self, newspaper: &SavedNewspaper) -> Result<(), AppError> {
        let data = serde_json::to_string(&newspaper.data)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to encode newspaper: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO newspapers (id, created_at, grade_level, data)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                created_at = excluded.created_at,
                grade_level = excluded.grade_level,
                data = excluded.data
            "#,
        )
        .bind(&newspaper.id)
        .bind(newspaper.created_at)
        .bind(&newspaper.grade_level)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a newspaper snapshot by ID
    pub async fn get_newspaper(&self, id: &str) -> Result<Option<SavedNewspaper>, AppError> {
        let row = sqlx::query_as::<_, NewspaperRow>(
            "SELECT id, created_at, grade_level, data FROM newspapers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SavedNewspaper::try_from).transpose()
    }

    /// Get all newspaper snapshots, newest first
    pub async fn list_newspapers(&self) -> Result<Vec<SavedNewspaper>, AppError> {
        let rows = sqlx::query_as::<_, NewspaperRow>(
            "SELECT id, created_at, grade_level, data FROM newspapers ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SavedNewspaper::try_from).collect()
    }

    /// Get newspaper snapshots for one grade level, newest first
    pub async fn list_newspapers_by_grade(
        &self,
        grade_level: &str,
    ) -> Result<Vec<SavedNewspaper>, AppError> {
        let rows = sqlx::query_as::<_, NewspaperRow>(
            r#"
            SELECT id, created_at, grade_level, data FROM newspapers
            WHERE grade_level = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(grade_level)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SavedNewspaper::try_from).collect()
    }

    /// Delete a newspaper snapshot
    ///
    /// # Returns
    /// `true` if a row was deleted
    pub async fn delete_newspaper(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM newspapers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Get setting value
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Set setting value
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
