use quiz_core::model::{ScoreEntry, ScoreTotals, Username};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, map_score_row, ser};
use crate::repository::{ScoreRepository, StorageError};

#[async_trait::async_trait]
impl ScoreRepository for SqliteRepository {
    async fn score_totals(&self, username: &Username) -> Result<ScoreTotals, StorageError> {
        let row = sqlx::query(
            r"
            SELECT COALESCE(SUM(score), 0) AS total, COUNT(score) AS n
            FROM scores
            WHERE username = ?1
            ",
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(conn)?;

        let total: i64 = row.try_get("total").map_err(ser)?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        Ok(ScoreTotals::new(
            u64::try_from(total).map_err(ser)?,
            u64::try_from(n).map_err(ser)?,
        ))
    }

    async fn append_score(&self, entry: &ScoreEntry) -> Result<i64, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO scores (username, score, submission_time, average_score)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(entry.username.as_str())
        .bind(i64::from(entry.score))
        .bind(entry.submitted_at)
        .bind(entry.average_score)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        log::debug!(
            "appended score {} for {} (row {})",
            entry.score,
            entry.username,
            res.last_insert_rowid()
        );
        Ok(res.last_insert_rowid())
    }

    async fn list_scores(&self, limit: Option<u32>) -> Result<Vec<ScoreEntry>, StorageError> {
        // LIMIT -1 means unbounded in SQLite.
        let limit = limit.map_or(-1, i64::from);
        let rows = sqlx::query(
            r"
            SELECT username, score, submission_time, average_score
            FROM scores
            ORDER BY score DESC, id ASC
            LIMIT ?1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_score_row).collect()
    }

    async fn latest_score(&self, username: &Username) -> Result<Option<ScoreEntry>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT username, score, submission_time, average_score
            FROM scores
            WHERE username = ?1
            ORDER BY submission_time DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_score_row).transpose()
    }
}
