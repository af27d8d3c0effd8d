use quiz_core::model::{BankQuestion, Difficulty, Question, QuestionId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{
    conn, map_bank_question_row, map_question_row, question_id_from_i64, question_id_to_i64, ser,
};
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn insert_question(&self, question: &Question) -> Result<QuestionId, StorageError> {
        let [a, b, c, d] = question.options();
        let res = sqlx::query(
            r"
            INSERT INTO questions (question, option_a, option_b, option_c, option_d, correct_answer, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(question.prompt())
        .bind(a.as_str())
        .bind(b.as_str())
        .bind(c.as_str())
        .bind(d.as_str())
        .bind(question.correct_answer())
        .bind(question.difficulty().as_str())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool, StorageError> {
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(question_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }

    async fn update_difficulty(
        &self,
        id: QuestionId,
        difficulty: Difficulty,
    ) -> Result<bool, StorageError> {
        let res = sqlx::query("UPDATE questions SET difficulty = ?1 WHERE id = ?2")
            .bind(difficulty.as_str())
            .bind(question_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_questions(&self) -> Result<Vec<BankQuestion>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, option_a, option_b, option_c, option_d, correct_answer, difficulty
            FROM questions
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_bank_question_row).collect()
    }

    async fn random_questions(
        &self,
        difficulty: Difficulty,
        limit: u32,
    ) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT question, option_a, option_b, option_c, option_d, correct_answer, difficulty
            FROM questions
            WHERE difficulty = ?1
            ORDER BY RANDOM()
            LIMIT ?2
            ",
        )
        .bind(difficulty.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_question_row).collect()
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(ser)
    }
}
