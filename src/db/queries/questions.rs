use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE category = ?1 ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive match of `term` anywhere in the question text.
// sqlite LIKE only folds ASCII, so the comparison happens on Unicode-lowercased text here
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let term = term.to_lowercase();
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&term))
        .collect())
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Fails with [`sqlx::Error::RowNotFound`] when nothing was deleted.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if deleted == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for q in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(q.id)
        .bind(q.question)
        .bind(q.answer)
        .bind(q.category)
        .bind(q.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::memory_pool;

    fn new_question(question: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: question.to_owned(),
            answer: "answer".to_owned(),
            category,
            difficulty: 2,
        }
    }

    async fn seeded_pool() -> SqlitePool {
        let pool = memory_pool().await;
        for (text, category) in [
            ("What is the boiling point of water?", 1),
            ("Who painted the Mona Lisa?", 2),
            ("What is the heaviest organ in the human body?", 1),
            ("Which river is the longest? 100% sure", 3),
        ] {
            create_question(&pool, &new_question(text, category))
                .await
                .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let pool = memory_pool().await;
        let first = create_question(&pool, &new_question("a", 1)).await.unwrap();
        let second = create_question(&pool, &new_question("b", 1)).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let pool = memory_pool().await;
        assert!(create_question(&pool, &new_question("a", 42)).await.is_err());
    }

    #[tokio::test]
    async fn filters_by_category_in_id_order() {
        let pool = seeded_pool().await;
        let ids: Vec<i64> = get_questions_for_category(&pool, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_on_question_text() {
        let pool = seeded_pool().await;
        let found = search_questions(&pool, "WHAT IS").await.unwrap();
        assert_eq!(found.len(), 2);
        // answers are not searched
        assert!(search_questions(&pool, "answer").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let pool = seeded_pool().await;
        assert_eq!(search_questions(&pool, "100%").await.unwrap().len(), 1);
        assert!(search_questions(&pool, "_%_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_question_is_gone_for_good() {
        let pool = seeded_pool().await;
        delete_question(&pool, 2).await.unwrap();
        let all = get_all_questions(&pool).await.unwrap();
        assert!(all.iter().all(|q| q.id != 2));

        let err = delete_question(&pool, 2).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));

        // ids are never reused
        let id = create_question(&pool, &new_question("new", 1)).await.unwrap();
        assert_eq!(id, 5);
    }

    #[tokio::test]
    async fn import_keeps_explicit_ids() {
        let pool = memory_pool().await;
        import_questions(
            &pool,
            vec![Question {
                id: 20,
                question: "Imported?".to_owned(),
                answer: "Yes".to_owned(),
                category: 4,
                difficulty: 1,
            }],
        )
        .await
        .unwrap();
        let all = get_all_questions(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 20);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let pool = memory_pool().await;
        create_question(&pool, &new_question("Who wrote Ärger im Paradies?", 5))
            .await
            .unwrap();
        create_question(&pool, &new_question("Où est la GARE?", 3))
            .await
            .unwrap();

        assert_eq!(search_questions(&pool, "ärger").await.unwrap().len(), 1);
        assert_eq!(search_questions(&pool, "ÄRGER").await.unwrap().len(), 1);
        let found = search_questions(&pool, "OÙ EST").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }
}
