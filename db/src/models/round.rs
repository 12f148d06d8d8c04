use chrono::{DateTime, Utc};
use diesel::{self, Connection, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::{GameRound, NewQuestion, Question, QuestionEntry, User};
use crate::pagination::{Page, Paginate};
use crate::schema::rounds::{self, table};

#[derive(Associations, Debug, Deserialize, Identifiable, Serialize, Queryable)]
#[belongs_to(User, foreign_key = "created_by")]
pub struct Round {
    pub id: i32,
    pub title: String,
    pub round_label: String,
    pub created_by: i32,
    pub attachment_path: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "rounds"]
pub struct NewRound {
    pub title: String,
    pub round_label: String,
    pub created_by: i32,
    pub attachment_path: Option<String>,
}

impl Round {
    pub fn create(
        conn: &PgConnection,
        title: &str,
        round_label: String,
        created_by: i32,
        attachment_path: Option<String>,
    ) -> Result<Round, Error> {
        let title = Round::unique_title(conn, title)?;

        let round = diesel::insert_into(table)
            .values(NewRound {
                title,
                round_label,
                created_by,
                attachment_path,
            })
            .get_result(conn)?;

        Ok(round)
    }

    /// Returns the base title if unused, otherwise appends " 1", " 2", ...
    /// re-checking existence per candidate so pre-existing numbered titles
    /// are stepped over. Concurrent creation can race this check.
    pub fn unique_title(conn: &PgConnection, base_title: &str) -> Result<String, Error> {
        let mut title = base_title.to_string();
        let mut counter = 1;

        while Round::title_exists(conn, &title)? {
            title = format!("{} {}", base_title, counter);
            counter += 1;
        }

        Ok(title)
    }

    fn title_exists(conn: &PgConnection, candidate: &str) -> Result<bool, Error> {
        use diesel::dsl::count_star;
        use rounds::dsl::{rounds as rounds_table, title};

        let total: i64 = rounds_table
            .select(count_star())
            .filter(title.eq(candidate))
            .get_result(conn)?;

        Ok(total > 0)
    }

    pub fn find_by_id(conn: &PgConnection, round_id: i32) -> Result<Round, Error> {
        use rounds::dsl::rounds as rounds_table;

        let round = rounds_table.find(round_id).first::<Round>(conn)?;

        Ok(round)
    }

    /// Replaces the round's question set in one transaction: delete all,
    /// then insert every entry whose question and answer are non-blank after
    /// trimming, numbered densely from 1. Absent or negative points fall
    /// back to 1.
    pub fn replace_questions(
        conn: &PgConnection,
        round_id: i32,
        entries: &[QuestionEntry],
    ) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl::{questions, round_id as question_round_id};

        conn.transaction(|| {
            diesel::delete(questions.filter(question_round_id.eq(round_id))).execute(conn)?;

            let new_questions: Vec<NewQuestion> = entries
                .iter()
                .filter(|entry| {
                    !entry.question_text.trim().is_empty() && !entry.answer_text.trim().is_empty()
                })
                .enumerate()
                .map(|(i, entry)| NewQuestion {
                    round_id,
                    question_text: entry.question_text.trim().to_string(),
                    answer_text: entry.answer_text.trim().to_string(),
                    question_number: i as i32 + 1,
                    points: entry.points.filter(|points| *points >= 0).unwrap_or(1),
                })
                .collect();

            let inserted = diesel::insert_into(questions)
                .values(&new_questions)
                .get_results(conn)?;

            Ok(inserted)
        })
    }

    /// Number of games referencing this round.
    pub fn usage_count(&self, conn: &PgConnection) -> Result<i64, Error> {
        GameRound::count_for_round(conn, self.id)
    }

    pub fn is_unused(&self, conn: &PgConnection) -> Result<bool, Error> {
        Ok(self.usage_count(conn)? == 0)
    }

    pub fn list(conn: &PgConnection, page: i64, per_page: i64) -> Result<Page<Round>, Error> {
        use rounds::dsl::{created_at, is_active, rounds as rounds_table};

        let page = page.max(1);
        let (items, total) = rounds_table
            .filter(is_active.eq(true))
            .order(created_at.desc())
            .paginate(page)
            .per_page(per_page)
            .load_and_count::<Round>(conn)?;

        Ok(Page { items, total, page })
    }

    pub fn list_by_creator(
        conn: &PgConnection,
        user_id: i32,
        page: i64,
        per_page: i64,
    ) -> Result<Page<Round>, Error> {
        use rounds::dsl::{created_at, created_by, is_active, rounds as rounds_table};

        let page = page.max(1);
        let (items, total) = rounds_table
            .filter(is_active.eq(true))
            .filter(created_by.eq(user_id))
            .order(created_at.desc())
            .paginate(page)
            .per_page(per_page)
            .load_and_count::<Round>(conn)?;

        Ok(Page { items, total, page })
    }

    pub fn recent_by_creator(
        conn: &PgConnection,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<Round>, Error> {
        use rounds::dsl::{created_at, created_by, rounds as rounds_table};

        let results = rounds_table
            .filter(created_by.eq(user_id))
            .order(created_at.desc())
            .limit(limit)
            .load::<Round>(conn)?;

        Ok(results)
    }

    /// Soft delete: the row and its questions survive, listings skip it.
    pub fn deactivate(conn: &PgConnection, round_id: i32) -> Result<Round, Error> {
        use rounds::dsl::{is_active, rounds as rounds_table};

        let round = diesel::update(rounds_table.find(round_id))
            .set(is_active.eq(false))
            .get_result(conn)?;

        Ok(round)
    }

    /// Hard delete. The store cascades the round's questions and any game
    /// memberships.
    pub fn delete(conn: &PgConnection, round_id: i32) -> Result<(), Error> {
        use rounds::dsl::rounds as rounds_table;

        diesel::delete(rounds_table.find(round_id)).execute(conn)?;

        Ok(())
    }
}
