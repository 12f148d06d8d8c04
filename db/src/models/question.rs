use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::Round;
use crate::schema::questions;

#[derive(Associations, Debug, Deserialize, Identifiable, Serialize, Queryable)]
#[belongs_to(Round)]
pub struct Question {
    pub id: i32,
    pub round_id: i32,
    pub question_text: String,
    pub answer_text: String,
    pub question_number: i32,
    pub points: i32,
}

#[derive(Insertable)]
#[table_name = "questions"]
pub struct NewQuestion {
    pub round_id: i32,
    pub question_text: String,
    pub answer_text: String,
    pub question_number: i32,
    pub points: i32,
}

/// One entry of a submitted question list, before blank filtering.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct QuestionEntry {
    pub question_text: String,
    pub answer_text: String,
    pub points: Option<i32>,
}

impl Question {
    pub fn for_round(conn: &PgConnection, round_id_value: i32) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl::{question_number, questions, round_id};

        let results = questions
            .filter(round_id.eq(round_id_value))
            .order(question_number.asc())
            .load::<Question>(conn)?;

        Ok(results)
    }
}
