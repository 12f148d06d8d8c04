use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};
use serde::{Deserialize, Serialize};

use db::{
    get_conn,
    models::{Question, Round},
    PgPool,
};
use errors::Error;

#[derive(Debug, Deserialize, Serialize)]
pub struct RoundDetails {
    pub round: Round,
    pub questions: Vec<Question>,
    pub usage_count: i64,
}

pub async fn view(pool: Data<PgPool>, round_id: Path<i32>) -> Result<Json<RoundDetails>, Error> {
    let conn = get_conn(&pool)?;
    let round_id = round_id.into_inner();

    let res = block(move || {
        let round = Round::find_by_id(&conn, round_id).map_err(|err| match err {
            Error::NotFound(_) => Error::NotFound("Round not found".into()),
            _ => err,
        })?;
        let questions = Question::for_round(&conn, round_id)?;
        let usage_count = round.usage_count(&conn)?;

        Ok(RoundDetails {
            round,
            questions,
            usage_count,
        })
    })
    .await?;

    let details = res?;

    Ok(Json(details))
}
