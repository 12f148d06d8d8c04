use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};
use serde::{Deserialize, Serialize};

use auth::{ensure_owner, get_claim_from_identity};
use db::{
    get_conn,
    models::{Question, QuestionEntry, Round},
    PgPool,
};
use errors::Error;

#[derive(Clone, Deserialize, Serialize)]
pub struct SaveQuestionsRequest {
    pub questions: Vec<QuestionEntry>,
}

pub async fn save_questions(
    id: Identity,
    pool: Data<PgPool>,
    round_id: Path<i32>,
    params: Json<SaveQuestionsRequest>,
) -> Result<Json<Vec<Question>>, Error> {
    for entry in &params.questions {
        if let Some(points) = entry.points {
            if !(1..=10).contains(&points) {
                return Err(Error::ValidationError(vec![
                    "Points must be between 1 and 10".to_string(),
                ]));
            }
        }
    }

    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;
    let round_id = round_id.into_inner();

    let res = block(move || {
        let round = Round::find_by_id(&conn, round_id).map_err(|err| match err {
            Error::NotFound(_) => Error::NotFound("Round not found".into()),
            _ => err,
        })?;
        ensure_owner(claim.id, round.created_by)?;

        Round::replace_questions(&conn, round_id, &params.questions)
    })
    .await?;

    let questions = res?;

    Ok(Json(questions))
}
