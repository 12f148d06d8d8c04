use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json},
    Result,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::get_claim_from_identity;
use db::{get_conn, models::Game, PgPool};
use errors::Error;

use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct CreateGameRequest {
    #[validate(length(max = "200"))]
    name: Option<String>,
    game_date: NaiveDate,
}

pub async fn create(
    id: Identity,
    pool: Data<PgPool>,
    params: Json<CreateGameRequest>,
) -> Result<Json<Game>, Error> {
    validate(&params)?;

    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;

    let res =
        block(move || Game::create(&conn, params.name.clone(), params.game_date, claim.id)).await?;

    let game = res?;

    Ok(Json(game))
}
