use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};
use serde::{Deserialize, Serialize};

use auth::{ensure_owner, get_claim_from_identity};
use db::{get_conn, models::Game, PgPool};
use errors::Error;

use super::view::{to_round_details, GameRoundDetails};

#[derive(Clone, Deserialize, Serialize)]
pub struct AddRoundRequest {
    pub round_id: i32,
    pub round_order: Option<i32>,
}

pub async fn add_round(
    id: Identity,
    pool: Data<PgPool>,
    game_id: Path<i32>,
    params: Json<AddRoundRequest>,
) -> Result<Json<Vec<GameRoundDetails>>, Error> {
    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;
    let game_id = game_id.into_inner();

    let res = block(move || {
        let game = Game::find_by_id(&conn, game_id).map_err(|err| match err {
            Error::NotFound(_) => Error::NotFound("Game not found".into()),
            _ => err,
        })?;
        ensure_owner(claim.id, game.created_by)?;

        Game::add_round(&conn, game_id, params.round_id, params.round_order.unwrap_or(1))?;

        Game::rounds(&conn, game_id)
    })
    .await?;

    let rounds = res?;

    Ok(Json(to_round_details(rounds)))
}
