use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};

use auth::{ensure_owner, get_claim_from_identity};
use db::{get_conn, models::Game, PgPool};
use errors::Error;

use super::view::{to_round_details, GameRoundDetails};

/// Removing a round that is not in the game is a silent no-op.
pub async fn remove_round(
    id: Identity,
    pool: Data<PgPool>,
    path: Path<(i32, i32)>,
) -> Result<Json<Vec<GameRoundDetails>>, Error> {
    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;
    let (game_id, round_id) = path.into_inner();

    let res = block(move || {
        let game = Game::find_by_id(&conn, game_id).map_err(|err| match err {
            Error::NotFound(_) => Error::NotFound("Game not found".into()),
            _ => err,
        })?;
        ensure_owner(claim.id, game.created_by)?;

        Game::remove_round(&conn, game_id, round_id)?;

        Game::rounds(&conn, game_id)
    })
    .await?;

    let rounds = res?;

    Ok(Json(to_round_details(rounds)))
}
