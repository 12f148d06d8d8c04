use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};

use auth::{ensure_owner, get_claim_from_identity};
use db::{get_conn, models::Round, PgPool};
use errors::Error;

/// Soft delete: flips the activity flag so the round drops out of listings.
pub async fn delete(
    id: Identity,
    pool: Data<PgPool>,
    round_id: Path<i32>,
) -> Result<Json<Round>, Error> {
    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;
    let round_id = round_id.into_inner();

    let res = block(move || {
        let round = Round::find_by_id(&conn, round_id).map_err(|err| match err {
            Error::NotFound(_) => Error::NotFound("Round not found".into()),
            _ => err,
        })?;
        ensure_owner(claim.id, round.created_by)?;

        Round::deactivate(&conn, round_id)
    })
    .await?;

    let round = res?;

    Ok(Json(round))
}
