use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Query},
    Result,
};

use auth::get_claim_from_identity;
use db::{get_conn, models::Round, pagination::Page, PgPool};
use errors::Error;

use crate::config::CONFIG;
use crate::routes::PageQuery;

pub async fn list(pool: Data<PgPool>, query: Query<PageQuery>) -> Result<Json<Page<Round>>, Error> {
    let conn = get_conn(&pool)?;
    let page = query.page.unwrap_or(1);

    let res = block(move || Round::list(&conn, page, CONFIG.rounds_per_page)).await?;

    let rounds = res?;

    Ok(Json(rounds))
}

pub async fn mine(
    id: Identity,
    pool: Data<PgPool>,
    query: Query<PageQuery>,
) -> Result<Json<Page<Round>>, Error> {
    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;
    let page = query.page.unwrap_or(1);

    let res =
        block(move || Round::list_by_creator(&conn, claim.id, page, CONFIG.rounds_per_page)).await?;

    let rounds = res?;

    Ok(Json(rounds))
}
