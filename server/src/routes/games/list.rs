use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Query},
    Result,
};

use auth::get_claim_from_identity;
use db::{get_conn, models::Game, pagination::Page, PgPool};
use errors::Error;

use crate::config::CONFIG;
use crate::routes::PageQuery;

pub async fn list(pool: Data<PgPool>, query: Query<PageQuery>) -> Result<Json<Page<Game>>, Error> {
    let conn = get_conn(&pool)?;
    let page = query.page.unwrap_or(1);

    let res = block(move || Game::list(&conn, page, CONFIG.games_per_page)).await?;

    let games = res?;

    Ok(Json(games))
}

pub async fn mine(
    id: Identity,
    pool: Data<PgPool>,
    query: Query<PageQuery>,
) -> Result<Json<Page<Game>>, Error> {
    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;
    let page = query.page.unwrap_or(1);

    let res =
        block(move || Game::list_by_creator(&conn, claim.id, page, CONFIG.games_per_page)).await?;

    let games = res?;

    Ok(Json(games))
}

pub async fn upcoming(
    pool: Data<PgPool>,
    query: Query<PageQuery>,
) -> Result<Json<Page<Game>>, Error> {
    let conn = get_conn(&pool)?;
    let page = query.page.unwrap_or(1);

    let res = block(move || Game::upcoming(&conn, page, CONFIG.games_per_page)).await?;

    let games = res?;

    Ok(Json(games))
}

pub async fn archive(
    pool: Data<PgPool>,
    query: Query<PageQuery>,
) -> Result<Json<Page<Game>>, Error> {
    let conn = get_conn(&pool)?;
    let page = query.page.unwrap_or(1);

    let res = block(move || Game::archive(&conn, page, CONFIG.games_per_page)).await?;

    let games = res?;

    Ok(Json(games))
}
