use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};

use auth::{ensure_owner, get_claim_from_identity};
use db::{get_conn, models::Game, PgPool};
use errors::Error;

/// Soft delete: flips the activity flag so the game drops out of listings.
pub async fn delete(
    id: Identity,
    pool: Data<PgPool>,
    game_id: Path<i32>,
) -> Result<Json<Game>, Error> {
    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;
    let game_id = game_id.into_inner();

    let res = block(move || {
        let game = Game::find_by_id(&conn, game_id).map_err(|err| match err {
            Error::NotFound(_) => Error::NotFound("Game not found".into()),
            _ => err,
        })?;
        ensure_owner(claim.id, game.created_by)?;

        Game::deactivate(&conn, game_id)
    })
    .await?;

    let game = res?;

    Ok(Json(game))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

    use db::{
        get_conn,
        models::Game,
        new_pool,
        schema::{games, users},
    };
    use errors::ErrorResponse;

    use crate::tests::helpers::tests::{create_user_with_token, test_delete};

    #[actix_rt::test]
    async fn test_delete_game_deactivates() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let (user, token) = create_user_with_token(&conn, "gameender");
        let game = Game::create(
            &conn,
            Some("Final Night".to_string()),
            NaiveDate::from_ymd_opt(2026, 10, 10).unwrap(),
            user.id,
        )
        .unwrap();

        let res: (u16, Game) = test_delete(&format!("/api/games/{}", game.id), Some(token)).await;

        assert_eq!(res.0, 200);
        assert!(!res.1.is_active);

        diesel::delete(games::dsl::games.filter(games::dsl::id.eq(game.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(users::dsl::users.filter(users::dsl::id.eq(user.id)))
            .execute(&conn)
            .unwrap();
    }

    #[actix_rt::test]
    async fn test_delete_game_as_non_owner() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let (owner, _) = create_user_with_token(&conn, "gamekeeper");
        let (intruder, intruder_token) = create_user_with_token(&conn, "gamecrasher");
        let game = Game::create(
            &conn,
            Some("Keep Running".to_string()),
            NaiveDate::from_ymd_opt(2026, 10, 11).unwrap(),
            owner.id,
        )
        .unwrap();

        let res: (u16, ErrorResponse) =
            test_delete(&format!("/api/games/{}", game.id), Some(intruder_token)).await;

        assert_eq!(res.0, 403);
        assert!(Game::find_by_id(&conn, game.id).unwrap().is_active);

        diesel::delete(games::dsl::games.filter(games::dsl::id.eq(game.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(users::dsl::users.filter(users::dsl::id.eq(owner.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(users::dsl::users.filter(users::dsl::id.eq(intruder.id)))
            .execute(&conn)
            .unwrap();
    }
}
