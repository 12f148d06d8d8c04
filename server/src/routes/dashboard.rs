use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json},
    Result,
};
use serde::{Deserialize, Serialize};

use auth::get_claim_from_identity;
use db::{
    get_conn,
    models::{Game, Round},
    PgPool,
};
use errors::Error;

const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Deserialize, Serialize)]
pub struct DashboardResponse {
    pub recent_rounds: Vec<Round>,
    pub recent_games: Vec<Game>,
}

/// The caller's most recent rounds and games, for the landing view.
pub async fn dashboard(id: Identity, pool: Data<PgPool>) -> Result<Json<DashboardResponse>, Error> {
    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;

    let res = block(move || {
        let recent_rounds = Round::recent_by_creator(&conn, claim.id, RECENT_LIMIT)?;
        let recent_games = Game::recent_by_creator(&conn, claim.id, RECENT_LIMIT)?;

        Ok(DashboardResponse {
            recent_rounds,
            recent_games,
        })
    })
    .await?;

    let response = res?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

    use db::{
        get_conn,
        models::{Game, Round},
        new_pool,
        schema::{games, rounds, users},
    };

    use super::DashboardResponse;
    use crate::tests::helpers::tests::{create_user_with_token, test_get};

    #[actix_rt::test]
    async fn test_dashboard_limits_to_five_recent() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let (user, token) = create_user_with_token(&conn, "dashboarder");

        for i in 1..=6 {
            Round::create(
                &conn,
                &format!("Dashboard Round {}", i),
                "1".to_string(),
                user.id,
                None,
            )
            .unwrap();
        }
        Game::create(
            &conn,
            Some("Dashboard Game".to_string()),
            NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
            user.id,
        )
        .unwrap();

        let res: (u16, DashboardResponse) = test_get("/api/dashboard", Some(token)).await;

        assert_eq!(res.0, 200);
        assert_eq!(res.1.recent_rounds.len(), 5);
        assert_eq!(res.1.recent_games.len(), 1);

        diesel::delete(rounds::dsl::rounds.filter(rounds::dsl::created_by.eq(user.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(games::dsl::games.filter(games::dsl::created_by.eq(user.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(users::dsl::users.filter(users::dsl::id.eq(user.id)))
            .execute(&conn)
            .unwrap();
    }

    #[actix_rt::test]
    async fn test_dashboard_requires_auth() {
        let res: (u16, errors::ErrorResponse) = test_get("/api/dashboard", None).await;

        assert_eq!(res.0, 401);
    }
}
