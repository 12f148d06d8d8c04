use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};
use serde::{Deserialize, Serialize};

use db::{
    get_conn,
    models::{Game, Round, EXPECTED_LABELS},
    PgPool,
};
use errors::Error;

#[derive(Debug, Deserialize, Serialize)]
pub struct GameRoundDetails {
    pub round: Round,
    pub round_order: i32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GameDetails {
    pub game: Game,
    pub rounds: Vec<GameRoundDetails>,
    pub missing_labels: Vec<String>,
}

pub fn to_round_details(rounds: Vec<(Round, i32)>) -> Vec<GameRoundDetails> {
    rounds
        .into_iter()
        .map(|(round, round_order)| GameRoundDetails { round, round_order })
        .collect()
}

pub async fn view(pool: Data<PgPool>, game_id: Path<i32>) -> Result<Json<GameDetails>, Error> {
    let conn = get_conn(&pool)?;
    let game_id = game_id.into_inner();

    let res = block(move || {
        let game = Game::find_by_id(&conn, game_id).map_err(|err| match err {
            Error::NotFound(_) => Error::NotFound("Game not found".into()),
            _ => err,
        })?;

        let rounds = Game::rounds(&conn, game_id)?;
        let labels: Vec<String> = rounds
            .iter()
            .map(|(round, _)| round.round_label.clone())
            .collect();
        let missing_labels = Game::missing_labels(&labels, &EXPECTED_LABELS);

        Ok(GameDetails {
            game,
            rounds: to_round_details(rounds),
            missing_labels,
        })
    })
    .await?;

    let details = res?;

    Ok(Json(details))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

    use db::{
        get_conn,
        models::{Game, Round},
        new_pool,
        schema::{game_rounds, games, rounds, users},
    };
    use errors::ErrorResponse;

    use super::GameDetails;
    use crate::tests::helpers::tests::{create_user_with_token, test_get};

    #[actix_rt::test]
    async fn test_view_game_orders_rounds_and_reports_missing_labels() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let (user, _) = create_user_with_token(&conn, "gameviewer");
        let game = Game::create(
            &conn,
            Some("Label Check".to_string()),
            NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            user.id,
        )
        .unwrap();

        let round_three = Round::create(&conn, "Third", "3".to_string(), user.id, None).unwrap();
        let round_one = Round::create(&conn, "First", "1".to_string(), user.id, None).unwrap();
        // same order value: insertion order breaks the tie
        let round_tie = Round::create(&conn, "Tied", "1".to_string(), user.id, None).unwrap();

        Game::add_round(&conn, game.id, round_three.id, 5).unwrap();
        Game::add_round(&conn, game.id, round_one.id, 1).unwrap();
        Game::add_round(&conn, game.id, round_tie.id, 1).unwrap();

        let res: (u16, GameDetails) = test_get(&format!("/api/games/{}", game.id), None).await;

        assert_eq!(res.0, 200);
        let round_ids: Vec<i32> = res.1.rounds.iter().map(|entry| entry.round.id).collect();
        assert_eq!(round_ids, vec![round_one.id, round_tie.id, round_three.id]);
        assert_eq!(res.1.missing_labels, vec!["2", "4", "5", "6"]);

        diesel::delete(game_rounds::dsl::game_rounds.filter(game_rounds::dsl::game_id.eq(game.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(games::dsl::games.filter(games::dsl::id.eq(game.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(rounds::dsl::rounds.filter(rounds::dsl::created_by.eq(user.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(users::dsl::users.filter(users::dsl::id.eq(user.id)))
            .execute(&conn)
            .unwrap();
    }

    #[actix_rt::test]
    async fn test_view_missing_game() {
        let res: (u16, ErrorResponse) = test_get("/api/games/0", None).await;

        assert_eq!(res.0, 404);
        assert_eq!(res.1.errors[0], "Game not found");
    }
}
