use chrono::{DateTime, Utc};
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::{Game, Round};
use crate::schema::game_rounds;

/// Join row fixing a round's position within one game. A round appears at
/// most once per game but may be reused across games.
#[derive(Associations, Debug, Deserialize, Identifiable, Serialize, Queryable)]
#[belongs_to(Game)]
#[belongs_to(Round)]
pub struct GameRound {
    pub id: i32,
    pub game_id: i32,
    pub round_id: i32,
    pub round_order: i32,
    pub added_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "game_rounds"]
pub struct NewGameRound {
    pub game_id: i32,
    pub round_id: i32,
    pub round_order: i32,
}

impl GameRound {
    pub fn exists(
        conn: &PgConnection,
        game_id_value: i32,
        round_id_value: i32,
    ) -> Result<bool, Error> {
        use diesel::dsl::count_star;
        use game_rounds::dsl::{game_id, game_rounds as game_rounds_table, round_id};

        let total: i64 = game_rounds_table
            .select(count_star())
            .filter(game_id.eq(game_id_value))
            .filter(round_id.eq(round_id_value))
            .get_result(conn)?;

        Ok(total > 0)
    }

    pub fn count_for_round(conn: &PgConnection, round_id_value: i32) -> Result<i64, Error> {
        use diesel::dsl::count_star;
        use game_rounds::dsl::{game_rounds as game_rounds_table, round_id};

        let total: i64 = game_rounds_table
            .select(count_star())
            .filter(round_id.eq(round_id_value))
            .get_result(conn)?;

        Ok(total)
    }
}
