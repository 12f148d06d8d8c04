use chrono::{DateTime, Local, NaiveDate, Utc};
use diesel::{self, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::{GameRound, NewGameRound, Round, User};
use crate::pagination::{Page, Paginate};
use crate::schema::{game_rounds, games, rounds};

/// Labels a complete game is expected to cover.
pub const EXPECTED_LABELS: [&str; 6] = ["1", "2", "3", "4", "5", "6"];

#[derive(Associations, Debug, Deserialize, Identifiable, Serialize, Queryable)]
#[belongs_to(User, foreign_key = "created_by")]
pub struct Game {
    pub id: i32,
    pub name: String,
    pub game_date: NaiveDate,
    pub created_by: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "games"]
pub struct NewGame {
    pub name: String,
    pub game_date: NaiveDate,
    pub created_by: i32,
}

impl Game {
    /// A blank name falls back to the full weekday/month/day/year rendering
    /// of the game date.
    pub fn create(
        conn: &PgConnection,
        name: Option<String>,
        game_date: NaiveDate,
        created_by: i32,
    ) -> Result<Game, Error> {
        let name = name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| game_date.format("%A, %B %d %Y").to_string());

        let game = diesel::insert_into(games::table)
            .values(NewGame {
                name,
                game_date,
                created_by,
            })
            .get_result(conn)?;

        Ok(game)
    }

    pub fn find_by_id(conn: &PgConnection, game_id: i32) -> Result<Game, Error> {
        use games::dsl::games as games_table;

        let game = games_table.find(game_id).first::<Game>(conn)?;

        Ok(game)
    }

    /// Memberships with their order values, ascending; ties keep insertion
    /// order.
    pub fn rounds(conn: &PgConnection, game_id: i32) -> Result<Vec<(Round, i32)>, Error> {
        let results = game_rounds::table
            .inner_join(rounds::table)
            .filter(game_rounds::game_id.eq(game_id))
            .order((game_rounds::round_order.asc(), game_rounds::id.asc()))
            .select((rounds::all_columns, game_rounds::round_order))
            .load::<(Round, i32)>(conn)?;

        Ok(results)
    }

    /// Order-preserving set difference of `expected` against the labels
    /// present in a game.
    pub fn missing_labels(present: &[String], expected: &[&str]) -> Vec<String> {
        expected
            .iter()
            .filter(|label| !present.iter().any(|present_label| present_label == *label))
            .map(|label| label.to_string())
            .collect()
    }

    /// Inserts a membership with the order value as given; order values are
    /// never re-normalised against the existing ones. A round already in the
    /// game is a soft rejection, not a failure.
    pub fn add_round(
        conn: &PgConnection,
        game_id: i32,
        round_id: i32,
        round_order: i32,
    ) -> Result<GameRound, Error> {
        Round::find_by_id(conn, round_id).map_err(|err| match err {
            Error::NotFound(_) => Error::NotFound("Round not found".into()),
            _ => err,
        })?;

        if GameRound::exists(conn, game_id, round_id)? {
            return Err(Error::UnprocessableEntity(
                "This round is already in the game.".into(),
            ));
        }

        let membership = diesel::insert_into(game_rounds::table)
            .values(NewGameRound {
                game_id,
                round_id,
                round_order,
            })
            .get_result(conn)?;

        Ok(membership)
    }

    /// Deletes the matching membership; absent membership is a silent no-op.
    pub fn remove_round(conn: &PgConnection, game_id: i32, round_id: i32) -> Result<(), Error> {
        diesel::delete(
            game_rounds::table
                .filter(game_rounds::game_id.eq(game_id))
                .filter(game_rounds::round_id.eq(round_id)),
        )
        .execute(conn)?;

        Ok(())
    }

    pub fn list(conn: &PgConnection, page: i64, per_page: i64) -> Result<Page<Game>, Error> {
        use games::dsl::{game_date, games as games_table, is_active};

        let page = page.max(1);
        let (items, total) = games_table
            .filter(is_active.eq(true))
            .order(game_date.desc())
            .paginate(page)
            .per_page(per_page)
            .load_and_count::<Game>(conn)?;

        Ok(Page { items, total, page })
    }

    pub fn list_by_creator(
        conn: &PgConnection,
        user_id: i32,
        page: i64,
        per_page: i64,
    ) -> Result<Page<Game>, Error> {
        use games::dsl::{created_by, game_date, games as games_table, is_active};

        let page = page.max(1);
        let (items, total) = games_table
            .filter(is_active.eq(true))
            .filter(created_by.eq(user_id))
            .order(game_date.desc())
            .paginate(page)
            .per_page(per_page)
            .load_and_count::<Game>(conn)?;

        Ok(Page { items, total, page })
    }

    /// Games dated today or later, soonest first.
    pub fn upcoming(conn: &PgConnection, page: i64, per_page: i64) -> Result<Page<Game>, Error> {
        use games::dsl::{game_date, games as games_table, is_active};

        let page = page.max(1);
        let (items, total) = games_table
            .filter(is_active.eq(true))
            .filter(game_date.ge(Game::today()))
            .order(game_date.asc())
            .paginate(page)
            .per_page(per_page)
            .load_and_count::<Game>(conn)?;

        Ok(Page { items, total, page })
    }

    /// Games dated before today, most recent first.
    pub fn archive(conn: &PgConnection, page: i64, per_page: i64) -> Result<Page<Game>, Error> {
        use games::dsl::{game_date, games as games_table, is_active};

        let page = page.max(1);
        let (items, total) = games_table
            .filter(is_active.eq(true))
            .filter(game_date.lt(Game::today()))
            .order(game_date.desc())
            .paginate(page)
            .per_page(per_page)
            .load_and_count::<Game>(conn)?;

        Ok(Page { items, total, page })
    }

    pub fn recent_by_creator(
        conn: &PgConnection,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<Game>, Error> {
        use games::dsl::{created_at, created_by, games as games_table};

        let results = games_table
            .filter(created_by.eq(user_id))
            .order(created_at.desc())
            .limit(limit)
            .load::<Game>(conn)?;

        Ok(results)
    }

    pub fn deactivate(conn: &PgConnection, game_id: i32) -> Result<Game, Error> {
        use games::dsl::{games as games_table, is_active};

        let game = diesel::update(games_table.find(game_id))
            .set(is_active.eq(false))
            .get_result(conn)?;

        Ok(game)
    }

    // The server's local date at request time; midnight boundaries are not
    // timezone-normalised.
    fn today() -> NaiveDate {
        Local::now().naive_local().date()
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, EXPECTED_LABELS};

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_missing_labels_preserves_expected_order() {
        let present = labels(&["1", "3"]);
        assert_eq!(
            Game::missing_labels(&present, &EXPECTED_LABELS),
            labels(&["2", "4", "5", "6"])
        );
    }

    #[test]
    fn test_missing_labels_ignores_extra_labels() {
        let present = labels(&["Music", "1", "2", "3", "4", "5", "6"]);
        assert!(Game::missing_labels(&present, &EXPECTED_LABELS).is_empty());
    }

    #[test]
    fn test_missing_labels_with_no_rounds() {
        assert_eq!(
            Game::missing_labels(&[], &EXPECTED_LABELS),
            labels(&["1", "2", "3", "4", "5", "6"])
        );
    }

    #[test]
    fn test_missing_labels_against_themed_set() {
        let present = labels(&["Music", "2"]);
        assert_eq!(
            Game::missing_labels(&present, &["Music", "Visual", "2"]),
            labels(&["Visual"])
        );
    }
}
