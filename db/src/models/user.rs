use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use auth::hash_password;
use errors::Error;

use crate::schema::users;

#[derive(Debug, Queryable, Identifiable)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Response-safe subset of a user row. The credential hash stays behind.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct UserDetails {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDetails {
    fn from(user: User) -> Self {
        UserDetails {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl User {
    pub fn create(
        connection: &PgConnection,
        username: String,
        email: String,
        password: &str,
    ) -> Result<User, Error> {
        use crate::schema::users::table;

        let password_hash = hash_password(password)?;
        let user: User = diesel::insert_into(table)
            .values(NewUser {
                username,
                email,
                password_hash,
            })
            .get_result(connection)?;

        Ok(user)
    }

    pub fn find_by_id(connection: &PgConnection, user_id: i32) -> Result<User, Error> {
        use crate::schema::users::dsl::users;

        let user = users.find(user_id).first::<User>(connection)?;

        Ok(user)
    }

    pub fn find_by_username(connection: &PgConnection, name: &str) -> Result<User, Error> {
        use crate::schema::users::dsl::{username, users};

        let user = users.filter(username.eq(name)).first::<User>(connection)?;

        Ok(user)
    }

    pub fn username_taken(connection: &PgConnection, name: &str) -> Result<bool, Error> {
        use crate::schema::users::dsl::{username, users};
        use diesel::dsl::count_star;

        let total: i64 = users
            .select(count_star())
            .filter(username.eq(name))
            .get_result(connection)?;

        Ok(total > 0)
    }

    pub fn email_taken(connection: &PgConnection, address: &str) -> Result<bool, Error> {
        use crate::schema::users::dsl::{email, users};
        use diesel::dsl::count_star;

        let total: i64 = users
            .select(count_star())
            .filter(email.eq(address))
            .get_result(connection)?;

        Ok(total > 0)
    }
}
