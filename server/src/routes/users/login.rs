use actix_web::{
    web::{block, Data, Json},
    Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::{create_jwt, verify_password, PrivateClaim};
use db::{get_conn, models::User, PgPool};
use errors::Error;

use super::register::AuthResponse;
use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = "1"))]
    username: String,
    #[validate(length(min = "1"))]
    password: String,
}

pub async fn login(
    pool: Data<PgPool>,
    params: Json<LoginRequest>,
) -> Result<Json<AuthResponse>, Error> {
    validate(&params)?;

    let conn = get_conn(&pool)?;

    let res = block(move || {
        // an unknown username and a wrong password both read as unauthorized
        let user = User::find_by_username(&conn, &params.username).map_err(|err| match err {
            Error::NotFound(_) => Error::Unauthorized,
            _ => err,
        })?;

        if !verify_password(&params.password, &user.password_hash)? {
            return Err(Error::Unauthorized);
        }

        Ok(user)
    })
    .await?;

    let user = res?;

    let token = create_jwt(PrivateClaim::new(user.id, user.username.clone()))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

    use db::{get_conn, new_pool, schema::users};
    use errors::ErrorResponse;

    use super::super::register::AuthResponse;
    use super::LoginRequest;
    use crate::tests::helpers::tests::{create_user_with_token, test_post};

    #[actix_rt::test]
    async fn test_login_with_valid_credentials() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let (user, _) = create_user_with_token(&conn, "loginhost");

        let res: (u16, AuthResponse) = test_post(
            "/api/users/login",
            LoginRequest {
                username: "loginhost".to_string(),
                password: "changeit".to_string(),
            },
            None,
        )
        .await;

        assert_eq!(res.0, 200);
        assert_eq!(res.1.user.id, user.id);
        assert!(!res.1.token.is_empty());

        diesel::delete(users::dsl::users.filter(users::dsl::id.eq(user.id)))
            .execute(&conn)
            .unwrap();
    }

    #[actix_rt::test]
    async fn test_login_with_wrong_password() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let (user, _) = create_user_with_token(&conn, "wrongpw");

        let res: (u16, ErrorResponse) = test_post(
            "/api/users/login",
            LoginRequest {
                username: "wrongpw".to_string(),
                password: "changedit".to_string(),
            },
            None,
        )
        .await;

        assert_eq!(res.0, 401);

        diesel::delete(users::dsl::users.filter(users::dsl::id.eq(user.id)))
            .execute(&conn)
            .unwrap();
    }

    #[actix_rt::test]
    async fn test_login_with_unknown_username() {
        let res: (u16, ErrorResponse) = test_post(
            "/api/users/login",
            LoginRequest {
                username: "nobody-here".to_string(),
                password: "changeit".to_string(),
            },
            None,
        )
        .await;

        assert_eq!(res.0, 401);
    }
}
