use actix_web::{
    web::{block, Data, Json},
    Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::{create_jwt, PrivateClaim};
use db::{
    get_conn,
    models::{User, UserDetails},
    PgPool,
};
use errors::Error;

use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = "3", max = "64"))]
    username: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = "6", message = "Password must be at least 6 characters"))]
    password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDetails,
}

pub async fn register(
    pool: Data<PgPool>,
    params: Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, Error> {
    validate(&params)?;

    let conn = get_conn(&pool)?;

    let res = block(move || {
        let mut errors = vec![];
        if User::username_taken(&conn, &params.username)? {
            errors.push("Please use a different username.".to_string());
        }
        if User::email_taken(&conn, &params.email)? {
            errors.push("Please use a different email address.".to_string());
        }
        if !errors.is_empty() {
            return Err(Error::ValidationError(errors));
        }

        User::create(
            &conn,
            params.username.clone(),
            params.email.clone(),
            &params.password,
        )
    })
    .await?;

    let user = res?;

    let token = create_jwt(PrivateClaim::new(user.id, user.username.clone()))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
