use std::env;

use actix_identity::{Identity, IdentityPolicy, IdentityService};
use actix_web::{
    dev::{ServiceRequest, ServiceResponse},
    error,
};
use argon2::{Config, Variant};
use chrono::{Duration, Utc};
use futures_util::future::{ok, Ready};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use serde::{Deserialize, Serialize};

use errors::Error;

static ARGON_CONFIG: Lazy<Config> = Lazy::new(|| Config {
    variant: Variant::Argon2id,
    ..Default::default()
});

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrivateClaim {
    pub id: i32,
    pub username: String,
    exp: i64,
}

impl PrivateClaim {
    pub fn new(id: i32, username: String) -> Self {
        PrivateClaim {
            id,
            username,
            exp: (Utc::now() + Duration::hours(3)).timestamp(),
        }
    }

    pub fn set_exp(&mut self, exp: i64) {
        self.exp = exp;
    }
}

pub struct AuthHeaderIdentityPolicy;

impl AuthHeaderIdentityPolicy {
    fn new() -> Self {
        AuthHeaderIdentityPolicy {}
    }
}

impl IdentityPolicy for AuthHeaderIdentityPolicy {
    type Future = Ready<Result<Option<String>, error::Error>>;
    type ResponseFuture = Ready<Result<(), error::Error>>;

    fn from_request(&self, request: &mut ServiceRequest) -> Self::Future {
        let mut token: Option<String> = None;
        let auth_token = request.headers().get("Authorization");

        if let Some(auth_token) = auth_token {
            let token_string = auth_token.to_str();
            if token_string.is_ok() {
                token = Some(String::from(token_string.unwrap()).replace("Bearer ", ""));
            }
        }

        ok(token)
    }

    fn to_response<B>(
        &self,
        _identity: Option<String>,
        _changed: bool,
        _response: &mut ServiceResponse<B>,
    ) -> Self::ResponseFuture {
        ok(())
    }
}

pub fn create_jwt(private_claim: PrivateClaim) -> Result<String, Error> {
    let encoding_key = EncodingKey::from_secret(&env::var("JWT_KEY").unwrap().as_ref());
    encode(&Header::default(), &private_claim, &encoding_key)
        .map_err(|e| Error::CannotEncodeJwtToken(e.to_string()))
}

pub fn decode_jwt(token: &str) -> Result<PrivateClaim, Error> {
    let jwt_key = env::var("JWT_KEY").unwrap();
    let decoding_key = DecodingKey::from_secret(&jwt_key.as_ref());
    decode::<PrivateClaim>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| Error::CannotDecodeJwtToken(e.to_string()))
}

pub fn hash_password(password: &str) -> Result<String, Error> {
    argon2::hash_encoded(password.as_bytes(), salt().as_bytes(), &ARGON_CONFIG)
        .map_err(|e| Error::CannotHashPassword(e.to_string()))
}

/// Checks a supplied plaintext against the encoded hash. The plaintext is
/// never persisted or logged.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    argon2::verify_encoded(hash, password.as_bytes())
        .map_err(|e| Error::CannotHashPassword(e.to_string()))
}

fn salt() -> String {
    let mut rng = thread_rng();
    (0..32).map(|_| rng.sample(Alphanumeric)).collect()
}

pub fn get_identity_service() -> IdentityService<AuthHeaderIdentityPolicy> {
    IdentityService::new(AuthHeaderIdentityPolicy::new())
}

pub fn get_claim_from_identity(id: Identity) -> Result<(PrivateClaim, String), Error> {
    if let Some(token) = id.identity() {
        let claim = decode_jwt(&token)?;
        return Ok((claim, token));
    }
    Err(Error::Unauthorized)
}

/// Uniform ownership check for every mutating round/game operation.
pub fn ensure_owner(acting_user_id: i32, owner_id: i32) -> Result<(), Error> {
    if acting_user_id != owner_id {
        return Err(Error::Forbidden);
    }

    Ok(())
}
