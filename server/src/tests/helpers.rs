#[cfg(test)]
pub mod tests {
    use actix_http::Request;
    use actix_service::Service;
    use actix_web::{dev::ServiceResponse, error::Error, test, App};
    use diesel::PgConnection;
    use dotenv::dotenv;
    use serde::{de::DeserializeOwned, Serialize};
    use serde_json;

    use auth::{create_jwt, get_identity_service, PrivateClaim};
    use db::models::User;

    use crate::routes::routes;

    pub async fn get_service() -> impl Service<Request, Response = ServiceResponse, Error = Error>
    {
        dotenv().ok();
        test::init_service(
            App::new()
                .wrap(get_identity_service())
                .data(db::new_pool())
                .configure(routes),
        )
        .await
    }

    /// Helper for HTTP GET integration tests
    pub async fn test_get<R>(route: &str, token: Option<String>) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let app = get_service().await;
        let mut req = test::TestRequest::get().uri(route);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", token));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;
        let json_body = serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        });

        (status, json_body)
    }

    /// Helper for HTTP POST integration tests
    pub async fn test_post<T: Serialize, R>(
        route: &str,
        params: T,
        token: Option<String>,
    ) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let app = get_service().await;

        let mut req = test::TestRequest::post().set_json(&params).uri(route);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", token));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;
        let json_body = serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        });

        (status, json_body)
    }

    /// Helper for HTTP DELETE integration tests
    pub async fn test_delete<R>(route: &str, token: Option<String>) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let app = get_service().await;
        let mut req = test::TestRequest::delete().uri(route);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", token));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;
        let json_body = serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        });

        (status, json_body)
    }

    pub fn get_auth_token(private_claim: PrivateClaim) -> String {
        create_jwt(private_claim).unwrap()
    }

    /// Inserts a user and returns it with a valid token.
    pub fn create_user_with_token(conn: &PgConnection, username: &str) -> (User, String) {
        let user = User::create(
            conn,
            username.to_string(),
            format!("{}@example.com", username),
            "changeit",
        )
        .unwrap();
        let token = create_jwt(PrivateClaim::new(user.id, user.username.clone())).unwrap();

        (user, token)
    }
}
