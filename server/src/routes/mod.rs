use actix_web::web;
use serde::Deserialize;

use crate::middleware::Auth;

pub mod dashboard;
pub mod games;
pub mod rounds;
pub mod users;

/// Shared `?page=N` query for the paginated listings.
#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("").service(
            web::scope("/api")
                .service(
                    web::scope("/users")
                        .route("/register", web::post().to(users::register))
                        .route("/login", web::post().to(users::login)),
                )
                .service(
                    web::scope("/dashboard")
                        .wrap(Auth)
                        .route("", web::get().to(dashboard::dashboard)),
                )
                .service(
                    web::scope("/rounds")
                        .service(
                            web::scope("/mine")
                                .wrap(Auth)
                                .route("", web::get().to(rounds::mine)),
                        )
                        .route("", web::post().to(rounds::create))
                        .route("", web::get().to(rounds::list))
                        .service(
                            web::scope("/{id}")
                                .route("", web::get().to(rounds::view))
                                .route("", web::delete().to(rounds::delete))
                                .route("/questions", web::post().to(rounds::save_questions)),
                        ),
                )
                .service(
                    web::scope("/games")
                        .service(
                            web::scope("/mine")
                                .wrap(Auth)
                                .route("", web::get().to(games::mine)),
                        )
                        .route("/upcoming", web::get().to(games::upcoming))
                        .route("/archive", web::get().to(games::archive))
                        .route("", web::post().to(games::create))
                        .route("", web::get().to(games::list))
                        .service(
                            web::scope("/{id}")
                                .route("", web::get().to(games::view))
                                .route("", web::delete().to(games::delete))
                                .route("/rounds", web::post().to(games::add_round))
                                .route(
                                    "/rounds/{round_id}",
                                    web::delete().to(games::remove_round),
                                ),
                        ),
                ),
        ),
    );
}
