use actix_web::{web, HttpResponse};
use serde_json::json;

pub mod admin;
pub mod auth;
pub mod feed;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
    cfg.service(
        web::scope("/api")
            .route("", web::get().to(api_index))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register::post))
                    .route("/login", web::post().to(auth::login::post)),
            )
            .service(
                web::scope("/users")
                    .route("/me", web::get().to(users::me::get))
                    .route("/update-profile", web::post().to(users::update_profile::post))
                    .route("/save", web::post().to(users::save::post))
                    .route("/report", web::post().to(users::report::post))
                    .route("/saved", web::get().to(users::saved::get))
                    .route("/reported", web::get().to(users::reported::get)),
            )
            .service(
                web::scope("/admin")
                    .route("/users", web::get().to(admin::users::get))
                    .route("/users/{id}/credits", web::put().to(admin::credits::put)),
            )
            .service(
                web::scope("/feed")
                    .route("/reddit", web::get().to(feed::reddit::get))
                    .route("/twitter", web::get().to(feed::twitter::get)),
            ),
    );
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Welcome to the server!")
}

async fn api_index() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "API is working" }))
}
