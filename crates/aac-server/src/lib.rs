//! HTTP backend for account and character management.
//!
//! Wires every domain crate into a single actix-web server: identity and
//! accounts, characters and rankings, guilds, news, and the game-server
//! status probe. All shared state is injected as `app_data`; handlers never
//! reach into ambient configuration.

pub mod status;

use aac_core::Settings;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Applies DDL for every entity in foreign-key dependency order.
async fn bootstrap(client: &Client) -> Result<(), aac_pg::PgErr> {
    aac_pg::prepare::<aac_auth::Account>(client).await?;
    aac_pg::prepare::<aac_players::Character>(client).await?;
    aac_pg::prepare::<aac_guilds::Guild>(client).await?;
    aac_pg::prepare::<aac_guilds::Rank>(client).await?;
    aac_pg::prepare::<aac_guilds::Membership>(client).await?;
    aac_pg::prepare::<aac_news::News>(client).await?;
    aac_pg::prepare::<aac_players::Death>(client).await?;
    Ok(())
}

#[rustfmt::skip]
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let client = aac_pg::db(&settings.database_url).await?;
    bootstrap(&client).await?;
    let crypto = web::Data::new(aac_auth::Crypto::new(
        settings.secret_key.as_bytes(),
        settings.access_ttl,
        settings.refresh_ttl,
    ));
    let bind = settings.bind_addr.clone();
    let settings = web::Data::new(settings);
    let client = web::Data::new(client);
    log::info!("starting server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(crypto.clone())
            .app_data(settings.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(aac_auth::register))
                    .route("/login", web::post().to(aac_auth::login)),
            )
            .service(
                web::scope("/accounts")
                    .route("/me", web::get().to(aac_auth::me))
                    .route("/me", web::patch().to(aac_auth::update_me))
                    .route("/change-password", web::post().to(aac_auth::change_password)),
            )
            .service(
                web::scope("/characters")
                    .route("", web::post().to(aac_players::create_character))
                    .route("", web::get().to(aac_players::list_characters))
                    .route("/search/{query}", web::get().to(aac_players::search_characters))
                    .route("/{name}", web::get().to(aac_players::get_character))
                    .route("/{name}", web::delete().to(aac_players::delete_character)),
            )
            .service(
                web::scope("/guilds")
                    .route("", web::post().to(aac_guilds::create_guild))
                    .route("", web::get().to(aac_guilds::list_guilds))
                    .route("/{id}", web::get().to(aac_guilds::get_guild))
                    .route("/{id}", web::patch().to(aac_guilds::update_guild))
                    .route("/{id}", web::delete().to(aac_guilds::disband_guild)),
            )
            .service(
                web::scope("/news")
                    .route("", web::post().to(aac_news::post_news))
                    .route("", web::get().to(aac_news::list_news))
                    .route("/{id}", web::get().to(aac_news::get_news))
                    .route("/{id}", web::patch().to(aac_news::amend_news))
                    .route("/{id}", web::delete().to(aac_news::retract_news)),
            )
            .service(
                web::scope("/deaths")
                    .route("", web::get().to(aac_players::recent_deaths))
                    .route("/character/{name}", web::get().to(aac_players::character_deaths)),
            )
            .service(
                web::scope("/highscores")
                    .route("/experience", web::get().to(aac_players::highscores_experience))
                    .route("/magic", web::get().to(aac_players::highscores_magic))
                    .route("/skill/{skill}", web::get().to(aac_players::highscores_skill)),
            )
            .service(
                web::scope("/server")
                    .route("/status", web::get().to(status::server_status))
                    .route("/online-players", web::get().to(status::online_players)),
            )
    })
    .workers(6)
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}
