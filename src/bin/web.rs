//! Scoreboard web host: the board commands over HTTP, backed by the JSON file store.
//! Run with: cargo run --bin web
//! Env: HOST (default 0.0.0.0), PORT (default 8080), SCOREBOARD_PATH (default scoreboards.json).

use actix_web::{web::Data, App, HttpServer};
use duel_scoreboard::api::{self, ApiState};
use duel_scoreboard::{Config, JsonFileStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!("Scoreboards stored in {}", config.data_path.display());
    let store = JsonFileStore::new(config.data_path.clone());
    let state = Data::new(ApiState::new(Box::new(store)));

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .bind(bind)?
        .run()
        .await
}
