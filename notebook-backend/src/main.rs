use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod error;
mod models;
mod notes;

use config::Config;
use db::Database;
use notes::NoteService;

pub struct AppState {
    pub db: Arc<Database>,
    pub service: NoteService,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!("Notebook backend v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using database at {}", config.database_url);

    let db = Arc::new(Database::new(&config.database_url).expect("Failed to initialize database"));
    let service = NoteService::new(Arc::clone(&db));

    log::info!("Starting notebook server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                service: service.clone(),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
