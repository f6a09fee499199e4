#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the member map application.
//!
//! Serves the REST API for the map frontend: the visible member set,
//! merged region stats for the filter sidebar, the location save path
//! (normalize → reconcile → privacy-fuzz → store), and a reverse
//! geocode proxy over the configured providers. Static frontend files
//! are served from `app/dist`.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use member_map_directory::{ProfileStore, store::InMemoryStore};
use member_map_geocoder::service_registry::{self, GeocodingService};

/// Shared application state.
pub struct AppState {
    /// Member profile store.
    pub store: Arc<dyn ProfileStore>,
    /// Shared HTTP client for geocoding providers.
    pub http: reqwest::Client,
    /// Enabled geocoding services, in priority order.
    pub services: Vec<GeocodingService>,
}

/// Starts the member map API server.
///
/// Builds the profile store and geocoding service registry, then starts
/// the Actix-Web HTTP server. This is a regular async function — the
/// caller is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let services = service_registry::enabled_services();
    log::info!(
        "Loaded {} geocoding services: {}",
        services.len(),
        services
            .iter()
            .map(|s| s.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let state = web::Data::new(AppState {
        store: Arc::new(InMemoryStore::new()),
        http: reqwest::Client::new(),
        services,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/members", web::get().to(handlers::members))
                    .route("/regions", web::get().to(handlers::regions))
                    .route(
                        "/members/{id}/location",
                        web::put().to(handlers::save_location),
                    )
                    .route("/geocode/reverse", web::get().to(handlers::reverse_geocode)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
