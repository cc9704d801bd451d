use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use destination_search::config::Settings;
use destination_search::core::TravelEngine;
use destination_search::routes::{self, AppState};
use destination_search::services::{ensure_indices, seed_sample_data, ElasticsearchClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting destination search service...");

    let client = ElasticsearchClient::connect(&settings.elasticsearch)
        .await
        .map_err(|e| {
            error!("Failed to connect to Elasticsearch: {}", e);
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
        })?;

    if settings.bootstrap.create_indices {
        match ensure_indices(&client, &settings.indices).await {
            Ok(created) => info!("Index provisioning complete ({} created)", created),
            Err(e) => error!("Index provisioning failed: {}", e),
        }
    }

    if settings.bootstrap.seed_sample_data {
        seed_sample_data(&client, &settings.indices).await;
    }

    let engine = TravelEngine::new(
        client,
        settings.indices.clone(),
        settings.recommendation.trend_limit,
    );

    info!(
        "Engine ready (trend limit: {})",
        settings.recommendation.trend_limit
    );

    let app_state = AppState {
        engine: Arc::new(engine),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
