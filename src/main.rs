use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scoreline::config::Config;
use scoreline::handlers::{health, predict, team, AppState};
use scoreline::predictor::default_ensemble;
use scoreline::scraper::{MatchScraper, ScraperConfig};
use scoreline::store::Database;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store = Arc::new(Database::connect(&config.database_url).await?);
    let scraper = MatchScraper::new(ScraperConfig::new(config.scraper_url.clone()))?;
    let predictor = default_ensemble(store.clone());

    let state = web::Data::new(AppState {
        store,
        scraper,
        predictor,
    });

    info!(
        "starting scoreline API at http://{}:{}",
        config.host, config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/predict", web::get().to(predict::predict))
            .route("/team_id", web::get().to(team::team_id))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
