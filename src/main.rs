use std::sync::Arc;
use std::time::Duration;

use moodmap_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        providers::{FoursquareProvider, GeoapifyProvider, OpenCageProvider, PlaceProvider},
        scoring::UniformScorer,
        PlaceAggregator,
    },
    store::{FeedbackStore, KeyValueStore, RedisStore, ReviewStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodmap_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .build()?;

    // Order matters: the deduplicator keeps the first provider's record, so
    // the richest source goes first
    let providers: Vec<Arc<dyn PlaceProvider>> = vec![
        Arc::new(FoursquareProvider::new(
            http_client.clone(),
            config.foursquare_api_key.clone(),
            config.foursquare_api_url.clone(),
        )),
        Arc::new(GeoapifyProvider::new(
            http_client.clone(),
            config.geoapify_api_key.clone(),
            config.geoapify_api_url.clone(),
        )),
        Arc::new(OpenCageProvider::new(
            http_client,
            config.opencage_api_key.clone(),
            config.opencage_api_url.clone(),
        )),
    ];

    let store: Arc<dyn KeyValueStore> = Arc::new(RedisStore::connect(&config.redis_url)?);
    let feedback = FeedbackStore::new(Arc::clone(&store));
    let reviews = ReviewStore::new(Arc::clone(&store));

    let aggregator = Arc::new(PlaceAggregator::new(
        providers,
        Arc::new(UniformScorer),
        feedback.clone(),
    ));

    let state = AppState {
        aggregator,
        feedback,
        reviews,
    };
    let app = create_router(state);

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "moodmap API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
